//! Student page components.

mod token_form;

pub use token_form::TokenRequestForm;
