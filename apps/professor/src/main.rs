//! LineUp professor dashboard.
//!
//! Sets the professor's status, calls the next token, clears the one being
//! served and shows the waiting line.

mod app;
mod components;

fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    leptos::mount::mount_to_body(|| leptos::view! { <app::App/> });
}
