//! # LineUp Client
//!
//! Reactive Leptos client for the LineUp live queue.
//!
//! The server pushes a complete `state_update` snapshot over Socket.IO whenever
//! the queue changes. This crate keeps the connection, turns each snapshot into
//! a [`QueueView`], and offers components that render it, plus the join form
//! and the light/dark theme toggle.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use leptos::prelude::*;
//! use lineup_client::{
//!     provide_theme_context, ClientConfig, CurrentTokenCard, QueueList, QueueProvider,
//!     StatusBadge, ThemeToggle,
//! };
//!
//! #[component]
//! fn App() -> impl IntoView {
//!     let config = ClientConfig::from_page();
//!     provide_theme_context(&config.theme_key);
//!
//!     view! {
//!         <QueueProvider config=config>
//!             <ThemeToggle />
//!             <StatusBadge />
//!             <CurrentTokenCard />
//!             <QueueList />
//!         </QueueProvider>
//!     }
//! }
//! ```
//!
//! The protocol handling lives in [`QueueSession`], which has no browser
//! dependencies and is driven frame by frame in tests.

pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod form;
pub mod hooks;
pub mod provider;
pub mod session;
pub mod storage;
pub mod theme;
pub mod toast;
pub mod view;

pub use components::{
    CurrentTokenCard, ErrorToastHandler, QueueCount, QueueList, StatusBadge, ThemeToggle,
};
pub use config::ClientConfig;
pub use context::{QueueConnection, QueueContext};
pub use error::ClientError;
pub use form::{JoinForm, TOKEN_TYPES, confirmation_message};
pub use hooks::{
    use_connection, use_queue_context, use_queue_state, use_queue_view, use_theme, use_toast,
};
pub use provider::QueueProvider;
pub use session::{QueueSession, SessionEvent, SessionPhase};
pub use storage::{BrowserStore, MemoryStore, PreferenceStore};
pub use theme::{Theme, ThemeContext, ThemeController, provide_theme_context};
pub use toast::{Toast, ToastContext, ToastProvider, ToastType};
pub use view::{QueueView, status_class};

pub use lineup_common;
