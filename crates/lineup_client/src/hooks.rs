use leptos::prelude::*;

use lineup_common::QueueState;

use crate::context::{QueueConnection, QueueContext};
use crate::theme::ThemeContext;
use crate::toast::ToastContext;
use crate::view::QueueView;

/// Access the queue context directly.
///
/// # Panics
///
/// Panics if called outside of a `QueueProvider`.
pub fn use_queue_context() -> QueueContext {
    expect_context::<QueueContext>()
}

/// The rendered queue view, replaced on every snapshot.
pub fn use_queue_view() -> Signal<QueueView> {
    let ctx = expect_context::<QueueContext>();
    ctx.view.into()
}

/// The last raw snapshot, `None` until the first `state_update`.
pub fn use_queue_state() -> Signal<Option<QueueState>> {
    let ctx = expect_context::<QueueContext>();
    ctx.snapshot.into()
}

/// Connection state and manual open/close controls.
///
/// ```rust,ignore
/// let connection = use_connection();
/// let label = move || if connection.connected.get() { "🟢 Connected" } else { "⚫ Disconnected" };
/// ```
pub fn use_connection() -> QueueConnection {
    expect_context::<QueueContext>().connection()
}

pub fn use_theme() -> ThemeContext {
    expect_context::<ThemeContext>()
}

pub fn use_toast() -> ToastContext {
    expect_context::<ToastContext>()
}
