//! Ready-to-use components for the queue display.
//!
//! Each component reads [`QueueView`](crate::view::QueueView) from the
//! surrounding `QueueProvider` and binds its strings as text, never as markup.
//! Element ids and classes match the stylesheet shipped with the apps.

use leptos::prelude::*;

use crate::hooks::{use_queue_context, use_queue_view, use_theme};
use crate::toast::ToastContext;
use crate::view::{CurrentTokenView, EMPTY_QUEUE_PLACEHOLDER, IDLE_PLACEHOLDER, TokenRow};

/// Professor status badge. Reads `Disconnected` while the socket is down.
#[component]
pub fn StatusBadge() -> impl IntoView {
    let view = use_queue_view();
    view! {
        <span id="status" class=move || view.with(|v| v.status.class.clone())>
            {move || view.with(|v| v.status.label.clone())}
        </span>
    }
}

/// The token being served, or a placeholder.
#[component]
pub fn CurrentTokenCard() -> impl IntoView {
    let view = use_queue_view();
    view! {
        <div id="current-token">
            {move || match view.with(|v| v.current.clone()) {
                CurrentTokenView::Serving(row) => view! {
                    <div class="token-id">{row.headline()}</div>
                    <div class="token-info">
                        <strong>{row.name}</strong>
                        <br />
                        {row.kind}
                    </div>
                }
                .into_any(),
                CurrentTokenView::Idle => {
                    view! { <p class="waiting">{IDLE_PLACEHOLDER}</p> }.into_any()
                }
            }}
        </div>
    }
}

/// Number of people waiting.
#[component]
pub fn QueueCount() -> impl IntoView {
    let view = use_queue_view();
    view! { <span id="queue-count">{move || view.with(|v| v.queue.count)}</span> }
}

/// The waiting line in server order. The whole list is rebuilt per snapshot.
#[component]
pub fn QueueList() -> impl IntoView {
    let view = use_queue_view();
    view! {
        <div id="queue-list">
            {move || {
                let queue = view.with(|v| v.queue.clone());
                if queue.is_empty() {
                    view! { <p class="empty-queue">{EMPTY_QUEUE_PLACEHOLDER}</p> }.into_any()
                } else {
                    queue
                        .rows
                        .into_iter()
                        .map(|row| view! { <QueueItem row=row /> })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn QueueItem(row: TokenRow) -> impl IntoView {
    view! {
        <div class="queue-item">
            <div class="queue-item-info">
                <div class="queue-item-name">{row.name}</div>
                <div class="queue-item-type">{row.kind}</div>
            </div>
            <div class="queue-item-id">{row.id_label}</div>
        </div>
    }
}

/// Light/dark switch. Needs a `ThemeContext` from `provide_theme_context`.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let theme = use_theme();
    view! {
        <button id="themeToggle" class="theme-toggle" on:click=move |_| theme.toggle()>
            <span class="theme-toggle-icon">{move || theme.theme.get().icon()}</span>
            <span id="themeText">{move || theme.theme.get().toggle_label()}</span>
        </button>
    }
}

/// Headless component that turns session errors into error toasts.
///
/// Renders nothing. Errors are already logged when recorded, so without a
/// `ToastProvider` this does nothing.
#[component]
pub fn ErrorToastHandler() -> impl IntoView {
    let ctx = use_queue_context();
    let toast = use_context::<ToastContext>();

    Effect::new(move |_| {
        let Some(error) = ctx.last_error.get() else {
            return;
        };
        if let Some(toast) = toast {
            toast.error(error.to_string());
        }
    });
}
