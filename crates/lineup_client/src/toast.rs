//! Non-blocking toast notifications.

use std::collections::VecDeque;
use std::time::Duration;

use leptos::prelude::*;

/// Toast notification type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Error,
    Warning,
    Info,
}

/// A single toast notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub toast_type: ToastType,
}

/// Bounded list of visible toasts; the oldest is dropped past the limit.
#[derive(Clone, Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    next_id: u64,
    limit: usize,
}

impl ToastQueue {
    pub fn new(limit: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            next_id: 0,
            limit: limit.max(1),
        }
    }

    pub fn push(&mut self, message: impl Into<String>, toast_type: ToastType) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push_back(Toast {
            id,
            message: message.into(),
            toast_type,
        });
        while self.toasts.len() > self.limit {
            self.toasts.pop_front();
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// Toast context for managing notifications.
#[derive(Clone, Copy)]
pub struct ToastContext {
    pub toasts: RwSignal<ToastQueue>,
    lifetime: Duration,
    error_lifetime: Duration,
}

impl ToastContext {
    pub fn new(limit: usize, lifetime: Duration, error_lifetime: Duration) -> Self {
        Self {
            toasts: RwSignal::new(ToastQueue::new(limit)),
            lifetime,
            error_lifetime,
        }
    }

    /// Show a toast notification; it dismisses itself after its lifetime.
    pub fn show(&self, message: impl Into<String>, toast_type: ToastType) {
        let Some(id) = self
            .toasts
            .try_update_untracked(|queue| queue.push(message, toast_type))
        else {
            return;
        };
        self.toasts.notify();

        let lifetime = match toast_type {
            ToastType::Error => self.error_lifetime,
            _ => self.lifetime,
        };
        let toasts = self.toasts;
        set_timeout(
            move || {
                if toasts.try_update_untracked(|queue| queue.dismiss(id)).is_some() {
                    toasts.notify();
                }
            },
            lifetime,
        );
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, ToastType::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, ToastType::Error);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(message, ToastType::Warning);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(message, ToastType::Info);
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|queue| queue.dismiss(id));
    }
}

/// Toast provider component.
#[component]
pub fn ToastProvider(
    #[prop(default = 5)] limit: usize,
    #[prop(default = 5)] toast_secs: u64,
    #[prop(default = 8)] error_toast_secs: u64,
    children: Children,
) -> impl IntoView {
    let ctx = ToastContext::new(
        limit,
        Duration::from_secs(toast_secs),
        Duration::from_secs(error_toast_secs),
    );
    provide_context(ctx);

    view! {
        {children()}
        <ToastContainer ctx=ctx />
    }
}

#[component]
fn ToastContainer(ctx: ToastContext) -> impl IntoView {
    view! {
        <div class="toast-container" role="status" aria-live="polite">
            {move || {
                ctx.toasts.with(|queue| queue.iter().cloned().collect::<Vec<_>>())
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        view! { <ToastItem toast=toast on_dismiss=move || ctx.dismiss(id) /> }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast, on_dismiss: impl Fn() + 'static) -> impl IntoView {
    let (class, icon) = match toast.toast_type {
        ToastType::Success => ("toast toast-success", "✓"),
        ToastType::Error => ("toast toast-error", "✕"),
        ToastType::Warning => ("toast toast-warning", "⚠"),
        ToastType::Info => ("toast toast-info", "ℹ"),
    };

    view! {
        <div class=class>
            <span class="toast-icon">{icon}</span>
            <span class="toast-message">{toast.message}</span>
            <button class="toast-dismiss" on:click=move |_| on_dismiss()>
                "×"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut queue = ToastQueue::new(5);
        assert_eq!(queue.push("one", ToastType::Info), 0);
        assert_eq!(queue.push("two", ToastType::Success), 1);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_oldest_dropped_past_limit() {
        let mut queue = ToastQueue::new(2);
        queue.push("one", ToastType::Info);
        queue.push("two", ToastType::Info);
        queue.push("three", ToastType::Warning);
        let messages: Vec<&str> = queue.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let mut queue = ToastQueue::new(5);
        let first = queue.push("one", ToastType::Info);
        queue.push("two", ToastType::Error);
        queue.dismiss(first);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.iter().next().map(|t| t.id), Some(1));
        queue.dismiss(42);
        assert!(!queue.is_empty());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use leptos::reactive::owner::Owner;
    use leptos::task::Executor;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_show_wakes_toast_readers() {
        let _ = Executor::init_wasm_bindgen();
        let owner = Owner::new();
        owner.set();

        let toast = ToastContext::new(3, Duration::from_secs(60), Duration::from_secs(60));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        Effect::new(move |_| {
            sink.lock().unwrap().push(toast.toasts.with(|queue| queue.len()));
        });
        Executor::tick().await;

        toast.success("Token requested");
        Executor::tick().await;
        toast.error("Server unreachable");
        Executor::tick().await;

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }
}
