use leptos::prelude::*;

use lineup_client::lineup_common::PROFESSOR_STATUSES;
use lineup_client::{use_queue_context, use_queue_state, use_toast};

/// Radio group of professor statuses. The checked entry follows the latest
/// snapshot; picking one emits `update_status`.
#[component]
pub fn StatusPicker() -> impl IntoView {
    let ctx = use_queue_context();
    let toast = use_toast();
    let state = use_queue_state();

    let selected = move || state.with(|s| s.as_ref().map(|s| s.professor_status.clone()));

    PROFESSOR_STATUSES
        .into_iter()
        .map(|status| {
            let ctx = ctx.clone();
            view! {
                <label class="status-option">
                    <input
                        type="radio"
                        name="professor-status"
                        value=status
                        prop:checked=move || selected().as_deref() == Some(status)
                        on:change=move |_| {
                            if let Err(e) = ctx.update_status(status) {
                                toast.warning(e.to_string());
                            }
                        }
                    />
                    {status}
                </label>
            }
        })
        .collect_view()
}
