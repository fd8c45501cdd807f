use leptos::prelude::*;

use lineup_client::view::CurrentTokenView;
use lineup_client::{ClientError, use_queue_context, use_queue_view, use_toast};

const NOBODY: &str = "No one";

/// Who is being served, with the `Next Token` and `Clear` buttons.
#[component]
pub fn ServingControls() -> impl IntoView {
    let ctx = use_queue_context();
    let toast = use_toast();
    let view = use_queue_view();

    let report = move |result: Result<(), ClientError>| {
        if let Err(e) = result {
            toast.warning(e.to_string());
        }
    };

    let next_ctx = ctx.clone();
    let clear_ctx = ctx;

    view! {
        <div class="current-serving">
            {move || match view.with(|v| v.current.clone()) {
                CurrentTokenView::Serving(row) => view! {
                    <div class="serving-title">{row.title()}</div>
                    <div class="serving-type">{row.kind}</div>
                }
                .into_any(),
                CurrentTokenView::Idle => view! { <div class="waiting">{NOBODY}</div> }.into_any(),
            }}
        </div>
        <div class="serving-buttons">
            <button class="btn btn-primary" on:click=move |_| report(next_ctx.next_token())>
                "Next Token"
            </button>
            <button class="btn btn-danger" on:click=move |_| report(clear_ctx.clear_current())>
                "Clear"
            </button>
        </div>
    }
}
