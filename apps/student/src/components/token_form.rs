use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use lineup_client::{JoinForm, TOKEN_TYPES, confirmation_message, use_queue_context, use_toast};

/// Join-queue form.
///
/// A blank name shows a warning and sends nothing. A valid submission emits
/// `request_token`, clears the form and confirms with a toast. The request is
/// sent even while disconnected; the next snapshot shows whether it landed.
#[component]
pub fn TokenRequestForm() -> impl IntoView {
    let ctx = use_queue_context();
    let toast = use_toast();
    let form = RwSignal::new(JoinForm::default());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let mut current = form.get_untracked();
        match ctx.submit_join(&mut current) {
            Ok(request) => {
                form.set(current);
                toast.success(confirmation_message(&request));
            }
            Err(e) => toast.warning(e.to_string()),
        }
    };

    view! {
        <form id="token-form" on:submit=on_submit>
            <div class="form-group">
                <label for="name">"Your Name"</label>
                <input
                    type="text"
                    id="name"
                    placeholder="Enter your name"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="type">"Request Type"</label>
                <select
                    id="type"
                    prop:value=move || form.with(|f| f.kind.clone())
                    on:change=move |ev| form.update(|f| f.kind = event_target_value(&ev))
                >
                    {TOKEN_TYPES
                        .into_iter()
                        .map(|kind| view! { <option value=kind>{kind}</option> })
                        .collect_view()}
                </select>
            </div>
            <button type="submit" class="btn btn-primary">"Request Token"</button>
        </form>
    }
}
