use leptos::prelude::*;

use lineup_client::use_queue_view;

/// `Total: <n>` followed by one `#<id> - <name> (<type>)` line per token.
#[component]
pub fn ProfessorQueue() -> impl IntoView {
    let view = use_queue_view();

    view! {
        <div class="queue-total">{move || format!("Total: {}", view.with(|v| v.queue.count))}</div>
        <ul class="professor-queue">
            {move || {
                view.with(|v| v.queue.rows.iter().map(|row| row.summary()).collect::<Vec<_>>())
                    .into_iter()
                    .map(|line| view! { <li>{line}</li> })
                    .collect_view()
            }}
        </ul>
    }
}
