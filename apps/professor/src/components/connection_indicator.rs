use leptos::prelude::*;

use lineup_client::use_connection;

/// `🟢 Connected` once the namespace is joined, `⚫ Disconnected` otherwise.
///
/// The socket retries on its own; the button forces an attempt right away.
#[component]
pub fn ConnectionIndicator() -> impl IntoView {
    let connection = use_connection();
    let connected = connection.connected;
    let open = connection.open.clone();

    view! {
        <div class="connection-indicator">
            <span class=move || if connected.get() { "conn conn-up" } else { "conn conn-down" }>
                {move || if connected.get() { "🟢 Connected" } else { "⚫ Disconnected" }}
            </span>
            <Show when=move || !connected.get()>
                {
                    let open = open.clone();
                    view! {
                        <button class="btn" on:click=move |_| open()>
                            "Reconnect"
                        </button>
                    }
                }
            </Show>
        </div>
    }
}
