//! Application root component.

use leptos::prelude::*;

use lineup_client::{
    ClientConfig, CurrentTokenCard, ErrorToastHandler, QueueCount, QueueList, QueueProvider,
    StatusBadge, ThemeToggle, ToastProvider, provide_theme_context,
};

use crate::components::TokenRequestForm;

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_page();
    provide_theme_context(&config.theme_key);
    let (toast_limit, toast_secs, error_toast_secs) =
        (config.toast_limit, config.toast_secs, config.error_toast_secs);

    view! {
        <ToastProvider
            limit=toast_limit
            toast_secs=toast_secs
            error_toast_secs=error_toast_secs
        >
            <QueueProvider config=config>
                <header class="header">
                    <h1>"LineUp"</h1>
                    <ThemeToggle/>
                </header>
                <main class="container">
                    <section class="card">
                        <h2>"Professor Status"</h2>
                        <StatusBadge/>
                    </section>
                    <section class="card">
                        <h2>"Now Serving"</h2>
                        <CurrentTokenCard/>
                    </section>
                    <section class="card">
                        <h2>"Join the Queue"</h2>
                        <TokenRequestForm/>
                    </section>
                    <section class="card">
                        <h2>"Waiting " <span class="count-badge"><QueueCount/></span></h2>
                        <QueueList/>
                    </section>
                </main>
                <ErrorToastHandler/>
            </QueueProvider>
        </ToastProvider>
    }
}
