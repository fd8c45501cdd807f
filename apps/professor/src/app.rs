//! Application root component.

use leptos::prelude::*;

use lineup_client::{
    ClientConfig, ErrorToastHandler, QueueProvider, ThemeToggle, ToastProvider,
    provide_theme_context,
};

use crate::components::{ConnectionIndicator, ProfessorQueue, ServingControls, StatusPicker};

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
                    <h1>"🎓 LineUp"</h1>
                    <ThemeToggle/>
                </header>
                <main class="container">
                    <ConnectionIndicator/>
                    <section class="card">
                        <h2>"Professor Status"</h2>
                        <StatusPicker/>
                    </section>
                    <section class="card">
                        <h2>"Currently Serving"</h2>
                        <ServingControls/>
                    </section>
                    <section class="card">
                        <h2>"Queue"</h2>
                        <ProfessorQueue/>
                    </section>
                </main>
                <ErrorToastHandler/>
            </QueueProvider>
        </ToastProvider>
    }
}
