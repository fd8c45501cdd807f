//! LineUp student page.
//!
//! Shows the professor's status, who is being served and who is waiting, and
//! lets a student put their name in the queue.
//!
//! Serve with `trunk serve` next to the LineUp server, or point the page at a
//! different server through the `lineup-config` script element.

mod app;
mod components;

fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    leptos::mount::mount_to_body(|| leptos::view! { <app::App/> });
}
