mod app;
mod browser;
mod components;
mod pages;

use app::App;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // tracing events from the core crate reach the console through `log`
    let _ = console_log::init_with_level(level);

    leptos::mount::mount_to_body(App);
}
