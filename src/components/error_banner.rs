use leptos::prelude::*;

/// Inline error message; renders nothing while `message` is `None`.
#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || message.get().map(|msg| view! { <div class="error">{msg}</div> })
}
