use equiviz_core::AuthMode;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;
use crate::components::error_banner::ErrorBanner;

#[component]
pub fn LoginPage() -> impl IntoView {
    let app = use_app();
    let state = app.state;

    let mode = Memo::new(move |_| state.with(|s| s.auth_mode));
    let loading = Memo::new(move |_| state.with(|s| s.loading));
    let error = Memo::new(move |_| state.with(|s| s.error.clone()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let controller = app.controller();
        spawn_local(async move {
            // Failures land in the view state's error message
            let _ = controller.submit_auth().await;
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-card">
                <h1>"Chemical Equipment Visualizer"</h1>
                <h2>{move || mode.get().label()}</h2>

                <ErrorBanner message=error />

                <form on:submit=on_submit>
                    <input
                        type="text"
                        placeholder="Username"
                        required
                        prop:value=move || state.with(|s| s.form.username.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            app.controller().edit_form(|f| f.username = value);
                        }
                    />
                    <Show when=move || mode.get() == AuthMode::Register>
                        <input
                            type="email"
                            placeholder="Email (optional)"
                            prop:value=move || state.with(|s| s.form.email.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                app.controller().edit_form(|f| f.email = value);
                            }
                        />
                    </Show>
                    <input
                        type="password"
                        placeholder="Password"
                        required
                        prop:value=move || state.with(|s| s.form.password.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            app.controller().edit_form(|f| f.password = value);
                        }
                    />
                    <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                        {move || if loading.get() { "Processing..." } else { mode.get().label() }}
                    </button>
                </form>

                <p class="auth-toggle">
                    {move || match mode.get() {
                        AuthMode::Login => "Don't have an account? ",
                        AuthMode::Register => "Already have an account? ",
                    }}
                    <span on:click=move |_| app.controller().toggle_auth_mode()>
                        {move || mode.get().toggled().label()}
                    </span>
                </p>
            </div>
        </div>
    }
}
