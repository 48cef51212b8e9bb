use equiviz_core::{Controller, HttpBackend, ViewState};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::browser::{api_config, LocalStorageTokens, SignalState};
use crate::pages::dashboard::DashboardPage;
use crate::pages::login::LoginPage;

pub type WebController = Controller<HttpBackend, LocalStorageTokens, SignalState>;

/// Shared by every view: the reactive state and the controller that mutates it.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub state: RwSignal<ViewState>,
    controller: StoredValue<WebController, LocalStorage>,
}

impl AppContext {
    pub fn controller(&self) -> WebController {
        self.controller.get_value()
    }
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}

#[component]
pub fn App() -> impl IntoView {
    let state = RwSignal::new(ViewState::default());
    let controller = Controller::new(
        HttpBackend::new(api_config()),
        LocalStorageTokens,
        SignalState(state),
    );
    let ctx = AppContext {
        state,
        controller: StoredValue::new_local(controller.clone()),
    };
    provide_context(ctx);

    // Pick up a session left in localStorage by a previous visit
    spawn_local(async move {
        controller.restore_session().await;
    });

    let authenticated = Memo::new(move |_| state.with(|s| s.authenticated));

    view! {
        <style>{include_str!("styles.css")}</style>
        <Show
            when=move || authenticated.get()
            fallback=|| view! { <LoginPage /> }
        >
            <DashboardPage />
        </Show>
    }
}
