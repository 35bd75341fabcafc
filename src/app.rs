//! YouKanBan Frontend App
//!
//! Header plus the routed view: board, sign-in or sign-up.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{AppHeader, BoardView, LogPanel, SignIn, SignUp};
use crate::config;
use crate::context::{AppContext, Services};
use crate::routes::{use_route, Route};
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::new());
    let services = config::supabase_config().map(Services::connect);

    // Provide context to all children
    let ctx = AppContext::new(store, services);
    provide_context(ctx);
    ctx.start_session();

    let route = use_route();

    view! {
        <div class="App">
            <AppHeader />
            {move || match route.get() {
                Route::Board => view! { <BoardView /> }.into_any(),
                Route::SignIn => view! { <SignIn /> }.into_any(),
                Route::SignUp => view! { <SignUp /> }.into_any(),
            }}
            <LogPanel />
        </div>
    }
}
