//! Header Component
//!
//! Greeting plus Logout, or Sign In | Sign Up links when anonymous.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::routes::Route;
use crate::store::store_user;

#[component]
pub fn AppHeader() -> impl IntoView {
    let ctx = use_app_context();
    let user = move || store_user(&ctx.store);

    let greeting = move || match user() {
        Some(user) => format!("Hello, {}!", user.greeting_name()),
        None => "Sign in to save your progress".to_string(),
    };

    view! {
        <header class="header-container">
            <h1 class="title">"Welcome to YouKanBan!"</h1>
            <h2 class="greeting">{greeting}</h2>
            <h2>"Today's Tasks"</h2>
            <nav class="auth-links">
                <Show
                    when=move || user().is_some()
                    fallback=|| view! {
                        <a href=Route::SignIn.href()>"Sign In"</a>
                        " | "
                        <a href=Route::SignUp.href()>"Sign Up"</a>
                    }
                >
                    <button class="logout-button" on:click=move |_| ctx.sign_out()>"Logout"</button>
                </Show>
            </nav>
        </header>
    }
}
