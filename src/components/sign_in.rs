//! Sign-In Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use kanban_core::repository::SessionProvider;

use crate::config::NO_BACKEND_MESSAGE;
use crate::context::use_app_context;
use crate::routes::{navigate, Route};

#[component]
pub fn SignIn() -> impl IntoView {
    let ctx = use_app_context();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (message, set_message) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(auth) = ctx.auth() else {
            set_message.set(format!("Error: {}", NO_BACKEND_MESSAGE));
            return;
        };
        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            match auth.sign_in_with_password(&email, &password).await {
                Ok(_) => {
                    set_message.set("Sign-in successful! Redirecting to Task Board...".to_string());
                    navigate(Route::Board);
                }
                Err(e) => set_message.set(format!("Error: {}", e)),
            }
        });
    };

    view! {
        <div class="auth-form">
            <h2>"Sign In"</h2>
            <form on:submit=on_submit>
                <input
                    type="email"
                    placeholder="Email"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    required
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button type="submit">"Sign In"</button>
            </form>
            <Show when=move || !message.get().is_empty()>
                <p class="auth-message">{move || message.get()}</p>
            </Show>
            <p>"No account? " <a href=Route::SignUp.href()>"Sign Up"</a></p>
        </div>
    }
}
