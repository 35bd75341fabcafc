//! Sign-Up Form Component
//!
//! The display name is sent as `displayName` user metadata and shown in the
//! header greeting.

use leptos::prelude::*;
use leptos::task::spawn_local;

use kanban_core::repository::SessionProvider;

use crate::config::NO_BACKEND_MESSAGE;
use crate::context::use_app_context;
use crate::routes::{navigate, Route};

#[component]
pub fn SignUp() -> impl IntoView {
    let ctx = use_app_context();
    let (display_name, set_display_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (message, set_message) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(auth) = ctx.auth() else {
            set_message.set(format!("Error: {}", NO_BACKEND_MESSAGE));
            return;
        };
        let display_name = display_name.get_untracked();
        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            let name = Some(display_name.trim()).filter(|n| !n.is_empty());
            match auth.sign_up(&email, &password, name).await {
                Ok(Some(_)) => {
                    set_message.set("Sign-up successful! Redirecting to Task Board...".to_string());
                    navigate(Route::Board);
                }
                // Email confirmation pending: no session yet
                Ok(None) => set_message.set(
                    "Sign-up successful! Check your email to confirm your account.".to_string(),
                ),
                Err(e) => set_message.set(format!("Error: {}", e)),
            }
        });
    };

    view! {
        <div class="auth-form">
            <h2>"Sign Up"</h2>
            <form on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Display Name"
                    prop:value=move || display_name.get()
                    on:input=move |ev| set_display_name.set(event_target_value(&ev))
                />
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
                <button type="submit">"Sign Up"</button>
            </form>
            <Show when=move || !message.get().is_empty()>
                <p class="auth-message">{move || message.get()}</p>
            </Show>
            <p>"Already have an account? " <a href=Route::SignIn.href()>"Sign In"</a></p>
        </div>
    }
}
