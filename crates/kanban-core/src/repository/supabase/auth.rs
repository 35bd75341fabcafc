//! Supabase Auth (GoTrue)
//!
//! Password sign-in/sign-up, user lookup, token refresh and sign-out.
//! The session lives in memory; callers persist it with [`SupabaseAuth::session`]
//! and hand it back with [`SupabaseAuth::restore`].

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::{AuthEvent, DomainError, DomainResult, Session, User};
use super::super::listeners::{AuthCallback, AuthState, Subscription};
use super::super::traits::SessionProvider;
use super::config::SupabaseConfig;
use super::wire::{self, GoTrueUser, TokenResponse, DISPLAY_NAME_KEY};

pub struct SupabaseAuth {
    http: reqwest::Client,
    config: SupabaseConfig,
    state: AuthState,
}

impl SupabaseAuth {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            state: AuthState::new(),
        }
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    /// Current session without any network round trip
    pub fn session(&self) -> Option<Session> {
        self.state.session()
    }

    /// Adopt a previously stored session and announce it to subscribers
    pub fn restore(&self, session: Session) {
        log::info!("[AUTH] restoring session for {}", session.user.id);
        self.state.set(AuthEvent::InitialSession, Some(session));
    }

    fn now_secs() -> i64 {
        chrono::Utc::now().timestamp()
    }

    async fn post_json(&self, url: &str, body: &Value, bearer: Option<&str>) -> DomainResult<Value> {
        let mut request = self
            .http
            .post(url)
            .header("apikey", &self.config.anon_key)
            .json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(wire::status_error(status.as_u16(), &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn refresh(&self, refresh_token: &str) -> DomainResult<Session> {
        let url = self.config.auth_url("token?grant_type=refresh_token");
        let body = self
            .post_json(&url, &json!({ "refresh_token": refresh_token }), None)
            .await?;
        let token: TokenResponse = serde_json::from_value(body)?;
        Ok(token.into_session(Self::now_secs()))
    }
}

#[async_trait(?Send)]
impl SessionProvider for SupabaseAuth {
    async fn get_session(&self) -> DomainResult<Option<Session>> {
        let Some(session) = self.state.session() else {
            return Ok(None);
        };
        if !session.is_expired(Self::now_secs()) {
            return Ok(Some(session));
        }

        let Some(refresh_token) = session.refresh_token.as_deref() else {
            self.state.set(AuthEvent::SignedOut, None);
            return Ok(None);
        };
        match self.refresh(refresh_token).await {
            Ok(fresh) => {
                self.state.set(AuthEvent::TokenRefreshed, Some(fresh.clone()));
                Ok(Some(fresh))
            }
            Err(e) => {
                log::warn!("[AUTH] token refresh failed: {}", e);
                self.state.set(AuthEvent::SignedOut, None);
                Ok(None)
            }
        }
    }

    async fn get_user(&self) -> DomainResult<Option<User>> {
        let Some(session) = self.get_session().await? else {
            return Ok(None);
        };
        let response = self
            .http
            .get(self.config.auth_url("user"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(wire::status_error(status.as_u16(), &text));
        }
        let user: User = serde_json::from_str::<GoTrueUser>(&text)?.into();

        if user != session.user {
            let updated = Session { user: user.clone(), ..session };
            self.state.set(AuthEvent::UserUpdated, Some(updated));
        }
        Ok(Some(user))
    }

    fn on_auth_state_change(&self, callback: AuthCallback) -> Subscription {
        self.state.subscribe(callback)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> DomainResult<Session> {
        let url = self.config.auth_url("token?grant_type=password");
        let body = self
            .post_json(&url, &json!({ "email": email, "password": password }), None)
            .await?;
        let token: TokenResponse = serde_json::from_value(body)?;
        let session = token.into_session(Self::now_secs());
        log::info!("[AUTH] signed in {}", session.user.id);
        self.state.set(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> DomainResult<Option<Session>> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::InvalidInput("Email and password are required".to_string()));
        }
        let mut payload = json!({ "email": email, "password": password });
        if let Some(name) = display_name.filter(|n| !n.trim().is_empty()) {
            payload["data"] = json!({ DISPLAY_NAME_KEY: name });
        }
        let body = self.post_json(&self.config.auth_url("signup"), &payload, None).await?;
        let session = wire::parse_sign_up(body, Self::now_secs())?;
        match &session {
            Some(s) => {
                log::info!("[AUTH] signed up and signed in {}", s.user.id);
                self.state.set(AuthEvent::SignedIn, Some(s.clone()));
            }
            None => log::info!("[AUTH] signed up {}, confirmation pending", email),
        }
        Ok(session)
    }

    async fn sign_out(&self) -> DomainResult<()> {
        let token = self.state.access_token();
        // Local sign-out happens even when the server call fails
        self.state.set(AuthEvent::SignedOut, None);
        if let Some(token) = token {
            self.post_json(&self.config.auth_url("logout"), &Value::Null, Some(&token))
                .await?;
        }
        Ok(())
    }
}
