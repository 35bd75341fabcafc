//! Session Entities
//!
//! The authenticated-user context owned by the session collaborator.
//! The board only reads the user identity and display name.

use serde::{Deserialize, Serialize};

/// Opaque, stable user identifier
pub type UserId = String;

/// Fallback greeting name when no display name is set
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl User {
    /// Name to greet the user with
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix seconds
    pub expires_at: Option<i64>,
    pub user: User,
}

impl Session {
    pub fn is_expired(&self, now_secs: i64) -> bool {
        matches!(self.expires_at, Some(at) if at <= now_secs)
    }
}

/// Auth state transitions delivered to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// A stored session was restored at startup
    InitialSession,
    SignedIn,
    SignedOut,
    /// Access token replaced after expiry
    TokenRefreshed,
    UserUpdated,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(display_name: Option<&str>) -> User {
        User {
            id: "u1".to_string(),
            email: Some("a@b.c".to_string()),
            display_name: display_name.map(str::to_string),
        }
    }

    #[test]
    fn test_greeting_name_fallback() {
        assert_eq!(user(Some("Ada")).greeting_name(), "Ada");
        assert_eq!(user(None).greeting_name(), "User");
        assert_eq!(user(Some("  ")).greeting_name(), "User");
    }

    #[test]
    fn test_session_expiry() {
        let session = Session {
            access_token: "t".to_string(),
            refresh_token: None,
            expires_at: Some(100),
            user: user(None),
        };
        assert!(!session.is_expired(99));
        assert!(session.is_expired(100));
    }
}
