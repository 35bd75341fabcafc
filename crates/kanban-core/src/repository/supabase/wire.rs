//! GoTrue / PostgREST Payloads
//!
//! Response shapes and error extraction shared by the HTTP clients.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{DomainError, Session, User};

/// Metadata key holding the preferred name
pub(super) const DISPLAY_NAME_KEY: &str = "displayName";

#[derive(Debug, Deserialize)]
pub(super) struct GoTrueUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<Value>,
}

impl From<GoTrueUser> for User {
    fn from(u: GoTrueUser) -> Self {
        let display_name = u
            .user_metadata
            .as_ref()
            .and_then(|m| m.get(DISPLAY_NAME_KEY))
            .and_then(Value::as_str)
            .map(str::to_string);
        User {
            id: u.id,
            email: u.email,
            display_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: GoTrueUser,
}

impl TokenResponse {
    pub fn into_session(self, now_secs: i64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now_secs + secs));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into(),
        }
    }
}

/// Sign-up answers with a token response when the account is confirmed
/// immediately and with a bare user otherwise
pub(super) fn parse_sign_up(body: Value, now_secs: i64) -> Result<Option<Session>, DomainError> {
    if body.get("access_token").is_some() {
        let token: TokenResponse = serde_json::from_value(body)?;
        return Ok(Some(token.into_session(now_secs)));
    }
    Ok(None)
}

/// Human-readable message from a GoTrue or PostgREST error body
pub(super) fn error_message(status: u16, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        ["error_description", "msg", "message", "error"]
            .iter()
            .find_map(|key| v.get(*key).and_then(Value::as_str))
            .map(str::to_string)
    });
    message.unwrap_or_else(|| {
        if body.trim().is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {}: {}", status, body.trim())
        }
    })
}

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            DomainError::Internal(e.to_string())
        } else {
            DomainError::Network(e.to_string())
        }
    }
}

/// Map a failed response to a domain error
pub(super) fn status_error(status: u16, body: &str) -> DomainError {
    let message = error_message(status, body);
    match status {
        400 | 401 | 403 | 422 => DomainError::Unauthorized(message),
        404 => DomainError::NotFound(message),
        409 => DomainError::Conflict(message),
        _ => DomainError::Network(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_display_name_from_metadata() {
        let user: GoTrueUser = serde_json::from_value(json!({
            "id": "abc",
            "email": "ada@example.com",
            "user_metadata": { "displayName": "Ada" }
        }))
        .unwrap();
        let user: User = user.into();
        assert_eq!(user.display_name.as_deref(), Some("Ada"));
        assert_eq!(user.greeting_name(), "Ada");
    }

    #[test]
    fn test_token_response_computes_expiry() {
        let token: TokenResponse = serde_json::from_value(json!({
            "access_token": "jwt",
            "refresh_token": "r",
            "expires_in": 3600,
            "user": { "id": "abc" }
        }))
        .unwrap();
        let session = token.into_session(1_000);
        assert_eq!(session.expires_at, Some(4_600));
        assert_eq!(session.user.display_name, None);
    }

    #[test]
    fn test_sign_up_without_session() {
        let pending = json!({ "id": "abc", "email": "a@b.c" });
        assert_eq!(parse_sign_up(pending, 0).unwrap(), None);

        let confirmed = json!({ "access_token": "jwt", "user": { "id": "abc" } });
        let session = parse_sign_up(confirmed, 0).unwrap().unwrap();
        assert_eq!(session.user.id, "abc");
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(400, r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(error_message(422, r#"{"msg":"Password should be at least 6 characters"}"#), "Password should be at least 6 characters");
        assert_eq!(error_message(500, ""), "HTTP 500");
        assert_eq!(error_message(502, "bad gateway"), "HTTP 502: bad gateway");
    }

    #[test]
    fn test_status_error_classification() {
        assert!(matches!(status_error(400, "{}"), DomainError::Unauthorized(_)));
        assert!(matches!(status_error(409, "{}"), DomainError::Conflict(_)));
        assert!(matches!(status_error(503, "{}"), DomainError::Network(_)));
    }
}
