//! Repository Layer - Core Traits
//!
//! Abstract interfaces for the external auth provider and the remote task
//! table. Futures are not `Send`: the board runs on a single-threaded event
//! loop and the browser HTTP client is not thread-safe.

use async_trait::async_trait;

use crate::domain::{Column, DomainResult, Placement, Session, TaskId, TaskRow, User};
use super::listeners::{AuthCallback, Subscription};

/// Row store holding one row per task, keyed by user
#[async_trait(?Send)]
pub trait TaskRepository {
    /// All rows of a user, ordered by position ascending
    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<TaskRow>>;

    /// Insert a new row
    async fn insert(&self, row: &TaskRow) -> DomainResult<()>;

    /// Update column and position of a row owned by `user_id`
    async fn update_placement(&self, user_id: &str, placement: &Placement) -> DomainResult<()>;

    /// Delete a row owned by `user_id`
    async fn delete(&self, user_id: &str, id: TaskId) -> DomainResult<()>;

    /// Delete every row of a column owned by `user_id`
    async fn delete_column(&self, user_id: &str, column: Column) -> DomainResult<()>;
}

/// Authentication provider
#[async_trait(?Send)]
pub trait SessionProvider {
    /// Current session, if any
    async fn get_session(&self) -> DomainResult<Option<Session>>;

    /// Fresh user record (including metadata) for the current session
    async fn get_user(&self) -> DomainResult<Option<User>>;

    /// Register for auth state changes. Dropping the handle unsubscribes.
    fn on_auth_state_change(&self, callback: AuthCallback) -> Subscription;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> DomainResult<Session>;

    /// Create an account. Returns a session when the provider signs the
    /// user in immediately, `None` when email confirmation is pending.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> DomainResult<Option<Session>>;

    async fn sign_out(&self) -> DomainResult<()>;
}
