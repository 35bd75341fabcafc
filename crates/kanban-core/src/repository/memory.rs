//! In-Memory Collaborators
//!
//! Process-local implementations of the repository traits, used as test
//! doubles. Both can be switched into a failing mode to exercise error
//! paths.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{
    AuthEvent, Column, DomainError, DomainResult, Placement, Session, TaskId, TaskRow, User,
};
use super::listeners::{AuthCallback, AuthState, Subscription};
use super::traits::{SessionProvider, TaskRepository};

/// Row store backed by a `Vec`
#[derive(Default)]
pub struct InMemoryTaskRepository {
    rows: RefCell<Vec<TaskRow>>,
    failing: Cell<bool>,
    calls: Cell<usize>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<TaskRow>) -> Self {
        let repo = Self::new();
        *repo.rows.borrow_mut() = rows;
        repo
    }

    /// Make every subsequent call fail with a network error
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Number of calls received, failed ones included
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Snapshot of stored rows in insertion order
    pub fn rows(&self) -> Vec<TaskRow> {
        self.rows.borrow().clone()
    }

    fn check(&self) -> DomainResult<()> {
        self.calls.set(self.calls.get() + 1);
        if self.failing.get() {
            return Err(DomainError::Network("in-memory repository is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl TaskRepository for InMemoryTaskRepository {
    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<TaskRow>> {
        self.check()?;
        let mut rows: Vec<TaskRow> = self
            .rows
            .borrow()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.position);
        Ok(rows)
    }

    async fn insert(&self, row: &TaskRow) -> DomainResult<()> {
        self.check()?;
        let mut rows = self.rows.borrow_mut();
        if rows.iter().any(|r| r.id == row.id) {
            return Err(DomainError::Conflict(format!("Task {} already exists", row.id)));
        }
        rows.push(row.clone());
        Ok(())
    }

    async fn update_placement(&self, user_id: &str, placement: &Placement) -> DomainResult<()> {
        self.check()?;
        let mut rows = self.rows.borrow_mut();
        let row = rows
            .iter_mut()
            .find(|r| r.id == placement.id && r.user_id == user_id)
            .ok_or_else(|| DomainError::NotFound(format!("Task {} not found", placement.id)))?;
        row.column = placement.column;
        row.position = placement.position;
        Ok(())
    }

    async fn delete(&self, user_id: &str, id: TaskId) -> DomainResult<()> {
        self.check()?;
        self.rows.borrow_mut().retain(|r| !(r.id == id && r.user_id == user_id));
        Ok(())
    }

    async fn delete_column(&self, user_id: &str, column: Column) -> DomainResult<()> {
        self.check()?;
        self.rows.borrow_mut().retain(|r| !(r.column == column && r.user_id == user_id));
        Ok(())
    }
}

struct Account {
    password: String,
    user: User,
}

/// Credential store with in-process sessions
#[derive(Default)]
pub struct InMemorySessionProvider {
    accounts: RefCell<HashMap<String, Account>>,
    state: AuthState,
    next_user: Cell<u64>,
}

impl InMemorySessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    fn issue(&self, user: User) -> Session {
        Session {
            access_token: format!("local-token-{}", user.id),
            refresh_token: None,
            expires_at: None,
            user,
        }
    }
}

#[async_trait(?Send)]
impl SessionProvider for InMemorySessionProvider {
    async fn get_session(&self) -> DomainResult<Option<Session>> {
        Ok(self.state.session())
    }

    async fn get_user(&self) -> DomainResult<Option<User>> {
        Ok(self.state.session().map(|s| s.user))
    }

    fn on_auth_state_change(&self, callback: AuthCallback) -> Subscription {
        self.state.subscribe(callback)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> DomainResult<Session> {
        let user = {
            let accounts = self.accounts.borrow();
            match accounts.get(email) {
                Some(account) if account.password == password => account.user.clone(),
                _ => return Err(DomainError::Unauthorized("Invalid login credentials".to_string())),
            }
        };
        let session = self.issue(user);
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
        if self.accounts.borrow().contains_key(email) {
            return Err(DomainError::Unauthorized("User already registered".to_string()));
        }
        let n = self.next_user.get() + 1;
        self.next_user.set(n);
        let user = User {
            id: format!("local-user-{}", n),
            email: Some(email.to_string()),
            display_name: display_name.map(str::to_string),
        };
        self.accounts.borrow_mut().insert(
            email.to_string(),
            Account { password: password.to_string(), user: user.clone() },
        );
        let session = self.issue(user);
        self.state.set(AuthEvent::SignedIn, Some(session.clone()));
        Ok(Some(session))
    }

    async fn sign_out(&self) -> DomainResult<()> {
        self.state.set(AuthEvent::SignedOut, None);
        Ok(())
    }
}
