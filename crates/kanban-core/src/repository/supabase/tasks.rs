//! Supabase Task Rows (PostgREST)
//!
//! One row per task in the `tasks` table. Every request carries the
//! signed-in user's access token so row-level security applies.

use std::rc::Rc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{Column, DomainError, DomainResult, Placement, TaskId, TaskRow};
use super::super::traits::{SessionProvider, TaskRepository};
use super::auth::SupabaseAuth;
use super::wire;

pub const TASKS_TABLE: &str = "tasks";

pub struct SupabaseTaskRepository {
    http: reqwest::Client,
    auth: Rc<SupabaseAuth>,
}

/// PostgREST equality filter
fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

fn owned_by(user_id: &str, id: TaskId) -> [(&'static str, String); 2] {
    [("id", eq(id)), ("user_id", eq(user_id))]
}

impl SupabaseTaskRepository {
    pub fn new(auth: Rc<SupabaseAuth>) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth,
        }
    }

    /// Authorized request against the tasks table. An expired token is
    /// refreshed first; a session that cannot be refreshed is signed out.
    async fn request(&self, method: reqwest::Method) -> DomainResult<reqwest::RequestBuilder> {
        let session = self
            .auth
            .get_session()
            .await?
            .ok_or_else(|| DomainError::Unauthorized("No active session".to_string()))?;
        let config = self.auth.config();
        Ok(self
            .http
            .request(method, config.rest_url(TASKS_TABLE))
            .header("apikey", &config.anon_key)
            .bearer_auth(session.access_token))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> DomainResult<String> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(wire::status_error(status.as_u16(), &text));
        }
        Ok(text)
    }
}

#[async_trait(?Send)]
impl TaskRepository for SupabaseTaskRepository {
    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<TaskRow>> {
        let request = self.request(reqwest::Method::GET).await?.query(&[
            ("select", "*".to_string()),
            ("user_id", eq(user_id)),
            ("order", "position.asc".to_string()),
        ]);
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn insert(&self, row: &TaskRow) -> DomainResult<()> {
        let request = self
            .request(reqwest::Method::POST).await?
            .header("Prefer", "return=minimal")
            .json(row);
        self.send(request).await?;
        Ok(())
    }

    async fn update_placement(&self, user_id: &str, placement: &Placement) -> DomainResult<()> {
        let request = self
            .request(reqwest::Method::PATCH).await?
            .query(&owned_by(user_id, placement.id))
            .header("Prefer", "return=minimal")
            .json(&json!({ "column": placement.column, "position": placement.position }));
        self.send(request).await?;
        Ok(())
    }

    async fn delete(&self, user_id: &str, id: TaskId) -> DomainResult<()> {
        let request = self.request(reqwest::Method::DELETE).await?.query(&owned_by(user_id, id));
        self.send(request).await?;
        Ok(())
    }

    async fn delete_column(&self, user_id: &str, column: Column) -> DomainResult<()> {
        let request = self
            .request(reqwest::Method::DELETE).await?
            .query(&[("column", eq(column)), ("user_id", eq(user_id))]);
        self.send(request).await?;
        Ok(())
    }
}
