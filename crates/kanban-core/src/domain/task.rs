//! Task Entity
//!
//! A card on the board, plus its persisted row shape.

use serde::{Deserialize, Serialize};
use super::column::Column;
use super::entity::Entity;
use super::session::UserId;

/// Task identifier, unique across the whole board
pub type TaskId = i64;

/// A task card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier (creation timestamp in milliseconds)
    pub id: TaskId,
    /// Free-form text
    pub content: String,
    /// Owning column
    pub column: Column,
    /// Rank within the column, dense from 0
    pub position: i32,
}

impl Task {
    pub fn new(id: TaskId, content: impl Into<String>, column: Column, position: i32) -> Self {
        Self {
            id,
            content: content.into(),
            column,
            position,
        }
    }

    /// Row to persist for `user_id`
    pub fn to_row(&self, user_id: &str) -> TaskRow {
        TaskRow {
            id: self.id,
            user_id: user_id.to_string(),
            column: self.column,
            content: self.content.clone(),
            position: self.position,
        }
    }
}

impl Entity for Task {
    type Id = TaskId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// A row of the remote `tasks` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: TaskId,
    pub user_id: UserId,
    pub column: Column,
    pub content: String,
    pub position: i32,
}

/// Column and rank of a task, as written by a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub id: TaskId,
    pub column: Column,
    pub position: i32,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            content: row.content,
            column: row.column,
            position: row.position,
        }
    }
}
