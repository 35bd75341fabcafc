//! Column
//!
//! The four fixed task-status buckets of the board.

use serde::{Deserialize, Serialize};

/// A board column. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "Completed")]
    Completed,
}

impl Column {
    /// All columns in display order
    pub const ALL: [Column; 4] = [Column::ToDo, Column::InProgress, Column::OnHold, Column::Completed];

    /// Column title, also the persisted `column` value
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::ToDo => "To Do",
            Column::InProgress => "In Progress",
            Column::OnHold => "On Hold",
            Column::Completed => "Completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Column::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// CSS modifier class, e.g. `in-progress`
    pub fn css_class(&self) -> &'static str {
        match self {
            Column::ToDo => "to-do",
            Column::InProgress => "in-progress",
            Column::OnHold => "on-hold",
            Column::Completed => "completed",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
