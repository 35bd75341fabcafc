//! Drag and Drop Vocabulary
//!
//! What is being dragged and what it is released onto. Keys render to the
//! `<column>|<taskId>` and `<column>|droppable` strings used as DOM keys.

use serde::{Deserialize, Serialize};
use super::column::Column;
use super::task::TaskId;

const KEY_SEPARATOR: char = '|';
const COLUMN_END_KEY: &str = "droppable";

/// The task under the pointer when a drag starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DragItem {
    pub column: Column,
    pub task_id: TaskId,
}

impl DragItem {
    pub fn new(column: Column, task_id: TaskId) -> Self {
        Self { column, task_id }
    }

    pub fn key(&self) -> String {
        format!("{}{}{}", self.column.as_str(), KEY_SEPARATOR, self.task_id)
    }

    pub fn parse(key: &str) -> Option<Self> {
        match DropTarget::parse(key)? {
            DropTarget::OnTask(column, task_id) => Some(Self { column, task_id }),
            DropTarget::OnColumnEnd(_) => None,
        }
    }
}

/// Where a dragged task is released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropTarget {
    /// Onto a specific task: insert before it
    OnTask(Column, TaskId),
    /// Onto a column's empty area: append
    OnColumnEnd(Column),
}

impl DropTarget {
    pub fn column(&self) -> Column {
        match self {
            DropTarget::OnTask(column, _) | DropTarget::OnColumnEnd(column) => *column,
        }
    }

    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            DropTarget::OnTask(_, id) => Some(*id),
            DropTarget::OnColumnEnd(_) => None,
        }
    }

    pub fn key(&self) -> String {
        match self {
            DropTarget::OnTask(column, id) => DragItem::new(*column, *id).key(),
            DropTarget::OnColumnEnd(column) => {
                format!("{}{}{}", column.as_str(), KEY_SEPARATOR, COLUMN_END_KEY)
            }
        }
    }

    /// Parse a composite key; anything malformed yields `None`
    pub fn parse(key: &str) -> Option<Self> {
        let (column, rest) = key.split_once(KEY_SEPARATOR)?;
        let column = Column::from_str(column)?;
        if rest == COLUMN_END_KEY {
            return Some(DropTarget::OnColumnEnd(column));
        }
        rest.parse::<TaskId>().ok().map(|id| DropTarget::OnTask(column, id))
    }
}

impl From<DragItem> for DropTarget {
    fn from(item: DragItem) -> Self {
        DropTarget::OnTask(item.column, item.task_id)
    }
}
