//! Board
//!
//! Mapping from column to its ordered task list. Array order is visual
//! top-to-bottom order and equals each task's `position`.

use serde::{Deserialize, Serialize};
use super::column::Column;
use super::task::{Task, TaskId, TaskRow};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: [Vec<Task>; 4],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from persisted rows: partition by column, order by
    /// position (ties by id) and re-densify positions.
    pub fn from_rows(rows: impl IntoIterator<Item = TaskRow>) -> Self {
        let mut board = Board::new();
        for row in rows {
            let task: Task = row.into();
            board.columns[task.column.index()].push(task);
        }
        for column in Column::ALL {
            board.tasks_mut(column).sort_by_key(|t| (t.position, t.id));
            board.reindex(column);
        }
        board
    }

    /// Ordered tasks of a column
    pub fn tasks(&self, column: Column) -> &[Task] {
        &self.columns[column.index()]
    }

    pub(crate) fn tasks_mut(&mut self, column: Column) -> &mut Vec<Task> {
        &mut self.columns[column.index()]
    }

    /// Columns with their tasks, in display order
    pub fn iter(&self) -> impl Iterator<Item = (Column, &[Task])> {
        Column::ALL.into_iter().map(move |c| (c, self.tasks(c)))
    }

    /// Total number of tasks on the board
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    /// Find a task anywhere on the board
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.columns.iter().flatten().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.find(id).is_some()
    }

    /// Index of a task within a column
    pub fn index_of(&self, column: Column, id: TaskId) -> Option<usize> {
        self.tasks(column).iter().position(|t| t.id == id)
    }

    /// Largest task id on the board
    pub fn max_id(&self) -> Option<TaskId> {
        self.columns.iter().flatten().map(|t| t.id).max()
    }

    /// Rewrite `position` and `column` of every task in a column from its
    /// array index
    pub(crate) fn reindex(&mut self, column: Column) {
        for (i, task) in self.tasks_mut(column).iter_mut().enumerate() {
            task.position = i as i32;
            task.column = column;
        }
    }

    /// True when every column's positions are dense 0..n-1 in array order
    /// and every task sits in the column that holds it
    pub fn is_consistent(&self) -> bool {
        self.iter().all(|(column, tasks)| {
            tasks
                .iter()
                .enumerate()
                .all(|(i, t)| t.position == i as i32 && t.column == column)
        })
    }
}
