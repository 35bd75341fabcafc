//! Drag-Reorder Engine
//!
//! Turns a released drag (dragged task, optional drop target) into a move on
//! the board. Planning is pure; applying a plan rewrites positions of every
//! column it touches.

use crate::domain::{Board, Column, DragItem, DropTarget};

/// A resolved move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Array-move inside one column
    Reorder { column: Column, from: usize, to: usize },
    /// Remove from one column and insert into another at `index`
    Transfer { from: Column, from_index: usize, to: Column, index: usize },
}

impl Move {
    /// Columns whose order changes
    pub fn columns(&self) -> Vec<Column> {
        match *self {
            Move::Reorder { column, .. } => vec![column],
            Move::Transfer { from, to, .. } => vec![from, to],
        }
    }

    /// Apply to the board and re-densify positions of the touched columns
    pub fn apply(&self, board: &mut Board) {
        match *self {
            Move::Reorder { column, from, to } => {
                let tasks = board.tasks_mut(column);
                let task = tasks.remove(from);
                tasks.insert(to, task);
            }
            Move::Transfer { from, from_index, to, index } => {
                let task = board.tasks_mut(from).remove(from_index);
                board.tasks_mut(to).insert(index, task);
            }
        }
        for column in self.columns() {
            board.reindex(column);
        }
    }
}

/// Resolve a drop into a move. `None` means the drop is a no-op: no target,
/// dropped onto itself, or ids that are not on the board.
pub fn plan_drop(board: &Board, active: DragItem, over: Option<DropTarget>) -> Option<Move> {
    let over = over?;
    let source = active.column;
    let from = board.index_of(source, active.task_id)?;
    let destination = over.column();

    if source == destination {
        let last = board.tasks(source).len() - 1;
        let to = match over {
            DropTarget::OnTask(_, id) => board.index_of(destination, id)?,
            // Released on the column's own empty area: move to the bottom
            DropTarget::OnColumnEnd(_) => last,
        };
        if from == to {
            return None;
        }
        return Some(Move::Reorder { column: source, from, to });
    }

    let index = match over {
        DropTarget::OnTask(_, id) => board.index_of(destination, id)?,
        DropTarget::OnColumnEnd(_) => board.tasks(destination).len(),
    };
    Some(Move::Transfer { from: source, from_index: from, to: destination, index })
}

/// Plan and apply a drop. Returns the applied move, or `None` when the board
/// was left untouched.
pub fn apply_drop(board: &mut Board, active: DragItem, over: Option<DropTarget>) -> Option<Move> {
    let plan = plan_drop(board, active, over)?;
    plan.apply(board);
    Some(plan)
}
