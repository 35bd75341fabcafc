//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The board itself
//! is a `kanban_core::BoardStore`; these helpers apply a mutation and hand
//! back the remote operations it queued.

use leptos::prelude::*;
use reactive_stores::Store;

use kanban_core::{BoardStore, Column, DragItem, DropTarget, RemoteOp, Task, TaskId, TaskRow, User};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Board and session owner
    pub board: BoardStore,
    /// Signed-in user, for the greeting
    pub user: Option<User>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

// ========================
// Store Readers (tracked)
// ========================

pub fn store_tasks(store: &AppStore, column: Column) -> Vec<Task> {
    store.board().read().tasks(column).to_vec()
}

pub fn store_find_task(store: &AppStore, id: TaskId) -> Option<Task> {
    store.board().read().board().find(id).cloned()
}

pub fn store_user(store: &AppStore) -> Option<User> {
    store.user().read().clone()
}

// ========================
// Store Mutations
// ========================

pub fn store_add_task(store: &AppStore, column: Column, content: &str) -> Vec<RemoteOp> {
    let binding = store.board();
    let mut board = binding.write();
    board.add_task(column, content);
    board.drain_outbox()
}

pub fn store_delete_task(store: &AppStore, column: Column, id: TaskId) -> Vec<RemoteOp> {
    let binding = store.board();
    let mut board = binding.write();
    board.delete_task(column, id);
    board.drain_outbox()
}

pub fn store_clear_column(store: &AppStore, column: Column) -> Vec<RemoteOp> {
    let binding = store.board();
    let mut board = binding.write();
    board.clear_column(column);
    board.drain_outbox()
}

pub fn store_move_task(store: &AppStore, active: DragItem, over: Option<DropTarget>) -> Vec<RemoteOp> {
    // Skip the write (and the re-render it triggers) for no-op drops
    let plan = kanban_core::engine::plan_drop(store.board().read_untracked().board(), active, over);
    if plan.is_none() {
        return Vec::new();
    }
    let binding = store.board();
    let mut board = binding.write();
    board.move_task(active, over);
    board.drain_outbox()
}

/// Set the signed-in user. Returns true when the board owner changed.
pub fn store_set_user(store: &AppStore, user: Option<User>) -> bool {
    let owner = user.as_ref().map(|u| u.id.clone());
    let changed = store.board().read_untracked().owner() != owner.as_deref();
    if changed {
        store.board().write().set_owner(owner);
    }
    *store.user().write() = user;
    changed
}

/// Replace the board with the user's persisted rows
pub fn store_apply_snapshot(store: &AppStore, user_id: &str, rows: Vec<TaskRow>) -> bool {
    store.board().write().apply_remote_snapshot(user_id, rows)
}
