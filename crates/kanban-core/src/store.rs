//! Board State Store
//!
//! Owns the board and the current session owner. Every mutation is applied
//! to memory immediately; when an owner is set, the matching remote operation
//! is queued in an outbox for the caller to hand to a [`TaskMirror`].
//!
//! [`TaskMirror`]: crate::mirror::TaskMirror

use crate::domain::{Board, Column, DragItem, DropTarget, Placement, Task, TaskId, TaskRow, UserId};
use crate::engine::{self, Move};

/// A mutation to replicate to the persistence collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOp {
    Insert(TaskRow),
    Delete { user_id: UserId, id: TaskId },
    ClearColumn { user_id: UserId, column: Column },
    Reposition { user_id: UserId, placements: Vec<Placement> },
}

impl RemoteOp {
    pub fn user_id(&self) -> &str {
        match self {
            RemoteOp::Insert(row) => &row.user_id,
            RemoteOp::Delete { user_id, .. }
            | RemoteOp::ClearColumn { user_id, .. }
            | RemoteOp::Reposition { user_id, .. } => user_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardStore {
    board: Board,
    owner: Option<UserId>,
    last_id: TaskId,
    outbox: Vec<RemoteOp>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current board snapshot
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tasks(&self, column: Column) -> &[Task] {
        self.board.tasks(column)
    }

    /// User whose rows mutations are mirrored to
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Record the session owner. Returns true when it changed.
    ///
    /// Leaving a signed-in session (sign-out or user switch) empties the
    /// board and drops queued remote operations. Signing in from the
    /// anonymous board keeps local tasks until the remote snapshot arrives.
    pub fn set_owner(&mut self, owner: Option<UserId>) -> bool {
        if self.owner == owner {
            return false;
        }
        if self.owner.is_some() {
            self.board = Board::new();
            self.outbox.clear();
        }
        log::info!("[STORE] owner changed to {:?}", owner);
        self.owner = owner;
        true
    }

    /// Replace the board with the owner's persisted rows. A snapshot for a
    /// user that is no longer the owner is ignored and `false` is returned.
    pub fn apply_remote_snapshot(&mut self, user_id: &str, rows: Vec<TaskRow>) -> bool {
        if self.owner.as_deref() != Some(user_id) {
            log::warn!("[STORE] discarding stale snapshot for {}", user_id);
            return false;
        }
        let rows: Vec<TaskRow> = rows.into_iter().filter(|r| r.user_id == user_id).collect();
        log::info!("[STORE] loaded {} tasks for {}", rows.len(), user_id);
        self.board = Board::from_rows(rows);
        self.last_id = self.last_id.max(self.board.max_id().unwrap_or(0));
        true
    }

    /// Queued remote operations, oldest first
    pub fn drain_outbox(&mut self) -> Vec<RemoteOp> {
        std::mem::take(&mut self.outbox)
    }

    /// Append a task to a column. Blank content is ignored.
    pub fn add_task(&mut self, column: Column, content: &str) -> Option<Task> {
        self.add_task_at(column, content, chrono::Utc::now().timestamp_millis())
    }

    pub(crate) fn add_task_at(&mut self, column: Column, content: &str, now_ms: i64) -> Option<Task> {
        if content.trim().is_empty() {
            return None;
        }
        let id = self.next_id(now_ms);
        let position = self.board.tasks(column).len() as i32;
        let task = Task::new(id, content, column, position);
        self.board.tasks_mut(column).push(task.clone());

        if let Some(user_id) = &self.owner {
            self.outbox.push(RemoteOp::Insert(task.to_row(user_id)));
        }
        Some(task)
    }

    /// Remove a task from a column. Tasks below it move up one position,
    /// remotely as well as locally.
    pub fn delete_task(&mut self, column: Column, id: TaskId) -> Option<Task> {
        let index = self.board.index_of(column, id)?;
        let removed = self.board.tasks_mut(column).remove(index);
        self.board.reindex(column);

        if let Some(user_id) = &self.owner {
            self.outbox.push(RemoteOp::Delete { user_id: user_id.clone(), id });
            let placements: Vec<Placement> = self.board.tasks(column)[index..]
                .iter()
                .map(|t| Placement { id: t.id, column, position: t.position })
                .collect();
            if !placements.is_empty() {
                self.outbox.push(RemoteOp::Reposition { user_id: user_id.clone(), placements });
            }
        }
        Some(removed)
    }

    /// Empty a column, returning the removed tasks
    pub fn clear_column(&mut self, column: Column) -> Vec<Task> {
        let removed = std::mem::take(self.board.tasks_mut(column));

        if let Some(user_id) = &self.owner {
            self.outbox.push(RemoteOp::ClearColumn { user_id: user_id.clone(), column });
        }
        removed
    }

    /// Apply a released drag. `None` target, self drops and unknown ids leave
    /// the board untouched.
    pub fn move_task(&mut self, active: DragItem, over: Option<DropTarget>) -> Option<Move> {
        let before = self.placements();
        let applied = engine::apply_drop(&mut self.board, active, over)?;

        if let Some(user_id) = &self.owner {
            let placements: Vec<Placement> = self
                .placements()
                .into_iter()
                .filter(|p| !before.contains(p))
                .collect();
            if !placements.is_empty() {
                self.outbox.push(RemoteOp::Reposition { user_id: user_id.clone(), placements });
            }
        }
        Some(applied)
    }

    fn placements(&self) -> Vec<Placement> {
        self.board
            .iter()
            .flat_map(|(column, tasks)| {
                tasks.iter().map(move |t| Placement { id: t.id, column, position: t.position })
            })
            .collect()
    }

    /// Creation-time id, bumped to stay unique when several tasks are added
    /// within the same millisecond
    fn next_id(&mut self, now_ms: i64) -> TaskId {
        let floor = self.last_id.max(self.board.max_id().unwrap_or(0));
        let id = now_ms.max(floor + 1);
        self.last_id = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_for(owner: &str) -> BoardStore {
        let mut store = BoardStore::new();
        store.set_owner(Some(owner.to_string()));
        store
    }

    fn ids(store: &BoardStore, column: Column) -> Vec<TaskId> {
        store.tasks(column).iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_add_task_appends_with_dense_positions() {
        let mut store = BoardStore::new();
        for content in ["one", "", "two", "   ", "three"] {
            store.add_task_at(Column::ToDo, content, 1000);
        }

        let tasks = store.tasks(Column::ToDo);
        assert_eq!(tasks.len(), 3);
        for (i, task) in tasks.iter().enumerate() {
            assert_eq!(task.position, i as i32);
        }
        assert_eq!(tasks[2].content, "three");
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut store = BoardStore::new();
        let a = store.add_task_at(Column::ToDo, "a", 5000).unwrap();
        let b = store.add_task_at(Column::InProgress, "b", 5000).unwrap();
        let c = store.add_task_at(Column::ToDo, "c", 4000).unwrap();

        assert_eq!(a.id, 5000);
        assert_eq!(b.id, 5001);
        assert_eq!(c.id, 5002);
    }

    #[test]
    fn test_anonymous_mutations_queue_nothing() {
        let mut store = BoardStore::new();
        let task = store.add_task(Column::ToDo, "local").unwrap();
        store.move_task(DragItem::new(Column::ToDo, task.id), Some(DropTarget::OnColumnEnd(Column::OnHold)));
        store.clear_column(Column::OnHold);

        assert!(store.drain_outbox().is_empty());
        assert!(store.board().is_empty());
    }

    #[test]
    fn test_add_queues_insert_for_owner() {
        let mut store = store_for("u1");
        let task = store.add_task_at(Column::OnHold, "remote", 42).unwrap();

        assert_eq!(
            store.drain_outbox(),
            vec![RemoteOp::Insert(TaskRow {
                id: task.id,
                user_id: "u1".to_string(),
                column: Column::OnHold,
                content: "remote".to_string(),
                position: 0,
            })]
        );
        assert!(store.drain_outbox().is_empty());
    }

    #[test]
    fn test_delete_task() {
        let mut store = store_for("u1");
        let a = store.add_task_at(Column::ToDo, "a", 1).unwrap();
        let b = store.add_task_at(Column::ToDo, "b", 2).unwrap();
        store.drain_outbox();

        assert_eq!(store.delete_task(Column::ToDo, a.id).map(|t| t.id), Some(a.id));
        assert_eq!(store.tasks(Column::ToDo)[0].id, b.id);
        assert_eq!(store.tasks(Column::ToDo)[0].position, 0);
        assert_eq!(
            store.drain_outbox(),
            vec![
                RemoteOp::Delete { user_id: "u1".to_string(), id: a.id },
                RemoteOp::Reposition {
                    user_id: "u1".to_string(),
                    placements: vec![Placement { id: b.id, column: Column::ToDo, position: 0 }],
                },
            ]
        );

        // Wrong column or unknown id
        assert!(store.delete_task(Column::Completed, b.id).is_none());
        assert!(store.drain_outbox().is_empty());
    }

    #[test]
    fn test_delete_last_task_queues_no_reposition() {
        let mut store = store_for("u1");
        let a = store.add_task_at(Column::ToDo, "a", 1).unwrap();
        let b = store.add_task_at(Column::ToDo, "b", 2).unwrap();
        store.drain_outbox();

        store.delete_task(Column::ToDo, b.id);

        assert_eq!(store.drain_outbox(), vec![RemoteOp::Delete { user_id: "u1".to_string(), id: b.id }]);
        assert_eq!(ids(&store, Column::ToDo), vec![a.id]);
    }

    #[test]
    fn test_delete_then_add_keeps_queued_positions_dense() {
        let mut store = store_for("u1");
        let a = store.add_task_at(Column::ToDo, "A", 1).unwrap();
        let b = store.add_task_at(Column::ToDo, "B", 2).unwrap();
        let c = store.add_task_at(Column::ToDo, "C", 3).unwrap();
        store.drain_outbox();

        store.delete_task(Column::ToDo, a.id);
        store.delete_task(Column::ToDo, b.id);
        let d = store.add_task_at(Column::ToDo, "D", 4).unwrap();

        let last_c_position = store
            .drain_outbox()
            .into_iter()
            .filter_map(|op| match op {
                RemoteOp::Reposition { placements, .. } => Some(placements),
                _ => None,
            })
            .flatten()
            .filter(|p| p.id == c.id)
            .map(|p| p.position)
            .last();
        assert_eq!(last_c_position, Some(0));
        assert_eq!(d.position, 1);
    }

    #[test]
    fn test_clear_column_only_touches_that_column() {
        let mut store = store_for("u1");
        store.add_task_at(Column::Completed, "done 1", 1);
        store.add_task_at(Column::Completed, "done 2", 2);
        store.add_task_at(Column::ToDo, "todo", 3);
        store.drain_outbox();

        let removed = store.clear_column(Column::Completed);

        assert_eq!(removed.len(), 2);
        assert!(store.tasks(Column::Completed).is_empty());
        assert_eq!(store.tasks(Column::ToDo).len(), 1);
        assert_eq!(
            store.drain_outbox(),
            vec![RemoteOp::ClearColumn { user_id: "u1".to_string(), column: Column::Completed }]
        );
    }

    #[test]
    fn test_move_queues_changed_placements_only() {
        let mut store = store_for("u1");
        let a = store.add_task_at(Column::ToDo, "A", 1).unwrap();
        let b = store.add_task_at(Column::ToDo, "B", 2).unwrap();
        let c = store.add_task_at(Column::ToDo, "C", 3).unwrap();
        store.drain_outbox();

        store.move_task(DragItem::new(Column::ToDo, b.id), Some(DropTarget::OnTask(Column::ToDo, a.id)));

        assert_eq!(ids(&store, Column::ToDo), vec![b.id, a.id, c.id]);
        assert_eq!(
            store.drain_outbox(),
            vec![RemoteOp::Reposition {
                user_id: "u1".to_string(),
                placements: vec![
                    Placement { id: b.id, column: Column::ToDo, position: 0 },
                    Placement { id: a.id, column: Column::ToDo, position: 1 },
                ],
            }]
        );
    }

    #[test]
    fn test_move_across_columns_scenario() {
        let mut store = BoardStore::new();
        let a = store.add_task_at(Column::ToDo, "A", 1).unwrap();

        store.move_task(DragItem::new(Column::ToDo, a.id), Some(DropTarget::OnColumnEnd(Column::InProgress)));

        assert!(store.tasks(Column::ToDo).is_empty());
        assert_eq!(store.tasks(Column::InProgress), &[Task::new(a.id, "A", Column::InProgress, 0)]);
    }

    #[test]
    fn test_noop_move_leaves_state_equal() {
        let mut store = store_for("u1");
        let a = store.add_task_at(Column::ToDo, "A", 1).unwrap();
        store.drain_outbox();
        let before = store.clone();

        assert!(store.move_task(DragItem::new(Column::ToDo, a.id), None).is_none());
        assert!(store.move_task(DragItem::new(Column::ToDo, a.id), Some(DropTarget::OnTask(Column::ToDo, a.id))).is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn test_snapshot_replaces_board_for_owner() {
        let mut store = store_for("u1");
        store.add_task_at(Column::ToDo, "local", 1);

        let applied = store.apply_remote_snapshot(
            "u1",
            vec![
                TaskRow { id: 900, user_id: "u1".into(), column: Column::OnHold, content: "second".into(), position: 4 },
                TaskRow { id: 800, user_id: "u1".into(), column: Column::OnHold, content: "first".into(), position: 1 },
            ],
        );

        assert!(applied);
        assert!(store.tasks(Column::ToDo).is_empty());
        assert_eq!(ids(&store, Column::OnHold), vec![800, 900]);
        assert!(store.board().is_consistent());
        // New ids never collide with loaded ones
        assert_eq!(store.add_task_at(Column::ToDo, "new", 10).unwrap().id, 901);
    }

    #[test]
    fn test_stale_snapshot_is_ignored() {
        let mut store = store_for("u2");
        let rows = vec![TaskRow { id: 1, user_id: "u1".into(), column: Column::ToDo, content: "x".into(), position: 0 }];

        assert!(!store.apply_remote_snapshot("u1", rows));
        assert!(store.board().is_empty());
    }

    #[test]
    fn test_sign_out_resets_board() {
        let mut store = store_for("u1");
        store.add_task_at(Column::ToDo, "mine", 1);

        assert!(store.set_owner(None));
        assert!(store.board().is_empty());
        assert!(store.drain_outbox().is_empty());
        assert!(!store.set_owner(None));
    }

    #[test]
    fn test_sign_in_keeps_anonymous_board_until_snapshot() {
        let mut store = BoardStore::new();
        store.add_task_at(Column::ToDo, "draft", 1);

        store.set_owner(Some("u1".to_string()));

        assert_eq!(store.tasks(Column::ToDo).len(), 1);
        assert_eq!(store.owner(), Some("u1"));
    }
}
