//! Repository Integration Tests
//!
//! Store, mirror and in-memory collaborators wired together the way the
//! board view uses them.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::domain::{AuthEvent, Column, DragItem, DropTarget, TaskRow};
    use crate::mirror::TaskMirror;
    use crate::repository::{auth_callback, InMemorySessionProvider, InMemoryTaskRepository, SessionProvider, TaskRepository};
    use crate::store::BoardStore;

    fn setup() -> (Rc<InMemoryTaskRepository>, TaskMirror) {
        let repo = Rc::new(InMemoryTaskRepository::new());
        let mirror = TaskMirror::new(repo.clone());
        (repo, mirror)
    }

    fn row(id: i64, user: &str, column: Column, position: i32) -> TaskRow {
        TaskRow {
            id,
            user_id: user.to_string(),
            column,
            content: format!("Task {}", id),
            position,
        }
    }

    #[tokio::test]
    async fn test_list_is_per_user_and_ordered() {
        let repo = InMemoryTaskRepository::with_rows(vec![
            row(1, "u1", Column::ToDo, 2),
            row(2, "u2", Column::ToDo, 0),
            row(3, "u1", Column::OnHold, 0),
        ]);

        let rows = repo.list_for_user("u1").await.expect("List failed");

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn test_delete_respects_ownership() {
        let repo = InMemoryTaskRepository::with_rows(vec![row(1, "u1", Column::ToDo, 0)]);

        repo.delete("u2", 1).await.unwrap();
        assert_eq!(repo.rows().len(), 1);

        repo.delete("u1", 1).await.unwrap();
        assert!(repo.rows().is_empty());
    }

    #[tokio::test]
    async fn test_mirrored_mutations_reach_repository() {
        let (repo, mirror) = setup();
        let mut store = BoardStore::new();
        store.set_owner(Some("u1".to_string()));

        let a = store.add_task(Column::ToDo, "A").unwrap();
        let b = store.add_task(Column::ToDo, "B").unwrap();
        store.add_task(Column::Completed, "old");
        store.move_task(DragItem::new(Column::ToDo, b.id), Some(DropTarget::OnColumnEnd(Column::InProgress)));
        store.clear_column(Column::Completed);
        store.delete_task(Column::ToDo, a.id);

        let failed = mirror.apply_all(store.drain_outbox()).await;

        assert_eq!(failed, 0);
        let rows = repo.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, b.id);
        assert_eq!(rows[0].column, Column::InProgress);
        assert_eq!(rows[0].position, 0);
    }

    #[tokio::test]
    async fn test_remote_failure_keeps_local_state() {
        let (repo, mirror) = setup();
        repo.set_failing(true);
        let mut store = BoardStore::new();
        store.set_owner(Some("u1".to_string()));

        store.add_task(Column::ToDo, "survives");
        let failed = mirror.apply_all(store.drain_outbox()).await;

        assert_eq!(failed, 1);
        assert_eq!(repo.calls(), 1);
        assert_eq!(store.tasks(Column::ToDo).len(), 1);
        assert!(repo.rows().is_empty());
    }

    #[tokio::test]
    async fn test_initial_load_round_trip() {
        let (repo, mirror) = setup();
        let mut first = BoardStore::new();
        first.set_owner(Some("u1".to_string()));
        for content in ["A", "B", "C"] {
            first.add_task(Column::OnHold, content);
        }
        let c = first.tasks(Column::OnHold)[2].id;
        let a = first.tasks(Column::OnHold)[0].id;
        first.move_task(DragItem::new(Column::OnHold, c), Some(DropTarget::OnTask(Column::OnHold, a)));
        mirror.apply_all(first.drain_outbox()).await;

        let mut second = BoardStore::new();
        second.set_owner(Some("u1".to_string()));
        let rows = mirror.load("u1").await.expect("Load failed");
        assert!(second.apply_remote_snapshot("u1", rows));

        assert_eq!(second.board(), first.board());
        assert_eq!(repo.rows().len(), 3);
    }

    async fn reload(mirror: &TaskMirror, user_id: &str) -> BoardStore {
        let mut store = BoardStore::new();
        store.set_owner(Some(user_id.to_string()));
        let rows = mirror.load(user_id).await.expect("Load failed");
        assert!(store.apply_remote_snapshot(user_id, rows));
        store
    }

    fn contents(store: &BoardStore, column: Column) -> Vec<String> {
        store.tasks(column).iter().map(|t| t.content.clone()).collect()
    }

    #[tokio::test]
    async fn test_delete_then_add_reloads_in_board_order() {
        let (repo, mirror) = setup();
        let mut first = BoardStore::new();
        first.set_owner(Some("u1".to_string()));
        let a = first.add_task(Column::ToDo, "A").unwrap();
        let b = first.add_task(Column::ToDo, "B").unwrap();
        first.add_task(Column::ToDo, "C");
        first.delete_task(Column::ToDo, a.id);
        first.delete_task(Column::ToDo, b.id);
        first.add_task(Column::ToDo, "D");

        assert_eq!(mirror.apply_all(first.drain_outbox()).await, 0);
        let second = reload(&mirror, "u1").await;

        assert_eq!(contents(&first, Column::ToDo), vec!["C", "D"]);
        assert_eq!(second.board(), first.board());
        let mut positions: Vec<(String, i32)> = repo.rows().into_iter().map(|r| (r.content, r.position)).collect();
        positions.sort();
        assert_eq!(positions, vec![("C".to_string(), 0), ("D".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_moves_after_delete_survive_reload() {
        let (_repo, mirror) = setup();
        let mut first = BoardStore::new();
        first.set_owner(Some("u1".to_string()));
        let a = first.add_task(Column::ToDo, "A").unwrap();
        let b = first.add_task(Column::ToDo, "B").unwrap();
        let c = first.add_task(Column::ToDo, "C").unwrap();
        let d = first.add_task(Column::ToDo, "D").unwrap();
        mirror.apply_all(first.drain_outbox()).await;

        first.delete_task(Column::ToDo, b.id);
        mirror.apply_all(first.drain_outbox()).await;
        first.move_task(DragItem::new(Column::ToDo, d.id), Some(DropTarget::OnTask(Column::ToDo, a.id)));
        first.move_task(DragItem::new(Column::ToDo, c.id), Some(DropTarget::OnColumnEnd(Column::InProgress)));
        assert_eq!(mirror.apply_all(first.drain_outbox()).await, 0);

        let second = reload(&mirror, "u1").await;

        assert_eq!(contents(&second, Column::ToDo), vec!["D", "A"]);
        assert_eq!(contents(&second, Column::InProgress), vec!["C"]);
        assert_eq!(second.board(), first.board());
        assert!(second.board().is_consistent());
    }

    #[tokio::test]
    async fn test_session_provider_drives_store_owner() {
        let auth = InMemorySessionProvider::new();
        let store = Rc::new(RefCell::new(BoardStore::new()));

        let sink = store.clone();
        let subscription = auth.on_auth_state_change(auth_callback(move |event, session| {
            let owner = match event {
                AuthEvent::SignedOut => None,
                _ => session.map(|s| s.user.id.clone()),
            };
            sink.borrow_mut().set_owner(owner);
        }));

        let session = auth.sign_up("ada@example.com", "secret", Some("Ada")).await.unwrap().unwrap();
        assert_eq!(store.borrow().owner(), Some(session.user.id.as_str()));
        assert_eq!(auth.get_user().await.unwrap().unwrap().greeting_name(), "Ada");

        auth.sign_out().await.unwrap();
        assert_eq!(store.borrow().owner(), None);
        assert!(auth.get_session().await.unwrap().is_none());

        drop(subscription);
        auth.sign_in_with_password("ada@example.com", "secret").await.unwrap();
        assert_eq!(store.borrow().owner(), None);
    }

    #[tokio::test]
    async fn test_bad_credentials_are_rejected() {
        let auth = InMemorySessionProvider::new();
        auth.sign_up("ada@example.com", "secret", None).await.unwrap();
        auth.sign_out().await.unwrap();

        let err = auth.sign_in_with_password("ada@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");

        let dup = auth.sign_up("ada@example.com", "other", None).await.unwrap_err();
        assert_eq!(dup.to_string(), "User already registered");
    }
}
