//! Remote Mirror
//!
//! Replays store mutations against a [`TaskRepository`]. Best effort: each
//! operation is attempted once, failures are logged and never returned, and
//! local state is never rolled back.

use std::rc::Rc;

use crate::domain::{DomainResult, TaskRow};
use crate::repository::TaskRepository;
use crate::store::RemoteOp;

#[derive(Clone)]
pub struct TaskMirror {
    repo: Rc<dyn TaskRepository>,
}

impl TaskMirror {
    pub fn new(repo: Rc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    /// Rows for the initial board load
    pub async fn load(&self, user_id: &str) -> DomainResult<Vec<TaskRow>> {
        self.repo.list_for_user(user_id).await
    }

    /// Apply queued operations in order. Returns how many failed.
    pub async fn apply_all(&self, ops: Vec<RemoteOp>) -> usize {
        let mut failed = 0;
        for op in ops {
            failed += self.apply(op).await;
        }
        failed
    }

    /// Apply one operation. Returns how many remote calls failed.
    pub async fn apply(&self, op: RemoteOp) -> usize {
        match op {
            RemoteOp::Insert(row) => {
                log_failure("insert", row.id, self.repo.insert(&row).await)
            }
            RemoteOp::Delete { user_id, id } => {
                log_failure("delete", id, self.repo.delete(&user_id, id).await)
            }
            RemoteOp::ClearColumn { user_id, column } => {
                match self.repo.delete_column(&user_id, column).await {
                    Ok(()) => 0,
                    Err(e) => {
                        log::error!("[MIRROR] clear {} failed: {}", column, e);
                        1
                    }
                }
            }
            RemoteOp::Reposition { user_id, placements } => {
                let mut failed = 0;
                for placement in &placements {
                    failed += log_failure(
                        "reposition",
                        placement.id,
                        self.repo.update_placement(&user_id, placement).await,
                    );
                }
                failed
            }
        }
    }
}

fn log_failure(action: &str, id: crate::domain::TaskId, result: DomainResult<()>) -> usize {
    match result {
        Ok(()) => 0,
        Err(e) => {
            log::error!("[MIRROR] {} task {} failed: {}", action, id, e);
            1
        }
    }
}
