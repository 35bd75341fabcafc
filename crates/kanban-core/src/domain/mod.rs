//! Domain Layer
//!
//! Board entities and drag/drop vocabulary.
//! This layer has NO external dependencies (except serde/serde_json for
//! serialization).

mod entity;
mod column;
mod task;
mod board;
mod drag;
mod session;

pub use entity::{Entity, DomainError, DomainResult};
pub use column::Column;
pub use task::{Placement, Task, TaskId, TaskRow};
pub use board::Board;
pub use drag::{DragItem, DropTarget};
pub use session::{AuthEvent, Session, User, UserId};
