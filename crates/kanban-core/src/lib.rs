//! YouKanBan Core
//!
//! Layered architecture:
//! - domain: tasks, columns, the board and drag/drop vocabulary
//! - engine: drag-reorder algorithm over a board
//! - store: owned board state with the task mutation API
//! - mirror: fire-and-forget replication of mutations to a repository
//! - repository: session and persistence collaborators (Supabase, in-memory)

pub mod domain;
pub mod engine;
pub mod store;
pub mod mirror;
pub mod repository;

pub use domain::{
    AuthEvent, Board, Column, DomainError, DomainResult, DragItem, DropTarget, Entity,
    Placement, Session, Task, TaskId, TaskRow, User, UserId,
};
pub use store::{BoardStore, RemoteOp};
pub use mirror::TaskMirror;
