//! UI Components
//!
//! Board, column, card and auth form components.

mod header;
mod board_view;
mod kanban_column;
mod task_card;
mod sign_in;
mod sign_up;
mod log_panel;

use kanban_core::{DragItem, DropTarget};
use leptos_dragdrop::DndSignals;

/// Drag controller shared by the board's columns and cards
pub type BoardDnd = DndSignals<DragItem, DropTarget>;

pub use header::AppHeader;
pub use board_view::BoardView;
pub use kanban_column::KanbanColumn;
pub use task_card::TaskCard;
pub use sign_in::SignIn;
pub use sign_up::SignUp;
pub use log_panel::LogPanel;
