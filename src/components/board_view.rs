//! Board View Component
//!
//! Four columns sharing one drag controller, plus the drag overlay.

use leptos::prelude::*;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals};

use kanban_core::Column;

use super::{BoardDnd, KanbanColumn};
use crate::context::use_app_context;
use crate::store::store_find_task;

#[component]
pub fn BoardView() -> impl IntoView {
    let ctx = use_app_context();
    let dnd: BoardDnd = create_dnd_signals();

    bind_global_mouseup(dnd, move |active, over| ctx.move_task(active, over));

    view! {
        <div class="board">
            <div class="column-container">
                {Column::ALL
                    .into_iter()
                    .map(|column| view! { <KanbanColumn column=column dnd=dnd /> })
                    .collect_view()}
            </div>
            <TaskOverlay dnd=dnd />
        </div>
    }
}

/// Floating copy of the dragged task that follows the pointer
#[component]
fn TaskOverlay(dnd: BoardDnd) -> impl IntoView {
    let ctx = use_app_context();
    let content = move || {
        dnd.dragging_id_read
            .get()
            .and_then(|item| store_find_task(&ctx.store, item.task_id))
            .map(|task| task.content)
            .unwrap_or_default()
    };
    let style = move || {
        let (x, y) = dnd.pointer_read.get();
        format!("left: {}px; top: {}px;", x + 12, y + 12)
    };

    view! {
        <Show when=move || dnd.dragging_id_read.get().is_some()>
            <div class="task task-overlay" style=style>{content}</div>
        </Show>
    }
}
