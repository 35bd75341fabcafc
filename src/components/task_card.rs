//! Task Card Component

use leptos::prelude::*;
use leptos_dragdrop::{make_on_item_mouseover, make_on_mousedown};

use kanban_core::{DragItem, DropTarget, Task};

use super::BoardDnd;
use crate::context::use_app_context;

/// A draggable task with a delete button. Hovering a card targets the slot
/// before it.
#[component]
pub fn TaskCard(task: Task, dnd: BoardDnd) -> impl IntoView {
    let ctx = use_app_context();
    let item = DragItem::new(task.column, task.id);
    let target = DropTarget::from(item);

    let class = move || {
        let mut class = String::from("task");
        if dnd.is_dragging(&item) {
            class.push_str(" dragging");
        }
        if dnd.is_drop_target(&target) {
            class.push_str(" drop-target");
        }
        class
    };

    view! {
        <div
            class=class
            data-key=item.key()
            on:mousedown=make_on_mousedown(dnd, item)
            on:mouseover=make_on_item_mouseover(dnd, item, target)
        >
            <span class="task-content">{task.content}</span>
            <button
                class="delete-button"
                title="Delete task"
                // Keep the press from starting a drag
                on:mousedown=|ev| ev.stop_propagation()
                on:click=move |_| ctx.delete_task(item.column, item.task_id)
            >
                "×"
            </button>
        </div>
    }
}
