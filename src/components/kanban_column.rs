//! Kanban Column Component
//!
//! Task list with an empty placeholder, the add-task input, and "Clear
//! Tasks" on the Completed column.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mouseleave, make_on_zone_mouseover};

use kanban_core::{Column, DropTarget, Task};

use super::{BoardDnd, TaskCard};
use crate::context::use_app_context;
use crate::store::store_tasks;

#[component]
pub fn KanbanColumn(column: Column, dnd: BoardDnd) -> impl IntoView {
    let ctx = use_app_context();
    let (task_input, set_task_input) = signal(String::new());

    let tasks = move || store_tasks(&ctx.store, column);
    let zone = DropTarget::OnColumnEnd(column);

    let add_task = move || {
        let content = task_input.get_untracked();
        if content.trim().is_empty() {
            return;
        }
        ctx.add_task(column, &content);
        set_task_input.set(String::new());
    };

    view! {
        <div class="column">
            <div class=format!("column-header {}", column.css_class())>
                <h2>{column.as_str()}</h2>
            </div>
            <div
                class=move || {
                    if dnd.is_drop_target(&zone) { "droppable-area drop-target" } else { "droppable-area" }
                }
                data-key=zone.key()
                on:mouseover=make_on_zone_mouseover(dnd, zone)
                on:mouseleave=make_on_mouseleave(dnd)
            >
                <div class="tasks">
                    <Show
                        when=move || !tasks().is_empty()
                        fallback=|| view! { <p class="empty-column">"No Tasks yet!"</p> }
                    >
                        <For
                            each=tasks
                            key=|task: &Task| task.id
                            children=move |task: Task| view! { <TaskCard task=task dnd=dnd /> }
                        />
                    </Show>
                </div>
            </div>
            <input
                type="text"
                class="task-input"
                placeholder="New Task"
                prop:value=move || task_input.get()
                on:input=move |ev| set_task_input.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        add_task();
                    }
                }
            />
            <button class="add-task-button" on:click=move |_| add_task()>"Add Task"</button>
            <Show when=move || column == Column::Completed && !tasks().is_empty()>
                <button class="clear-tasks-button" on:click=move |_| ctx.clear_column(column)>
                    "Clear Tasks"
                </button>
            </Show>
        </div>
    }
}
