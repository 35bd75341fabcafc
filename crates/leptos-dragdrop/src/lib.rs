//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events.
//! Uses a movement threshold to distinguish click from drag.
//!
//! Generic over the dragged key `K` and the drop target `T`: an app decides
//! what identifies a draggable and what a release point means.

use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Default movement in pixels before a press becomes a drag
pub const DRAG_THRESHOLD_PX: i32 = 8;

/// DnD state signals
pub struct DndSignals<K: Send + Sync + 'static, T: Send + Sync + 'static> {
    pub dragging_id_read: ReadSignal<Option<K>>,
    pub dragging_id_write: WriteSignal<Option<K>>,
    pub drop_target_read: ReadSignal<Option<T>>,
    pub drop_target_write: WriteSignal<Option<T>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending key (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<K>>,
    pub pending_id_write: WriteSignal<Option<K>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
    /// Last pointer position, for drag overlays
    pub pointer_read: ReadSignal<(i32, i32)>,
    pub pointer_write: WriteSignal<(i32, i32)>,
    pub threshold_px: i32,
}

impl<K: Send + Sync + 'static, T: Send + Sync + 'static> Clone for DndSignals<K, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Send + Sync + 'static, T: Send + Sync + 'static> Copy for DndSignals<K, T> {}

/// Whether the pointer moved far enough from `start` to begin a drag
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32), threshold_px: i32) -> bool {
    let dx = i64::from(current.0 - start.0);
    let dy = i64::from(current.1 - start.1);
    let t = i64::from(threshold_px);
    dx * dx + dy * dy > t * t
}

pub fn create_dnd_signals<K, T>() -> DndSignals<K, T>
where
    K: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    create_dnd_signals_with_threshold(DRAG_THRESHOLD_PX)
}

pub fn create_dnd_signals_with_threshold<K, T>(threshold_px: i32) -> DndSignals<K, T>
where
    K: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    let (dragging_id_read, dragging_id_write) = signal(None::<K>);
    let (drop_target_read, drop_target_write) = signal(None::<T>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<K>);
    let (start_read, start_write) = signal((0i32, 0i32));
    let (pointer_read, pointer_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
        pointer_read,
        pointer_write,
        threshold_px,
    }
}

impl<K, T> DndSignals<K, T>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn is_dragging(&self, key: &K) -> bool {
        self.dragging_id_read.with(|d| d.as_ref() == Some(key))
    }

    pub fn is_drop_target(&self, target: &T) -> bool {
        self.drop_target_read.with(|t| t.as_ref() == Some(target))
    }
}

/// End drag operation
pub fn end_drag<K, T>(dnd: &DndSignals<K, T>)
where
    K: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    let clear = dnd.drag_just_ended_write;
    set_timeout(move || clear.set(false), Duration::from_millis(100));
}

/// Create mousedown handler for draggable items.
/// Records pending drag with start position.
pub fn make_on_mousedown<K, T>(dnd: DndSignals<K, T>, key: K) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            ev.prevent_default();
            dnd.pending_id_write.set(Some(key.clone()));
            dnd.start_write.set((ev.client_x(), ev.client_y()));
            dnd.pointer_write.set((ev.client_x(), ev.client_y()));
        }
    }
}

/// Create mouseover handler for a draggable that is also a drop target.
/// Hovering the dragged item itself clears the target.
pub fn make_on_item_mouseover<K, T>(dnd: DndSignals<K, T>, key: K, target: T) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        let Some(dragging) = dnd.dragging_id_read.get_untracked() else { return; };
        // Innermost target wins over enclosing zones
        ev.stop_propagation();
        if dragging == key {
            dnd.drop_target_write.set(None);
        } else {
            dnd.drop_target_write.set(Some(target.clone()));
        }
    }
}

/// Create mouseover handler for zones (areas without a specific item)
pub fn make_on_zone_mouseover<K, T>(dnd: DndSignals<K, T>, target: T) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.with_untracked(Option::is_some) {
            dnd.drop_target_write.set(Some(target.clone()));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<K, T>(dnd: DndSignals<K, T>) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.with_untracked(Option::is_some) {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind window mousemove: starts the drag once the threshold is crossed and
/// tracks the pointer while dragging. Removed when the owner is cleaned up.
pub fn bind_global_mousemove<K, T>(dnd: DndSignals<K, T>)
where
    K: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    let handle = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        let current = (ev.client_x(), ev.client_y());
        let Some(pending) = dnd.pending_id_read.get_untracked() else { return; };

        if dnd.dragging_id_read.with_untracked(Option::is_none) {
            if exceeds_threshold(dnd.start_read.get_untracked(), current, dnd.threshold_px) {
                dnd.dragging_id_write.set(Some(pending));
            } else {
                return;
            }
        }
        dnd.pointer_write.set(current);
    });
    on_cleanup(move || handle.remove());
}

/// Bind window mouseup for drop detection. `on_drop` runs only for real
/// drags (not clicks) and receives `None` when released outside any target.
pub fn bind_global_mouseup<K, T, F>(dnd: DndSignals<K, T>, on_drop: F)
where
    K: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    F: Fn(K, Option<T>) + 'static,
{
    let handle = window_event_listener(ev::mouseup, move |_ev: web_sys::MouseEvent| {
        let dragging_id = dnd.dragging_id_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();

        end_drag(&dnd);
        if let Some(dragged) = dragging_id {
            on_drop(dragged, drop_target);
        }
        // Otherwise it was a click; the click event fires naturally
    });
    on_cleanup(move || handle.remove());

    bind_global_mousemove(dnd);
}
