//! Session cache in `localStorage`

use kanban_core::Session;

const SESSION_KEY: &str = "youkanban.session";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load() -> Option<Session> {
    let raw = storage()?.get_item(SESSION_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("[SESSION] discarding unreadable cached session: {}", e);
            clear();
            None
        }
    }
}

pub fn save(session: &Session) {
    let Some(storage) = storage() else { return };
    match serde_json::to_string(session) {
        Ok(raw) => {
            if storage.set_item(SESSION_KEY, &raw).is_err() {
                log::warn!("[SESSION] localStorage rejected the session");
            }
        }
        Err(e) => log::error!("[SESSION] serialize failed: {}", e),
    }
}

pub fn clear() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}
