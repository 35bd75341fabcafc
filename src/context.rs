//! Application Context
//!
//! Shared state provided via Leptos Context API. Holds the reactive board
//! store and, when a backend is configured, the auth client and task mirror.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use kanban_core::repository::{auth_callback, SessionProvider, SupabaseAuth, SupabaseConfig, SupabaseTaskRepository};
use kanban_core::{AuthEvent, Column, DragItem, DropTarget, RemoteOp, Session, TaskId, TaskMirror, UserId};

use crate::session_storage;
use crate::store::{
    store_add_task, store_apply_snapshot, store_clear_column, store_delete_task, store_move_task,
    store_set_user, AppStore,
};

/// Backend collaborators. Absent in local-only builds.
#[derive(Clone)]
pub struct Services {
    pub auth: Rc<SupabaseAuth>,
    pub mirror: TaskMirror,
}

impl Services {
    pub fn connect(config: SupabaseConfig) -> Self {
        log::info!("[APP] using backend {}", config.url);
        let auth = Rc::new(SupabaseAuth::new(config));
        let repo = SupabaseTaskRepository::new(auth.clone());
        Self {
            auth,
            mirror: TaskMirror::new(Rc::new(repo)),
        }
    }
}

/// App-wide state provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: AppStore,
    services: StoredValue<Option<Services>, LocalStorage>,
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

impl AppContext {
    pub fn new(store: AppStore, services: Option<Services>) -> Self {
        Self {
            store,
            services: StoredValue::new_local(services),
        }
    }

    fn services(&self) -> Option<Services> {
        self.services.get_value()
    }

    /// Auth client, if a backend is configured
    pub fn auth(&self) -> Option<Rc<SupabaseAuth>> {
        self.services().map(|s| s.auth)
    }

    // ========================
    // Board mutations
    // ========================

    pub fn add_task(&self, column: Column, content: &str) {
        let ops = store_add_task(&self.store, column, content);
        self.mirror(ops);
    }

    pub fn delete_task(&self, column: Column, id: TaskId) {
        let ops = store_delete_task(&self.store, column, id);
        self.mirror(ops);
    }

    pub fn clear_column(&self, column: Column) {
        let ops = store_clear_column(&self.store, column);
        self.mirror(ops);
    }

    pub fn move_task(&self, active: DragItem, over: Option<DropTarget>) {
        log::info!("[DND] drop {} over {:?}", active.key(), over.map(|t| t.key()));
        let ops = store_move_task(&self.store, active, over);
        self.mirror(ops);
    }

    /// Replay queued operations remotely without waiting on them
    fn mirror(&self, ops: Vec<RemoteOp>) {
        if ops.is_empty() {
            return;
        }
        let Some(services) = self.services() else { return };
        spawn_local(async move {
            let failed = services.mirror.apply_all(ops).await;
            if failed > 0 {
                log::warn!("[MIRROR] {} remote call(s) failed, local board kept", failed);
            }
        });
    }

    // ========================
    // Session
    // ========================

    /// Subscribe to auth changes and restore a cached session.
    pub fn start_session(&self) {
        let Some(services) = self.services() else {
            log::info!("[APP] no backend configured, board is local-only");
            return;
        };
        let ctx = *self;
        let subscription = services
            .auth
            .on_auth_state_change(auth_callback(move |event, session| {
                ctx.on_auth_change(event, session.cloned());
            }));
        // Lives as long as the owning reactive scope
        let _subscription = StoredValue::new_local(subscription);

        if let Some(saved) = session_storage::load() {
            services.auth.restore(saved);
        }
    }

    fn on_auth_change(&self, event: AuthEvent, session: Option<Session>) {
        log::info!("[AUTH] {:?}", event);
        match session {
            Some(session) if event != AuthEvent::SignedOut => {
                session_storage::save(&session);
                let user_id = session.user.id.clone();
                let owner_changed = store_set_user(&self.store, Some(session.user));
                if owner_changed || matches!(event, AuthEvent::SignedIn | AuthEvent::InitialSession) {
                    self.sync_session(user_id);
                }
            }
            _ => {
                session_storage::clear();
                store_set_user(&self.store, None);
            }
        }
    }

    /// Refresh the user profile (and token), then load the user's board.
    fn sync_session(&self, user_id: UserId) {
        let Some(services) = self.services() else { return };
        let store = self.store;
        spawn_local(async move {
            match services.auth.get_user().await {
                Ok(Some(_)) => {}
                Ok(None) => return,
                Err(e) => log::error!("[AUTH] {}", e),
            }
            if let Some(current) = services.auth.session() {
                session_storage::save(&current);
            }
            match services.mirror.load(&user_id).await {
                Ok(rows) => {
                    let count = rows.len();
                    if store_apply_snapshot(&store, &user_id, rows) {
                        log::info!("[LOAD] {} task(s) for {}", count, user_id);
                    }
                }
                Err(e) => log::error!("[LOAD] fetching tasks failed: {}", e),
            }
        });
    }

    pub fn sign_out(&self) {
        let Some(auth) = self.auth() else { return };
        spawn_local(async move {
            if let Err(e) = auth.sign_out().await {
                log::error!("Logout error: {}", e);
            }
        });
    }
}
