//! Auth State and Listeners
//!
//! Current session plus the subscriber list shared by session providers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::domain::{AuthEvent, Session};

/// Callback invoked on every auth state change
pub type AuthCallback = Rc<dyn Fn(AuthEvent, Option<&Session>)>;

/// Box a closure as an [`AuthCallback`]
pub fn auth_callback<F>(f: F) -> AuthCallback
where
    F: Fn(AuthEvent, Option<&Session>) + 'static,
{
    Rc::new(f)
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    callbacks: Vec<(u64, AuthCallback)>,
}

/// Session holder that notifies subscribers when it changes
#[derive(Clone, Default)]
pub struct AuthState {
    session: Rc<RefCell<Option<Session>>>,
    registry: Rc<RefCell<Registry>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.session.borrow().as_ref().map(|s| s.access_token.clone())
    }

    /// Replace the session and notify subscribers
    pub fn set(&self, event: AuthEvent, session: Option<Session>) {
        *self.session.borrow_mut() = session;
        self.notify(event);
    }

    fn notify(&self, event: AuthEvent) {
        // Snapshot so callbacks may subscribe or unsubscribe re-entrantly
        let callbacks: Vec<AuthCallback> = self
            .registry
            .borrow()
            .callbacks
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        let session = self.session();
        for callback in callbacks {
            callback(event, session.as_ref());
        }
    }

    pub fn subscribe(&self, callback: AuthCallback) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.push((id, callback));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().callbacks.len()
    }
}

/// Handle returned by `on_auth_state_change`
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().callbacks.retain(|(id, _)| *id != self.id);
        }
    }
}
