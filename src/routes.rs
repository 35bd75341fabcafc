//! Hash Routing
//!
//! `#/` board, `#/sign-in`, `#/sign-up`. Anything else redirects to the board.

use leptos::ev;
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Board,
    SignIn,
    SignUp,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Board => "/",
            Route::SignIn => "/sign-in",
            Route::SignUp => "/sign-up",
        }
    }

    pub fn href(&self) -> String {
        format!("#{}", self.path())
    }

    /// Parse a `location.hash` value. `None` for unknown routes.
    pub fn parse(hash: &str) -> Option<Route> {
        let path = hash.strip_prefix('#').unwrap_or(hash);
        let path = path.split('?').next().unwrap_or_default();
        match path.trim_end_matches('/') {
            "" => Some(Route::Board),
            "/sign-in" => Some(Route::SignIn),
            "/sign-up" => Some(Route::SignUp),
            _ => None,
        }
    }

    pub fn resolve(hash: &str) -> Route {
        Route::parse(hash).unwrap_or(Route::Board)
    }
}

fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

pub fn navigate(route: Route) {
    if let Some(window) = web_sys::window() {
        if window.location().set_hash(route.path()).is_err() {
            log::warn!("[ROUTE] could not navigate to {}", route.path());
        }
    }
}

fn route_from_location() -> Route {
    let hash = current_hash();
    match Route::parse(&hash) {
        Some(route) => route,
        None => {
            log::info!("[ROUTE] unknown route {:?}, redirecting to board", hash);
            navigate(Route::Board);
            Route::Board
        }
    }
}

/// Current route, updated on `hashchange`
pub fn use_route() -> ReadSignal<Route> {
    let (route, set_route) = signal(route_from_location());
    let handle = window_event_listener(ev::hashchange, move |_| {
        set_route.set(route_from_location());
    });
    on_cleanup(move || handle.remove());
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse(""), Some(Route::Board));
        assert_eq!(Route::parse("#/"), Some(Route::Board));
        assert_eq!(Route::parse("#/sign-in"), Some(Route::SignIn));
        assert_eq!(Route::parse("#/sign-up/"), Some(Route::SignUp));
        assert_eq!(Route::parse("#/sign-in?next=board"), Some(Route::SignIn));
    }

    #[test]
    fn test_unknown_route_falls_back_to_board() {
        assert_eq!(Route::parse("#/settings"), None);
        assert_eq!(Route::resolve("#/settings"), Route::Board);
        assert_eq!(Route::resolve("#sign-in"), Route::Board);
    }

    #[test]
    fn test_href_round_trips() {
        for route in [Route::Board, Route::SignIn, Route::SignUp] {
            assert_eq!(Route::parse(&route.href()), Some(route));
        }
    }
}
