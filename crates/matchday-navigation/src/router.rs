//! Session-guarded router

use std::sync::Arc;

use parking_lot::RwLock;

use matchday_session::AuthGate;

use crate::error::NavigationError;
use crate::route::Route;
use crate::Result;

/// Client-side router. Every protected navigation consults the auth gate;
/// a denied attempt renders the login screen instead of the target.
pub struct Router {
    gate: AuthGate,
    current: Arc<RwLock<Route>>,
    back_stack: Arc<RwLock<Vec<Route>>>,
}

impl Router {
    pub fn new(gate: AuthGate) -> Self {
        Self {
            gate,
            current: Arc::new(RwLock::new(Route::Welcome)),
            back_stack: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn current(&self) -> Route {
        self.current.read().clone()
    }

    /// Navigate to `route`. Returns the route actually rendered, which is
    /// `Login` when the gate denies a protected target.
    pub fn navigate(&self, route: Route) -> Route {
        if route.is_protected() && !self.gate.allows() {
            tracing::info!(denied = %route.path(), "unauthenticated navigation, redirecting to login");
            return self.apply(Route::Login);
        }

        self.apply(route)
    }

    pub fn navigate_path(&self, path: &str) -> Result<Route> {
        let route =
            Route::parse(path).ok_or_else(|| NavigationError::UnknownPath(path.to_string()))?;
        Ok(self.navigate(route))
    }

    /// Pop the back stack. Re-applies the gate, since the session may have
    /// ended since the popped route was rendered.
    pub fn back(&self) -> Route {
        let Some(prev) = self.back_stack.write().pop() else {
            return self.current();
        };

        if prev.is_protected() && !self.gate.allows() {
            *self.current.write() = Route::Login;
            return Route::Login;
        }

        *self.current.write() = prev.clone();
        prev
    }

    /// Hard navigation reset: the back stack is discarded and `route`
    /// becomes the only location. Any previously rendered state is gone, the
    /// equivalent of a full page load.
    pub fn reset(&self, route: Route) -> Route {
        self.back_stack.write().clear();
        *self.current.write() = route.clone();
        route
    }

    fn apply(&self, route: Route) -> Route {
        let prev = {
            let mut current = self.current.write();
            if *current == route {
                return route;
            }
            std::mem::replace(&mut *current, route.clone())
        };

        self.back_stack.write().push(prev);
        route
    }
}

impl Clone for Router {
    fn clone(&self) -> Self {
        Self {
            gate: self.gate.clone(),
            current: Arc::clone(&self.current),
            back_stack: Arc::clone(&self.back_stack),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchday_session::TokenStore;
    use matchday_storage::Database;

    fn gate_without_token() -> AuthGate {
        AuthGate::new(TokenStore::new(Database::open_in_memory().unwrap()))
    }

    fn gate_with_token() -> AuthGate {
        let store = TokenStore::new(Database::open_in_memory().unwrap());
        store.save("tok-1", 3600).unwrap();
        AuthGate::new(store)
    }

    #[test]
    fn test_protected_routes_redirect_without_token() {
        let router = Router::new(gate_without_token());

        for route in Route::protected_routes() {
            assert_eq!(router.navigate(route.clone()), Route::Login, "{route:?}");
            assert_eq!(router.current(), Route::Login);
        }
    }

    #[test]
    fn test_protected_routes_allowed_with_token() {
        let router = Router::new(gate_with_token());

        for route in Route::protected_routes() {
            assert_eq!(router.navigate(route.clone()), route);
            assert_eq!(router.current(), route);
        }
    }

    #[test]
    fn test_expired_but_present_token_still_passes() {
        // Presence-only gating: freshness is the watcher's job.
        let store = TokenStore::new(Database::open_in_memory().unwrap());
        store.save("tok-1", 0).unwrap();
        let router = Router::new(AuthGate::new(store));

        assert_eq!(router.navigate(Route::Home), Route::Home);
    }

    #[test]
    fn test_public_routes_always_allowed() {
        let router = Router::new(gate_without_token());

        assert_eq!(router.navigate(Route::Login), Route::Login);
        assert_eq!(router.navigate(Route::Signup), Route::Signup);
        assert_eq!(router.navigate(Route::Welcome), Route::Welcome);
    }

    #[test]
    fn test_back_pops_previous_route() {
        let router = Router::new(gate_with_token());
        router.navigate(Route::Home);
        router.navigate(Route::MyTeams);

        assert_eq!(router.back(), Route::Home);
        assert_eq!(router.current(), Route::Home);
    }

    #[test]
    fn test_back_rechecks_gate() {
        let store = TokenStore::new(Database::open_in_memory().unwrap());
        store.save("tok-1", 3600).unwrap();
        let router = Router::new(AuthGate::new(store.clone()));
        router.navigate(Route::Home);
        router.navigate(Route::MyTeams);

        // Session ends between navigations.
        store.clear().unwrap();

        assert_eq!(router.back(), Route::Login);
    }

    #[test]
    fn test_reset_discards_back_stack() {
        let router = Router::new(gate_with_token());
        router.navigate(Route::Home);
        router.navigate(Route::MyTeams);

        router.reset(Route::Login);

        assert_eq!(router.current(), Route::Login);
        // Nothing left to go back to.
        assert_eq!(router.back(), Route::Login);
    }

    #[test]
    fn test_navigate_path_unknown_is_error() {
        let router = Router::new(gate_with_token());
        assert!(matches!(
            router.navigate_path("/nope"),
            Err(NavigationError::UnknownPath(_))
        ));
    }
}
