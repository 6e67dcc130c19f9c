//! Route table

/// Every screen the client can show. Protected routes require an active
/// session; the public ones are reachable while logged out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Welcome,
    Login,
    Signup,
    Home,
    AddEvent,
    EventDetails(i64),
    CreateTeam,
    MyTeams,
    AllEvents,
    TournamentBracket(i64),
}

impl Route {
    /// Whether this route sits behind the auth gate.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Welcome | Route::Login | Route::Signup)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Welcome => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Home => "/home".to_string(),
            Route::AddEvent => "/add-event".to_string(),
            Route::EventDetails(id) => format!("/events/{id}"),
            Route::CreateTeam => "/create-team".to_string(),
            Route::MyTeams => "/my-teams".to_string(),
            Route::AllEvents => "/all-events".to_string(),
            Route::TournamentBracket(id) => format!("/tournament-bracket/{id}"),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');

        match path {
            "" => return Some(Route::Welcome),
            "/login" => return Some(Route::Login),
            "/signup" => return Some(Route::Signup),
            "/home" => return Some(Route::Home),
            "/add-event" => return Some(Route::AddEvent),
            "/create-team" => return Some(Route::CreateTeam),
            "/my-teams" => return Some(Route::MyTeams),
            "/all-events" => return Some(Route::AllEvents),
            _ => {}
        }

        if let Some(id) = path.strip_prefix("/events/") {
            return id.parse().ok().map(Route::EventDetails);
        }
        if let Some(id) = path.strip_prefix("/tournament-bracket/") {
            return id.parse().ok().map(Route::TournamentBracket);
        }

        None
    }

    /// All protected routes, with placeholder ids for the parameterized ones.
    #[cfg(test)]
    pub(crate) fn protected_routes() -> Vec<Route> {
        vec![
            Route::Home,
            Route::AddEvent,
            Route::EventDetails(1),
            Route::CreateTeam,
            Route::MyTeams,
            Route::AllEvents,
            Route::TournamentBracket(1),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes_are_not_protected() {
        assert!(!Route::Welcome.is_protected());
        assert!(!Route::Login.is_protected());
        assert!(!Route::Signup.is_protected());
    }

    #[test]
    fn test_every_listed_protected_route_is_protected() {
        for route in Route::protected_routes() {
            assert!(route.is_protected(), "{route:?} should be protected");
        }
    }

    #[test]
    fn test_path_parse_roundtrip() {
        let routes = [
            Route::Welcome,
            Route::Login,
            Route::Home,
            Route::EventDetails(42),
            Route::TournamentBracket(7),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Route::parse("/events/not-a-number"), None);
        assert_eq!(Route::parse("/nowhere"), None);
    }
}
