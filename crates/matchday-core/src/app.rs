//! Central application state
//!
//! `App` wires the layers together: the database-backed token store, the
//! session manager and its expiry watcher, the HTTP client, and the guarded
//! router. Clones share the same underlying state.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc::UnboundedReceiver;

use matchday_api::{
    ApiClient, ApiError, Event, Game, NewEvent, NewTeam, Registration, SignUpRequest, Team,
};
use matchday_navigation::{Route, Router};
use matchday_session::{SessionEvent, SessionManager};
use matchday_storage::Database;

use crate::bracket;
use crate::config::Config;
use crate::events::{sort_events, sort_registrations, SortKey};
use crate::notices::Notices;
use crate::Result;

/// Why a session is being torn down. A user-initiated logout routes straight
/// to the login screen; a detected expiry raises the blocking notice instead
/// and resets only on acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutTrigger {
    User,
    Expiry,
}

/// Everything the event details screen needs, fetched in one pass.
#[derive(Debug, Clone)]
pub struct EventDetailsView {
    pub event: Event,
    pub team_count: i64,
    /// Whether the current user created this event.
    pub is_owner: bool,
    pub schedule_created: bool,
}

impl EventDetailsView {
    /// A bracket needs more than two registered teams.
    pub fn can_create_schedule(&self) -> bool {
        self.is_owner && !self.schedule_created && self.team_count > 2
    }

    /// Registration closes once the deadline date has passed. An absent or
    /// unparseable deadline never closes it.
    pub fn registration_open(&self) -> bool {
        let Some(deadline) = self.event.registration_deadline.as_deref() else {
            return true;
        };
        match chrono::NaiveDate::parse_from_str(deadline, "%Y-%m-%d") {
            Ok(deadline) => chrono::Utc::now().date_naive() <= deadline,
            Err(_) => true,
        }
    }
}

pub struct App {
    config: Config,
    db: Database,
    session: SessionManager,
    api: ApiClient,
    router: Router,
    notices: Notices,
    /// Raised by a watcher-triggered expiry, cleared on acknowledgment.
    session_expired: Arc<RwLock<bool>>,
    /// Taken once by [`App::initialize`] when the expiry listener starts.
    expiry_events: Arc<Mutex<Option<UnboundedReceiver<SessionEvent>>>>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::open(&config.database_path)?;
        let (session, expiry_events) = SessionManager::new(db.clone());
        let api = ApiClient::new(&config.api_base_url, session.store().clone())?;
        let router = Router::new(session.gate());

        Ok(Self {
            config,
            db,
            session,
            api,
            router,
            notices: Notices::new(),
            session_expired: Arc::new(RwLock::new(false)),
            expiry_events: Arc::new(Mutex::new(Some(expiry_events))),
        })
    }

    /// Restore any persisted session and start the expiry listener.
    /// Requires a running tokio runtime.
    pub fn initialize(&self) -> Result<()> {
        self.session.restore()?;

        if let Some(mut events) = self.expiry_events.lock().take() {
            let app = self.clone();
            tokio::spawn(async move {
                while events.recv().await.is_some() {
                    if let Err(e) = app.handle_expiry() {
                        tracing::error!(error = %e, "failed to process session expiry");
                    }
                }
            });
        }

        tracing::info!(base_url = %self.config.api_base_url, "application initialized");
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    // === Authentication ===

    /// Sign in and start a session. On success the router lands on `Home`.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Route> {
        match self.api.sign_in(username, password).await {
            Ok(issued) => {
                self.session
                    .begin_session(&issued.access_token, issued.expires_in)?;
                Ok(self.router.navigate(Route::Home))
            }
            Err(ApiError::Unauthorized) => {
                self.notices
                    .error("Login failed. Please check your credentials.");
                Err(ApiError::Unauthorized.into())
            }
            Err(e) => {
                self.notices.error("Login failed. Please try again.");
                Err(e.into())
            }
        }
    }

    /// Create an account. Does not sign in; the user lands on the login
    /// screen to authenticate with the new credentials.
    pub async fn sign_up(&self, account: SignUpRequest) -> Result<Route> {
        match self.api.sign_up(&account).await {
            Ok(()) => {
                self.notices.success("Account created. Please log in.");
                Ok(self.router.navigate(Route::Login))
            }
            Err(e) => {
                self.notices.error("Sign up failed. Please try again.");
                Err(e.into())
            }
        }
    }

    /// User-initiated logout. Returns the rendered route.
    pub fn logout(&self) -> Result<Route> {
        self.end_session(LogoutTrigger::User)?;
        Ok(self.router.current())
    }

    /// The shared logout transition. Idempotent: with no stored session it
    /// does nothing, so an expiry firing after a manual logout (or the
    /// reverse) has no duplicate side effects.
    fn end_session(&self, trigger: LogoutTrigger) -> Result<()> {
        let Some(stored) = self.session.store().read()? else {
            return Ok(());
        };

        // Best-effort server notification. The token is captured up front
        // because the store is cleared without waiting for this call.
        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(e) = api.notify_logout(&stored.token).await {
                tracing::warn!(error = %e, "logout notification failed");
            }
        });

        self.session.end_session()?;

        match trigger {
            LogoutTrigger::User => {
                self.router.reset(Route::Login);
            }
            LogoutTrigger::Expiry => {
                *self.session_expired.write() = true;
            }
        }

        tracing::info!(?trigger, "logged out");
        Ok(())
    }

    fn handle_expiry(&self) -> Result<()> {
        self.end_session(LogoutTrigger::Expiry)
    }

    /// Whether the blocking session-expired notice is showing.
    pub fn session_expired(&self) -> bool {
        *self.session_expired.read()
    }

    /// Acknowledge the session-expired notice: a hard navigation reset to
    /// the login screen, discarding all rendered state.
    pub fn acknowledge_session_expired(&self) -> Route {
        *self.session_expired.write() = false;
        self.router.reset(Route::Login)
    }

    // === Events ===

    pub async fn my_events(&self, sort: SortKey) -> Result<Vec<Event>> {
        let mut events = self.report(self.api.my_events().await, "Error fetching your events.")?;
        sort_events(&mut events, sort);
        Ok(events)
    }

    pub async fn other_events(&self, sort: SortKey) -> Result<Vec<Event>> {
        let mut events =
            self.report(self.api.other_events().await, "Error fetching events.")?;
        sort_events(&mut events, sort);
        Ok(events)
    }

    pub async fn registered_events(&self, sort: SortKey) -> Result<Vec<Registration>> {
        let mut registrations = self.report(
            self.api.registered_events().await,
            "Error fetching registered events.",
        )?;
        sort_registrations(&mut registrations, sort);
        Ok(registrations)
    }

    pub async fn create_event(&self, event: NewEvent) -> Result<()> {
        self.report(
            self.api.create_event(&event).await,
            "Failed to create event. Please try again.",
        )?;
        self.notices.success("Event created successfully!");
        Ok(())
    }

    pub async fn delete_event(&self, id: i64) -> Result<()> {
        self.report(self.api.delete_event(id).await, "Error deleting event.")
    }

    /// Compose the event details screen from its backing endpoints.
    pub async fn event_details(&self, id: i64) -> Result<EventDetailsView> {
        let event = self.report(
            self.api.event(id).await,
            "Error fetching event details.",
        )?;
        let team_count = self.report(
            self.api.team_count(id).await,
            "Error fetching event details.",
        )?;
        let mine = self.report(
            self.api.my_events().await,
            "Error fetching event details.",
        )?;
        let games = self.report(
            self.api.games(id).await,
            "Error fetching event details.",
        )?;

        Ok(EventDetailsView {
            event,
            team_count,
            is_owner: mine.iter().any(|e| e.id == id),
            schedule_created: !games.is_empty(),
        })
    }

    pub async fn register_for_event(&self, event_id: i64, team_name: &str) -> Result<()> {
        self.report(
            self.api.register_team(event_id, team_name).await,
            "Failed to register for event.",
        )?;
        self.notices.success("Registered successfully!");
        Ok(())
    }

    /// Create a team and immediately register it for an event.
    pub async fn register_with_new_team(&self, event_id: i64, team: NewTeam) -> Result<()> {
        let team_name = team.team_name.clone();
        self.report(
            self.api.create_team(&team).await,
            "Failed to create team.",
        )?;
        self.register_for_event(event_id, &team_name).await
    }

    pub async fn cancel_registration(&self, event_id: i64, team_name: &str) -> Result<()> {
        self.report(
            self.api.cancel_registration(event_id, team_name).await,
            "Error cancelling registration.",
        )
    }

    // === Teams ===

    pub async fn teams(&self) -> Result<Vec<Team>> {
        self.report(self.api.teams().await, "Error fetching teams.")
    }

    pub async fn create_team(&self, team: NewTeam) -> Result<()> {
        self.report(self.api.create_team(&team).await, "Failed to create team.")?;
        self.notices.success("Team created successfully!");
        Ok(())
    }

    pub async fn add_member(&self, team_name: &str, member_name: &str) -> Result<()> {
        self.report(
            self.api.add_member(team_name, member_name).await,
            "Failed to add member.",
        )
    }

    pub async fn remove_member(&self, team_name: &str, member_name: &str) -> Result<()> {
        self.report(
            self.api.remove_member(team_name, member_name).await,
            "Failed to remove member.",
        )
    }

    pub async fn delete_team(&self, team_name: &str) -> Result<()> {
        self.report(self.api.delete_team(team_name).await, "Error deleting team.")
    }

    // === Schedule ===

    /// Ask the backend to generate the bracket, starting on the event's date.
    pub async fn create_schedule(&self, event_id: i64) -> Result<()> {
        let event = self.report(
            self.api.event(event_id).await,
            "Failed to create schedule.",
        )?;
        self.report(
            self.api
                .create_schedule(event_id, &event.date, event.time.as_deref())
                .await,
            "Failed to create schedule.",
        )?;
        self.notices.success("Schedule created!");
        Ok(())
    }

    /// Bracket games grouped by round, rounds ascending.
    pub async fn bracket(&self, event_id: i64) -> Result<Vec<(i64, Vec<Game>)>> {
        let games = self.report(self.api.games(event_id).await, "Error fetching games.")?;
        Ok(bracket::rounds(games))
    }

    pub async fn clear_schedule(&self, event_id: i64) -> Result<()> {
        self.report(
            self.api.delete_games(event_id).await,
            "Failed to delete schedule.",
        )
    }

    pub async fn record_score(&self, game_id: i64, team1: i64, team2: i64) -> Result<Game> {
        self.report(
            self.api.update_score(game_id, team1, team2).await,
            "Failed to update score.",
        )
    }

    /// Surface an API failure as a notice exactly once, then propagate it.
    /// The session is left untouched; expiry handling belongs to the watcher.
    fn report<T>(&self, result: matchday_api::Result<T>, message: &str) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                self.notices.error(message);
                Err(e.into())
            }
        }
    }
}

impl Clone for App {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            session: self.session.clone(),
            api: self.api.clone(),
            router: self.router.clone(),
            notices: self.notices.clone(),
            session_expired: Arc::clone(&self.session_expired),
            expiry_events: Arc::clone(&self.expiry_events),
        }
    }
}
