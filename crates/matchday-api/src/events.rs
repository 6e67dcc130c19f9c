//! Event endpoints

use reqwest::Method;

use crate::client::ApiClient;
use crate::types::{Event, NewEvent, Registration, RegistrationRequest};
use crate::Result;

impl ApiClient {
    /// `GET /events` — events created by the current user.
    pub async fn my_events(&self) -> Result<Vec<Event>> {
        let req = self.request(Method::GET, "events")?;
        self.send_json(req).await
    }

    /// `GET /events/others` — events created by everyone else.
    pub async fn other_events(&self) -> Result<Vec<Event>> {
        let req = self.request(Method::GET, "events/others")?;
        self.send_json(req).await
    }

    /// `GET /events/user/registeredEvents` — registrations held by the
    /// current user's teams.
    pub async fn registered_events(&self) -> Result<Vec<Registration>> {
        let req = self.request(Method::GET, "events/user/registeredEvents")?;
        self.send_json(req).await
    }

    /// `GET /events/{id}`.
    pub async fn event(&self, id: i64) -> Result<Event> {
        let req = self.request(Method::GET, &format!("events/{id}"))?;
        self.send_json(req).await
    }

    /// `GET /events/{id}/numOfTeams`.
    pub async fn team_count(&self, id: i64) -> Result<i64> {
        let req = self.request(Method::GET, &format!("events/{id}/numOfTeams"))?;
        self.send_json(req).await
    }

    /// `POST /events`.
    pub async fn create_event(&self, event: &NewEvent) -> Result<()> {
        let req = self.request(Method::POST, "events")?.json(event);
        self.send_unit(req).await
    }

    /// `DELETE /events/{id}`.
    pub async fn delete_event(&self, id: i64) -> Result<()> {
        let req = self.request(Method::DELETE, &format!("events/{id}"))?;
        self.send_unit(req).await
    }

    /// `POST /events/{id}/register`.
    pub async fn register_team(&self, id: i64, team_name: &str) -> Result<()> {
        let req = self
            .request(Method::POST, &format!("events/{id}/register"))?
            .json(&RegistrationRequest {
                team_name: team_name.to_string(),
                status: "registered".to_string(),
            });
        self.send_unit(req).await
    }

    /// `DELETE /events/{id}/registration/{teamName}`.
    pub async fn cancel_registration(&self, id: i64, team_name: &str) -> Result<()> {
        let req = self.request(
            Method::DELETE,
            &format!("events/{id}/registration/{team_name}"),
        )?;
        self.send_unit(req).await
    }
}
