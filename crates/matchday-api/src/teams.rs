//! Team endpoints

use reqwest::Method;

use crate::client::ApiClient;
use crate::types::{MemberUpdate, NewTeam, Team};
use crate::Result;

impl ApiClient {
    /// `GET /team` — teams owned by the current user.
    pub async fn teams(&self) -> Result<Vec<Team>> {
        let req = self.request(Method::GET, "team")?;
        self.send_json(req).await
    }

    /// `POST /team`.
    pub async fn create_team(&self, team: &NewTeam) -> Result<()> {
        let req = self.request(Method::POST, "team")?.json(team);
        self.send_unit(req).await
    }

    /// `PUT /team/{name}/add`.
    pub async fn add_member(&self, team_name: &str, member_name: &str) -> Result<()> {
        let req = self
            .request(Method::PUT, &format!("team/{team_name}/add"))?
            .json(&MemberUpdate {
                member_name: member_name.to_string(),
            });
        self.send_unit(req).await
    }

    /// `DELETE /team/{name}/deleteMember` — the member travels in the body.
    pub async fn remove_member(&self, team_name: &str, member_name: &str) -> Result<()> {
        let req = self
            .request(Method::DELETE, &format!("team/{team_name}/deleteMember"))?
            .json(&MemberUpdate {
                member_name: member_name.to_string(),
            });
        self.send_unit(req).await
    }

    /// `DELETE /team/{name}/delete`.
    pub async fn delete_team(&self, team_name: &str) -> Result<()> {
        let req = self.request(Method::DELETE, &format!("team/{team_name}/delete"))?;
        self.send_unit(req).await
    }
}
