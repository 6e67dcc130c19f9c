//! Tournament schedule endpoints

use reqwest::Method;

use crate::client::ApiClient;
use crate::types::{Game, ScheduleRequest, ScoreUpdate};
use crate::Result;

impl ApiClient {
    /// `GET /schedule/games/{eventId}` — all bracket games for an event.
    pub async fn games(&self, event_id: i64) -> Result<Vec<Game>> {
        let req = self.request(Method::GET, &format!("schedule/games/{event_id}"))?;
        self.send_json(req).await
    }

    /// `POST /schedule/create/{eventId}` — ask the backend to generate the
    /// bracket. Bracket generation itself is entirely server-side.
    pub async fn create_schedule(
        &self,
        event_id: i64,
        start_date: &str,
        start_time: Option<&str>,
    ) -> Result<()> {
        let req = self
            .request(Method::POST, &format!("schedule/create/{event_id}"))?
            .json(&ScheduleRequest {
                start_date: start_date.to_string(),
                start_time: start_time.map(|t| t.to_string()),
            });
        self.send_unit(req).await
    }

    /// `DELETE /schedule/games/{eventId}`.
    pub async fn delete_games(&self, event_id: i64) -> Result<()> {
        let req = self.request(Method::DELETE, &format!("schedule/games/{event_id}"))?;
        self.send_unit(req).await
    }

    /// `PATCH /schedule/update/{gameId}/score`. Returns the updated game.
    pub async fn update_score(&self, game_id: i64, team1: i64, team2: i64) -> Result<Game> {
        let req = self
            .request(Method::PATCH, &format!("schedule/update/{game_id}/score"))?
            .json(&ScoreUpdate {
                match_score: vec![team1, team2],
            });
        self.send_json(req).await
    }
}
