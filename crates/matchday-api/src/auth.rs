//! Authentication endpoints

use reqwest::Method;

use crate::client::ApiClient;
use crate::types::{SignInRequest, SignInResponse, SignUpRequest};
use crate::Result;

impl ApiClient {
    /// `POST /auth/signin`. A rejected credential surfaces as
    /// [`ApiError::Unauthorized`](crate::ApiError::Unauthorized).
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<SignInResponse> {
        let req = self.request(Method::POST, "auth/signin")?.json(&SignInRequest {
            username: username.to_string(),
            password: password.to_string(),
        });
        self.send_json(req).await
    }

    /// `POST /auth/signup`.
    pub async fn sign_up(&self, account: &SignUpRequest) -> Result<()> {
        let req = self.request(Method::POST, "auth/signup")?.json(account);
        self.send_unit(req).await
    }

    /// `PATCH /auth/logout`, carrying an explicit token.
    ///
    /// Best-effort: callers clear the local session without waiting for this
    /// call, so the credential is passed in rather than read from the store.
    pub async fn notify_logout(&self, token: &str) -> Result<()> {
        let req = self.request_with_token(Method::PATCH, "auth/logout", token)?;
        self.send_unit(req).await
    }
}
