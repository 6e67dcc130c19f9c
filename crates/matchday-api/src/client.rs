//! HTTP client plumbing

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use matchday_session::TokenStore;

use crate::error::ApiError;
use crate::Result;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    store: TokenStore,
}

impl ApiClient {
    pub fn new(base_url: &str, store: TokenStore) -> Result<Self> {
        // A trailing slash keeps Url::join from replacing the last segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|e| ApiError::BaseUrl(e.to_string()))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            store,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::BaseUrl(e.to_string()))
    }

    /// Build a request with the bearer token attached. The token store is
    /// read on every outgoing call, so requests always carry the current
    /// credential (or none at all when logged out).
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let mut req = self.http.request(method, self.endpoint(path)?);

        match self.store.read() {
            Ok(Some(session)) => req = req.bearer_auth(session.token),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "could not read token store for request"),
        }

        Ok(req)
    }

    /// Build a request carrying an explicit token instead of reading the
    /// store. Used for the logout notification, which races store clearing.
    pub(crate) fn request_with_token(
        &self,
        method: Method,
        path: &str,
        token: &str,
    ) -> Result<RequestBuilder> {
        Ok(self
            .http
            .request(method, self.endpoint(path)?)
            .bearer_auth(token))
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let resp = check_status(req.send().await?)?;
        Ok(resp.json().await?)
    }

    pub(crate) async fn send_unit(&self, req: RequestBuilder) -> Result<()> {
        check_status(req.send().await?)?;
        Ok(())
    }
}

fn check_status(resp: Response) -> Result<Response> {
    match resp.status() {
        s if s.is_success() => Ok(resp),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
        s => Err(ApiError::Status(s.as_u16())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchday_storage::Database;

    fn store() -> TokenStore {
        TokenStore::new(Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = ApiClient::new("http://localhost:3000", store()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:3000/");

        let endpoint = client.endpoint("auth/signin").unwrap();
        assert_eq!(endpoint.as_str(), "http://localhost:3000/auth/signin");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(matches!(
            ApiClient::new("not a url", store()),
            Err(ApiError::BaseUrl(_))
        ));
    }

    #[test]
    fn test_request_attaches_bearer_when_present() {
        let store = store();
        store.save("tok-1", 3600).unwrap();
        let client = ApiClient::new("http://localhost:3000", store).unwrap();

        let req = client.request(Method::GET, "events").unwrap().build().unwrap();
        let auth = req.headers().get(reqwest::header::AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer tok-1");
    }

    #[test]
    fn test_request_without_session_has_no_bearer() {
        let client = ApiClient::new("http://localhost:3000", store()).unwrap();

        let req = client.request(Method::GET, "events").unwrap().build().unwrap();
        assert!(req.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }
}
