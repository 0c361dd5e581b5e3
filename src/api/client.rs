use std::time::Duration;

use reqwest::Response;
use tracing::debug;
use url::Url;

use super::error::{ApiError, ApiResult};

/// HTTP client for the student-management API.
///
/// All persistence lives behind this API; the client itself is
/// stateless and cheap to clone (reqwest clients share their connection
/// pool).
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url`, e.g. `https://host/api`.
    ///
    /// The URL is validated eagerly so a typo in the configuration fails
    /// at startup rather than on the first keystroke that needs data.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        Url::parse(base_url)?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(super) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(super) async fn get(&self, path: &str) -> ApiResult<Response> {
        let url = self.endpoint(path);
        debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        Self::check(response).await
    }

    pub(super) async fn post<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Response> {
        let url = self.endpoint(path);
        debug!("POST {}", url);
        let response = self.http.post(&url).json(body).send().await?;
        Self::check(response).await
    }

    pub(super) async fn put<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Response> {
        let url = self.endpoint(path);
        debug!("PUT {}", url);
        let response = self.http.put(&url).json(body).send().await?;
        Self::check(response).await
    }

    pub(super) async fn delete(&self, path: &str) -> ApiResult<Response> {
        let url = self.endpoint(path);
        debug!("DELETE {}", url);
        let response = self.http.delete(&url).send().await?;
        Self::check(response).await
    }

    async fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, message })
    }
}
