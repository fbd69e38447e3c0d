/// Authenticated request gateway: the single point of entry for all API calls.
///
/// ARCHITECTURAL RULE: No other module may build HTTP requests directly.
/// Hooks call the gateway; the gateway attaches the bearer credential and owns
/// the reaction to authorization failure.
///
/// One instance is built at startup (see `ClientState::new`) and shared.
/// There is no per-view interceptor registration, so nothing can accumulate.
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::{api_error_message, ClientError};
use crate::navigation::{Navigator, Route};
use crate::session::Session;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-call options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    /// When false, a 401 is returned to the caller as an ordinary rejection
    /// instead of ending the session. Login and registration use this.
    pub retry: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { retry: true }
    }
}

impl RequestOptions {
    pub const NO_RETRY: RequestOptions = RequestOptions { retry: false };
}

pub struct ApiGateway {
    client: Client,
    base_url: String,
    session: Arc<Session>,
    navigator: Arc<dyn Navigator>,
}

impl ApiGateway {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: Arc<Session>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ClientError::Url(format!("{base_url}: {e}")))?;

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            session,
            navigator,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.request(Method::GET, path);
        self.execute(Method::GET, path, request, RequestOptions::default())
            .await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path).query(query);
        self.execute(Method::GET, path, request, RequestOptions::default())
            .await
    }

    pub async fn post<T, B>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path).json(body);
        self.execute(Method::POST, path, request, options).await
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.request(Method::POST, path);
        self.execute(Method::POST, path, request, RequestOptions::default())
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.request(Method::DELETE, path);
        self.execute(Method::DELETE, path, request, RequestOptions::default())
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        let request_id = Uuid::new_v4();
        let mut request = request.header(REQUEST_ID_HEADER, request_id.to_string());

        // Request phase: credential only while a session is active
        if self.session.is_authenticated() {
            if let Some(token) = self.session.token() {
                request = request.bearer_auth(token);
            }
        }

        debug!(%request_id, "{method} {path}");
        let response = request.send().await?;
        let status = response.status();

        // Response phase: logout must be visible before the redirect is issued
        if status == StatusCode::UNAUTHORIZED && options.retry {
            warn!(%request_id, "{method} {path} returned 401, ending session");
            self.session.logout();
            self.navigator.navigate(Route::Login);
            return Err(ClientError::Unauthorized);
        }

        let body = response.text().await?;

        if !status.is_success() {
            let message = api_error_message(status, &body);
            debug!(%request_id, "{method} {path} failed with {status}: {message}");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(%request_id, "{method} {path} -> {status}");
        decode_body(path, &body)
    }
}

/// Empty bodies decode as JSON `null`, so `Option<T>` endpoints work.
fn decode_body<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ClientError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|source| ClientError::Decode {
        path: path.to_string(),
        source,
    })
}
