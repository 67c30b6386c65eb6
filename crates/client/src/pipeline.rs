use std::sync::Arc;

use reqwest::{Client, Method, Response};
use serde::Serialize;
use tracing::debug;

use crate::error::{ClientError, OperationFailure};
use crate::session::SessionStore;

/// Outbound-call wrapper for the marketplace API.
///
/// Reads the current credential from the session store (absent is fine —
/// unauthenticated calls simply omit the header), attaches it as a bearer
/// header, JSON-encodes the body when given, and normalizes every
/// non-success response into an [`OperationFailure`]. One call per
/// invocation: no retries, no queueing; timeouts belong to the transport.
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http: Client::new(), base_url, session }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub async fn call<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);
        if let Some(credential) = self.session.credential().await {
            request = request.bearer_auth(credential);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let raw_body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), path = %path, "operation failed");
            return Err(OperationFailure::from_response(status.as_u16(), raw_body).into());
        }
        Ok(response)
    }

    pub(crate) async fn call_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let response = self.call(method, path, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
