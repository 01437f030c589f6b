//! HTTP client for the bin server.

use reqwest::{Client, Response, StatusCode};

use crate::config::DEFAULT_PORT;
use crate::protocol::{
    CreateParams, CreateResponse, ErrorBody, NameParams, UpdateBody, CREATE_PATH, RETRIEVE_PATH,
    UPDATE_PATH,
};

/// Host the `sbin` binary talks to.
pub const DEFAULT_HOST: &str = "http://localhost";

/// Base URL of the server the `sbin` binary talks to.
pub fn default_base_url() -> String {
    format!("{}:{}", DEFAULT_HOST, DEFAULT_PORT)
}

/// Errors a client call can end in.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never got a response (refused, reset, timed out).
    #[error("could not reach server: {0}")]
    Connection(#[source] reqwest::Error),

    /// The server answered with an error and a detail message.
    #[error("{detail}")]
    Server { status: StatusCode, detail: String },

    /// Anything else, such as a response body that could not be decoded.
    #[error("{0}")]
    Unexpected(String),
}

/// A thin async client over the three bin endpoints.
#[derive(Debug, Clone)]
pub struct BinClient {
    http: Client,
    base_url: String,
}

impl BinClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:5867`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a bin, returning the identifier the server resolved.
    pub async fn create(&self, name: &str, uuid: bool) -> Result<String, ClientError> {
        let params = CreateParams {
            name: name.to_string(),
            uuid,
        };
        tracing::debug!(name, uuid, "sending create");

        let request = self.http.post(self.url(CREATE_PATH)).query(&params);
        let response = check(request.send().await.map_err(transport_error)?).await?;

        let body: CreateResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Unexpected(format!("malformed create response: {}", e)))?;
        Ok(body.bin_name)
    }

    /// Fetch the full content of a bin.
    pub async fn retrieve(&self, name: &str) -> Result<String, ClientError> {
        let params = NameParams {
            name: name.to_string(),
        };
        tracing::debug!(name, "sending retrieve");

        let request = self.http.get(self.url(RETRIEVE_PATH)).query(&params);
        let response = check(request.send().await.map_err(transport_error)?).await?;

        response
            .text()
            .await
            .map_err(|e| ClientError::Unexpected(format!("malformed retrieve response: {}", e)))
    }

    /// Replace the content of a bin.
    pub async fn update(&self, name: &str, content: &str) -> Result<(), ClientError> {
        let params = NameParams {
            name: name.to_string(),
        };
        let body = UpdateBody {
            content: content.to_string(),
        };
        tracing::debug!(name, bytes = content.len(), "sending update");

        let request = self
            .http
            .put(self.url(UPDATE_PATH))
            .query(&params)
            .json(&body);
        check(request.send().await.map_err(transport_error)?).await?;

        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Pass successful responses through; turn error responses into `ClientError::Server`.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match response.json::<ErrorBody>().await {
        Ok(body) => Err(ClientError::Server {
            status,
            detail: body.detail,
        }),
        Err(e) => Err(ClientError::Unexpected(format!(
            "server answered {} without a detail: {}",
            status, e
        ))),
    }
}

fn transport_error(err: reqwest::Error) -> ClientError {
    if err.is_builder() {
        ClientError::Unexpected(err.to_string())
    } else {
        ClientError::Connection(err)
    }
}
