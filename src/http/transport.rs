use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};
use crate::metrics::{FailureKind, RequestFailure};

use super::RunConfig;

/// Issues GET requests on behalf of the workers.
///
/// `get` resolves once response headers are available; the dispatcher
/// stops its clock there and hands the response back to `drain`.
#[async_trait]
pub trait Transport: Send + Sync {
    type Response: Send;

    async fn get(&self, url: &Url) -> Result<Self::Response, RequestFailure>;

    fn status_code(response: &Self::Response) -> u16;

    async fn drain(&self, response: Self::Response);
}

/// `reqwest`-backed transport. Clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    type Response = Response;

    async fn get(&self, url: &Url) -> Result<Response, RequestFailure> {
        self.client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| RequestFailure::new(classify_error(&err), err.to_string()))
    }

    fn status_code(response: &Response) -> u16 {
        response.status().as_u16()
    }

    async fn drain(&self, mut response: Response) {
        loop {
            match response.chunk().await {
                Ok(Some(_)) => {}
                Ok(None) => break,
                Err(err) => {
                    debug!("Failed to drain response body: {}", err);
                    break;
                }
            }
        }
    }
}

/// Builds the shared client. Timeouts are only applied when configured.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialized.
pub fn build_client(config: &RunConfig) -> AppResult<Client> {
    let mut builder = Client::builder().user_agent(DEFAULT_USER_AGENT);
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    if let Some(timeout) = config.connect_timeout() {
        builder = builder.connect_timeout(timeout);
    }
    builder
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

fn classify_error(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_connect() {
        FailureKind::Connect
    } else if err.is_request() || err.is_redirect() || err.is_builder() {
        FailureKind::Request
    } else {
        FailureKind::Other
    }
}
