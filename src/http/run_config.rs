use std::time::Duration;

use url::Url;

use crate::args::{PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, ValidationError};

use super::Distribution;

/// Immutable parameters of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    target_url: Url,
    total_requests: PositiveU64,
    concurrency: PositiveUsize,
    distribution: Distribution,
    request_timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl RunConfig {
    /// Validates the target and builds a config with truncating distribution
    /// and no timeouts.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the URL is empty, does not parse, or
    /// uses a scheme other than http/https.
    pub fn new(
        target_url: &str,
        total_requests: PositiveU64,
        concurrency: PositiveUsize,
    ) -> AppResult<Self> {
        let target_url = parse_target_url(target_url)?;
        Ok(Self {
            target_url,
            total_requests,
            concurrency,
            distribution: Distribution::Truncate,
            request_timeout: None,
            connect_timeout: None,
        })
    }

    #[must_use]
    pub const fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn target_url(&self) -> &Url {
        &self.target_url
    }

    #[must_use]
    pub const fn total_requests(&self) -> PositiveU64 {
        self.total_requests
    }

    #[must_use]
    pub const fn concurrency(&self) -> PositiveUsize {
        self.concurrency
    }

    #[must_use]
    pub const fn distribution(&self) -> Distribution {
        self.distribution
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }
}

fn parse_target_url(value: &str) -> AppResult<Url> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(ValidationError::MissingUrl));
    }
    let url = Url::parse(value).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: value.to_owned(),
            source: err,
        })
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::validation(ValidationError::UnsupportedScheme {
            scheme: other.to_owned(),
        })),
    }
}
