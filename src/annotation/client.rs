//! ExAC bulk REST client
//!
//! Posts the full list of variant ids to each bulk endpoint in a single
//! request and decodes the JSON object that comes back.

use super::response::{ConsequenceResponse, FrequencyResponse};
use super::AnnotationSource;
use crate::core::{ServiceError, ServiceResult};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default ExAC REST API root
pub const DEFAULT_EXAC_API: &str = "http://exac.hms.harvard.edu/rest";

/// Per-variant data including `allele_freq`
pub const FREQUENCY_ENDPOINT: &str = "bulk/variant/variant";

/// Variant summaries including `consequence`
pub const CONSEQUENCE_ENDPOINT: &str = "bulk/variant";

/// Builder for constructing an [`ExacClient`]
///
/// ```rust,no_run
/// use vcf_annotator::annotation::ExacClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), vcf_annotator::core::ServiceError> {
/// let client = ExacClient::builder()
///     .with_api_url("http://localhost:8080/rest")
///     .with_timeout(Duration::from_secs(60))
///     .finish()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ExacClientBuilder {
    api_url: Option<String>,
    timeout: Option<Duration>,
    no_proxy: bool,
}

impl ExacClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API root; endpoint paths are appended to it
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Sets a total timeout for each bulk request
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Ignores proxy settings from the environment
    pub fn without_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    pub fn finish(self) -> ServiceResult<ExacClient> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if self.no_proxy {
            builder = builder.no_proxy();
        }

        let api_url = self
            .api_url
            .unwrap_or_else(|| DEFAULT_EXAC_API.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(ExacClient {
            api_url,
            client: builder.build()?,
        })
    }
}

/// Blocking client for the ExAC bulk endpoints
#[derive(Debug, Clone)]
pub struct ExacClient {
    api_url: String,
    client: Client,
}

impl ExacClient {
    pub fn builder() -> ExacClientBuilder {
        ExacClientBuilder::new()
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Full URL of an endpoint under the API root
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    fn post_bulk<T: DeserializeOwned>(&self, path: &str, ids: &[String]) -> ServiceResult<T> {
        let url = self.endpoint(path);
        log::info!("POST {} ({} variants)", url, ids.len());

        let response = self.client.post(&url).json(ids).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                endpoint: url,
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        log::debug!("{} returned {} bytes", url, body.len());

        serde_json::from_str(&body).map_err(|source| ServiceError::Decode {
            endpoint: url,
            source,
        })
    }
}

impl AnnotationSource for ExacClient {
    fn frequencies(&self, ids: &[String]) -> ServiceResult<FrequencyResponse> {
        self.post_bulk(FREQUENCY_ENDPOINT, ids)
    }

    fn consequences(&self, ids: &[String]) -> ServiceResult<ConsequenceResponse> {
        self.post_bulk(CONSEQUENCE_ENDPOINT, ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url() {
        let client = ExacClient::builder().finish().unwrap();
        assert_eq!(client.api_url(), DEFAULT_EXAC_API);
        assert_eq!(
            client.endpoint(FREQUENCY_ENDPOINT),
            "http://exac.hms.harvard.edu/rest/bulk/variant/variant"
        );
        assert_eq!(
            client.endpoint(CONSEQUENCE_ENDPOINT),
            "http://exac.hms.harvard.edu/rest/bulk/variant"
        );
    }

    #[test]
    fn test_custom_api_url_trailing_slash() {
        let client = ExacClient::builder()
            .with_api_url("http://127.0.0.1:9/rest/")
            .with_timeout(Duration::from_secs(1))
            .finish()
            .unwrap();
        assert_eq!(client.endpoint("bulk/variant"), "http://127.0.0.1:9/rest/bulk/variant");
    }
}
