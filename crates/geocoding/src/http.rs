//! HTTP seam of the geocoder, replaceable in tests.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::GeocodeError;

pub trait HttpClient: Send + Sync {
    /// GETs `url` and returns the body of a successful response.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, GeocodeError>> + Send;
}

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, GeocodeError> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GeocodeError::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, GeocodeError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, is_timeout = e.is_timeout(), "geocoder request failed");
            GeocodeError::Http(e.to_string())
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), "geocoder response received");
        if !status.is_success() {
            return Err(GeocodeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| GeocodeError::Http(format!("failed to read response: {e}")))
    }
}
