//! HTTP acquisition of the encrypted telemetry body.

use tracing::{debug, error};

use airbridge_domain::{BridgeError, Result};

/// Fixed path the appliance serves its measurement envelope on.
pub const DATA_PATH: &str = "/data";

/// Status codes the appliance answers with while rejecting or not ready.
/// The transport succeeded but the body must be discarded.
const REJECTING_STATUS: [u16; 3] = [403, 404, 503];

/// One-shot HTTP GET client for the appliance's data endpoint.
///
/// No retry or backoff here; the poll loop owns the cadence and simply
/// tries again on the next tick.
#[derive(Debug, Clone)]
pub struct TelemetryFetcher {
    client: reqwest::Client,
}

impl TelemetryFetcher {
    /// Create a fetcher with a default client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the raw response body from `http://<address>/data`.
    ///
    /// The address may carry an explicit port. Transport errors and the
    /// rejecting status codes both map to `ConnectFailed`.
    pub async fn fetch(&self, address: &str) -> Result<String> {
        let url = format!("http://{}{}", address, DATA_PATH);
        debug!("fetching telemetry from {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("telemetry request to {} failed: {}", url, e);
            BridgeError::ConnectFailed(e.to_string())
        })?;

        let status = response.status().as_u16();
        if REJECTING_STATUS.contains(&status) {
            error!("appliance answered {} - ignoring response", status);
            return Err(BridgeError::ConnectFailed(format!(
                "device rejected request with status {status}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| BridgeError::ConnectFailed(e.to_string()))
    }
}

impl Default for TelemetryFetcher {
    fn default() -> Self {
        Self::new()
    }
}
