//! One full acquisition cycle: fetch, decrypt, parse.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use tracing::{debug, info};

use airbridge_domain::{BridgeError, Result, SharedContext};

use crate::crypto;
use crate::fetch::TelemetryFetcher;
use crate::parse;

/// Response body wrapper around the encrypted envelope. All other fields
/// the appliance sends alongside `content` are ignored.
#[derive(Debug, Deserialize)]
struct DataBody {
    content: String,
}

/// Drives one poll cycle end to end against the shared context.
#[derive(Debug, Clone, Default)]
pub struct TelemetryPipeline {
    fetcher: TelemetryFetcher,
}

impl TelemetryPipeline {
    /// Create a pipeline with a fresh fetcher.
    pub fn new() -> Self {
        Self {
            fetcher: TelemetryFetcher::new(),
        }
    }

    /// Run one fetch → decrypt → parse cycle.
    ///
    /// Returns whether any reading changed. On failure the cycle is
    /// abandoned and prior readings stay untouched; the caller logs and
    /// waits for the next tick. The context lock is held only for the
    /// parse pass, not across network I/O.
    pub async fn poll_once(&self, context: &SharedContext) -> Result<bool> {
        let (address, secret) = {
            let guard = context.lock().unwrap();
            (
                guard.identity.address.clone(),
                guard.identity.secret.clone(),
            )
        };

        info!("reading appliance values from {}", address);
        let body = self.fetcher.fetch(&address).await?;

        let body: DataBody = serde_json::from_str(&body).map_err(|e| {
            BridgeError::ParseFailed(format!("device response has no usable content field: {e}"))
        })?;

        let plaintext = crypto::decrypt(&body.content, &secret)?;
        debug!("decrypted {} payload bytes", plaintext.len());

        let now = unix_now();
        let mut guard = context.lock().unwrap();
        parse::apply(&plaintext, &mut guard.sensors, now)
    }
}

/// Current time as whole seconds since the Unix epoch.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
