//! Decrypted payload parsing and change detection.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use airbridge_domain::{BridgeError, Result, SensorTable};

/// Apply a decrypted payload to the sensor table.
///
/// The payload must be a JSON object mapping sensor keys to one-element
/// arrays holding a number. Keys without a matching definition are logged
/// and skipped. Returns `true` when at least one reading either had never
/// been reported or received a value different from the one it replaced.
///
/// The plaintext may carry trailing cipher padding, so exactly one JSON
/// value is read from the front of the buffer.
///
/// Callers hold the context lock for the whole pass so property reads see
/// either the pre-update or fully post-update snapshot.
pub fn apply(plaintext: &[u8], table: &mut SensorTable, now: u64) -> Result<bool> {
    let mut de = serde_json::Deserializer::from_slice(plaintext);
    let payload = Value::deserialize(&mut de)
        .map_err(|e| BridgeError::ParseFailed(format!("payload is not valid JSON: {e}")))?;

    let object = payload
        .as_object()
        .ok_or_else(|| BridgeError::ParseFailed("payload is not a JSON object".to_string()))?;

    let mut changed = false;
    for (key, value) in object {
        let entry = match table.find_by_name_mut(key) {
            Some(entry) => entry,
            None => {
                warn!("value {} is not configured for evaluation - ignoring", key);
                continue;
            }
        };

        let number = match value.as_array().and_then(|a| a.first()).and_then(Value::as_f64) {
            Some(number) => number,
            None => {
                warn!("value {} is not a one-element numeric array - ignoring", key);
                continue;
            }
        };

        debug!("payload key {} = {}", key, number);

        let reading = &mut entry.reading;
        if reading.last_reported == 0 || reading.current != number {
            changed = true;
            reading.last_reported = now;
        }
        reading.previous = reading.current;
        reading.current = number;
        reading.last_fetch = now;
    }

    Ok(changed)
}
