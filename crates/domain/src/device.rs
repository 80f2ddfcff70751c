//! Device identity

use serde::{Deserialize, Serialize};

/// Identity and connection material for the bridged appliance.
///
/// Loaded from configuration at startup. Everything except `zone_id` is
/// immutable at runtime; `zone_id` is settable over the property bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Hardware identifier reported in metadata properties.
    pub id: String,
    /// Network address (host or host:port) of the appliance.
    pub address: String,
    /// Shared secret used to derive the payload decryption key.
    pub secret: String,
    /// Display name composed into sensor names and metadata.
    pub name: String,
    /// Zone the device is assigned to on the bus.
    pub zone_id: u64,
}
