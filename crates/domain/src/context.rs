//! Shared bridge context
//!
//! Replaces process-wide globals with a single owned context, constructed
//! once at startup and passed explicitly to the telemetry pipeline and the
//! property router. One exclusive lock guards the whole context: the
//! parser holds it for an entire update pass, each property request for
//! the full duration of building its response.

use std::sync::{Arc, Mutex};

use crate::device::DeviceIdentity;
use crate::sensor::SensorTable;

/// Mutable state shared between the poll loop and the property router.
#[derive(Debug)]
pub struct BridgeContext {
    /// The bridged appliance.
    pub identity: DeviceIdentity,
    /// Sensor definitions plus live readings.
    pub sensors: SensorTable,
    /// Controller-scope default zone, persisted with the configuration.
    pub default_zone_id: u64,
}

impl BridgeContext {
    /// Assemble a context from its startup-loaded parts.
    pub fn new(identity: DeviceIdentity, sensors: SensorTable, default_zone_id: u64) -> Self {
        Self {
            identity,
            sensors,
            default_zone_id,
        }
    }

    /// Wrap the context in the shared lock handed to both halves.
    pub fn into_shared(self) -> SharedContext {
        Arc::new(Mutex::new(self))
    }
}

/// Handle used by the poll loop (writer) and property router (reader, and
/// writer for zone ids).
pub type SharedContext = Arc<Mutex<BridgeContext>>;
