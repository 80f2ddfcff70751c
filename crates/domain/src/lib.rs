//! AirBridge domain types
//!
//! Core state shared by the telemetry pipeline and the property router:
//! sensor definitions and readings, the bounded sensor table, the device
//! identity, and the error taxonomy. No I/O lives here.

#![warn(missing_docs)]

pub mod context;
pub mod device;
pub mod error;
pub mod sensor;

pub use context::{BridgeContext, SharedContext};
pub use device::DeviceIdentity;
pub use error::{BridgeError, Result};
pub use sensor::{SensorDefinition, SensorEntry, SensorReading, SensorTable};
