//! AirBridge telemetry acquisition
//!
//! The write path of the bridge: fetch the encrypted envelope from the
//! appliance, decrypt it with the shared secret, and fold the parsed
//! readings into the shared sensor table with change detection.
//!
//! Components mirror the acquisition chain:
//! - [`fetch::TelemetryFetcher`] — one HTTP GET per poll tick
//! - [`crypto`] — key derivation and AES-256-CBC envelope decryption
//! - [`parse`] — payload JSON into table updates plus a change flag
//! - [`pipeline::TelemetryPipeline`] — the three stages under one roof

pub mod crypto;
pub mod fetch;
pub mod parse;
pub mod pipeline;

pub use fetch::TelemetryFetcher;
pub use pipeline::{unix_now, TelemetryPipeline};
