//! End-to-end tests for the telemetry pipeline and property routing
//!
//! These tests drive the acquisition chain against a local one-shot HTTP
//! server speaking the appliance's envelope format, then read the result
//! back through the property dispatch the bus session layer would use.

pub mod test_utils;

#[cfg(test)]
mod pipeline_tests;
