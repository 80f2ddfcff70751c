//! Sensor subtree builders.
//!
//! The three dynamically generated device subtrees are materialized from
//! the active prefix of the sensor table, one child node per sensor keyed
//! by its ordinal index.

use airbridge_domain::BridgeContext;

use crate::node::PropertyNode;

/// Interval in seconds after which a sensor must re-announce itself.
pub const ALIVE_SIGN_INTERVAL_SECS: f64 = 300.0;

/// Fixed bus group for all sensors of this device class.
pub const SENSOR_GROUP: u64 = 8;

/// Minimum seconds between outward pushes of one sensor.
pub const MIN_PUSH_INTERVAL_SECS: u64 = 5;

/// Seconds a value must stay different before a changes-only push.
pub const CHANGES_ONLY_INTERVAL_SECS: f64 = 5.0;

/// Build the `sensorDescriptions` subtree.
///
/// One node per active sensor with the composed display name
/// `<deviceName>-<sensorName>`, type and usage codes, and the fixed
/// reporting interval.
pub fn sensor_descriptions(context: &BridgeContext) -> PropertyNode {
    let mut reply = PropertyNode::new();
    for (index, entry) in context.sensors.enumerate_active() {
        let mut node = PropertyNode::new();
        node.add_string(
            "name",
            format!("{}-{}", context.identity.name, entry.definition.name),
        );
        node.add_uint("sensorType", u64::from(entry.definition.sensor_type));
        node.add_uint("sensorUsage", u64::from(entry.definition.sensor_usage));
        node.add_double("aliveSignInterval", ALIVE_SIGN_INTERVAL_SECS);
        reply.add_node(index.to_string(), node);
    }
    reply
}

/// Build the `sensorSettings` subtree.
///
/// Grouping and interval policy are fixed constants; not user-configurable
/// in this version.
pub fn sensor_settings(context: &BridgeContext) -> PropertyNode {
    let mut reply = PropertyNode::new();
    for (index, _entry) in context.sensors.enumerate_active() {
        let mut node = PropertyNode::new();
        node.add_uint("group", SENSOR_GROUP);
        node.add_uint("minPushInterval", MIN_PUSH_INTERVAL_SECS);
        node.add_double("changesOnlyInterval", CHANGES_ONLY_INTERVAL_SECS);
        reply.add_node(index.to_string(), node);
    }
    reply
}

/// Build the `sensorStates` subtree.
///
/// Each node carries the current value, its age in whole seconds, and an
/// error code of zero (no per-reading error tracking yet). When `index`
/// is given only that sensor's node is returned.
pub fn sensor_states(context: &BridgeContext, now: u64, index: Option<usize>) -> PropertyNode {
    let mut reply = PropertyNode::new();
    for (ordinal, entry) in context.sensors.enumerate_active() {
        if let Some(wanted) = index {
            if wanted != ordinal {
                continue;
            }
        }
        let mut node = PropertyNode::new();
        node.add_double("value", entry.reading.current);
        node.add_int(
            "age",
            now.saturating_sub(entry.reading.last_fetch) as i64,
        );
        node.add_int("error", 0);
        reply.add_node(ordinal.to_string(), node);
    }
    reply
}
