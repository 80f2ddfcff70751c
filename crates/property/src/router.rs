//! Property request routing.
//!
//! A pure function from (address class, request) to response nodes and
//! status codes; logging is the only side effect. Persistence after a
//! successful controller-level set is signalled to the caller instead of
//! performed here, which keeps the router testable without a live bus or
//! filesystem.

use tracing::{info, warn};

use airbridge_domain::BridgeContext;

use crate::node::{PropertyNode, PropertyValue};
use crate::request::{
    AddressClass, GetPropertyRequest, PropertyStatus, SetPropertyRequest, SetPropertyResponse,
};
use crate::tree;

/// Routes get/set property requests against the bridge context.
#[derive(Debug, Clone)]
pub struct PropertyRouter {
    hostname: String,
}

impl PropertyRouter {
    /// Create a router, capturing the local hostname for metadata fields.
    pub fn new() -> Self {
        Self {
            hostname: std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string()),
        }
    }

    /// Answer a get-property request for an already-resolved address.
    ///
    /// Unmatched names are logged and skipped, never an error; the reply
    /// simply carries no child for them. `now` is the Unix timestamp used
    /// for reading ages.
    pub fn handle_get(
        &self,
        context: &BridgeContext,
        class: AddressClass,
        request: &GetPropertyRequest,
        now: u64,
    ) -> PropertyNode {
        match class {
            AddressClass::Controller => self.controller_get(context, request),
            AddressClass::Container => {
                info!("get property for container address - nothing to report");
                PropertyNode::new()
            }
            AddressClass::Device => self.device_get(context, request, now),
        }
    }

    /// Apply a set-property request for an already-resolved address.
    pub fn handle_set(
        &self,
        context: &mut BridgeContext,
        class: AddressClass,
        request: &SetPropertyRequest,
    ) -> SetPropertyResponse {
        match class {
            AddressClass::Controller => controller_set(context, request),
            AddressClass::Container => SetPropertyResponse {
                statuses: vec![PropertyStatus::NotImplemented; request.items.len()],
                persist: false,
            },
            AddressClass::Device => device_set(context, request),
        }
    }

    fn controller_get(&self, context: &BridgeContext, request: &GetPropertyRequest) -> PropertyNode {
        let mut reply = PropertyNode::new();
        for item in &request.items {
            let name = item.name.as_str();
            info!("controller get request name=\"{}\"", name);
            match name {
                "hardwareGuid" => {
                    reply.add_string(name, format!("airq-id:{}", context.identity.id));
                }
                "displayId" => reply.add_string(name, context.identity.id.clone()),
                "implementationId" | "modelUID" | "modelGuid" => reply.add_string(name, "AirQ"),
                "name" => reply.add_string(name, format!("AirQ {}", context.identity.name)),
                "model" => {
                    reply.add_string(name, format!("AirQ Controller @{}", self.hostname));
                }
                "capabilities" => {
                    let mut capabilities = PropertyNode::new();
                    capabilities.add_bool("metering", false);
                    capabilities.add_bool("dynamicDefinitions", true);
                    reply.add_node(name, capabilities);
                }
                "zoneID" => reply.add_uint(name, context.default_zone_id),
                // Recognized but not applicable here; answered empty.
                "vendorId" | "oemGuid" | "configURL" => {}
                _ => {
                    warn!("controller get property: unhandled name=\"{}\"", name);
                }
            }
        }
        reply
    }

    fn device_get(
        &self,
        context: &BridgeContext,
        request: &GetPropertyRequest,
        now: u64,
    ) -> PropertyNode {
        let mut reply = PropertyNode::new();
        for item in &request.items {
            let name = item.name.as_str();
            info!("device get request name=\"{}\"", name);
            match name {
                "primaryGroup" => reply.add_uint(name, 9),
                "zoneID" => reply.add_uint(name, context.identity.zone_id),
                "sensorDescriptions" => {
                    reply.add_node(name, tree::sensor_descriptions(context));
                }
                "sensorSettings" => reply.add_node(name, tree::sensor_settings(context)),
                "sensorStates" => {
                    reply.add_node(name, tree::sensor_states(context, now, item.index));
                }
                "name" => reply.add_string(name, context.identity.name.clone()),
                "type" => reply.add_string(name, "vDSD"),
                "model" => reply.add_string(name, "AirQ"),
                "modelFeatures" => {
                    let mut features = PropertyNode::new();
                    features.add_bool("dontcare", false);
                    features.add_bool("blink", false);
                    features.add_bool("outmode", false);
                    features.add_bool("jokerconfig", true);
                    reply.add_node(name, features);
                }
                "modelUID" => reply.add_string(name, "AirQ"),
                "modelVersion" => reply.add_string(name, "0"),
                "vendorId" => reply.add_string(name, "vendor: airq"),
                "vendorName" => reply.add_string(name, "AirQ"),
                "vendorGuid" => {
                    reply.add_string(name, format!("AirQ vDC {}", context.identity.id));
                }
                "hardwareVersion" => reply.add_string(name, "0.0.0"),
                "configURL" => reply.add_string(name, ""),
                "hardwareModelGuid" => reply.add_string(name, ""),
                "deviceIconName" => reply.add_string(name, "airq-airq-16.png"),
                // Recognized names this device class has nothing for;
                // answered empty. Icon bytes are delivered elsewhere.
                "buttonInputDescriptions"
                | "buttonInputSettings"
                | "dynamicActionDescriptions"
                | "outputDescription"
                | "outputSettings"
                | "channelDescriptions"
                | "channelSettings"
                | "channelStates"
                | "deviceStates"
                | "deviceProperties"
                | "devicePropertyDescriptions"
                | "customActions"
                | "binaryInputDescriptions"
                | "binaryInputSettings"
                | "binaryInputStates"
                | "deviceClass"
                | "deviceClassVersion"
                | "oemGuid"
                | "oemModelGuid"
                | "deviceIcon16"
                | "deviceIcon48" => {}
                _ => {
                    warn!("device get property: unhandled name=\"{}\"", name);
                }
            }
        }
        reply
    }
}

impl Default for PropertyRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract a zone id from a requested value. Only integer shapes are
/// accepted, matching the bus's unsigned property accessor.
fn zone_value(value: &PropertyValue) -> Option<u64> {
    match value {
        PropertyValue::UInt(v) => Some(*v),
        PropertyValue::Int(v) if *v >= 0 => Some(*v as u64),
        _ => None,
    }
}

fn controller_set(context: &mut BridgeContext, request: &SetPropertyRequest) -> SetPropertyResponse {
    let mut statuses = Vec::with_capacity(request.items.len());
    for item in &request.items {
        if item.name.is_empty() {
            warn!("controller set property: missing name, abort");
            statuses.push(PropertyStatus::MissingData);
            break;
        }
        if item.name == "zoneID" {
            match zone_value(&item.value) {
                Some(zone) => {
                    info!("controller set \"zoneID\" = {}", zone);
                    context.default_zone_id = zone;
                    statuses.push(PropertyStatus::Ok);
                }
                None => {
                    warn!("controller set property: bad value for \"zoneID\"");
                    statuses.push(PropertyStatus::InvalidValueType);
                    break;
                }
            }
        } else {
            // Only zoneID is settable; abort the remaining names.
            statuses.push(PropertyStatus::NotFound);
            break;
        }
    }

    let persist = !statuses.is_empty() && statuses.iter().all(|s| *s == PropertyStatus::Ok);
    SetPropertyResponse { statuses, persist }
}

fn device_set(context: &mut BridgeContext, request: &SetPropertyRequest) -> SetPropertyResponse {
    let mut statuses = Vec::with_capacity(request.items.len());
    for item in &request.items {
        if item.name.is_empty() {
            warn!("device set property: missing name, abort");
            statuses.push(PropertyStatus::MissingData);
            break;
        }
        if item.name == "zoneID" {
            match zone_value(&item.value) {
                Some(zone) => {
                    info!("device set \"zoneID\" = {}", zone);
                    context.identity.zone_id = zone;
                    statuses.push(PropertyStatus::Ok);
                }
                None => {
                    statuses.push(PropertyStatus::InvalidValueType);
                    break;
                }
            }
        } else {
            // The appliance exposes no other writable state.
            statuses.push(PropertyStatus::NotImplemented);
        }
    }

    SetPropertyResponse {
        statuses,
        persist: false,
    }
}
