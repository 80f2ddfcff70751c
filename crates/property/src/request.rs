//! Property protocol request and response types.
//!
//! The bus session library parses the wire frames and hands this crate an
//! address class plus a typed request; it receives nodes and per-name
//! status codes back and owns the response encoding.

use crate::node::{PropertyNode, PropertyValue};

/// Which handler table an inbound request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressClass {
    /// The singular, global controller.
    Controller,
    /// The announced container; informational only.
    Container,
    /// The bridged appliance (one in this deployment).
    Device,
}

/// One requested name in a get-property query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetItem {
    /// Property name, e.g. `"sensorStates"`.
    pub name: String,
    /// Optional single-sensor filter carried in the query subtree.
    pub index: Option<usize>,
}

impl GetItem {
    /// Query item without an index filter.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    /// Query item restricted to one sensor ordinal.
    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
        }
    }
}

/// A get-property request: the names to answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPropertyRequest {
    /// Requested names in query order.
    pub items: Vec<GetItem>,
}

impl GetPropertyRequest {
    /// Convenience constructor from plain names.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: names.into_iter().map(GetItem::named).collect(),
        }
    }
}

/// One (name, value) pair in a set-property request.
#[derive(Debug, Clone, PartialEq)]
pub struct SetItem {
    /// Property name to set.
    pub name: String,
    /// Requested value.
    pub value: PropertyValue,
}

/// A set-property request: pairs applied in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetPropertyRequest {
    /// Pairs in request order.
    pub items: Vec<SetItem>,
}

/// Per-name status code handed back through the bus response mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyStatus {
    /// Applied or answered.
    Ok,
    /// Recognized address, unsupported operation or name.
    NotImplemented,
    /// Name not part of the settable catalogue.
    NotFound,
    /// Request lacked a usable name or value.
    MissingData,
    /// Value present but of the wrong type.
    InvalidValueType,
}

/// Result of a set-property request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetPropertyResponse {
    /// One status per processed item; an aborting status truncates the
    /// list at the offending name.
    pub statuses: Vec<PropertyStatus>,
    /// Whether the configuration writer must persist the new state.
    pub persist: bool,
}

impl SetPropertyResponse {
    /// True when every processed item was applied.
    pub fn all_ok(&self) -> bool {
        self.statuses.iter().all(|s| *s == PropertyStatus::Ok)
    }
}

/// Result of a get-property request; `None` means the address was not
/// recognized and no response is sent.
pub type GetPropertyResponse = Option<PropertyNode>;
