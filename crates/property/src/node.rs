//! Immutable property tree nodes.
//!
//! Responses are built bottom-up from owned nodes and returned, rather
//! than encoded into a mutable reply object handed in by the bus layer.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A single value carried in a property tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// UTF-8 string value.
    String(String),
    /// Unsigned integer value.
    UInt(u64),
    /// Signed integer value.
    Int(i64),
    /// Floating-point value.
    Double(f64),
    /// Boolean flag.
    Bool(bool),
    /// Nested node.
    Node(PropertyNode),
}

/// An ordered collection of named property values.
///
/// Insertion order is preserved; the bus layer serializes children in the
/// order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyNode {
    entries: Vec<(String, PropertyValue)>,
}

impl Serialize for PropertyNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl PropertyNode {
    /// Create an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named value.
    pub fn push(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.entries.push((name.into(), value));
    }

    /// Append a string child.
    pub fn add_string(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.push(name, PropertyValue::String(value.into()));
    }

    /// Append an unsigned integer child.
    pub fn add_uint(&mut self, name: impl Into<String>, value: u64) {
        self.push(name, PropertyValue::UInt(value));
    }

    /// Append a signed integer child.
    pub fn add_int(&mut self, name: impl Into<String>, value: i64) {
        self.push(name, PropertyValue::Int(value));
    }

    /// Append a floating-point child.
    pub fn add_double(&mut self, name: impl Into<String>, value: f64) {
        self.push(name, PropertyValue::Double(value));
    }

    /// Append a boolean child.
    pub fn add_bool(&mut self, name: impl Into<String>, value: bool) {
        self.push(name, PropertyValue::Bool(value));
    }

    /// Append a nested node child.
    pub fn add_node(&mut self, name: impl Into<String>, node: PropertyNode) {
        self.push(name, PropertyValue::Node(node));
    }

    /// Look up a direct child by name.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Look up a direct nested-node child by name.
    pub fn get_node(&self, name: &str) -> Option<&PropertyNode> {
        match self.get(name) {
            Some(PropertyValue::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// Iterate children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the node carries no children.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
