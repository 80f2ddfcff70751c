//! Sensor definitions, live readings, and the bounded sensor table.

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Immutable description of one configured sensor channel.
///
/// Definitions are loaded once at startup from configuration and never
/// change afterwards. Names are unique under case-insensitive comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorDefinition {
    /// Key the appliance uses for this channel in its payload (e.g. "co2").
    pub name: String,
    /// Bus sensor type code.
    pub sensor_type: u32,
    /// Bus sensor usage code.
    pub sensor_usage: u32,
    /// Whether the channel takes part in evaluation and reporting.
    pub active: bool,
}

/// Live measurement state for one sensor channel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorReading {
    /// Most recent value parsed from the appliance.
    pub current: f64,
    /// Value that `current` held before the last update.
    pub previous: f64,
    /// Unix timestamp of the last successful fetch; 0 means never fetched.
    pub last_fetch: u64,
    /// Unix timestamp of the last outward report; 0 means never reported.
    pub last_reported: u64,
}

/// A definition paired with its reading. Same lifetime as the definition.
#[derive(Debug, Clone)]
pub struct SensorEntry {
    /// The configured channel.
    pub definition: SensorDefinition,
    /// Its live state.
    pub reading: SensorReading,
}

/// Capacity-bounded, ordered collection of sensor entries.
///
/// Active entries occupy a contiguous prefix starting at index 0; the
/// prefix length is tracked explicitly in `active_len` rather than found
/// by scanning for the first inactive slot. The loader establishes the
/// prefix and nothing mutates it afterwards.
#[derive(Debug)]
pub struct SensorTable {
    entries: Vec<SensorEntry>,
    active_len: usize,
    capacity: usize,
}

impl SensorTable {
    /// Create an empty table holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            active_len: 0,
            capacity,
        }
    }

    /// Append a definition with a fresh (zeroed) reading.
    ///
    /// Extends the active prefix only while it is still contiguous from
    /// index 0. Fails when the configured capacity is exhausted.
    pub fn push(&mut self, definition: SensorDefinition) -> Result<()> {
        if self.entries.len() >= self.capacity {
            return Err(BridgeError::ConfigInvalid(format!(
                "sensor table capacity {} exceeded",
                self.capacity
            )));
        }
        if definition.active && self.active_len == self.entries.len() {
            self.active_len += 1;
        }
        self.entries.push(SensorEntry {
            definition,
            reading: SensorReading::default(),
        });
        Ok(())
    }

    /// Case-insensitive lookup by channel name over all entries.
    pub fn find_by_name(&self, key: &str) -> Option<&SensorEntry> {
        self.entries
            .iter()
            .find(|e| e.definition.name.eq_ignore_ascii_case(key))
    }

    /// Mutable variant of [`find_by_name`](Self::find_by_name).
    pub fn find_by_name_mut(&mut self, key: &str) -> Option<&mut SensorEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.definition.name.eq_ignore_ascii_case(key))
    }

    /// Enumerate the active prefix in ordinal order.
    ///
    /// Finite and restartable; every call yields the entries at indices
    /// `0..active_len`.
    pub fn enumerate_active(&self) -> impl Iterator<Item = (usize, &SensorEntry)> {
        self.entries[..self.active_len].iter().enumerate()
    }

    /// Number of entries in the active prefix.
    pub fn active_len(&self) -> usize {
        self.active_len
    }

    /// Total number of loaded entries, active or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, active: bool) -> SensorDefinition {
        SensorDefinition {
            name: name.to_string(),
            sensor_type: 5,
            sensor_usage: 1,
            active,
        }
    }

    #[test]
    fn test_find_by_name_is_case_insensitive() {
        let mut table = SensorTable::with_capacity(20);
        table.push(def("co2", true)).unwrap();

        let upper = table.find_by_name("CO2").map(|e| e.definition.name.clone());
        let lower = table.find_by_name("co2").map(|e| e.definition.name.clone());
        assert_eq!(upper, lower);
        assert_eq!(upper.as_deref(), Some("co2"));
        assert!(table.find_by_name("humidity").is_none());
    }

    #[test]
    fn test_enumerate_active_stops_at_first_inactive() {
        let mut table = SensorTable::with_capacity(20);
        table.push(def("a", true)).unwrap();
        table.push(def("b", true)).unwrap();
        table.push(def("c", false)).unwrap();
        table.push(def("d", true)).unwrap();

        let names: Vec<&str> = table
            .enumerate_active()
            .map(|(_, e)| e.definition.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(table.active_len(), 2);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_enumerate_active_is_restartable() {
        let mut table = SensorTable::with_capacity(4);
        table.push(def("a", true)).unwrap();
        table.push(def("b", true)).unwrap();

        assert_eq!(table.enumerate_active().count(), 2);
        assert_eq!(table.enumerate_active().count(), 2);
    }

    #[test]
    fn test_push_rejects_overflow() {
        let mut table = SensorTable::with_capacity(1);
        table.push(def("a", true)).unwrap();

        let err = table.push(def("b", true)).unwrap_err();
        assert!(matches!(err, BridgeError::ConfigInvalid(_)));
    }

    #[test]
    fn test_inactive_entry_still_found_by_name() {
        let mut table = SensorTable::with_capacity(4);
        table.push(def("a", true)).unwrap();
        table.push(def("b", false)).unwrap();

        assert!(table.find_by_name("B").is_some());
        assert_eq!(table.active_len(), 1);
    }
}
