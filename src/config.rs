//! Declarative countdown configuration.
//!
//! [`CountdownConfig`] is the plain-data form of what a host hands a
//! countdown when it activates: the raw target and which units get a slot.
//! It deserializes with serde, so it can come straight from a settings file.
//!
//! ```rust
//! use bubbletea_countdown::config::CountdownConfig;
//! use bubbletea_countdown::slot::ActivationSource;
//! use bubbletea_countdown::unit::Unit;
//!
//! let config = CountdownConfig::new("2030-01-01T00:00:00Z")
//!     .with_slot(Unit::Days)
//!     .with_padded_slot(Unit::Hours, 2);
//!
//! assert_eq!(config.until(), Some("2030-01-01T00:00:00Z"));
//! assert_eq!(config.slot(Unit::Hours).and_then(|s| s.pad_zeros), Some(2));
//! assert!(config.slot(Unit::Minutes).is_none());
//! ```

use crate::slot::{ActivationSource, SlotId, SlotSpec};
use crate::unit::Unit;
use serde::{Deserialize, Serialize};

/// One displayed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// The unit shown in this slot.
    pub unit: Unit,
    /// Zero-pad width. Missing or negative means no padding.
    #[serde(default, rename = "pad-zeros", alias = "pad_zeros")]
    pub pad_zeros: Option<i64>,
}

/// Target and slot layout for a countdown.
///
/// Slots are addressed by [`SlotId::from`] their unit, so each unit can be
/// listed at most once; later duplicates are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Raw target instant.
    #[serde(default)]
    pub until: Option<String>,
    /// Units to display.
    #[serde(default)]
    pub slots: Vec<SlotConfig>,
}

impl CountdownConfig {
    /// A config counting down to `until` with no slots yet.
    pub fn new(until: impl Into<String>) -> Self {
        Self {
            until: Some(until.into()),
            slots: Vec::new(),
        }
    }

    /// Adds an unpadded slot for `unit`.
    pub fn with_slot(self, unit: Unit) -> Self {
        self.push(SlotConfig {
            unit,
            pad_zeros: None,
        })
    }

    /// Adds a slot for `unit` padded to `width` digits.
    pub fn with_padded_slot(self, unit: Unit, width: i64) -> Self {
        self.push(SlotConfig {
            unit,
            pad_zeros: Some(width),
        })
    }

    fn push(mut self, slot: SlotConfig) -> Self {
        self.slots.push(slot);
        self
    }
}

impl ActivationSource for CountdownConfig {
    fn until(&self) -> Option<&str> {
        self.until.as_deref()
    }

    fn slot(&self, unit: Unit) -> Option<SlotSpec> {
        self.slots
            .iter()
            .find(|slot| slot.unit == unit)
            .map(|slot| SlotSpec {
                id: SlotId::from(unit),
                pad_zeros: slot.pad_zeros,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_json() {
        let config: CountdownConfig = serde_json::from_str(
            r#"{
                "until": "2030-06-01T12:00:00Z",
                "slots": [
                    { "unit": "minutes" },
                    { "unit": "seconds", "pad-zeros": 2 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.until(), Some("2030-06-01T12:00:00Z"));
        assert_eq!(
            config.slot(Unit::Seconds),
            Some(SlotSpec {
                id: SlotId::from(Unit::Seconds),
                pad_zeros: Some(2),
            })
        );
        assert_eq!(config.slot(Unit::Minutes).unwrap().pad_zeros, None);
        assert_eq!(config.slot(Unit::Days), None);
    }

    #[test]
    fn test_snake_case_pad_alias() {
        let slot: SlotConfig = serde_json::from_str(r#"{ "unit": "hours", "pad_zeros": 3 }"#).unwrap();
        assert_eq!(slot.pad_zeros, Some(3));
    }

    #[test]
    fn test_missing_fields_default() {
        let config: CountdownConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CountdownConfig::default());
        assert_eq!(config.until(), None);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let config = CountdownConfig::new("2030-01-01")
            .with_padded_slot(Unit::Days, 3)
            .with_slot(Unit::Days);
        assert_eq!(config.slot(Unit::Days).unwrap().pad_zeros, Some(3));
    }
}
