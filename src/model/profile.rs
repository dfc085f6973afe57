//! Flamebearer profile JSON schema.
//!
//! This is the document exchanged with the data-fetch layer. Levels in it are
//! delta-encoded; see [`crate::codec::decode_deltas`].

use crate::codec::Format;
use crate::color::SpyName;
use crate::utils::config::PROFILE_VERSION;
use serde::{Deserialize, Serialize};

/// How `self`/`total` values are humanized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    Samples,
    Objects,
    Goroutines,
    Bytes,
    LockSamples,
    LockNanoseconds,
    TraceSamples,
    Exceptions,
    #[default]
    #[serde(rename = "")]
    #[serde(other)]
    Unknown,
}

impl Units {
    /// Tooltip row titles: (share title, humanized value title)
    pub fn titles(&self) -> (&'static str, &'static str) {
        match self {
            Units::Objects => ("% of objects in RAM", "RAM amount"),
            Units::Goroutines => ("% of goroutines", "goroutines"),
            Units::Bytes => ("% of RAM", "bytes"),
            Units::Samples => ("Share of CPU", "CPU Time"),
            Units::LockNanoseconds => ("% of Time spent", "seconds"),
            Units::LockSamples => ("% of contended locks", "locks"),
            Units::TraceSamples => ("% of time", "samples"),
            Units::Exceptions => ("% of thrown exceptions", "exceptions"),
            Units::Unknown => ("", ""),
        }
    }
}

/// Top-level profile document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlamebearerProfile {
    /// Schema version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    pub flamebearer: FlamebearerData,

    pub metadata: ProfileMetadata,

    /// Baseline total, diff profiles only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_ticks: Option<u64>,

    /// Comparison total, diff profiles only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_ticks: Option<u64>,
}

/// Names table and delta-encoded levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlamebearerData {
    pub names: Vec<String>,
    pub levels: Vec<Vec<u64>>,
    pub num_ticks: u64,
    #[serde(default)]
    pub max_self: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    pub format: Format,

    #[serde(default)]
    pub spy_name: SpyName,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default)]
    pub units: Units,

    /// Application or profile name, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn default_version() -> u32 {
    PROFILE_VERSION
}

fn default_sample_rate() -> u32 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let json = r#"{
            "flamebearer": {"names": ["total"], "levels": [[0, 10, 10, 0]], "numTicks": 10},
            "metadata": {"format": "single"}
        }"#;
        let profile: FlamebearerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.version, PROFILE_VERSION);
        assert_eq!(profile.metadata.sample_rate, 100);
        assert_eq!(profile.metadata.units, Units::Unknown);
        assert_eq!(profile.metadata.spy_name, SpyName::Other);
        assert_eq!(profile.flamebearer.max_self, 0);
        assert!(profile.left_ticks.is_none());
    }

    #[test]
    fn test_unknown_units_and_spy_fall_back() {
        let json = r#"{"format": "double", "spyName": "perlspy", "units": "furlongs"}"#;
        let meta: ProfileMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.format, Format::Double);
        assert_eq!(meta.spy_name, SpyName::Other);
        assert_eq!(meta.units, Units::Unknown);
    }

    #[test]
    fn test_units_wire_names() {
        let units: Units = serde_json::from_str("\"lock_nanoseconds\"").unwrap();
        assert_eq!(units, Units::LockNanoseconds);
        assert_eq!(serde_json::to_string(&Units::TraceSamples).unwrap(), "\"trace_samples\"");
    }
}
