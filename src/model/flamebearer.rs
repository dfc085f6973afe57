//! Decoded, validated flamebearer value.

use super::profile::{FlamebearerData, FlamebearerProfile, ProfileMetadata, Units};
use crate::codec::{decode_deltas, encode_deltas, validate_levels, Format, Layout};
use crate::color::SpyName;
use crate::utils::config::PROFILE_VERSION;
use crate::utils::error::CodecError;
use log::debug;

/// Single profile or a baseline/comparison pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Single,
    Double { left_ticks: u64, right_ticks: u64 },
}

impl ProfileKind {
    pub fn format(&self) -> Format {
        match self {
            ProfileKind::Single => Format::Single,
            ProfileKind::Double { .. } => Format::Double,
        }
    }
}

/// Information carried alongside the levels, used for labels only
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub sample_rate: u32,
    pub units: Units,
    pub spy_name: SpyName,
    pub name: Option<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            sample_rate: 100,
            units: Units::Samples,
            spy_name: SpyName::Other,
            name: None,
        }
    }
}

/// Profile with absolute offsets, ready for the engine.
///
/// Construction always validates, so every accessor below may index the
/// levels without further checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Flamebearer {
    names: Vec<String>,
    levels: Vec<Vec<u64>>,
    num_ticks: u64,
    max_self: u64,
    kind: ProfileKind,
    metadata: Metadata,
}

impl Flamebearer {
    /// Build from levels that already hold absolute offsets
    pub fn new(
        names: Vec<String>,
        levels: Vec<Vec<u64>>,
        num_ticks: u64,
        kind: ProfileKind,
        metadata: Metadata,
    ) -> Result<Self, CodecError> {
        let format = kind.format();
        validate_levels(&levels, names.len(), num_ticks, format)?;

        let layout = Layout::from(format);
        let max_self = levels
            .iter()
            .flat_map(|level| {
                (0..level.len())
                    .step_by(layout.stride())
                    .map(move |j| layout.self_ticks(level, j))
            })
            .max()
            .unwrap_or(0);

        Ok(Self {
            names,
            levels,
            num_ticks,
            max_self,
            kind,
            metadata,
        })
    }

    /// Decode a wire profile. The delta transform runs here and nowhere else.
    pub fn from_profile(profile: FlamebearerProfile) -> Result<Self, CodecError> {
        let FlamebearerProfile {
            flamebearer,
            metadata,
            left_ticks,
            right_ticks,
            ..
        } = profile;

        let kind = match metadata.format {
            Format::Single => ProfileKind::Single,
            Format::Double => match (left_ticks, right_ticks) {
                (Some(left_ticks), Some(right_ticks)) => ProfileKind::Double {
                    left_ticks,
                    right_ticks,
                },
                _ => return Err(CodecError::MissingDiffTicks),
            },
        };

        let levels = decode_deltas(flamebearer.levels, metadata.format)?;
        debug!(
            "Decoded {} levels ({:?}, {} names, {} ticks)",
            levels.len(),
            metadata.format,
            flamebearer.names.len(),
            flamebearer.num_ticks
        );

        Self::new(
            flamebearer.names,
            levels,
            flamebearer.num_ticks,
            kind,
            Metadata {
                sample_rate: metadata.sample_rate,
                units: metadata.units,
                spy_name: metadata.spy_name,
                name: metadata.name,
            },
        )
    }

    /// Re-encode into the wire document
    pub fn to_profile(&self) -> Result<FlamebearerProfile, CodecError> {
        let format = self.format();
        let levels = encode_deltas(self.levels.clone(), format)?;
        let (left_ticks, right_ticks) = match self.kind {
            ProfileKind::Single => (None, None),
            ProfileKind::Double {
                left_ticks,
                right_ticks,
            } => (Some(left_ticks), Some(right_ticks)),
        };

        Ok(FlamebearerProfile {
            version: PROFILE_VERSION,
            flamebearer: FlamebearerData {
                names: self.names.clone(),
                levels,
                num_ticks: self.num_ticks,
                max_self: self.max_self,
            },
            metadata: ProfileMetadata {
                format,
                spy_name: self.metadata.spy_name,
                sample_rate: self.metadata.sample_rate,
                units: self.metadata.units,
                name: self.metadata.name.clone(),
            },
            left_ticks,
            right_ticks,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn levels(&self) -> &[Vec<u64>] {
        &self.levels
    }

    pub fn level(&self, i: usize) -> Option<&[u64]> {
        self.levels.get(i).map(Vec::as_slice)
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn num_ticks(&self) -> u64 {
        self.num_ticks
    }

    pub fn max_self(&self) -> u64 {
        self.max_self
    }

    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    pub fn format(&self) -> Format {
        self.kind.format()
    }

    pub fn layout(&self) -> Layout {
        Layout::from(self.format())
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn sample_rate(&self) -> u32 {
        self.metadata.sample_rate
    }

    pub fn units(&self) -> Units {
        self.metadata.units
    }

    pub fn spy_name(&self) -> SpyName {
        self.metadata.spy_name
    }

    /// Whether `(level, slot)` addresses a node
    pub fn contains_bar(&self, level: usize, slot: usize) -> bool {
        let stride = self.layout().stride();
        self.level(level)
            .is_some_and(|l| slot % stride == 0 && slot + stride <= l.len())
    }

    /// `(offset, total)` of a node, in ticks
    pub fn bar_span(&self, level: usize, slot: usize) -> Option<(u64, u64)> {
        if !self.contains_bar(level, slot) {
            return None;
        }
        let layout = self.layout();
        let l = &self.levels[level];
        Some((layout.offset(l, slot), layout.total(l, slot)))
    }

    /// Function name of a node; empty when the node does not exist
    pub fn bar_name(&self, level: usize, slot: usize) -> &str {
        if !self.contains_bar(level, slot) {
            return "";
        }
        let index = self.layout().name(&self.levels[level], slot);
        self.names.get(index).map(String::as_str).unwrap_or("")
    }

    /// Number of nodes across all levels
    pub fn node_count(&self) -> usize {
        let stride = self.layout().stride();
        self.levels.iter().map(|l| l.len() / stride).sum()
    }
}
