use std::collections::BTreeMap;

use super::kind::StatusKind;

/// Policy table for status kinds.
///
/// Flags and display data are fixed per kind; durations default to the
/// built-in table and may be overridden by content.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusRegistry {
    durations: BTreeMap<StatusKind, f32>,
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the duration (seconds) of a kind.
    pub fn with_duration(mut self, kind: StatusKind, seconds: f32) -> Self {
        self.durations.insert(kind, seconds);
        self
    }

    /// Duration in seconds. Non-positive values are treated as one second.
    pub fn duration(&self, kind: StatusKind) -> f32 {
        let seconds = self
            .durations
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_duration());
        if seconds > f32::EPSILON { seconds } else { 1.0 }
    }

    /// Normalised time-left lost per second.
    pub fn decay_rate(&self, kind: StatusKind) -> f32 {
        1.0 / self.duration(kind)
    }

    pub fn overrides(&self) -> impl Iterator<Item = (StatusKind, f32)> + '_ {
        self.durations.iter().map(|(k, v)| (*k, *v))
    }
}
