use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{EPOCH_DATE, TimeCodec, TimeUnit};
use crate::error::{TimelineError, TimelineResult};

/// Host-facing timeline setup.
///
/// Serializable so embedding applications can persist it next to the rest
/// of their chart configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub ms_per_tick: Option<u64>,
    #[serde(default)]
    pub disable_play: bool,
    #[serde(default)]
    pub time_unit: TimeUnit,
    #[serde(default = "default_epoch")]
    pub epoch: NaiveDate,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            ms_per_tick: None,
            disable_play: false,
            time_unit: TimeUnit::default(),
            epoch: default_epoch(),
        }
    }
}

impl TimelineConfig {
    #[must_use]
    pub fn with_ms_per_tick(mut self, ms_per_tick: u64) -> Self {
        self.ms_per_tick = Some(ms_per_tick);
        self
    }

    #[must_use]
    pub fn with_disable_play(mut self, disable_play: bool) -> Self {
        self.disable_play = disable_play;
        self
    }

    #[must_use]
    pub fn with_time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.time_unit = time_unit;
        self
    }

    #[must_use]
    pub fn with_epoch(mut self, epoch: NaiveDate) -> Self {
        self.epoch = epoch;
        self
    }

    /// Codec matching this config's unit and epoch.
    #[must_use]
    pub fn codec(self) -> TimeCodec {
        TimeCodec::new(self.time_unit).with_epoch(self.epoch)
    }

    pub fn to_json_pretty(self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize timeline config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse timeline config json: {e}"))
        })
    }
}

fn default_epoch() -> NaiveDate {
    EPOCH_DATE
}
