use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{TimeBound, TimeBounds, TimeCodec};

pub const TIME_QUERY_KEY: &str = "time";
pub const LEGACY_YEAR_QUERY_KEY: &str = "year";

/// Presets cycled by the timeline keyboard shortcut, in order.
pub const TIME_PRESETS: [&str; 3] = ["latest", "earliest", ".."];

/// Time-related query parameters of a chart URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeQueryParams {
    #[serde(default)]
    pub time: Option<String>,
    /// Legacy single-value parameter; only ever moves the end bound.
    #[serde(default)]
    pub year: Option<String>,
}

impl TimeQueryParams {
    #[must_use]
    pub fn with_time(time: impl Into<String>) -> Self {
        Self {
            time: Some(time.into()),
            year: None,
        }
    }

    #[must_use]
    pub fn with_year(year: impl Into<String>) -> Self {
        Self {
            time: None,
            year: Some(year.into()),
        }
    }

    /// Extracts `time` and `year` from a raw query string.
    ///
    /// A leading `?` is tolerated and unrelated keys are ignored. Keys and
    /// values are form-decoded (`%2E%2E` is `..`, `+` is a space). When a
    /// key repeats, the last occurrence wins.
    #[must_use]
    pub fn from_query_str(query: &str) -> Self {
        let mut params = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                TIME_QUERY_KEY => params.time = Some(value.into_owned()),
                LEGACY_YEAR_QUERY_KEY => params.year = Some(value.into_owned()),
                _ => {}
            }
        }
        params
    }

    /// Applies these parameters on top of the current timeline filter.
    ///
    /// A non-empty `time` replaces both bounds. Otherwise a non-empty `year`
    /// replaces the end bound. Empty or missing values change nothing.
    #[must_use]
    pub fn resolve_filter(&self, current: TimeBounds, codec: TimeCodec) -> TimeBounds {
        if let Some(time) = non_empty(self.time.as_deref()) {
            let resolved = codec.time_domain_from_query_string(time);
            warn_if_degraded(TIME_QUERY_KEY, time, resolved);
            debug!(time, ?resolved, "timeline filter from time query param");
            return resolved;
        }

        if let Some(year) = non_empty(self.year.as_deref()) {
            let end = codec.parse_time_uri_component(year, TimeBound::UnboundedRight);
            debug!(year, ?end, "timeline end from legacy year query param");
            return TimeBounds::new(current.start, end);
        }

        current
    }
}

/// Canonical `time` parameter, emitted only when the filter differs from
/// the authored one.
#[must_use]
pub fn time_param(current: TimeBounds, authored: TimeBounds, codec: TimeCodec) -> Option<String> {
    (current != authored).then(|| codec.format_time_bounds(current))
}

/// Next preset after `current` in [`TIME_PRESETS`], wrapping around.
/// Unknown or missing values start from the first preset.
#[must_use]
pub fn next_time_preset(current: Option<&str>) -> &'static str {
    let next_index = current
        .and_then(|current| TIME_PRESETS.iter().position(|preset| *preset == current))
        .map_or(0, |index| (index + 1) % TIME_PRESETS.len());
    TIME_PRESETS[next_index]
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn warn_if_degraded(key: &str, raw: &str, resolved: TimeBounds) {
    let fell_back = resolved == TimeBounds::single(TimeBound::UnboundedRight)
        && !raw.contains(crate::core::UNBOUNDED_RIGHT_TOKEN);
    if fell_back {
        warn!(key, raw, "unrecognized time query value, falling back to latest");
    }
}
