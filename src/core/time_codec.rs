use std::borrow::Cow;

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::core::{Time, TimeBound, TimeBounds};

/// Day zero for daily datasets. Earlier dates map to negative day counts.
pub const EPOCH_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2020, 1, 21) {
    Some(date) => date,
    None => panic!("epoch date must be a valid calendar date"),
};

const RANGE_SEPARATOR: &str = "..";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const DAY_LABEL_FORMAT: &str = "%b %-d, %Y";

/// Granularity of concrete time values; selects the URL representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Year,
    /// Day count relative to the codec epoch.
    Day,
}

/// Converts time bounds to and from URL query-string components.
///
/// Parsing accepts integers, sentinel tokens and ISO dates regardless of
/// `unit`; `unit` only decides how concrete values are written back out.
/// Nothing here fails: malformed input degrades to the caller's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeCodec {
    pub unit: TimeUnit,
    pub epoch: NaiveDate,
}

impl Default for TimeCodec {
    fn default() -> Self {
        Self::new(TimeUnit::Year)
    }
}

impl TimeCodec {
    #[must_use]
    pub fn new(unit: TimeUnit) -> Self {
        Self {
            unit,
            epoch: EPOCH_DATE,
        }
    }

    #[must_use]
    pub fn years() -> Self {
        Self::new(TimeUnit::Year)
    }

    #[must_use]
    pub fn days() -> Self {
        Self::new(TimeUnit::Day)
    }

    #[must_use]
    pub fn with_epoch(mut self, epoch: NaiveDate) -> Self {
        self.epoch = epoch;
        self
    }

    #[must_use]
    pub fn is_date(self) -> bool {
        self.unit == TimeUnit::Day
    }

    /// Parses one endpoint: an ISO date (converted to a day count), an
    /// integer, or a sentinel token.
    #[must_use]
    pub fn parse_time_uri_component(self, text: &str, default: TimeBound) -> TimeBound {
        self.parse_token(text).unwrap_or(default)
    }

    /// Parses a `time` query value into a `[start, end]` pair.
    ///
    /// `A..B` yields both endpoints; a bare token `t` yields `[t, t]`.
    /// Legacy open-ended forms (`..`, `2000..`, `..2005`) are upgraded first.
    #[must_use]
    pub fn time_domain_from_query_string(self, text: &str) -> TimeBounds {
        let upgraded = upgrade_legacy_time_string(text);

        if let Some((start, end)) = upgraded.split_once(RANGE_SEPARATOR) {
            if let (Some(start), Some(end)) = (self.parse_token(start), self.parse_token(end)) {
                return TimeBounds::new(start, end);
            }
        }

        TimeBounds::single(self.parse_time_uri_component(&upgraded, TimeBound::UnboundedRight))
    }

    /// Formats one endpoint for a URL.
    #[must_use]
    pub fn format_time_uri_component(self, bound: TimeBound) -> String {
        match bound {
            TimeBound::Value(time) if self.is_date() => self
                .day_to_date(time)
                .map_or_else(|| time.to_string(), |date| date.format(ISO_DATE_FORMAT).to_string()),
            _ => bound.to_string(),
        }
    }

    /// Formats a pair; equal endpoints collapse to a single token.
    ///
    /// Never emits the legacy open-ended forms.
    #[must_use]
    pub fn format_time_bounds(self, bounds: TimeBounds) -> String {
        let start = self.format_time_uri_component(bounds.start);
        if bounds.is_single() {
            return start;
        }
        let end = self.format_time_uri_component(bounds.end);
        format!("{start}{RANGE_SEPARATOR}{end}")
    }

    /// Human-readable label for a resolved time, e.g. `2005` or `Jan 22, 2020`.
    #[must_use]
    pub fn format_time_label(self, time: Time) -> String {
        match self.unit {
            TimeUnit::Year => time.to_string(),
            TimeUnit::Day => self
                .day_to_date(time)
                .map_or_else(|| time.to_string(), |date| date.format(DAY_LABEL_FORMAT).to_string()),
        }
    }

    #[must_use]
    pub fn day_to_date(self, day: Time) -> Option<NaiveDate> {
        TimeDelta::try_days(day).and_then(|delta| self.epoch.checked_add_signed(delta))
    }

    #[must_use]
    pub fn date_to_day(self, date: NaiveDate) -> Time {
        date.signed_duration_since(self.epoch).num_days()
    }

    fn parse_token(self, text: &str) -> Option<TimeBound> {
        if let Some(bound) = TimeBound::from_sentinel_token(text) {
            return Some(bound);
        }
        if is_iso_date_shaped(text) {
            return NaiveDate::parse_from_str(text, ISO_DATE_FORMAT)
                .ok()
                .map(|date| TimeBound::Value(self.date_to_day(date)));
        }
        text.parse::<Time>().ok().map(TimeBound::Value)
    }
}

/// Parses `earliest`, `latest` or a signed integer, falling back to `default`.
#[must_use]
pub fn parse_time_bound(text: &str, default: TimeBound) -> TimeBound {
    TimeBound::from_sentinel_token(text)
        .or_else(|| text.parse::<Time>().ok().map(TimeBound::Value))
        .unwrap_or(default)
}

/// Endpoint parsing relative to [`EPOCH_DATE`].
#[must_use]
pub fn parse_time_uri_component(text: &str, default: TimeBound) -> TimeBound {
    TimeCodec::default().parse_time_uri_component(text, default)
}

/// Range parsing relative to [`EPOCH_DATE`].
#[must_use]
pub fn time_domain_from_query_string(text: &str) -> TimeBounds {
    TimeCodec::default().time_domain_from_query_string(text)
}

/// Endpoint formatting; `is_date` selects ISO dates relative to [`EPOCH_DATE`].
#[must_use]
pub fn format_time_uri_component(bound: TimeBound, is_date: bool) -> String {
    codec_for(is_date).format_time_uri_component(bound)
}

#[must_use]
pub fn format_time_bounds(bounds: TimeBounds, is_date: bool) -> String {
    codec_for(is_date).format_time_bounds(bounds)
}

fn codec_for(is_date: bool) -> TimeCodec {
    if is_date {
        TimeCodec::days()
    } else {
        TimeCodec::years()
    }
}

// Link unfurlers mangle URLs ending in dots, so open-ended ranges are no
// longer emitted. Incoming links in the old shape must keep working.
fn upgrade_legacy_time_string(text: &str) -> Cow<'_, str> {
    if text == RANGE_SEPARATOR {
        return Cow::Owned(format!(
            "{}{RANGE_SEPARATOR}{}",
            crate::core::UNBOUNDED_LEFT_TOKEN,
            crate::core::UNBOUNDED_RIGHT_TOKEN
        ));
    }
    if text.ends_with(RANGE_SEPARATOR) {
        return Cow::Owned(format!("{text}{}", crate::core::UNBOUNDED_RIGHT_TOKEN));
    }
    if text.starts_with(RANGE_SEPARATOR) {
        return Cow::Owned(format!("{}{text}", crate::core::UNBOUNDED_LEFT_TOKEN));
    }
    Cow::Borrowed(text)
}

// Shape check only (`\d{4}-[01]\d-[0-3]\d`); calendar validity is left to chrono.
fn is_iso_date_shaped(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && matches!(bytes[5], b'0'..=b'1')
        && bytes[6].is_ascii_digit()
        && bytes[7] == b'-'
        && matches!(bytes[8], b'0'..=b'3')
        && bytes[9].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_forms_are_upgraded() {
        assert_eq!(upgrade_legacy_time_string(".."), "earliest..latest");
        assert_eq!(upgrade_legacy_time_string("2000.."), "2000..latest");
        assert_eq!(upgrade_legacy_time_string("..2005"), "earliest..2005");
        assert_eq!(upgrade_legacy_time_string("2000..2005"), "2000..2005");
    }

    #[test]
    fn iso_shape_check_is_strict() {
        assert!(is_iso_date_shaped("2020-01-22"));
        assert!(!is_iso_date_shaped("2020-1-22"));
        assert!(!is_iso_date_shaped("2020-21-01"));
        assert!(!is_iso_date_shaped("-2020-01-22"));
    }

    #[test]
    fn day_conversion_is_relative_to_epoch() {
        let codec = TimeCodec::days();
        assert_eq!(codec.day_to_date(0), Some(EPOCH_DATE));
        assert_eq!(
            codec.date_to_day(NaiveDate::from_ymd_opt(2020, 2, 1).expect("valid date")),
            11
        );
        assert_eq!(codec.day_to_date(Time::MAX), None);
    }
}
