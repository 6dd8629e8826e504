use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A concrete point on the time axis: a year, or a day count relative to the
/// epoch date when the dataset is daily.
pub type Time = i64;

pub const UNBOUNDED_LEFT_TOKEN: &str = "earliest";
pub const UNBOUNDED_RIGHT_TOKEN: &str = "latest";

/// A concrete time or one of the two "follow the data" sentinels.
///
/// Variant order matters: the derived `Ord` matches the strict numeric
/// interpretation, so `UnboundedLeft < Value(_) < UnboundedRight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeBound {
    /// Extends to the earliest time available in the dataset.
    UnboundedLeft,
    Value(Time),
    /// Extends to the latest time available in the dataset.
    UnboundedRight,
}

impl TimeBound {
    #[must_use]
    pub fn is_unbounded(self) -> bool {
        !matches!(self, Self::Value(_))
    }

    #[must_use]
    pub fn is_unbounded_left(self) -> bool {
        matches!(self, Self::UnboundedLeft)
    }

    #[must_use]
    pub fn is_unbounded_right(self) -> bool {
        matches!(self, Self::UnboundedRight)
    }

    /// Returns the concrete time, or `None` for sentinels.
    #[must_use]
    pub fn value(self) -> Option<Time> {
        match self {
            Self::Value(time) => Some(time),
            Self::UnboundedLeft | Self::UnboundedRight => None,
        }
    }

    /// Strict numeric interpretation: sentinels become `-inf` / `+inf`.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        match self {
            Self::UnboundedLeft => f64::NEG_INFINITY,
            Self::Value(time) => time as f64,
            Self::UnboundedRight => f64::INFINITY,
        }
    }

    /// Returns the literal URL token for sentinels.
    #[must_use]
    pub fn sentinel_token(self) -> Option<&'static str> {
        match self {
            Self::UnboundedLeft => Some(UNBOUNDED_LEFT_TOKEN),
            Self::UnboundedRight => Some(UNBOUNDED_RIGHT_TOKEN),
            Self::Value(_) => None,
        }
    }

    /// Recognizes exactly `earliest` / `latest`.
    #[must_use]
    pub fn from_sentinel_token(text: &str) -> Option<Self> {
        match text {
            UNBOUNDED_LEFT_TOKEN => Some(Self::UnboundedLeft),
            UNBOUNDED_RIGHT_TOKEN => Some(Self::UnboundedRight),
            _ => None,
        }
    }
}

impl From<Time> for TimeBound {
    fn from(time: Time) -> Self {
        Self::Value(time)
    }
}

impl fmt::Display for TimeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(time) => write!(f, "{time}"),
            Self::UnboundedLeft => f.write_str(UNBOUNDED_LEFT_TOKEN),
            Self::UnboundedRight => f.write_str(UNBOUNDED_RIGHT_TOKEN),
        }
    }
}

impl Serialize for TimeBound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(time) => serializer.serialize_i64(*time),
            Self::UnboundedLeft => serializer.serialize_str(UNBOUNDED_LEFT_TOKEN),
            Self::UnboundedRight => serializer.serialize_str(UNBOUNDED_RIGHT_TOKEN),
        }
    }
}

impl<'de> Deserialize<'de> for TimeBound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimeBoundVisitor)
    }
}

struct TimeBoundVisitor;

impl Visitor<'_> for TimeBoundVisitor {
    type Value = TimeBound;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer time, \"earliest\" or \"latest\"")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<TimeBound, E> {
        Ok(TimeBound::Value(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<TimeBound, E> {
        Time::try_from(value)
            .map(TimeBound::Value)
            .map_err(|_| E::custom(format!("time {value} is out of range")))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<TimeBound, E> {
        if let Some(bound) = TimeBound::from_sentinel_token(value) {
            return Ok(bound);
        }
        value
            .parse::<Time>()
            .map(TimeBound::Value)
            .map_err(|_| E::custom(format!("unrecognized time bound: {value:?}")))
    }
}

/// An ordered `[start, end]` pair. Crossed bounds are a legal transient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBounds {
    pub start: TimeBound,
    pub end: TimeBound,
}

impl TimeBounds {
    #[must_use]
    pub fn new(start: TimeBound, end: TimeBound) -> Self {
        Self { start, end }
    }

    /// Both ends pinned to the same bound.
    #[must_use]
    pub fn single(bound: TimeBound) -> Self {
        Self::new(bound, bound)
    }

    /// `earliest..latest`.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(TimeBound::UnboundedLeft, TimeBound::UnboundedRight)
    }

    #[must_use]
    pub fn is_single(self) -> bool {
        self.start == self.end
    }
}

impl From<(TimeBound, TimeBound)> for TimeBounds {
    fn from((start, end): (TimeBound, TimeBound)) -> Self {
        Self::new(start, end)
    }
}

impl From<TimeBounds> for (TimeBound, TimeBound) {
    fn from(bounds: TimeBounds) -> Self {
        (bounds.start, bounds.end)
    }
}

/// Reads an authored `minTime` value, defaulting to `earliest`.
#[must_use]
pub fn min_time_from_json(value: Option<&serde_json::Value>) -> TimeBound {
    time_bound_from_json(value, TimeBound::UnboundedLeft)
}

/// Reads an authored `maxTime` value, defaulting to `latest`.
#[must_use]
pub fn max_time_from_json(value: Option<&serde_json::Value>) -> TimeBound {
    time_bound_from_json(value, TimeBound::UnboundedRight)
}

fn time_bound_from_json(value: Option<&serde_json::Value>, default: TimeBound) -> TimeBound {
    match value {
        Some(serde_json::Value::Number(number)) => {
            number.as_i64().map_or(default, TimeBound::Value)
        }
        Some(serde_json::Value::String(text)) => super::parse_time_bound(text, default),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_numeric_interpretation() {
        let mut bounds = vec![
            TimeBound::UnboundedRight,
            TimeBound::Value(5),
            TimeBound::UnboundedLeft,
            TimeBound::Value(-3),
        ];
        bounds.sort();
        assert_eq!(
            bounds,
            vec![
                TimeBound::UnboundedLeft,
                TimeBound::Value(-3),
                TimeBound::Value(5),
                TimeBound::UnboundedRight,
            ]
        );
        for pair in bounds.windows(2) {
            assert!(pair[0].to_f64() < pair[1].to_f64());
        }
    }

    #[test]
    fn json_helpers_degrade_to_sentinels() {
        let garbage = serde_json::json!("soon");
        let year = serde_json::json!(1990);
        let latest = serde_json::json!("latest");

        assert_eq!(min_time_from_json(None), TimeBound::UnboundedLeft);
        assert_eq!(max_time_from_json(Some(&garbage)), TimeBound::UnboundedRight);
        assert_eq!(min_time_from_json(Some(&year)), TimeBound::Value(1990));
        assert_eq!(min_time_from_json(Some(&latest)), TimeBound::UnboundedRight);
    }
}
