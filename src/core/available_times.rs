use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::{Time, TimeBound};
use crate::error::{TimelineError, TimelineResult};

/// Ascending, duplicate-free times a dataset actually contains.
///
/// Validation happens once at construction; every lookup afterwards is
/// infallible because the sequence is known to hold at least one time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableTimes {
    times: Vec<Time>,
}

impl AvailableTimes {
    pub fn new(times: Vec<Time>) -> TimelineResult<Self> {
        if times.is_empty() {
            return Err(TimelineError::InvalidData(
                "available times cannot be empty".to_owned(),
            ));
        }
        if let Some(pair) = times.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(TimelineError::InvalidData(format!(
                "available times must be strictly ascending: {} is followed by {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self { times })
    }

    /// Builds a contiguous sequence `start..end` (end exclusive).
    pub fn from_range(range: std::ops::Range<Time>) -> TimelineResult<Self> {
        Self::new(range.collect())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Time] {
        &self.times
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[must_use]
    pub fn min(&self) -> Time {
        self.times[0]
    }

    #[must_use]
    pub fn max(&self) -> Time {
        self.times[self.times.len() - 1]
    }

    #[must_use]
    pub fn position(&self, time: Time) -> Option<usize> {
        self.times.binary_search(&time).ok()
    }

    #[must_use]
    pub fn contains(&self, time: Time) -> bool {
        self.position(time).is_some()
    }

    /// Returns the time right after `time`, saturating at `max` when `time`
    /// is the last entry or not present at all.
    #[must_use]
    pub fn next_after(&self, time: Time) -> Time {
        self.position(time)
            .and_then(|index| self.times.get(index + 1))
            .copied()
            .unwrap_or_else(|| self.max())
    }

    /// Nearest available time to a continuous input.
    ///
    /// Equidistant candidates resolve to the earlier one.
    #[must_use]
    pub fn closest_to(&self, target: f64) -> Time {
        if target.is_nan() {
            return self.min();
        }
        let split = self.times.partition_point(|&time| (time as f64) < target);

        let mut candidates: SmallVec<[(OrderedFloat<f64>, Time); 2]> = SmallVec::new();
        if split > 0 {
            let below = self.times[split - 1];
            candidates.push((OrderedFloat((target - below as f64).abs()), below));
        }
        if let Some(&above) = self.times.get(split) {
            candidates.push((OrderedFloat((above as f64 - target).abs()), above));
        }

        // `min_by_key` keeps the first minimum, which is the earlier time.
        candidates
            .into_iter()
            .min_by_key(|item| item.0)
            .map_or_else(|| self.min(), |(_, time)| time)
    }

    /// Resolves a bound to an available time; sentinels map to the extremes.
    #[must_use]
    pub fn closest_to_bound(&self, bound: TimeBound) -> Time {
        match bound {
            TimeBound::UnboundedLeft => self.min(),
            TimeBound::UnboundedRight => self.max(),
            TimeBound::Value(time) => self.closest_to(time as f64),
        }
    }
}

impl TryFrom<Vec<Time>> for AvailableTimes {
    type Error = TimelineError;

    fn try_from(times: Vec<Time>) -> TimelineResult<Self> {
        Self::new(times)
    }
}
