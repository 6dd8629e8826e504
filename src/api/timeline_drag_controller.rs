use tracing::{debug, trace};

use crate::core::{Time, TimeBound};
use crate::interaction::{HandleHit, TimelineHandle};

use super::{TimelineController, TimelineManager};

impl<M: TimelineManager> TimelineController<M> {
    /// Converts a slider fraction (`0.0` left edge, `1.0` right edge) to a
    /// continuous input time.
    #[must_use]
    pub fn input_time_from_fraction(&self, fraction: f64) -> f64 {
        let (min, max) = (self.min_time() as f64, self.max_time() as f64);
        min + fraction * (max - min)
    }

    /// Resolves a continuous drag position to a bound.
    ///
    /// Positions strictly outside the available range pin to a sentinel so
    /// the selection keeps following the data when new times arrive.
    #[must_use]
    pub fn time_bound_from_drag(&self, input_time: f64) -> TimeBound {
        let (min, max) = (self.min_time(), self.max_time());
        if input_time < min as f64 {
            return TimeBound::UnboundedLeft;
        }
        if input_time > max as f64 {
            return TimeBound::UnboundedRight;
        }
        let closest = self.manager.times().closest_to(input_time);
        TimeBound::Value(closest.clamp(min, max))
    }

    /// Records start/end offsets relative to the time nearest `input_time`,
    /// so a later pan keeps the span width. Offsets saturate at the `i64`
    /// limits.
    pub fn set_drag_offsets(&mut self, input_time: f64) {
        let closest = self.manager.times().closest_to(input_time);
        let offsets = (
            self.start_time().saturating_sub(closest),
            self.end_time().saturating_sub(closest),
        );
        trace!(input_time, closest, ?offsets, "set drag offsets");
        self.interaction.set_drag_offsets(offsets);
    }

    #[must_use]
    pub fn drag_offsets(&self) -> (Time, Time) {
        self.interaction.drag_offsets()
    }

    /// Applies a drag of `handle` to `input_time` and returns the handle
    /// that actually moved.
    ///
    /// Dragging one handle past the other swaps roles instead of inverting
    /// the range: the dragged handle is first parked on the other one.
    pub fn drag_handle_to_time(&mut self, handle: TimelineHandle, input_time: f64) -> TimelineHandle {
        let time = self.time_bound_from_drag(input_time);

        let constrained = match handle {
            TimelineHandle::Start if time > TimeBound::Value(self.end_time()) => TimelineHandle::End,
            TimelineHandle::End if time < TimeBound::Value(self.start_time()) => {
                TimelineHandle::Start
            }
            other => other,
        };

        if constrained != handle {
            debug!(?handle, ?constrained, "timeline handles crossed");
            if handle == TimelineHandle::Start {
                self.update_start_time(TimeBound::Value(self.end_time()));
            } else {
                self.update_end_time(TimeBound::Value(self.start_time()));
            }
        }

        if self.manager.is_playing() && !self.range_mode() {
            self.update_start_time(time);
            self.update_end_time(time);
        } else if handle == TimelineHandle::Both {
            self.drag_range_to_time(input_time);
        } else if constrained == TimelineHandle::Start {
            self.update_start_time(time);
        } else {
            self.update_end_time(time);
        }

        trace!(
            ?constrained,
            start = %self.manager.timeline_filter_start(),
            end = %self.manager.timeline_filter_end(),
            "drag applied"
        );
        constrained
    }

    fn drag_range_to_time(&mut self, input_time: f64) {
        // Widened so offsets spanning the whole `i64` range cannot overflow.
        let (min, max) = (i128::from(self.min_time()), i128::from(self.max_time()));
        let closest = i128::from(self.manager.times().closest_to(input_time));
        let (start_offset, end_offset) = self.interaction.drag_offsets();
        let (start_offset, end_offset) = (i128::from(start_offset), i128::from(end_offset));

        let start = closest + start_offset;
        let end = closest + end_offset;

        let (start, end) = if start < min {
            let end_input = (min + end_offset - start_offset) as f64;
            (TimeBound::Value(narrow(min)), self.time_bound_from_drag(end_input))
        } else if end > max {
            let start_input = (max + start_offset - end_offset) as f64;
            (self.time_bound_from_drag(start_input), TimeBound::Value(narrow(max)))
        } else {
            (TimeBound::Value(narrow(start)), TimeBound::Value(narrow(end)))
        };

        self.update_start_time(start);
        self.update_end_time(end);
    }

    /// Picks the handle a pointer-down grabs.
    #[must_use]
    pub fn drag_target_for(&self, input_time: f64, hit: HandleHit) -> TimelineHandle {
        let (start, end) = (self.start_time(), self.end_time());
        let on_marker = hit != HandleHit::Track;

        if start == end && on_marker {
            TimelineHandle::Both
        } else if hit == HandleHit::StartMarker || input_time <= start as f64 {
            TimelineHandle::Start
        } else if hit == HandleHit::EndMarker || input_time >= end as f64 {
            TimelineHandle::End
        } else {
            TimelineHandle::Both
        }
    }

    /// Starts a drag session at `input_time` and applies the first move.
    pub fn begin_drag(&mut self, input_time: f64, hit: HandleHit) -> TimelineHandle {
        let target = self.drag_target_for(input_time, hit);
        if target == TimelineHandle::Both {
            self.set_drag_offsets(input_time);
        }
        debug!(?target, input_time, "begin timeline drag");
        self.interaction.on_drag_start(target);
        self.drag_to(input_time).unwrap_or(target)
    }

    /// Continues the active drag session. Returns `None` when no drag is active.
    pub fn drag_to(&mut self, input_time: f64) -> Option<TimelineHandle> {
        let target = self.interaction.drag_target()?;
        let applied = self.drag_handle_to_time(target, input_time);
        self.interaction.on_drag_retarget(applied);
        Some(applied)
    }

    /// Ends the drag session; snaps adjacent handles unless playback is running.
    pub fn end_drag(&mut self) {
        if !self.interaction.is_dragging() {
            return;
        }
        self.interaction.on_drag_end();
        if self.manager.is_playing() {
            return;
        }
        self.snap_times();
    }

    #[must_use]
    pub fn drag_target(&self) -> Option<TimelineHandle> {
        self.interaction.drag_target()
    }
}

fn narrow(time: i128) -> Time {
    time.clamp(i128::from(Time::MIN), i128::from(Time::MAX)) as Time
}
