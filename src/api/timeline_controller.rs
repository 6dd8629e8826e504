use tracing::{debug, trace};

use crate::core::{
    AvailableTimes, Time, TimeBound, TimeBounds, TimeCodec, TimeQueryParams, next_time_preset,
};
use crate::interaction::TimelineInteractionState;

use super::TimelineManager;
use super::timeline_playback_controller::PlaybackSession;

/// Drives a timeline slider on top of a [`TimelineManager`].
///
/// Derived values (`start_time`, progress fractions, ...) are recomputed
/// from the manager on every read; the controller itself only keeps the
/// interaction state and the active playback session.
#[derive(Debug)]
pub struct TimelineController<M: TimelineManager> {
    pub(super) manager: M,
    pub(super) interaction: TimelineInteractionState,
    pub(super) playback: Option<PlaybackSession>,
}

impl<M: TimelineManager> TimelineController<M> {
    #[must_use]
    pub fn new(manager: M) -> Self {
        Self::with_interaction_state(manager, TimelineInteractionState::default())
    }

    /// Rebuilds a controller while carrying over range mode and drag state.
    #[must_use]
    pub fn with_interaction_state(manager: M, interaction: TimelineInteractionState) -> Self {
        Self {
            manager,
            interaction,
            playback: None,
        }
    }

    #[must_use]
    pub fn manager(&self) -> &M {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut M {
        &mut self.manager
    }

    #[must_use]
    pub fn into_manager(self) -> M {
        self.manager
    }

    #[must_use]
    pub fn interaction_state(&self) -> TimelineInteractionState {
        self.interaction
    }

    fn times(&self) -> &AvailableTimes {
        self.manager.times()
    }

    /// Available time closest to the filter start.
    #[must_use]
    pub fn start_time(&self) -> Time {
        self.times()
            .closest_to_bound(self.manager.timeline_filter_start())
    }

    /// Available time closest to the filter end.
    #[must_use]
    pub fn end_time(&self) -> Time {
        self.times().closest_to_bound(self.manager.timeline_filter_end())
    }

    #[must_use]
    pub fn min_time(&self) -> Time {
        self.times().min()
    }

    #[must_use]
    pub fn max_time(&self) -> Time {
        self.times().max()
    }

    #[must_use]
    pub fn start_time_progress(&self) -> f64 {
        self.progress_of(self.start_time())
    }

    #[must_use]
    pub fn end_time_progress(&self) -> f64 {
        self.progress_of(self.end_time())
    }

    fn progress_of(&self, time: Time) -> f64 {
        let (min, max) = (self.min_time(), self.max_time());
        if max == min {
            return 0.0;
        }
        (time as f64 - min as f64) / (max as f64 - min as f64)
    }

    #[must_use]
    pub fn next_time(&self, time: Time) -> Time {
        self.times().next_after(time)
    }

    #[must_use]
    pub fn range_mode(&self) -> bool {
        self.interaction.range_mode()
    }

    pub fn toggle_range_mode(&mut self) -> &mut Self {
        self.interaction.toggle_range_mode();
        debug!(range_mode = self.interaction.range_mode(), "toggle range mode");
        self
    }

    /// Collapses handles that sit within one time unit of each other onto
    /// the end handle.
    pub fn snap_times(&mut self) {
        let (start, end) = (self.start_time(), self.end_time());
        if start == end || end.saturating_sub(start) > 1 {
            return;
        }
        trace!(start, end, "snap adjacent handles");
        self.update_start_time(TimeBound::Value(end));
    }

    pub fn reset_start_to_min(&mut self) {
        self.update_start_time(TimeBound::UnboundedLeft);
    }

    pub fn reset_end_to_max(&mut self) {
        self.update_end_time(TimeBound::UnboundedRight);
    }

    #[must_use]
    pub fn play_enabled(&self) -> bool {
        !self.manager.disable_play()
    }

    #[must_use]
    pub fn start_label(&self) -> String {
        self.manager.format_time(self.start_time())
    }

    #[must_use]
    pub fn end_label(&self) -> String {
        self.manager.format_time(self.end_time())
    }

    #[must_use]
    pub fn min_label(&self) -> String {
        self.manager.format_time(self.min_time())
    }

    #[must_use]
    pub fn max_label(&self) -> String {
        self.manager.format_time(self.max_time())
    }

    /// Moves the filter to the next `latest` / `earliest` / `..` preset.
    pub fn cycle_time_preset(&mut self, codec: TimeCodec) -> TimeBounds {
        let current = codec.format_time_bounds(self.manager.timeline_filter());
        let preset = next_time_preset(Some(current.as_str()));
        let filter = TimeQueryParams::with_time(preset)
            .resolve_filter(self.manager.timeline_filter(), codec);
        debug!(from = %current, to = preset, "cycle timeline preset");
        self.update_start_time(filter.start);
        self.update_end_time(filter.end);
        filter
    }

    pub(super) fn update_start_time(&mut self, bound: TimeBound) {
        self.manager.set_timeline_filter_start(bound);
    }

    pub(super) fn update_end_time(&mut self, bound: TimeBound) {
        self.manager.set_timeline_filter_end(bound);
    }
}
