use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::core::{AvailableTimes, Time, TimeBound, TimeBounds, TimeCodec, TimeQueryParams};

use super::{TimelineConfig, TimelineManager};

/// Shared handle to a timeline's playing flag.
///
/// Clones observe the same flag, so a UI handler holding one can stop a
/// running playback loop. The loop notices on its next tick.
#[derive(Debug, Clone, Default)]
pub struct PlaybackFlag(Rc<Cell<bool>>);

impl PlaybackFlag {
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    pub fn set(&self, playing: bool) {
        self.0.set(playing);
    }
}

type FormatTimeFn = Box<dyn Fn(Time) -> String>;
type OnPlayFn = Box<dyn FnMut()>;

/// Ready-made [`TimelineManager`] for hosts without their own chart state.
pub struct TimelineState {
    times: AvailableTimes,
    filter: TimeBounds,
    playing: PlaybackFlag,
    config: TimelineConfig,
    format_time_fn: Option<FormatTimeFn>,
    on_play: Option<OnPlayFn>,
}

impl fmt::Debug for TimelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimelineState")
            .field("times", &self.times)
            .field("filter", &self.filter)
            .field("playing", &self.playing.is_set())
            .field("config", &self.config)
            .field("format_time_fn", &self.format_time_fn.is_some())
            .field("on_play", &self.on_play.is_some())
            .finish()
    }
}

impl TimelineState {
    #[must_use]
    pub fn new(times: AvailableTimes, filter: TimeBounds) -> Self {
        Self {
            times,
            filter,
            playing: PlaybackFlag::default(),
            config: TimelineConfig::default(),
            format_time_fn: None,
            on_play: None,
        }
    }

    /// Starts with the whole dataset selected (`earliest..latest`).
    #[must_use]
    pub fn unbounded(times: AvailableTimes) -> Self {
        Self::new(times, TimeBounds::unbounded())
    }

    #[must_use]
    pub fn with_config(mut self, config: TimelineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_format_time_fn(mut self, format: impl Fn(Time) -> String + 'static) -> Self {
        self.format_time_fn = Some(Box::new(format));
        self
    }

    #[must_use]
    pub fn with_on_play(mut self, on_play: impl FnMut() + 'static) -> Self {
        self.on_play = Some(Box::new(on_play));
        self
    }

    #[must_use]
    pub fn config(&self) -> TimelineConfig {
        self.config
    }

    #[must_use]
    pub fn codec(&self) -> TimeCodec {
        self.config.codec()
    }

    #[must_use]
    pub fn playback_flag(&self) -> PlaybackFlag {
        self.playing.clone()
    }

    /// Replaces the dataset times. Sentinel bounds keep tracking the new
    /// extremes; concrete bounds stay where they are.
    pub fn set_times(&mut self, times: AvailableTimes) {
        debug!(
            len = times.len(),
            min = times.min(),
            max = times.max(),
            "replace timeline times"
        );
        self.times = times;
    }

    pub fn set_timeline_filter(&mut self, filter: TimeBounds) {
        self.filter = filter;
    }

    /// Applies `time` / legacy `year` URL parameters to the filter.
    pub fn apply_query_params(&mut self, params: &TimeQueryParams) {
        self.filter = params.resolve_filter(self.filter, self.codec());
    }

    /// Canonical `time` URL value, or `None` when the filter still matches
    /// the authored one.
    #[must_use]
    pub fn time_param(&self, authored: TimeBounds) -> Option<String> {
        crate::core::time_param(self.filter, authored, self.codec())
    }
}

impl TimelineManager for TimelineState {
    fn times(&self) -> &AvailableTimes {
        &self.times
    }

    fn timeline_filter_start(&self) -> TimeBound {
        self.filter.start
    }

    fn set_timeline_filter_start(&mut self, bound: TimeBound) {
        self.filter.start = bound;
    }

    fn timeline_filter_end(&self) -> TimeBound {
        self.filter.end
    }

    fn set_timeline_filter_end(&mut self, bound: TimeBound) {
        self.filter.end = bound;
    }

    fn is_playing(&self) -> bool {
        self.playing.is_set()
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing.set(playing);
    }

    fn ms_per_tick(&self) -> Option<u64> {
        self.config.ms_per_tick
    }

    fn disable_play(&self) -> bool {
        self.config.disable_play
    }

    fn format_time(&self, time: Time) -> String {
        match &self.format_time_fn {
            Some(format) => format(time),
            None => self.codec().format_time_label(time),
        }
    }

    fn on_play(&mut self) {
        if let Some(on_play) = self.on_play.as_mut() {
            on_play();
        }
    }
}
