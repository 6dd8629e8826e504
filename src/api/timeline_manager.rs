use crate::core::{AvailableTimes, Time, TimeBound, TimeBounds};

/// State owned by the chart hosting a timeline.
///
/// The controller reads and writes the two filter bounds and the playing
/// flag; everything downstream (visible data, redraws) is derived by the
/// host from those fields.
pub trait TimelineManager {
    fn times(&self) -> &AvailableTimes;

    fn timeline_filter_start(&self) -> TimeBound;

    fn set_timeline_filter_start(&mut self, bound: TimeBound);

    fn timeline_filter_end(&self) -> TimeBound;

    fn set_timeline_filter_end(&mut self, bound: TimeBound);

    fn is_playing(&self) -> bool;

    fn set_playing(&mut self, playing: bool);

    /// Delay between playback ticks. `None` means no delay.
    fn ms_per_tick(&self) -> Option<u64> {
        None
    }

    /// UI hint: hide the play button.
    fn disable_play(&self) -> bool {
        false
    }

    fn format_time(&self, time: Time) -> String {
        time.to_string()
    }

    /// Called once per playback run, before the first tick.
    fn on_play(&mut self) {}

    fn timeline_filter(&self) -> TimeBounds {
        TimeBounds::new(self.timeline_filter_start(), self.timeline_filter_end())
    }
}

impl<M: TimelineManager + ?Sized> TimelineManager for &mut M {
    fn times(&self) -> &AvailableTimes {
        (**self).times()
    }

    fn timeline_filter_start(&self) -> TimeBound {
        (**self).timeline_filter_start()
    }

    fn set_timeline_filter_start(&mut self, bound: TimeBound) {
        (**self).set_timeline_filter_start(bound);
    }

    fn timeline_filter_end(&self) -> TimeBound {
        (**self).timeline_filter_end()
    }

    fn set_timeline_filter_end(&mut self, bound: TimeBound) {
        (**self).set_timeline_filter_end(bound);
    }

    fn is_playing(&self) -> bool {
        (**self).is_playing()
    }

    fn set_playing(&mut self, playing: bool) {
        (**self).set_playing(playing);
    }

    fn ms_per_tick(&self) -> Option<u64> {
        (**self).ms_per_tick()
    }

    fn disable_play(&self) -> bool {
        (**self).disable_play()
    }

    fn format_time(&self, time: Time) -> String {
        (**self).format_time(time)
    }

    fn on_play(&mut self) {
        (**self).on_play();
    }
}
