use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Time, TimeBound};
use crate::error::{TimelineError, TimelineResult};

use super::{TimelineController, TimelineManager};

/// Why a playback run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStopReason {
    ReachedEnd,
    BudgetExhausted,
    /// The playing flag was cleared from outside the loop.
    Cancelled,
}

/// Outcome of one [`TimelineController::advance_playback`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStep {
    /// A tick was applied; wait `delay` before advancing again.
    Continue { ticks: u32, delay: Duration },
    Finished { ticks: u32, reason: PlaybackStopReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PlaybackSession {
    ticks: u32,
    budget: Option<u32>,
}

impl<M: TimelineManager> TimelineController<M> {
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.manager.is_playing()
    }

    /// Starts a playback run without ticking.
    ///
    /// When the end handle already sits on the last time, it first jumps back
    /// to the start handle (or to the first time if both handles coincide).
    /// `on_play` fires once, before the first tick. A budget of `Some(0)`
    /// plays without a limit, like `None`.
    pub fn begin_playback(&mut self, number_of_ticks: Option<u32>) -> TimelineResult<()> {
        let number_of_ticks = number_of_ticks.filter(|&ticks| ticks > 0);
        if self.playback.is_some() && self.manager.is_playing() {
            return Err(TimelineError::PlaybackActive);
        }

        self.manager.set_playing(true);
        if self.end_time() == self.max_time() {
            self.reset_to_beginning();
        }
        self.manager.on_play();

        self.playback = Some(PlaybackSession {
            ticks: 0,
            budget: number_of_ticks,
        });
        debug!(
            budget = ?number_of_ticks,
            range_mode = self.range_mode(),
            start = self.start_time(),
            end = self.end_time(),
            "playback started"
        );
        Ok(())
    }

    /// Runs one iteration of the playback loop.
    ///
    /// The playing flag is polled before ticking, so cancellation takes
    /// effect at the next call, never halfway through a tick. Without an
    /// active session the playing flag is cleared and nothing ticks.
    pub fn advance_playback(&mut self) -> PlaybackStep {
        let Some(mut session) = self.playback.take() else {
            self.stop_playback();
            return PlaybackStep::Finished {
                ticks: 0,
                reason: PlaybackStopReason::Cancelled,
            };
        };

        if !self.manager.is_playing() {
            debug!(ticks = session.ticks, "playback cancelled");
            return PlaybackStep::Finished {
                ticks: session.ticks,
                reason: PlaybackStopReason::Cancelled,
            };
        }

        let next = self.next_time(self.end_time());
        if !self.range_mode() {
            self.update_start_time(TimeBound::Value(next));
        }
        self.update_end_time(TimeBound::Value(next));
        session.ticks += 1;
        trace!(tick = session.ticks, time = next, "playback tick");

        let reason = if next >= self.max_time() {
            Some(PlaybackStopReason::ReachedEnd)
        } else if session.budget == Some(session.ticks) {
            Some(PlaybackStopReason::BudgetExhausted)
        } else {
            None
        };

        if let Some(reason) = reason {
            self.stop_playback();
            debug!(ticks = session.ticks, ?reason, "playback finished");
            return PlaybackStep::Finished {
                ticks: session.ticks,
                reason,
            };
        }

        self.playback = Some(session);
        PlaybackStep::Continue {
            ticks: session.ticks,
            delay: self.tick_delay(),
        }
    }

    /// Plays until the last time, the tick budget, or an external stop.
    ///
    /// Returns the number of ticks executed.
    pub async fn play(&mut self, number_of_ticks: Option<u32>) -> TimelineResult<u32> {
        self.begin_playback(number_of_ticks)?;
        loop {
            match self.advance_playback() {
                PlaybackStep::Continue { delay, .. } => tokio::time::sleep(delay).await,
                PlaybackStep::Finished { ticks, .. } => return Ok(ticks),
            }
        }
    }

    /// Pauses a running playback (returning `None`) or plays to completion.
    pub async fn toggle_play(&mut self) -> TimelineResult<Option<u32>> {
        if self.manager.is_playing() {
            self.stop_playback();
            return Ok(None);
        }
        self.play(None).await.map(Some)
    }

    /// Clears the playing flag. A running loop exits on its next poll.
    pub fn stop_playback(&mut self) {
        self.manager.set_playing(false);
    }

    fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.manager.ms_per_tick().unwrap_or(0))
    }

    fn reset_to_beginning(&mut self) {
        let (start, end) = (self.start_time(), self.end_time());
        let beginning: Time = if end != start { start } else { self.min_time() };
        trace!(beginning, "rewind playback");
        self.update_end_time(TimeBound::Value(beginning));
    }
}
