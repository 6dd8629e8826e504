use serde::{Deserialize, Serialize};

use crate::core::Time;

/// Which part of the slider a drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineHandle {
    Start,
    End,
    /// Pans the whole selected span.
    Both,
}

/// What the pointer landed on when a drag began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleHit {
    #[default]
    Track,
    StartMarker,
    EndMarker,
}

/// Ephemeral controller state that survives controller reconstruction only
/// when handed over explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineInteractionState {
    range_mode: bool,
    drag_offsets: (Time, Time),
    drag_target: Option<TimelineHandle>,
}

impl Default for TimelineInteractionState {
    fn default() -> Self {
        Self {
            range_mode: true,
            drag_offsets: (0, 0),
            drag_target: None,
        }
    }
}

impl TimelineInteractionState {
    /// `true`: the end handle extends a span. `false`: a single point moves.
    #[must_use]
    pub fn range_mode(self) -> bool {
        self.range_mode
    }

    pub fn toggle_range_mode(&mut self) {
        self.range_mode = !self.range_mode;
    }

    /// Signed distances of start and end from the grabbed time.
    #[must_use]
    pub fn drag_offsets(self) -> (Time, Time) {
        self.drag_offsets
    }

    pub fn set_drag_offsets(&mut self, offsets: (Time, Time)) {
        self.drag_offsets = offsets;
    }

    /// Span length captured by the current offsets.
    #[must_use]
    pub fn drag_span(self) -> Time {
        self.drag_offsets.1.saturating_sub(self.drag_offsets.0)
    }

    #[must_use]
    pub fn drag_target(self) -> Option<TimelineHandle> {
        self.drag_target
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        self.drag_target.is_some()
    }

    pub fn on_drag_start(&mut self, target: TimelineHandle) {
        self.drag_target = Some(target);
    }

    pub fn on_drag_retarget(&mut self, target: TimelineHandle) {
        if self.drag_target.is_some() {
            self.drag_target = Some(target);
        }
    }

    pub fn on_drag_end(&mut self) {
        self.drag_target = None;
    }
}
