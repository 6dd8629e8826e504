//! chart-timeline: time-domain model and timeline controller for charts.
//!
//! The crate covers the parts of a chart that deal with time ranges:
//! possibly-unbounded time bounds, their URL query-string codec (including
//! legacy forms that must stay parseable), and a controller that resolves
//! slider drags and drives timeline playback against host-owned state.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use crate::api::{TimelineController, TimelineManager, TimelineState};
pub use crate::core::{AvailableTimes, TimeBound, TimeBounds, TimeCodec};
pub use crate::error::{TimelineError, TimelineResult};
