mod timeline_config;
mod timeline_controller;
mod timeline_drag_controller;
mod timeline_manager;
mod timeline_playback_controller;
mod timeline_state;

pub use timeline_config::TimelineConfig;
pub use timeline_controller::TimelineController;
pub use timeline_manager::TimelineManager;
pub use timeline_playback_controller::{PlaybackStep, PlaybackStopReason};
pub use timeline_state::{PlaybackFlag, TimelineState};
