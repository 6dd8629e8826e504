use approx::assert_relative_eq;
use chart_timeline::api::{TimelineConfig, TimelineController, TimelineManager, TimelineState};
use chart_timeline::core::{AvailableTimes, TimeBound, TimeBounds, TimeCodec, TimeUnit};
use chart_timeline::interaction::TimelineHandle;

fn state(range: std::ops::Range<i64>, start: TimeBound, end: TimeBound) -> TimelineState {
    let times = AvailableTimes::from_range(range).expect("valid times");
    TimelineState::new(times, TimeBounds::new(start, end))
}

fn controller(start: i64, end: i64) -> TimelineController<TimelineState> {
    TimelineController::new(state(
        1900..2010,
        TimeBound::Value(start),
        TimeBound::Value(end),
    ))
}

#[test]
fn reports_progress_with_unbounded_values() {
    let controller = TimelineController::new(state(
        1900..2010,
        TimeBound::UnboundedLeft,
        TimeBound::UnboundedRight,
    ));
    assert_eq!(controller.start_time(), 1900);
    assert_eq!(controller.end_time(), 2009);
    assert_relative_eq!(controller.start_time_progress(), 0.0);
    assert_relative_eq!(controller.end_time_progress(), 1.0);
}

#[test]
fn progress_is_fraction_of_available_span() {
    let controller = TimelineController::new(state(
        2000..2010,
        TimeBound::Value(2000),
        TimeBound::Value(2005),
    ));
    assert_relative_eq!(controller.start_time_progress(), 0.0);
    assert_relative_eq!(controller.end_time_progress(), 5.0 / 9.0);
}

#[test]
fn progress_is_zero_for_single_time_dataset() {
    let controller = TimelineController::new(state(
        2000..2001,
        TimeBound::UnboundedLeft,
        TimeBound::UnboundedRight,
    ));
    assert_eq!(controller.min_time(), controller.max_time());
    assert_relative_eq!(controller.start_time_progress(), 0.0);
    assert_relative_eq!(controller.end_time_progress(), 0.0);
}

#[test]
fn resolved_times_snap_to_closest_available_time() {
    let times = AvailableTimes::new(vec![1990, 2000, 2010]).expect("valid times");
    let manager = TimelineState::new(
        times,
        TimeBounds::new(TimeBound::Value(1995), TimeBound::Value(2007)),
    );
    let controller = TimelineController::new(manager);
    assert_eq!(controller.start_time(), 1990);
    assert_eq!(controller.end_time(), 2010);
}

#[test]
fn next_time_saturates_at_max() {
    let controller = TimelineController::new(state(
        2000..2010,
        TimeBound::Value(2000),
        TimeBound::Value(2005),
    ));
    assert_eq!(controller.next_time(2008), 2009);
    assert_eq!(controller.next_time(2009), 2009);
    assert_eq!(controller.next_time(1500), 2009);
}

#[test]
fn snap_times_collapses_adjacent_handles_only() {
    let mut adjacent = controller(2000, 2001);
    adjacent.snap_times();
    assert_eq!(adjacent.start_time(), 2001);
    assert_eq!(adjacent.end_time(), 2001);

    let mut apart = controller(2000, 2002);
    apart.snap_times();
    assert_eq!(apart.start_time(), 2000);
    assert_eq!(apart.end_time(), 2002);

    let mut equal = controller(2000, 2000);
    equal.snap_times();
    assert_eq!(
        equal.manager().timeline_filter(),
        TimeBounds::single(TimeBound::Value(2000))
    );
}

#[test]
fn extreme_times_snap_and_report_progress_without_overflow() {
    let times = AvailableTimes::new(vec![i64::MIN, 0]).expect("valid times");
    let mut controller = TimelineController::new(TimelineState::new(
        times,
        TimeBounds::new(TimeBound::Value(i64::MIN), TimeBound::Value(0)),
    ));

    controller.snap_times();

    assert_eq!(controller.start_time(), i64::MIN);
    assert_eq!(controller.end_time(), 0);
    assert_relative_eq!(controller.start_time_progress(), 0.0);
    assert_relative_eq!(controller.end_time_progress(), 1.0);
}

#[test]
fn reset_sets_sentinels_instead_of_numbers() {
    let mut controller = controller(2000, 2005);
    controller.reset_start_to_min();
    controller.reset_end_to_max();
    assert_eq!(
        controller.manager().timeline_filter(),
        TimeBounds::unbounded()
    );
    assert_eq!(controller.start_time(), 1900);
    assert_eq!(controller.end_time(), 2009);
}

#[test]
fn sentinel_bounds_follow_new_data() {
    let mut controller = TimelineController::new(state(
        2000..2010,
        TimeBound::Value(2003),
        TimeBound::UnboundedRight,
    ));
    controller
        .manager_mut()
        .set_times(AvailableTimes::from_range(2000..2015).expect("valid times"));
    assert_eq!(controller.start_time(), 2003);
    assert_eq!(controller.end_time(), 2014);
}

#[test]
fn interaction_state_survives_reconstruction_when_handed_over() {
    let mut first = controller(2000, 2005);
    first.toggle_range_mode();
    first.set_drag_offsets(2002.0);
    let carried = first.interaction_state();

    let rebuilt = TimelineController::with_interaction_state(first.into_manager(), carried);
    assert!(!rebuilt.range_mode());
    assert_eq!(rebuilt.drag_offsets(), (-2, 3));

    let fresh = TimelineController::new(rebuilt.into_manager());
    assert!(fresh.range_mode());
    assert_eq!(fresh.drag_offsets(), (0, 0));
}

#[test]
fn labels_use_manager_formatter() {
    let manager = state(2000..2010, TimeBound::Value(2002), TimeBound::Value(2004))
        .with_format_time_fn(|time| format!("Y{time}"));
    let controller = TimelineController::new(manager);
    assert_eq!(controller.start_label(), "Y2002");
    assert_eq!(controller.end_label(), "Y2004");
    assert_eq!(controller.min_label(), "Y2000");
    assert_eq!(controller.max_label(), "Y2009");
}

#[test]
fn day_timelines_label_with_dates_by_default() {
    let manager = state(-1..3, TimeBound::UnboundedLeft, TimeBound::UnboundedRight)
        .with_config(TimelineConfig::default().with_time_unit(TimeUnit::Day));
    let controller = TimelineController::new(manager);
    assert_eq!(controller.min_label(), "Jan 20, 2020");
    assert_eq!(controller.max_label(), "Jan 23, 2020");
}

#[test]
fn play_enabled_follows_config() {
    let manager = state(2000..2010, TimeBound::UnboundedLeft, TimeBound::UnboundedRight)
        .with_config(TimelineConfig::default().with_disable_play(true));
    assert!(!TimelineController::new(manager).play_enabled());
    assert!(controller(2000, 2005).play_enabled());
}

#[test]
fn cycle_time_preset_walks_latest_earliest_all() {
    let mut controller = controller(2000, 2005);
    let codec = TimeCodec::years();

    assert_eq!(
        controller.cycle_time_preset(codec),
        TimeBounds::single(TimeBound::UnboundedRight)
    );
    assert_eq!(
        controller.cycle_time_preset(codec),
        TimeBounds::single(TimeBound::UnboundedLeft)
    );
    assert_eq!(controller.cycle_time_preset(codec), TimeBounds::unbounded());
    assert_eq!(
        controller.cycle_time_preset(codec),
        TimeBounds::single(TimeBound::UnboundedRight)
    );
    assert_eq!(controller.start_time(), 2009);
}

#[test]
fn borrowed_manager_drives_the_same_state() {
    let mut manager = state(2000..2010, TimeBound::Value(2000), TimeBound::Value(2005));
    {
        let mut controller = TimelineController::new(&mut manager);
        assert_eq!(
            controller.drag_handle_to_time(TimelineHandle::End, 2007.0),
            TimelineHandle::End
        );
    }
    assert_eq!(manager.timeline_filter_end(), TimeBound::Value(2007));
}
