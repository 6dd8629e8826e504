use chart_timeline::api::TimelineConfig;
use chart_timeline::core::{EPOCH_DATE, TimeBound, TimeBounds, TimeUnit};

#[test]
fn config_defaults_apply_to_missing_fields() {
    let config = TimelineConfig::from_json_str("{}").expect("parse empty config");
    assert_eq!(config, TimelineConfig::default());
    assert_eq!(config.epoch, EPOCH_DATE);
    assert_eq!(config.time_unit, TimeUnit::Year);
    assert_eq!(config.ms_per_tick, None);
    assert!(!config.disable_play);
}

#[test]
fn config_json_round_trip() {
    let config = TimelineConfig::default()
        .with_ms_per_tick(400)
        .with_time_unit(TimeUnit::Day)
        .with_disable_play(true);

    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"time_unit\": \"day\""));
    assert!(json.contains("\"epoch\": \"2020-01-21\""));

    let parsed = TimelineConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
    assert!(parsed.codec().is_date());
}

#[test]
fn malformed_config_reports_invalid_data() {
    let err = TimelineConfig::from_json_str("{\"time_unit\": \"week\"}")
        .expect_err("unknown unit must fail");
    assert!(err.to_string().contains("timeline config"));
}

#[test]
fn time_bounds_serialize_as_numbers_and_tokens() {
    let bounds = TimeBounds::new(TimeBound::Value(1990), TimeBound::UnboundedRight);
    let json = serde_json::to_string(&bounds).expect("serialize");
    assert_eq!(json, r#"{"start":1990,"end":"latest"}"#);

    let parsed: TimeBounds =
        serde_json::from_str(r#"{"start":"earliest","end":"-12"}"#).expect("parse");
    assert_eq!(
        parsed,
        TimeBounds::new(TimeBound::UnboundedLeft, TimeBound::Value(-12))
    );

    assert!(serde_json::from_str::<TimeBound>(r#""soon""#).is_err());
}
