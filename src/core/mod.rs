pub mod available_times;
pub mod time_bound;
pub mod time_codec;
pub mod time_query;

pub use available_times::AvailableTimes;
pub use time_bound::{
    Time, TimeBound, TimeBounds, UNBOUNDED_LEFT_TOKEN, UNBOUNDED_RIGHT_TOKEN, max_time_from_json,
    min_time_from_json,
};
pub use time_codec::{
    EPOCH_DATE, TimeCodec, TimeUnit, format_time_bounds, format_time_uri_component,
    parse_time_bound, parse_time_uri_component, time_domain_from_query_string,
};
pub use time_query::{TIME_PRESETS, TimeQueryParams, next_time_preset, time_param};
