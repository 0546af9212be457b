//! Wall-clock source for the picker's initial value

use chrono::{DateTime, Local, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::config::ConfigError;

/// Parse an IANA zone name
pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.parse::<Tz>()
        .map_err(|_| ConfigError::UnknownTimezone(name.to_string()))
}

/// Drop seconds and sub-second precision
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// Wall-clock time at `now_utc` in `zone`, or in system local time when unset
pub fn wall_time_at(zone: Option<Tz>, now_utc: DateTime<Utc>) -> NaiveTime {
    let time = match zone {
        Some(tz) => now_utc.with_timezone(&tz).time(),
        None => now_utc.with_timezone(&Local).time(),
    };
    truncate_to_minute(time)
}

/// Current wall-clock time in `zone`, to the minute
pub fn current_wall_time(zone: Option<Tz>) -> NaiveTime {
    wall_time_at(zone, Utc::now())
}
