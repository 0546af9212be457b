//! Text formatting for picked times

use chrono::{NaiveTime, Timelike};

use crate::mode::{HourCycle, Meridiem};

/// Zero-pad to two digits
pub fn two_digits(n: u32) -> String {
    format!("{:02}", n)
}

/// Hour as shown in `cycle`, with its meridiem
///
/// In 12-hour form midnight and noon both show as 12.
pub fn format_hours(hours24: u32, cycle: HourCycle) -> (u32, Meridiem) {
    let meridiem = Meridiem::of_hour(hours24);
    let shown = match cycle {
        HourCycle::H24 => hours24,
        HourCycle::H12 => match hours24 % 12 {
            0 => 12,
            hour => hour,
        },
    };
    (shown, meridiem)
}

/// `"7:05 pm"` in 12-hour form, `"19:05"` in 24-hour form
pub fn format_time(time: NaiveTime, cycle: HourCycle) -> String {
    let (hours, meridiem) = format_hours(time.hour(), cycle);
    match cycle {
        HourCycle::H12 => format!(
            "{}:{} {}",
            hours,
            two_digits(time.minute()),
            meridiem.to_string().to_lowercase()
        ),
        HourCycle::H24 => format!("{}:{}", two_digits(hours), two_digits(time.minute())),
    }
}
