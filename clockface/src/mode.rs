//! Clock face modes and hour conventions

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// What the face is currently selecting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockMode {
    /// Hours 1-12 on a single ring
    TwelveHour,
    /// Hours 0-23 on two concentric rings
    TwentyFourHour,
    /// Minutes 0-59
    Minute,
}

impl ClockMode {
    /// Values this mode can hold
    pub fn domain(self) -> RangeInclusive<u32> {
        match self {
            ClockMode::TwelveHour => 1..=12,
            ClockMode::TwentyFourHour => 0..=23,
            ClockMode::Minute => 0..=59,
        }
    }

    pub fn contains(self, value: u32) -> bool {
        self.domain().contains(&value)
    }

    /// Angular distance between two consecutive values
    pub fn degrees_per_unit(self) -> f64 {
        match self {
            ClockMode::TwelveHour | ClockMode::TwentyFourHour => 360.0 / 12.0,
            ClockMode::Minute => 360.0 / 60.0,
        }
    }

    /// The value sitting at the 3 o'clock reference angle
    pub fn reference_value(self) -> u32 {
        match self {
            ClockMode::TwelveHour | ClockMode::TwentyFourHour => 3,
            ClockMode::Minute => 15,
        }
    }

    pub fn is_hours(self) -> bool {
        !matches!(self, ClockMode::Minute)
    }
}

impl std::fmt::Display for ClockMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockMode::TwelveHour => write!(f, "12h"),
            ClockMode::TwentyFourHour => write!(f, "24h"),
            ClockMode::Minute => write!(f, "minutes"),
        }
    }
}

/// Hour convention chosen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HourCycle {
    #[default]
    #[serde(rename = "12h")]
    H12,
    #[serde(rename = "24h")]
    H24,
}

impl HourCycle {
    /// Face mode used while editing hours
    pub fn clock_mode(self) -> ClockMode {
        match self {
            HourCycle::H12 => ClockMode::TwelveHour,
            HourCycle::H24 => ClockMode::TwentyFourHour,
        }
    }

    /// Hour cycle implied by an hour mode; `None` for minutes
    pub fn from_mode(mode: ClockMode) -> Option<Self> {
        match mode {
            ClockMode::TwelveHour => Some(HourCycle::H12),
            ClockMode::TwentyFourHour => Some(HourCycle::H24),
            ClockMode::Minute => None,
        }
    }
}

/// AM/PM indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meridiem {
    AM,
    PM,
}

impl Meridiem {
    /// Meridiem of an hour in 24-hour form
    pub fn of_hour(hour24: u32) -> Self {
        if hour24 < 12 {
            Meridiem::AM
        } else {
            Meridiem::PM
        }
    }
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Meridiem::AM => write!(f, "AM"),
            Meridiem::PM => write!(f, "PM"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domains() {
        assert!(ClockMode::TwelveHour.contains(12));
        assert!(!ClockMode::TwelveHour.contains(0));
        assert!(ClockMode::TwentyFourHour.contains(0));
        assert!(!ClockMode::TwentyFourHour.contains(24));
        assert!(ClockMode::Minute.contains(59));
        assert!(!ClockMode::Minute.contains(60));
    }

    #[test]
    fn test_hour_cycle_round_trips_through_mode() {
        for cycle in [HourCycle::H12, HourCycle::H24] {
            assert_eq!(HourCycle::from_mode(cycle.clock_mode()), Some(cycle));
        }
        assert_eq!(HourCycle::from_mode(ClockMode::Minute), None);
    }

    #[test]
    fn test_meridiem_boundaries() {
        assert_eq!(Meridiem::of_hour(0), Meridiem::AM);
        assert_eq!(Meridiem::of_hour(11), Meridiem::AM);
        assert_eq!(Meridiem::of_hour(12), Meridiem::PM);
        assert_eq!(Meridiem::of_hour(23), Meridiem::PM);
    }
}
