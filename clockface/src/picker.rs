//! Time picker built on a selection controller
//!
//! [`TimePicker`] keeps a full time of day and translates face selections into
//! it: a 12-hour face keeps the current AM/PM half, a 24-hour face uses the
//! hour directly. Every mutating call returns the [`PickerEvent`]s it caused.

use std::time::Instant;

use chrono::{NaiveTime, Timelike};
use crossbeam_channel::Receiver;
use tracing::debug;

use crate::config::{ConfigError, PickerConfig};
use crate::controller::{EditingField, Notification, PointerEvent, SelectionController};
use crate::error::FaceError;
use crate::face::{face_ticks, hand_at, FaceTick, Hand};
use crate::format::{format_hours, two_digits};
use crate::mode::{ClockMode, HourCycle, Meridiem};
use crate::time_source::{current_wall_time, truncate_to_minute};

/// Events a picker reports to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    /// The picked time changed
    TimeChanged(NaiveTime),
    /// The face switched to another field
    FieldChanged(EditingField),
    /// Minutes were picked; the time is complete
    MinutesSelected,
}

/// A clock-face time picker
#[derive(Debug)]
pub struct TimePicker {
    config: PickerConfig,
    controller: SelectionController,
    notifications: Receiver<Notification>,
    time: NaiveTime,
}

/// Hour as placed on the face for `cycle`
fn face_hour(hours24: u32, cycle: HourCycle) -> u32 {
    format_hours(hours24, cycle).0
}

/// Hour of day for a 12-hour face value, keeping the current half of the day
fn hour_of_day(face_value: u32, current: NaiveTime) -> u32 {
    match (Meridiem::of_hour(current.hour()), face_value) {
        (Meridiem::AM, 12) => 0,
        (Meridiem::AM, hour) => hour,
        (Meridiem::PM, 12) => 12,
        (Meridiem::PM, hour) => hour + 12,
    }
}

fn with_hour(time: NaiveTime, hour: u32) -> NaiveTime {
    time.with_hour(hour).unwrap_or(time)
}

fn with_minute(time: NaiveTime, minute: u32) -> NaiveTime {
    time.with_minute(minute).unwrap_or(time)
}

impl TimePicker {
    /// Create a picker showing `time`, editing hours
    ///
    /// Seconds are dropped.
    pub fn new(config: PickerConfig, time: NaiveTime) -> Self {
        let time = truncate_to_minute(time);
        let (controller, notifications) = SelectionController::build(
            &config,
            face_hour(time.hour(), config.hour_cycle),
            time.minute(),
        );
        Self {
            config,
            controller,
            notifications,
            time,
        }
    }

    /// Create a picker showing the current wall-clock time in the configured zone
    pub fn at_current_time(config: PickerConfig) -> Result<Self, ConfigError> {
        let zone = config.zone()?;
        let time = current_wall_time(zone);
        Ok(Self::new(config, time))
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn hour_cycle(&self) -> HourCycle {
        self.config.hour_cycle
    }

    pub fn meridiem(&self) -> Meridiem {
        Meridiem::of_hour(self.time.hour())
    }

    pub fn field(&self) -> EditingField {
        self.controller.field()
    }

    pub fn face_mode(&self) -> ClockMode {
        self.controller.mode()
    }

    pub fn face_value(&self) -> u32 {
        self.controller.value()
    }

    /// Hours and minutes as shown in the header
    pub fn header(&self) -> (String, String) {
        let hours = match self.config.hour_cycle {
            HourCycle::H12 => face_hour(self.time.hour(), HourCycle::H12).to_string(),
            HourCycle::H24 => two_digits(self.time.hour()),
        };
        (hours, two_digits(self.time.minute()))
    }

    /// Labelled ticks for the face currently shown
    pub fn ticks(&self) -> Vec<FaceTick> {
        face_ticks(self.face_mode(), self.controller.dial())
    }

    /// Hand as drawn at `now`, mid-animation if one is running
    pub fn hand(&self, now: Instant) -> Hand {
        hand_at(
            self.controller.rendered_angle(now),
            self.face_value(),
            self.face_mode(),
            self.controller.dial(),
        )
    }

    pub fn handle(&mut self, event: PointerEvent, now: Instant) -> Vec<PickerEvent> {
        self.controller.handle(event, now);
        self.drain()
    }

    pub fn tick(&mut self, now: Instant) -> Vec<PickerEvent> {
        self.controller.tick(now);
        self.drain()
    }

    pub fn edit_hours(&mut self, now: Instant) -> Vec<PickerEvent> {
        self.switch_field(EditingField::Hours, now)
    }

    pub fn edit_minutes(&mut self, now: Instant) -> Vec<PickerEvent> {
        self.switch_field(EditingField::Minutes, now)
    }

    pub fn set_am(&mut self, now: Instant) -> Result<Vec<PickerEvent>, FaceError> {
        self.set_meridiem(Meridiem::AM, now)
    }

    pub fn set_pm(&mut self, now: Instant) -> Result<Vec<PickerEvent>, FaceError> {
        self.set_meridiem(Meridiem::PM, now)
    }

    /// Move to the given half of the day, keeping the clock hour
    pub fn set_meridiem(
        &mut self,
        meridiem: Meridiem,
        now: Instant,
    ) -> Result<Vec<PickerEvent>, FaceError> {
        if self.meridiem() == meridiem {
            return Ok(Vec::new());
        }
        let hour = (self.time.hour() + 12) % 24;
        self.time = with_hour(self.time, hour);
        self.push_hour(now)?;
        debug!(time = %self.time, %meridiem, "meridiem changed");
        Ok(vec![PickerEvent::TimeChanged(self.time)])
    }

    /// Replace the shown time from the host without reporting a change
    pub fn set_time(&mut self, time: NaiveTime, now: Instant) -> Result<(), FaceError> {
        self.time = truncate_to_minute(time);
        self.push_hour(now)?;
        self.controller
            .set_value(self.time.minute(), ClockMode::Minute, now)
    }

    /// Apply a new configuration, keeping the time and the edited field
    ///
    /// A pending advance or commit is dropped. An invalid config is rejected
    /// and the picker keeps its current one.
    pub fn reconfigure(&mut self, config: PickerConfig, now: Instant) -> Result<(), ConfigError> {
        config.validate()?;
        let field = self.field();
        let (controller, notifications) = SelectionController::build(
            &config,
            face_hour(self.time.hour(), config.hour_cycle),
            self.time.minute(),
        );
        self.controller = controller;
        self.notifications = notifications;
        self.config = config;
        if field == EditingField::Minutes {
            self.controller.edit_minutes(now);
        }
        debug!(cycle = ?self.config.hour_cycle, step = self.config.minute_step, "reconfigured");
        Ok(())
    }

    fn switch_field(&mut self, field: EditingField, now: Instant) -> Vec<PickerEvent> {
        let before = self.field();
        match field {
            EditingField::Hours => self.controller.edit_hours(now),
            EditingField::Minutes => self.controller.edit_minutes(now),
        }
        if before == field {
            Vec::new()
        } else {
            vec![PickerEvent::FieldChanged(field)]
        }
    }

    fn push_hour(&mut self, now: Instant) -> Result<(), FaceError> {
        let cycle = self.config.hour_cycle;
        self.controller
            .set_value(face_hour(self.time.hour(), cycle), cycle.clock_mode(), now)
    }

    fn drain(&mut self) -> Vec<PickerEvent> {
        let notifications: Vec<Notification> = self.notifications.try_iter().collect();
        notifications
            .into_iter()
            .filter_map(|notification| self.apply(notification))
            .collect()
    }

    fn apply(&mut self, notification: Notification) -> Option<PickerEvent> {
        let time = match notification {
            Notification::ValueChanged {
                mode: ClockMode::TwelveHour,
                value,
            } => with_hour(self.time, hour_of_day(value, self.time)),
            Notification::ValueChanged {
                mode: ClockMode::TwentyFourHour,
                value,
            } => with_hour(self.time, value),
            Notification::ValueChanged {
                mode: ClockMode::Minute,
                value,
            } => with_minute(self.time, value),
            Notification::FieldAdvanced(field) => return Some(PickerEvent::FieldChanged(field)),
            Notification::SelectionCommitted => return Some(PickerEvent::MinutesSelected),
        };
        if time == self.time {
            return None;
        }
        self.time = time;
        Some(PickerEvent::TimeChanged(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{position_for, ring_of, value_to_angle, Point, Ring};
    use std::time::Duration;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn picker(cycle: HourCycle, at: NaiveTime) -> TimePicker {
        TimePicker::new(
            PickerConfig {
                hour_cycle: cycle,
                ..PickerConfig::default()
            },
            at,
        )
    }

    fn point_on(picker: &TimePicker, value: u32) -> Point {
        let mode = picker.face_mode();
        let dial = picker.controller().dial();
        let angle = value_to_angle(value, mode).unwrap();
        position_for(angle, dial.ring_radius(ring_of(value, mode)), dial.center)
    }

    fn click(picker: &mut TimePicker, value: u32, now: Instant) -> Vec<PickerEvent> {
        let at = point_on(picker, value);
        let mut events = picker.handle(PointerEvent::MouseDown(at), now);
        events.extend(picker.handle(PointerEvent::MouseUp(at), now));
        events
    }

    #[test]
    fn test_twelve_hour_pick_keeps_afternoon() {
        let now = Instant::now();
        let mut picker = picker(HourCycle::H12, time(19, 5));
        assert_eq!(picker.face_value(), 7);

        assert_eq!(
            click(&mut picker, 3, now),
            vec![PickerEvent::TimeChanged(time(15, 5))]
        );
        picker.edit_hours(now);
        assert_eq!(
            click(&mut picker, 12, now),
            vec![PickerEvent::TimeChanged(time(12, 5))]
        );
    }

    #[test]
    fn test_twelve_hour_pick_keeps_morning() {
        let now = Instant::now();
        let mut picker = picker(HourCycle::H12, time(7, 5));
        assert_eq!(
            click(&mut picker, 12, now),
            vec![PickerEvent::TimeChanged(time(0, 5))]
        );
        assert_eq!(picker.meridiem(), Meridiem::AM);
    }

    #[test]
    fn test_twenty_four_hour_inner_ring_pick() {
        let now = Instant::now();
        let mut picker = picker(HourCycle::H24, time(9, 30));
        assert_eq!(
            click(&mut picker, 17, now),
            vec![PickerEvent::TimeChanged(time(17, 30))]
        );
        assert_eq!(ring_of(17, picker.face_mode()), Ring::Inner);
    }

    #[test]
    fn test_full_selection_flow() {
        let now = Instant::now();
        let mut picker = picker(HourCycle::H12, time(10, 0));

        click(&mut picker, 4, now);
        let advanced = now + Duration::from_millis(300);
        assert_eq!(
            picker.tick(advanced),
            vec![PickerEvent::FieldChanged(EditingField::Minutes)]
        );
        assert_eq!(picker.face_mode(), ClockMode::Minute);

        assert_eq!(
            click(&mut picker, 45, advanced),
            vec![PickerEvent::TimeChanged(time(4, 45))]
        );
        assert_eq!(
            picker.tick(advanced + Duration::from_millis(300)),
            vec![PickerEvent::MinutesSelected]
        );
        assert_eq!(picker.time(), time(4, 45));
    }

    #[test]
    fn test_meridiem_toggle() {
        let now = Instant::now();
        let mut picker = picker(HourCycle::H12, time(9, 15));

        assert_eq!(
            picker.set_pm(now).unwrap(),
            vec![PickerEvent::TimeChanged(time(21, 15))]
        );
        assert!(picker.set_pm(now).unwrap().is_empty());
        assert_eq!(picker.face_value(), 9);
        assert_eq!(
            picker.set_am(now).unwrap(),
            vec![PickerEvent::TimeChanged(time(9, 15))]
        );
    }

    #[test]
    fn test_meridiem_toggle_moves_twenty_four_hour_face() {
        let now = Instant::now();
        let mut picker = picker(HourCycle::H24, time(0, 0));
        picker.set_pm(now).unwrap();
        assert_eq!(picker.time(), time(12, 0));
        assert_eq!(picker.face_value(), 12);
    }

    #[test]
    fn test_set_time_is_silent() {
        let now = Instant::now();
        let mut picker = picker(HourCycle::H12, time(9, 15));
        picker.set_time(time(18, 40), now).unwrap();

        assert_eq!(picker.time(), time(18, 40));
        assert_eq!(picker.face_value(), 6);
        assert!(picker.tick(now + Duration::from_secs(1)).is_empty());
        assert_eq!(
            picker.edit_minutes(now),
            vec![PickerEvent::FieldChanged(EditingField::Minutes)]
        );
        assert_eq!(picker.face_value(), 40);
    }

    #[test]
    fn test_header_text() {
        assert_eq!(
            picker(HourCycle::H12, time(0, 7)).header(),
            ("12".to_string(), "07".to_string())
        );
        assert_eq!(
            picker(HourCycle::H24, time(8, 30)).header(),
            ("08".to_string(), "30".to_string())
        );
    }

    #[test]
    fn test_reconfigure_keeps_time_and_field() {
        let now = Instant::now();
        let mut picker = picker(HourCycle::H12, time(14, 20));
        picker.edit_minutes(now);

        picker.reconfigure(
            PickerConfig {
                hour_cycle: HourCycle::H24,
                ..PickerConfig::default()
            },
            now,
        )
        .unwrap();
        assert_eq!(picker.field(), EditingField::Minutes);
        assert_eq!(picker.face_value(), 20);
        picker.edit_hours(now);
        assert_eq!(picker.face_mode(), ClockMode::TwentyFourHour);
        assert_eq!(picker.face_value(), 14);
    }

    #[test]
    fn test_reconfigure_rejects_invalid_config() {
        let now = Instant::now();
        let mut picker = picker(HourCycle::H12, time(14, 20));
        let dial = *picker.controller().dial();

        let tiny_face = PickerConfig {
            face_size: 100.0,
            ..PickerConfig::default()
        };
        assert!(matches!(
            picker.reconfigure(tiny_face, now),
            Err(ConfigError::Invalid(_))
        ));
        let zero_step = PickerConfig {
            minute_step: 0,
            ..PickerConfig::default()
        };
        assert!(picker.reconfigure(zero_step, now).is_err());

        assert_eq!(
            picker.config(),
            &PickerConfig {
                hour_cycle: HourCycle::H12,
                ..PickerConfig::default()
            }
        );
        assert_eq!(picker.controller().dial(), &dial);
        assert!(dial.inner_radius > 0.0);
    }

    #[test]
    fn test_hand_marks_odd_minutes() {
        let now = Instant::now();
        let mut picker = picker(HourCycle::H12, time(3, 7));
        picker.edit_minutes(now);
        let hand = picker.hand(now);
        assert!(hand.between_labels);
        assert_eq!(hand.length, picker.controller().dial().outer_radius);
    }

    #[test]
    fn test_ticks_follow_face_mode() {
        let now = Instant::now();
        let mut picker = picker(HourCycle::H24, time(3, 7));
        assert_eq!(picker.ticks().len(), 24);
        picker.edit_minutes(now);
        let ticks = picker.ticks();
        assert_eq!(ticks.len(), 12);
        assert_eq!(ticks[11].label, "00");
    }
}
