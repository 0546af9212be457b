//! Selection controller - turns pointer and touch input into clock selections
//!
//! The controller owns the interaction state of one face: which field is being
//! edited, whether the user is dragging, and the angle the hand is drawn at.
//! Hosts forward face-local pointer events and call [`SelectionController::tick`]
//! once per frame. Notifications are delivered in processing order over the
//! channel returned by [`SelectionController::new`].

use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, trace};

use crate::angle::{shortest_path, AngleTransition};
use crate::config::PickerConfig;
use crate::error::FaceError;
use crate::face::{angle_to_value, hand_angle, Dial, Point};
use crate::mode::{ClockMode, HourCycle};
use crate::settle::SettleTimer;

/// Which part of the time the face is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditingField {
    #[default]
    Hours,
    Minutes,
}

/// Messages from the controller to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// The user picked a different value on the face
    ValueChanged { mode: ClockMode, value: u32 },
    /// The face moved on to another field after the settle delay
    FieldAdvanced(EditingField),
    /// Minutes were picked; the selection is complete
    SelectionCommitted,
}

/// Raw input from the host, in face-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    MouseDown(Point),
    MouseMove { position: Point, primary_pressed: bool },
    MouseUp(Point),
    TouchStart(Point),
    TouchMove(Point),
    TouchEnd(Point),
}

/// Snapshot of the interaction state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    pub editing_field: EditingField,
    /// Unbounded target angle of the hand
    pub displayed_angle: f64,
    pub is_user_dragging: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettleAction {
    AdvanceToMinutes,
    Commit,
}

/// Interaction engine for a single clock face
#[derive(Debug)]
pub struct SelectionController {
    dial: Dial,
    hour_cycle: HourCycle,
    minute_step: u32,
    settle_delay: Duration,
    transition_duration: Duration,
    state: InteractionState,
    hour_value: u32,
    minute_value: u32,
    transition: Option<AngleTransition>,
    settle: SettleTimer<SettleAction>,
    notifications: Sender<Notification>,
}

impl SelectionController {
    /// Create a controller editing hours, showing `hour` and `minute`
    ///
    /// `hour` is a face value in the configured hour cycle (1-12 or 0-23).
    pub fn new(
        config: &PickerConfig,
        hour: u32,
        minute: u32,
    ) -> Result<(Self, Receiver<Notification>), FaceError> {
        let hour_mode = config.hour_cycle.clock_mode();
        for (value, mode) in [(hour, hour_mode), (minute, ClockMode::Minute)] {
            if !mode.contains(value) {
                return Err(FaceError::InvalidValue { value, mode });
            }
        }
        Ok(Self::build(config, hour, minute))
    }

    /// Construct from face values already known to be in range
    pub(crate) fn build(
        config: &PickerConfig,
        hour: u32,
        minute: u32,
    ) -> (Self, Receiver<Notification>) {
        let hour_mode = config.hour_cycle.clock_mode();
        let (sender, receiver) = unbounded();
        let controller = Self {
            dial: config.dial(),
            hour_cycle: config.hour_cycle,
            minute_step: config.minute_step.max(1),
            settle_delay: config.settle_delay(),
            transition_duration: config.transition(),
            state: InteractionState {
                editing_field: EditingField::Hours,
                displayed_angle: hand_angle(hour, hour_mode),
                is_user_dragging: false,
            },
            hour_value: hour,
            minute_value: minute,
            transition: None,
            settle: SettleTimer::new(),
            notifications: sender,
        };
        (controller, receiver)
    }

    pub fn dial(&self) -> &Dial {
        &self.dial
    }

    pub fn hour_cycle(&self) -> HourCycle {
        self.hour_cycle
    }

    pub fn minute_step(&self) -> u32 {
        self.minute_step
    }

    pub fn field(&self) -> EditingField {
        self.state.editing_field
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_user_dragging
    }

    /// Mode of the face currently shown
    pub fn mode(&self) -> ClockMode {
        match self.state.editing_field {
            EditingField::Hours => self.hour_cycle.clock_mode(),
            EditingField::Minutes => ClockMode::Minute,
        }
    }

    /// Value selected on the face currently shown
    pub fn value(&self) -> u32 {
        match self.state.editing_field {
            EditingField::Hours => self.hour_value,
            EditingField::Minutes => self.minute_value,
        }
    }

    pub fn hour_value(&self) -> u32 {
        self.hour_value
    }

    pub fn minute_value(&self) -> u32 {
        self.minute_value
    }

    /// Target angle of the hand, without animation
    pub fn displayed_angle(&self) -> f64 {
        self.state.displayed_angle
    }

    /// Angle to draw the hand at `now`
    pub fn rendered_angle(&self, now: Instant) -> f64 {
        match &self.transition {
            Some(transition) => transition.sample(now),
            None => self.state.displayed_angle,
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition
            .as_ref()
            .is_some_and(|transition| !transition.is_finished(now))
    }

    pub fn has_pending_settle(&self) -> bool {
        self.settle.is_pending()
    }

    /// Push a value from the host
    ///
    /// Never emits [`Notification::ValueChanged`]; it only moves the hand.
    /// Hour modes also switch the hour cycle to match.
    pub fn set_value(
        &mut self,
        value: u32,
        mode: ClockMode,
        now: Instant,
    ) -> Result<(), FaceError> {
        if !mode.contains(value) {
            return Err(FaceError::InvalidValue { value, mode });
        }
        match HourCycle::from_mode(mode) {
            Some(cycle) => {
                self.hour_cycle = cycle;
                self.hour_value = value;
            }
            None => self.minute_value = value,
        }
        if mode == self.mode() {
            self.retarget(now);
        }
        Ok(())
    }

    /// Switch to editing hours, cancelling any pending settle action
    pub fn edit_hours(&mut self, now: Instant) {
        self.switch_field(EditingField::Hours, now);
    }

    /// Switch to editing minutes, cancelling any pending settle action
    pub fn edit_minutes(&mut self, now: Instant) {
        self.switch_field(EditingField::Minutes, now);
    }

    /// Process one pointer or touch event
    pub fn handle(&mut self, event: PointerEvent, now: Instant) {
        match event {
            PointerEvent::MouseDown(_) | PointerEvent::TouchStart(_) => self.begin_drag(),
            PointerEvent::MouseMove {
                position,
                primary_pressed: true,
            }
            | PointerEvent::TouchMove(position) => self.select_at(position, now),
            PointerEvent::MouseMove { .. } => {}
            PointerEvent::MouseUp(position) | PointerEvent::TouchEnd(position) => {
                self.release(position, now)
            }
        }
    }

    pub fn pointer_down(&mut self, position: Point, now: Instant) {
        self.handle(PointerEvent::MouseDown(position), now);
    }

    pub fn pointer_move(&mut self, position: Point, primary_pressed: bool, now: Instant) {
        self.handle(
            PointerEvent::MouseMove {
                position,
                primary_pressed,
            },
            now,
        );
    }

    pub fn pointer_up(&mut self, position: Point, now: Instant) {
        self.handle(PointerEvent::MouseUp(position), now);
    }

    pub fn touch_start(&mut self, position: Point, now: Instant) {
        self.handle(PointerEvent::TouchStart(position), now);
    }

    pub fn touch_move(&mut self, position: Point, now: Instant) {
        self.handle(PointerEvent::TouchMove(position), now);
    }

    pub fn touch_end(&mut self, position: Point, now: Instant) {
        self.handle(PointerEvent::TouchEnd(position), now);
    }

    /// Advance time: finish transitions and run a due settle action
    pub fn tick(&mut self, now: Instant) {
        if self
            .transition
            .as_ref()
            .is_some_and(|transition| transition.is_finished(now))
        {
            self.transition = None;
        }

        match self.settle.poll(now) {
            Some(SettleAction::AdvanceToMinutes) => {
                self.state.editing_field = EditingField::Minutes;
                self.retarget(now);
                debug!(minute = self.minute_value, "advanced to minutes");
                self.emit(Notification::FieldAdvanced(EditingField::Minutes));
            }
            Some(SettleAction::Commit) => {
                debug!(
                    hour = self.hour_value,
                    minute = self.minute_value,
                    "selection committed"
                );
                self.emit(Notification::SelectionCommitted);
            }
            None => {}
        }
    }

    /// Tear the controller down; a pending settle action never fires
    pub fn dispose(self) {
        drop(self);
    }

    fn begin_drag(&mut self) {
        if self.settle.cancel().is_some() {
            trace!("pointer pressed during settle delay");
        }
        self.state.is_user_dragging = true;
        // The hand follows the pointer directly while dragging
        self.transition = None;
    }

    fn select_at(&mut self, position: Point, now: Instant) {
        let mode = self.mode();
        let Some(candidate) = angle_to_value(position, &self.dial, mode, self.minute_step) else {
            trace!("pointer on face center");
            return;
        };
        if candidate == self.value() {
            return;
        }

        match self.state.editing_field {
            EditingField::Hours => self.hour_value = candidate,
            EditingField::Minutes => self.minute_value = candidate,
        }
        self.retarget(now);
        debug!(%mode, value = candidate, "value changed");
        self.emit(Notification::ValueChanged {
            mode,
            value: candidate,
        });
    }

    fn release(&mut self, position: Point, now: Instant) {
        // A mouse-up synthesized after a touch-end arrives with no drag active
        if !self.state.is_user_dragging {
            trace!("release without an active drag");
            return;
        }
        self.select_at(position, now);
        self.state.is_user_dragging = false;

        let action = match self.state.editing_field {
            EditingField::Hours => SettleAction::AdvanceToMinutes,
            EditingField::Minutes => SettleAction::Commit,
        };
        self.settle.schedule(now, self.settle_delay, action);
    }

    fn switch_field(&mut self, field: EditingField, now: Instant) {
        self.settle.cancel();
        if self.state.editing_field != field {
            self.state.editing_field = field;
            self.retarget(now);
        }
    }

    /// Point the hand at the current value along the shortest rotation
    ///
    /// Measured from where the hand is drawn now, so a retarget in the middle
    /// of a transition still sweeps at most a half turn.
    fn retarget(&mut self, now: Instant) {
        let from = self.rendered_angle(now);
        let target = hand_angle(self.value(), self.mode());
        let next = shortest_path(from, target);
        self.state.displayed_angle = next;

        self.transition = if self.state.is_user_dragging || self.transition_duration.is_zero() {
            None
        } else {
            Some(AngleTransition::new(from, next, now, self.transition_duration))
        };
    }

    fn emit(&self, notification: Notification) {
        if self.notifications.send(notification).is_err() {
            trace!(?notification, "notification receiver dropped");
        }
    }
}

impl Drop for SelectionController {
    fn drop(&mut self) {
        if let Some(action) = self.settle.cancel() {
            debug!(?action, "cancelled pending settle action");
        }
    }
}
