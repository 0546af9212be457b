//! Face geometry - mapping between clock values, angles and face positions
//!
//! Coordinates are face-local: origin at the top-left corner of the face, x to
//! the right, y downward. Hand angles follow the same screen convention: 0° is
//! 3 o'clock and angles grow clockwise. Pointer angles measured by
//! [`pointer_angle`] instead start at 12 o'clock.

use crate::angle::normalize;
use crate::error::FaceError;
use crate::mode::ClockMode;

/// Edge length of the reference face in pixels
pub const DEFAULT_FACE_SIZE: f64 = 256.0;

/// Distance from the face edge to the outer label ring
pub const LABEL_INSET: f64 = 20.0;

/// Distance between the outer and inner label rings (24-hour mode)
pub const INNER_RING_INSET: f64 = 32.0;

/// Number of labelled ticks on every face ring
const TICKS_PER_RING: usize = 12;

/// A point in face-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Hit geometry of a clock face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dial {
    /// Center of the face
    pub center: Point,
    /// Radius of the outer label ring
    pub outer_radius: f64,
    /// Radius of the inner label ring (24-hour mode)
    pub inner_radius: f64,
    /// Pointers closer to the center than this select from the inner ring
    pub inner_boundary: f64,
}

impl Dial {
    /// Dial with the inner boundary midway between the two label rings
    pub fn new(center: Point, outer_radius: f64, inner_radius: f64) -> Self {
        Self {
            center,
            outer_radius,
            inner_radius,
            inner_boundary: (outer_radius + inner_radius) / 2.0,
        }
    }

    /// Dial of a square face `size` pixels wide
    ///
    /// A 256 px face yields label rings at 108 and 76 and a boundary at 92.
    pub fn for_face(size: f64) -> Self {
        let half = size / 2.0;
        let outer_radius = half - LABEL_INSET;
        Self::new(
            Point::new(half, half),
            outer_radius,
            outer_radius - INNER_RING_INSET,
        )
    }

    /// Label ring radius for a ring
    pub fn ring_radius(&self, ring: Ring) -> f64 {
        match ring {
            Ring::Outer => self.outer_radius,
            Ring::Inner => self.inner_radius,
        }
    }
}

impl Default for Dial {
    fn default() -> Self {
        Self::for_face(DEFAULT_FACE_SIZE)
    }
}

/// Hand angle for a value
///
/// Hours use `30 * (value mod 12 - 3)`, so 12 and 0 both point up (-90°) and
/// the two 24-hour rings share angles. Minutes use `6 * (value - 15)`.
pub fn value_to_angle(value: u32, mode: ClockMode) -> Result<f64, FaceError> {
    if !mode.contains(value) {
        return Err(FaceError::InvalidValue { value, mode });
    }
    Ok(hand_angle(value, mode))
}

/// [`value_to_angle`] for values already known to be in the domain
pub(crate) fn hand_angle(value: u32, mode: ClockMode) -> f64 {
    let position = if mode.is_hours() { value % 12 } else { value };
    mode.degrees_per_unit() * (f64::from(position) - f64::from(mode.reference_value()))
}

/// Point at `angle` degrees, `radius` away from `center`
pub fn position_for(angle: f64, radius: f64, center: Point) -> Point {
    let (sin, cos) = angle.to_radians().sin_cos();
    Point::new(center.x + radius * cos, center.y + radius * sin)
}

/// Pointer angle around `center`, 0° at 12 o'clock, in `[0, 360)`
///
/// Returns `None` when the pointer sits exactly on the center, where the
/// angle is undefined.
pub fn pointer_angle(pointer: Point, center: Point) -> Option<f64> {
    let dx = center.x - pointer.x;
    let dy = center.y - pointer.y;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    // Axes are swapped on purpose so that zero points up
    Some(normalize(dx.atan2(dy).to_degrees()))
}

fn hour_at(angle: f64) -> u32 {
    let steps = (angle * 12.0 / 360.0).round() as u32;
    match 12 - steps {
        0 => 12,
        hour => hour,
    }
}

fn minute_at(angle: f64) -> u32 {
    (60.0 - 60.0 * angle / 360.0).round() as u32 % 60
}

/// Snap a minute to the nearest selectable multiple of `step`
///
/// Snaps that land on 60 wrap to 0, which is a multiple of every step.
pub fn snap_minute(minute: u32, step: u32) -> u32 {
    let step = step.max(1);
    let snapped = (minute + step / 2) / step * step;
    if snapped >= 60 {
        0
    } else {
        snapped
    }
}

/// Value under a pointer
///
/// In 24-hour mode the ring is chosen by distance from the center: pointers
/// inside `dial.inner_boundary` select 13-23 and 0. Minutes are snapped to
/// `minute_step`. A pointer on the exact center selects nothing.
pub fn angle_to_value(
    pointer: Point,
    dial: &Dial,
    mode: ClockMode,
    minute_step: u32,
) -> Option<u32> {
    let angle = pointer_angle(pointer, dial.center)?;
    let value = match mode {
        ClockMode::TwelveHour => hour_at(angle),
        ClockMode::TwentyFourHour => {
            let hour = hour_at(angle);
            if pointer.distance(dial.center) < dial.inner_boundary {
                (hour + 12) % 24
            } else {
                hour
            }
        }
        ClockMode::Minute => snap_minute(minute_at(angle), minute_step),
    };
    Some(value)
}

/// A tick position relative to the face center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: u32,
    pub x: f64,
    pub y: f64,
}

fn layout(count: usize, radius: f64, start: u32, step: u32) -> impl Iterator<Item = Tick> {
    (0..count).map(move |i| {
        // Index 2 sits on the 3 o'clock reference angle
        let angle = 360.0 * (i as f64 - 2.0) / count as f64;
        let (sin, cos) = angle.to_radians().sin_cos();
        Tick {
            value: start + i as u32 * step,
            x: radius * cos,
            y: radius * sin,
        }
    })
}

/// `count` evenly spaced ticks labelled `start`, `start + step`, ...
///
/// Tick `i` sits at `360 * (i - 2) / count` degrees, which lines up with
/// [`value_to_angle`] for hour and five-minute faces.
pub fn tick_layout(
    count: usize,
    radius: f64,
    start: u32,
    step: u32,
) -> Result<Vec<Tick>, FaceError> {
    if count == 0 || step == 0 {
        return Err(FaceError::InvalidLayout { count, step });
    }
    Ok(layout(count, radius, start, step).collect())
}

/// Which label ring a tick belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ring {
    Outer,
    Inner,
}

/// Ring a value is shown on
pub fn ring_of(value: u32, mode: ClockMode) -> Ring {
    match mode {
        ClockMode::TwentyFourHour if value == 0 || value > 12 => Ring::Inner,
        _ => Ring::Outer,
    }
}

/// A labelled, selectable position on the face
#[derive(Debug, Clone, PartialEq)]
pub struct FaceTick {
    /// Value selected by this tick (24 and 60 alias to 0)
    pub value: u32,
    /// Text shown on the face
    pub label: String,
    pub ring: Ring,
    /// Offset from the face center
    pub x: f64,
    pub y: f64,
}

impl FaceTick {
    fn from_tick(tick: Tick, ring: Ring, wrap: u32, padded: bool) -> Self {
        let value = tick.value % wrap;
        let label = if tick.value == wrap {
            "00".to_string()
        } else if padded {
            format!("{:02}", tick.value)
        } else {
            tick.value.to_string()
        };
        Self {
            value,
            label,
            ring,
            x: tick.x,
            y: tick.y,
        }
    }

    pub fn is_selected(&self, value: u32) -> bool {
        self.value == value
    }
}

/// All labelled ticks of a face in `mode`
pub fn face_ticks(mode: ClockMode, dial: &Dial) -> Vec<FaceTick> {
    let outer = dial.outer_radius;
    match mode {
        ClockMode::TwelveHour => layout(TICKS_PER_RING, outer, 1, 1)
            .map(|tick| FaceTick::from_tick(tick, Ring::Outer, 13, false))
            .collect(),
        ClockMode::TwentyFourHour => layout(TICKS_PER_RING, outer, 1, 1)
            .map(|tick| FaceTick::from_tick(tick, Ring::Outer, 24, false))
            .chain(
                layout(TICKS_PER_RING, dial.inner_radius, 13, 1)
                    .map(|tick| FaceTick::from_tick(tick, Ring::Inner, 24, false)),
            )
            .collect(),
        ClockMode::Minute => layout(TICKS_PER_RING, outer, 5, 5)
            .map(|tick| FaceTick::from_tick(tick, Ring::Outer, 60, true))
            .collect(),
    }
}

/// How the selection hand is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hand {
    /// Hand angle in degrees
    pub angle: f64,
    /// Length from the center to the selection dot
    pub length: f64,
    /// Minute between two labels, drawn with a hollow dot
    pub between_labels: bool,
}

/// Hand pointing at `value`
pub fn hand(value: u32, mode: ClockMode, dial: &Dial) -> Result<Hand, FaceError> {
    let angle = value_to_angle(value, mode)?;
    Ok(hand_at(angle, value, mode, dial))
}

/// Hand styled for `value` but drawn at `angle`, e.g. mid-rotation
pub(crate) fn hand_at(angle: f64, value: u32, mode: ClockMode, dial: &Dial) -> Hand {
    Hand {
        angle,
        length: dial.ring_radius(ring_of(value, mode)),
        between_labels: mode == ClockMode::Minute && value % 5 != 0,
    }
}
