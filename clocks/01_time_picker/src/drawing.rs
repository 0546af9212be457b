//! Drawing module - clock face, labels and selection hand
//!
//! Face geometry comes from `clockface` in face-local pixels (origin top-left,
//! y down); this module maps it onto nannou's centered, y-up coordinates.

use clockface::face::{FaceTick, Hand, Ring};
use clockface::TimePicker;
use nannou::prelude::*;
use std::time::Instant;

/// Color palette for the picker
pub mod colors {
    use nannou::prelude::*;

    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 250,
        green: 250,
        blue: 250,
        standard: std::marker::PhantomData,
    };
    pub const FACE: Srgb<u8> = Srgb {
        red: 224,
        green: 224,
        blue: 224,
        standard: std::marker::PhantomData,
    };
    pub const LABEL: Srgb<u8> = Srgb {
        red: 33,
        green: 33,
        blue: 33,
        standard: std::marker::PhantomData,
    };
    pub const LABEL_INNER: Srgb<u8> = Srgb {
        red: 117,
        green: 117,
        blue: 117,
        standard: std::marker::PhantomData,
    };
    pub const ACCENT: Srgb<u8> = Srgb {
        red: 0,
        green: 151,
        blue: 167,
        standard: std::marker::PhantomData,
    };
    pub const ON_ACCENT: Srgb<u8> = Srgb {
        red: 255,
        green: 255,
        blue: 255,
        standard: std::marker::PhantomData,
    };
}

/// Radius of the selection dot drawn over a label
const SELECTION_RADIUS: f32 = 16.0;

/// Screen placement of the face
#[derive(Debug, Clone, Copy)]
pub struct FaceLayout {
    /// Face center in nannou coordinates
    pub center: Point2,
    /// Edge length of the square face
    pub size: f32,
}

impl FaceLayout {
    pub fn new(center: Point2, size: f32) -> Self {
        Self { center, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_xy_wh(self.center, vec2(self.size, self.size))
    }

    /// nannou point to face-local pixels
    pub fn to_face(&self, pos: Point2) -> clockface::Point {
        let half = self.size / 2.0;
        clockface::Point::new(
            <f64 as From<f32>>::from(pos.x - self.center.x + half),
            <f64 as From<f32>>::from(self.center.y - pos.y + half),
        )
    }

    /// Offset from the face center (y down) to a nannou point
    fn offset_point(&self, x: f64, y: f64) -> Point2 {
        self.center + vec2(x as f32, -(y as f32))
    }

    fn along(&self, angle: f64, length: f64) -> Point2 {
        let (sin, cos) = angle.to_radians().sin_cos();
        self.offset_point(cos * length, sin * length)
    }
}

/// Draw the whole face: background, hand and labels
pub fn draw_face(draw: &Draw, picker: &TimePicker, layout: FaceLayout, now: Instant) {
    draw.ellipse()
        .xy(layout.center)
        .radius(layout.size / 2.0)
        .color(colors::FACE);

    let hand = picker.hand(now);
    draw_hand(draw, &hand, layout);

    let selected = picker.face_value();
    let animating = picker.controller().is_animating(now);
    for tick in picker.ticks() {
        // Labels only turn white once the hand has arrived
        let highlighted = !animating && tick.is_selected(selected);
        draw_label(draw, &tick, layout, highlighted);
    }
}

fn draw_hand(draw: &Draw, hand: &Hand, layout: FaceLayout) {
    let tip = layout.along(hand.angle, hand.length);

    draw.ellipse()
        .xy(layout.center)
        .radius(3.0)
        .color(colors::ACCENT);
    draw.line()
        .start(layout.center)
        .end(tip)
        .color(colors::ACCENT)
        .weight(2.0);
    draw.ellipse()
        .xy(tip)
        .radius(SELECTION_RADIUS)
        .color(colors::ACCENT);

    if hand.between_labels {
        draw.ellipse()
            .xy(tip)
            .radius(3.0)
            .color(colors::ON_ACCENT);
    }
}

fn draw_label(draw: &Draw, tick: &FaceTick, layout: FaceLayout, highlighted: bool) {
    let (color, font_size) = match (highlighted, tick.ring) {
        (true, _) => (colors::ON_ACCENT, 15),
        (false, Ring::Outer) => (colors::LABEL, 15),
        (false, Ring::Inner) => (colors::LABEL_INNER, 12),
    };

    draw.text(&tick.label)
        .xy(layout.offset_point(tick.x, tick.y))
        .color(color)
        .font_size(font_size)
        .w(SELECTION_RADIUS * 2.0);
}

/// Draw the picked time above the face
pub fn draw_readout(draw: &Draw, text: &str, layout: FaceLayout) {
    draw.text(text)
        .xy(layout.center + vec2(0.0, layout.size / 2.0 + 40.0))
        .color(colors::LABEL)
        .font_size(32)
        .w(layout.size);
}
