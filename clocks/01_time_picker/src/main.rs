//! Time Picker
//!
//! Pick a time of day on an analog face: drag or tap an hour, let go, and the
//! face moves on to minutes. Mouse and touch input both work.

mod drawing;
mod ui;

use std::time::Instant;

use clockface::config::{load_config, save_config};
use clockface::format::format_time;
use clockface::time_source::current_wall_time;
use clockface::{EditingField, PickerConfig, PickerEvent, PointerEvent, TimePicker};
use nannou::prelude::*;
use nannou::winit::event::{TouchPhase as WinitTouchPhase, WindowEvent};
use nannou_egui::{self, Egui};
use tracing::{debug, info, warn};

use crate::drawing::{colors, draw_face, draw_readout, FaceLayout};
use crate::ui::{draw_header, draw_settings_panel};

const CLOCK_NAME: &str = "time_picker";

fn main() {
    // Honors RUST_LOG through the env-filter feature
    tracing_subscriber::fmt::init();

    nannou::app(model).update(update).run();
}

/// Application state
struct Model {
    /// Picker state and face controller
    picker: TimePicker,
    /// Settings as edited in the panel
    config: PickerConfig,
    /// Last completed selection, shown above the face
    selected_text: Option<String>,
    /// Whether a press or touch started on the face
    dragging: bool,
    /// egui integration
    egui: Egui,
}

impl Model {
    fn layout(&self, window_rect: Rect) -> FaceLayout {
        FaceLayout::new(window_rect.xy(), self.config.face_size as f32)
    }

    fn apply_events(&mut self, events: Vec<PickerEvent>) {
        for event in events {
            match event {
                PickerEvent::TimeChanged(time) => debug!(%time, "time changed"),
                PickerEvent::FieldChanged(field) => debug!(?field, "editing field changed"),
                PickerEvent::MinutesSelected => {
                    let text = format_time(self.picker.time(), self.picker.hour_cycle());
                    info!(time = %text, "time selected");
                    self.selected_text = Some(text);
                }
            }
        }
    }

    fn send(&mut self, event: PointerEvent) {
        let events = self.picker.handle(event, Instant::now());
        self.apply_events(events);
    }
}

/// Load the saved config, falling back to defaults when missing or invalid
fn load_picker_config() -> PickerConfig {
    let config = match load_config::<PickerConfig>(CLOCK_NAME) {
        Ok(Some(config)) => config,
        Ok(None) => return PickerConfig::default(),
        Err(e) => {
            warn!(error = %e, "failed to load config, using defaults");
            return PickerConfig::default();
        }
    };
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            warn!(error = %e, "ignoring invalid config");
            PickerConfig::default()
        }
    }
}

fn persist(config: &PickerConfig) {
    if let Err(e) = save_config(CLOCK_NAME, config) {
        warn!(error = %e, "failed to save config");
    }
}

fn model(app: &App) -> Model {
    // Create window
    let window_id = app
        .new_window()
        .title("Time Picker")
        .size(480, 560)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_moved(mouse_moved)
        .mouse_released(mouse_released)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let config = load_picker_config();
    let picker = TimePicker::at_current_time(config.clone()).unwrap_or_else(|e| {
        warn!(error = %e, "falling back to system local time");
        TimePicker::new(config.clone(), current_wall_time(None))
    });
    info!(time = %picker.time(), cycle = ?config.hour_cycle, "picker ready");

    Model {
        picker,
        config,
        selected_text: None,
        dragging: false,
        egui,
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    let now = Instant::now();
    let events = model.picker.tick(now);
    model.apply_events(events);

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let header = draw_header(&ctx, &model.picker);
    let mut config = model.config.clone();
    let settings_changed = draw_settings_panel(&ctx, &mut config);

    // Apply UI results after the egui frame is done
    drop(ctx);

    if let Some(field) = header.edit_field {
        let events = match field {
            EditingField::Hours => model.picker.edit_hours(now),
            EditingField::Minutes => model.picker.edit_minutes(now),
        };
        model.apply_events(events);
    }
    if let Some(meridiem) = header.meridiem {
        match model.picker.set_meridiem(meridiem, now) {
            Ok(events) => model.apply_events(events),
            Err(e) => warn!(error = %e, "could not change meridiem"),
        }
    }

    if settings_changed {
        match model.picker.reconfigure(config.clone(), now) {
            Ok(()) => {
                model.config = config;
                persist(&model.config);
            }
            Err(e) => warn!(error = %e, "rejected settings change"),
        }
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let layout = model.layout(app.window_rect());

    draw.background().color(colors::BACKGROUND);
    draw_face(&draw, &model.picker, layout, Instant::now());
    if let Some(ref text) = model.selected_text {
        draw_readout(&draw, text, layout);
    }

    // Render to frame
    draw.to_frame(app, &frame).unwrap();

    // Render egui on top
    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    let now = Instant::now();
    let events = match key {
        // Tab toggles between hours and minutes
        Key::Tab => match model.picker.field() {
            EditingField::Hours => model.picker.edit_minutes(now),
            EditingField::Minutes => model.picker.edit_hours(now),
        },
        Key::H => model.picker.edit_hours(now),
        Key::M => model.picker.edit_minutes(now),
        _ => Vec::new(),
    };
    model.apply_events(events);
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    let pos = app.mouse.position();
    let layout = model.layout(app.window_rect());

    // Presses outside the face belong to the egui panels
    if layout.rect().contains(pos) {
        model.dragging = true;
        model.send(PointerEvent::MouseDown(layout.to_face(pos)));
    }
}

fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    let layout = model.layout(app.window_rect());
    let primary_pressed = model.dragging && app.mouse.buttons.left().is_down();
    model.send(PointerEvent::MouseMove {
        position: layout.to_face(pos),
        primary_pressed,
    });
}

fn mouse_released(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || !model.dragging {
        return;
    }
    model.dragging = false;
    let layout = model.layout(app.window_rect());
    model.send(PointerEvent::MouseUp(layout.to_face(app.mouse.position())));
}

fn raw_window_event(app: &App, model: &mut Model, event: &WindowEvent) {
    // Let egui handle raw events for keyboard and mouse input
    model.egui.handle_raw_event(event);

    if let WindowEvent::Touch(touch) = event {
        let window_rect = app.window_rect();

        // Convert touch position to nannou coordinates
        let pos = pt2(
            touch.location.x as f32 - window_rect.w() / 2.0,
            window_rect.h() / 2.0 - touch.location.y as f32,
        );
        let layout = model.layout(window_rect);
        let face_pos = layout.to_face(pos);

        match touch.phase {
            WinitTouchPhase::Started => {
                if layout.rect().contains(pos) {
                    model.dragging = true;
                    model.send(PointerEvent::TouchStart(face_pos));
                }
            }
            WinitTouchPhase::Moved if model.dragging => {
                model.send(PointerEvent::TouchMove(face_pos))
            }
            WinitTouchPhase::Ended | WinitTouchPhase::Cancelled if model.dragging => {
                model.dragging = false;
                model.send(PointerEvent::TouchEnd(face_pos));
            }
            _ => {}
        }
    }
}
