//! UI module - egui header and settings panel
//!
//! The header mirrors the picked time and lets the user jump between fields or
//! switch AM/PM. The settings window edits the persisted picker config.

use clockface::{EditingField, HourCycle, Meridiem, PickerConfig, TimePicker};
use nannou_egui::egui;

/// Result of header interactions
#[derive(Debug, Default)]
pub struct HeaderResult {
    /// If Some, switch the face to this field
    pub edit_field: Option<EditingField>,
    /// If Some, move the time to this half of the day
    pub meridiem: Option<Meridiem>,
}

/// Draw the header with clickable hours and minutes
pub fn draw_header(ctx: &egui::Context, picker: &TimePicker) -> HeaderResult {
    let mut result = HeaderResult::default();
    let (hours, minutes) = picker.header();
    let field = picker.field();

    egui::TopBottomPanel::top("time_header")
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let hours_label = egui::RichText::new(hours).size(36.0);
                if ui
                    .selectable_label(field == EditingField::Hours, hours_label)
                    .clicked()
                {
                    result.edit_field = Some(EditingField::Hours);
                }

                ui.label(egui::RichText::new(":").size(36.0));

                let minutes_label = egui::RichText::new(minutes).size(36.0);
                if ui
                    .selectable_label(field == EditingField::Minutes, minutes_label)
                    .clicked()
                {
                    result.edit_field = Some(EditingField::Minutes);
                }

                if picker.hour_cycle() == HourCycle::H12 {
                    ui.separator();
                    let current = picker.meridiem();
                    ui.vertical(|ui| {
                        for meridiem in [Meridiem::AM, Meridiem::PM] {
                            if ui
                                .selectable_label(current == meridiem, meridiem.to_string())
                                .clicked()
                                && current != meridiem
                            {
                                result.meridiem = Some(meridiem);
                            }
                        }
                    });
                }
            });
        });

    result
}

/// Draw the settings panel
///
/// Returns true when `config` was edited.
pub fn draw_settings_panel(ctx: &egui::Context, config: &mut PickerConfig) -> bool {
    let mut changed = false;

    egui::Window::new("Settings")
        .collapsible(true)
        .resizable(false)
        .default_width(220.0)
        .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
        .show(ctx, |ui| {
            ui.label("Hour cycle:");
            ui.horizontal(|ui| {
                changed |= ui
                    .radio_value(&mut config.hour_cycle, HourCycle::H12, "12-hour")
                    .changed();
                changed |= ui
                    .radio_value(&mut config.hour_cycle, HourCycle::H24, "24-hour")
                    .changed();
            });

            ui.separator();

            changed |= ui
                .add(egui::Slider::new(&mut config.minute_step, 1..=30).text("Minute step"))
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut config.transition_ms, 0..=1000)
                        .text("Hand motion (ms)"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut config.settle_delay_ms, 0..=1000)
                        .text("Settle delay (ms)"),
                )
                .changed();

            ui.separator();
            ui.label("Tab switches hours/minutes");
        });

    changed
}
