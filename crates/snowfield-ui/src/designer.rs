//! Hidden designer mode: unlock gesture and the live-tweak panel.

use std::time::{Duration, Instant};

use snowfield_core::prefs::{DENSITY_RANGE, OPACITY_RANGE, SPEED_RANGE};
use snowfield_core::{FallingTextStyle, FontFamily, HexColor, Preferences};

pub const UNLOCK_CLICKS: u32 = 3;
pub const UNLOCK_WINDOW: Duration = Duration::from_millis(1500);

/// Counts clicks on the name heading. Three in a row, each within
/// [`UNLOCK_WINDOW`] of the previous one, toggle designer mode.
#[derive(Debug, Default)]
pub struct DesignerUnlock {
    count: u32,
    last: Option<Instant>,
}

impl DesignerUnlock {
    /// Returns `true` when this click completes the gesture.
    pub fn click(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) > UNLOCK_WINDOW {
                self.count = 0;
            }
        }
        self.count += 1;
        if self.count >= UNLOCK_CLICKS {
            self.count = 0;
            self.last = None;
            true
        } else {
            self.last = Some(now);
            false
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelOutcome {
    pub changed: bool,
    pub exit: bool,
}

/// Draws the designer window. Snow settings only show in the dark theme,
/// where snow can run at all.
pub fn designer_panel(context: &egui::Context, prefs: &mut Preferences) -> PanelOutcome {
    let mut outcome = PanelOutcome::default();
    egui::Window::new("Designer Mode")
        .resizable(false)
        .collapsible(true)
        .anchor(egui::Align2::RIGHT_BOTTOM, [-24.0, -80.0])
        .show(context, |ui| {
            section(ui, "FONT FAMILY");
            ui.horizontal(|ui| {
                for family in [FontFamily::Inter, FontFamily::ComicSans] {
                    outcome.changed |= ui
                        .selectable_value(&mut prefs.font_family, family, family.label())
                        .changed();
                }
            });

            section(ui, "HOLOGRAPHIC TEXT");
            outcome.changed |= color_row(ui, "Color", &mut prefs.holographic_color);
            outcome.changed |= opacity_slider(ui, &mut prefs.holo_opacity);
            egui::ComboBox::from_id_salt("falling_text_style")
                .selected_text(prefs.falling_text_style.label())
                .show_ui(ui, |ui| {
                    for style in FallingTextStyle::ALL {
                        outcome.changed |= ui
                            .selectable_value(&mut prefs.falling_text_style, style, style.label())
                            .changed();
                    }
                });

            section(ui, "BUBBLES");
            outcome.changed |= color_row(ui, "Tint", &mut prefs.bubble_color);
            outcome.changed |= opacity_slider(ui, &mut prefs.bubble_opacity);
            let pause = if prefs.bubbles_paused {
                "Resume bubbles"
            } else {
                "Pause bubbles"
            };
            if ui.button(pause).clicked() {
                prefs.bubbles_paused = !prefs.bubbles_paused;
                outcome.changed = true;
            }

            section(ui, "BACKGROUND");
            outcome.changed |= color_row(ui, "Color", &mut prefs.background_color);
            outcome.changed |= opacity_slider(ui, &mut prefs.bg_opacity);
            outcome.changed |= color_row(ui, "Clock", &mut prefs.clock_color);

            if prefs.theme.is_dark() {
                section(ui, "SNOW SETTINGS");
                outcome.changed |= ui
                    .add(
                        egui::Slider::new(&mut prefs.snow_density, DENSITY_RANGE)
                            .text("Density"),
                    )
                    .changed();
                outcome.changed |= ui
                    .add(
                        egui::Slider::new(&mut prefs.snow_speed, SPEED_RANGE)
                            .step_by(0.1)
                            .suffix("x")
                            .text("Speed"),
                    )
                    .changed();
            } else {
                ui.label("Snow settings are available in the dark theme.");
            }
            ui.separator();
            if ui.button("Reset all designer settings").clicked() {
                prefs.reset_designer();
                outcome.changed = true;
            }
            if ui.button("Exit designer mode").clicked() {
                outcome.exit = true;
            }
        });
    outcome
}

fn section(ui: &mut egui::Ui, title: &str) {
    ui.add_space(6.0);
    ui.label(egui::RichText::new(title).small().strong());
}

fn color_row(ui: &mut egui::Ui, label: &str, color: &mut HexColor) -> bool {
    ui.horizontal(|ui| {
        let changed = ui.color_edit_button_srgb(&mut color.0).changed();
        ui.label(format!("{label} {color}"));
        changed
    })
    .inner
}

fn opacity_slider(ui: &mut egui::Ui, opacity: &mut u8) -> bool {
    ui.add(egui::Slider::new(opacity, OPACITY_RANGE).suffix("%").text("Opacity"))
        .changed()
}
