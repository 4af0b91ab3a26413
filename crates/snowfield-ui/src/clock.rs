//! Clock page and its settings window.

use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use snowfield_core::{ClockFormat, ClockReading, ClockZone, Preferences};

const LIGHT_CLOCK: egui::Color32 = egui::Color32::from_rgb(15, 23, 42);
const DARK_DATE: egui::Color32 = egui::Color32::from_rgb(96, 165, 250);

/// Time left until the next whole second, so the display ticks on time.
pub fn until_next_second(now: DateTime<Utc>) -> Duration {
    let into_second = Duration::from_nanos(u64::from(now.nanosecond() % 1_000_000_000));
    Duration::from_secs(1).saturating_sub(into_second)
}

pub fn clock_page(ui: &mut egui::Ui, prefs: &Preferences, now: DateTime<Utc>) {
    let reading = ClockReading::at(now, prefs.timezone, prefs.clock_format, prefs.show_date);
    let dark = prefs.theme.is_dark();
    let time_color = if dark {
        let [r, g, b] = prefs.clock_color.0;
        egui::Color32::from_rgb(r, g, b)
    } else {
        LIGHT_CLOCK
    };

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.3);
        let size = (ui.available_width() * 0.16).clamp(48.0, 220.0);
        ui.label(
            egui::RichText::new(reading.time)
                .font(egui::FontId::monospace(size))
                .strong()
                .color(time_color),
        );
        if let Some(date) = reading.date {
            ui.add_space(12.0);
            ui.label(
                egui::RichText::new(date)
                    .size(28.0)
                    .strong()
                    .color(if dark { DARK_DATE } else { LIGHT_CLOCK }),
            );
        }
    });
}

/// Format, date and timezone controls. Returns whether anything changed.
pub fn clock_settings(context: &egui::Context, prefs: &mut Preferences, open: &mut bool) -> bool {
    let mut changed = false;
    egui::Window::new("Clock settings")
        .open(open)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::RIGHT_TOP, [-24.0, 24.0])
        .show(context, |ui| {
            ui.horizontal(|ui| {
                ui.label("Format");
                for format in [ClockFormat::HoursMinutes, ClockFormat::WithSeconds] {
                    changed |= ui
                        .selectable_value(&mut prefs.clock_format, format, format.label())
                        .changed();
                }
            });
            changed |= ui.checkbox(&mut prefs.show_date, "Show date").changed();
            ui.horizontal(|ui| {
                ui.label("Timezone");
                egui::ComboBox::from_id_salt("clock_timezone")
                    .selected_text(prefs.timezone.label())
                    .show_ui(ui, |ui| {
                        for zone in ClockZone::choices() {
                            changed |= ui
                                .selectable_value(&mut prefs.timezone, zone, zone.label())
                                .changed();
                        }
                    });
            });
        });
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn repaint_lands_on_the_next_second() {
        let on_the_second = Utc.with_ymd_and_hms(2026, 10, 15, 8, 0, 0).unwrap();
        assert_eq!(until_next_second(on_the_second), Duration::from_secs(1));

        let later = on_the_second + chrono::Duration::milliseconds(250);
        assert_eq!(until_next_second(later), Duration::from_millis(750));
    }
}
