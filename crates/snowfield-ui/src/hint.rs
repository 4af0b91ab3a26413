//! Periodic hint text that drifts down the home page.

use std::time::{Duration, Instant};

use snowfield_core::{FallingTextStyle, HexColor};

pub const FIRST_HINT_DELAY: Duration = Duration::from_millis(800);
pub const HINT_INTERVAL: Duration = Duration::from_secs(30);
pub const HINT_FALL: Duration = Duration::from_secs(20);
pub const HINT_MESSAGE: &str = "Quickly click the name three times for a surprise! :D";

/// Spawns a hint [`FIRST_HINT_DELAY`] after start and then every
/// [`HINT_INTERVAL`]; each one falls for [`HINT_FALL`].
#[derive(Debug, Clone)]
pub struct HintSchedule {
    next_spawn: Instant,
    falling_since: Option<Instant>,
}

impl HintSchedule {
    pub fn new(start: Instant) -> Self {
        Self {
            next_spawn: start + FIRST_HINT_DELAY,
            falling_since: None,
        }
    }

    /// Advances the schedule to `now`. Returns the fall progress in `[0, 1)`
    /// while a hint is on screen.
    pub fn poll(&mut self, now: Instant) -> Option<f32> {
        if now >= self.next_spawn {
            // Spawns missed while the window slept are skipped, not replayed.
            let behind = now.duration_since(self.next_spawn);
            let skipped = (behind.as_millis() / HINT_INTERVAL.as_millis()) as u32;
            let spawn = self.next_spawn + HINT_INTERVAL * skipped;
            self.falling_since = Some(spawn);
            self.next_spawn = spawn + HINT_INTERVAL;
        }
        let since = self.falling_since?;
        let elapsed = now.saturating_duration_since(since);
        if elapsed >= HINT_FALL {
            self.falling_since = None;
            return None;
        }
        Some(elapsed.as_secs_f32() / HINT_FALL.as_secs_f32())
    }

    /// How long the host can wait before the schedule changes again.
    pub fn next_wake(&self, now: Instant) -> Duration {
        if self.falling_since.is_some() {
            Duration::ZERO
        } else {
            self.next_spawn.saturating_duration_since(now)
        }
    }
}

/// Text color of a hint for the given style at `seconds` into the animation.
pub fn hint_color(
    style: FallingTextStyle,
    holographic: HexColor,
    opacity: u8,
    seconds: f32,
) -> egui::Color32 {
    let wave = (seconds * 0.8).sin() * 0.5 + 0.5;
    let color = match style {
        FallingTextStyle::Holographic => {
            let hue = (seconds * 0.15).rem_euclid(1.0);
            let shimmer = egui::Color32::from(egui::ecolor::Hsva::new(hue, 0.6, 1.0, 1.0));
            let [r, g, b] = holographic.0;
            egui::Color32::from_rgb(r, g, b).lerp_to_gamma(shimmer, 0.5)
        }
        FallingTextStyle::Matrix => egui::Color32::from_rgb(34, 197, 94),
        FallingTextStyle::Cyber => egui::Color32::from_rgb(34, 211, 238)
            .lerp_to_gamma(egui::Color32::from_rgb(217, 70, 239), wave),
        FallingTextStyle::Outrun => egui::Color32::from_rgb(236, 72, 153)
            .lerp_to_gamma(egui::Color32::from_rgb(251, 146, 60), wave),
    };
    color.gamma_multiply(f32::from(opacity.min(100)) / 100.0)
}

/// Paints the hint at `progress` through its fall, starting a quarter of the
/// way down the page.
pub fn paint_hint(painter: &egui::Painter, rect: egui::Rect, progress: f32, color: egui::Color32) {
    let top = rect.top() + rect.height() * 0.25;
    let y = top + progress * (rect.bottom() - top + 40.0);
    painter.text(
        egui::pos2(rect.left() + 24.0, y),
        egui::Align2::LEFT_TOP,
        HINT_MESSAGE,
        egui::FontId::proportional(22.0),
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn first_hint_after_800ms_then_every_30s() {
        let start = Instant::now();
        let mut schedule = HintSchedule::new(start);
        assert_eq!(schedule.poll(start), None);
        assert_eq!(schedule.poll(start + ms(799)), None);
        assert_eq!(schedule.poll(start + ms(800)), Some(0.0));

        let halfway = schedule.poll(start + ms(10_800)).unwrap();
        assert!((halfway - 0.5).abs() < 1e-3);

        // Falls for 20 s, then stays away until the next spawn.
        assert_eq!(schedule.poll(start + ms(20_800)), None);
        assert_eq!(schedule.poll(start + ms(30_799)), None);
        assert_eq!(schedule.poll(start + ms(30_800)), Some(0.0));
        assert_eq!(schedule.poll(start + ms(60_800)), Some(0.0));
    }

    #[test]
    fn missed_spawns_are_skipped() {
        let start = Instant::now();
        let mut schedule = HintSchedule::new(start);
        // Asleep for five minutes: the hint that is due now starts, on the
        // 30 s grid, instead of a backlog replaying.
        let progress = schedule.poll(start + ms(300_800 + 5_000)).unwrap();
        assert!((progress - 0.25).abs() < 1e-3);
        assert_eq!(schedule.next_wake(start + ms(305_800)), Duration::ZERO);
        assert_eq!(schedule.poll(start + ms(320_800)), None);
        assert_eq!(schedule.next_wake(start + ms(320_800)), ms(10_000));
    }

    #[test]
    fn wake_time_counts_down_to_the_next_spawn() {
        let start = Instant::now();
        let schedule = HintSchedule::new(start);
        assert_eq!(schedule.next_wake(start), FIRST_HINT_DELAY);
        assert_eq!(schedule.next_wake(start + ms(900)), Duration::ZERO);
    }

    #[test]
    fn hint_color_follows_opacity() {
        let white = HexColor::rgb(255, 255, 255);
        let matrix = hint_color(FallingTextStyle::Matrix, white, 100, 0.0);
        assert_eq!(matrix, egui::Color32::from_rgb(34, 197, 94));
        let hidden = hint_color(FallingTextStyle::Holographic, white, 0, 3.0);
        assert_eq!(hidden.a(), 0);
        let half = hint_color(FallingTextStyle::Outrun, white, 50, 1.0);
        assert!(half.a() > 100 && half.a() < 160);
    }
}
