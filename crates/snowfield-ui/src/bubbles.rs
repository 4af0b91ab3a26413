//! Soft background bubbles rising behind the page content.

use std::f32::consts::TAU;
use std::ops::Range;
use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snowfield_core::{HexColor, Theme};

pub const BUBBLE_COUNT: usize = 45;
const DIAMETER_RANGE: Range<f32> = 150.0..240.0;
const PERIOD_RANGE: Range<f32> = 20.0..32.0;
/// Horizontal lanes, each 15% of the width apart.
const LANES: usize = 8;
const BUBBLE_ALPHA: f32 = 0.6;
const TINT_STRENGTH: f32 = 0.35;

const DARK_PALETTE: [egui::Color32; 3] = [
    egui::Color32::from_rgb(0x1e, 0x29, 0x3b),
    egui::Color32::from_rgb(0x33, 0x41, 0x55),
    egui::Color32::from_rgb(0x07, 0x18, 0x2d),
];
const LIGHT_PALETTE: [egui::Color32; 2] = [
    egui::Color32::from_rgb(0xe0, 0xf2, 0xfe),
    egui::Color32::from_rgb(0xba, 0xe6, 0xfd),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    pub diameter: f32,
    /// Distance of the lane from the right edge, as a fraction of the width.
    pub right: f32,
    /// Seconds for one trip from below the bottom edge to above the top.
    pub period: f32,
    /// Offset into the trip, in seconds.
    pub phase: f32,
    pub shade: usize,
}

impl Bubble {
    fn random<R: Rng + ?Sized>(rng: &mut R, lane: usize) -> Self {
        let period = rng.gen_range(PERIOD_RANGE);
        Self {
            diameter: rng.gen_range(DIAMETER_RANGE),
            right: (lane as f32 * 15.0 - 10.0 + rng.gen_range(0.0..20.0)) / 100.0,
            period,
            phase: rng.gen_range(0.0..period),
            shade: rng.gen_range(0..DARK_PALETTE.len()),
        }
    }

    /// Center at `seconds` of animation time inside `rect`.
    pub fn center(&self, rect: egui::Rect, seconds: f32) -> egui::Pos2 {
        let trip = ((seconds + self.phase) / self.period).rem_euclid(1.0);
        let travel = rect.height() + self.diameter;
        let y = rect.bottom() + self.diameter / 2.0 - trip * travel;
        let sway = (trip * TAU).sin() * self.diameter * 0.15;
        let x = rect.right() - self.right * rect.width() + sway;
        egui::pos2(x, y)
    }
}

/// Bubble set plus its own animation clock, which stands still while paused.
pub struct BubbleField {
    bubbles: Vec<Bubble>,
    seconds: f32,
    last_tick: Option<Instant>,
}

impl BubbleField {
    pub fn new() -> Self {
        Self::with_rng(&mut ChaCha8Rng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bubbles = (0..BUBBLE_COUNT)
            .map(|i| Bubble::random(rng, i % LANES))
            .collect();
        Self {
            bubbles,
            seconds: 0.0,
            last_tick: None,
        }
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn seconds(&self) -> f32 {
        self.seconds
    }

    /// Moves the animation clock to `now` unless `paused`.
    pub fn tick(&mut self, now: Instant, paused: bool) {
        if let Some(last) = self.last_tick {
            if !paused {
                self.seconds += now.saturating_duration_since(last).as_secs_f32();
            }
        }
        self.last_tick = Some(now);
    }

    pub fn paint(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        theme: Theme,
        tint: HexColor,
        opacity: u8,
    ) {
        for bubble in &self.bubbles {
            let center = bubble.center(rect, self.seconds);
            let fill = bubble_fill(theme, bubble.shade, tint, opacity);
            painter.circle_filled(center, bubble.diameter / 2.0, fill);
        }
    }
}

impl Default for BubbleField {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill for a bubble of `shade`, pulled toward `tint` and scaled by the
/// designer opacity (percent).
pub fn bubble_fill(theme: Theme, shade: usize, tint: HexColor, opacity: u8) -> egui::Color32 {
    let base = match theme {
        Theme::Dark => DARK_PALETTE[shade % DARK_PALETTE.len()],
        Theme::Light => LIGHT_PALETTE[shade % LIGHT_PALETTE.len()],
    };
    let [r, g, b] = tint.0;
    let alpha = BUBBLE_ALPHA * f32::from(opacity.min(100)) / 100.0;
    base.lerp_to_gamma(egui::Color32::from_rgb(r, g, b), TINT_STRENGTH)
        .gamma_multiply(alpha)
}
