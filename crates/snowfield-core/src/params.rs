pub const DEFAULT_DENSITY: u32 = 80;
pub const MAX_DENSITY: u32 = 10_000;
pub const DEFAULT_SPEED: f32 = 1.0;
pub const MIN_SPEED: f32 = 0.1;
pub const MAX_SPEED: f32 = 5.0;

/// Density and speed multiplier handed to the simulator by the host.
///
/// Values are always range-safe: construct through [`SnowParams::new`] or
/// [`SnowParams::default`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnowParams {
    density: u32,
    speed: f32,
}

impl Default for SnowParams {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            speed: DEFAULT_SPEED,
        }
    }
}

impl SnowParams {
    pub fn new(density: u32, speed: f32) -> Self {
        Self {
            density: density.min(MAX_DENSITY),
            speed: clamp_speed(speed),
        }
    }

    pub fn density(&self) -> u32 {
        self.density
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

fn clamp_speed(speed: f32) -> f32 {
    if speed.is_finite() && speed > 0.0 {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    } else {
        DEFAULT_SPEED
    }
}
