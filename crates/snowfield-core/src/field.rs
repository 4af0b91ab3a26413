//! Falling-snow particle field.
//!
//! The field owns every particle exclusively. Hosts read particles through
//! [`ParticleField::particles`] to draw them and drive the simulation with
//! [`ParticleField::step`], once per display refresh.

use std::ops::Range;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::params::SnowParams;

pub const RADIUS_RANGE: Range<f32> = 0.5..3.0;
pub const BASE_SPEED_RANGE: Range<f32> = 0.3..1.1;
pub const WIND_RANGE: Range<f32> = -0.15..0.15;
pub const OPACITY_RANGE: Range<f32> = 0.2..0.6;
/// Height of the band above the top edge where reseeded flakes re-enter.
pub const RESEED_BAND: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub radius: f32,
    pub base_speed: f32,
    /// Base speed scaled by the speed multiplier, in px per frame.
    pub speed: f32,
    pub wind: f32,
    pub opacity: f32,
}

impl Particle {
    /// Rolls a fresh flake inside `bounds`.
    ///
    /// `initial` spreads flakes over the whole surface so the first frame is
    /// already populated; otherwise the flake starts in the band above the top
    /// edge.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: Vec2,
        speed_multiplier: f32,
        initial: bool,
    ) -> Self {
        let x = sample(rng, 0.0..bounds.x);
        let y = if initial {
            sample(rng, 0.0..bounds.y)
        } else {
            rng.gen_range(-RESEED_BAND..0.0)
        };
        let base_speed = rng.gen_range(BASE_SPEED_RANGE);
        Self {
            pos: Vec2::new(x, y),
            radius: rng.gen_range(RADIUS_RANGE),
            base_speed,
            speed: base_speed * speed_multiplier,
            wind: rng.gen_range(WIND_RANGE),
            opacity: rng.gen_range(OPACITY_RANGE),
        }
    }

    fn advance(&mut self) {
        self.pos.y += self.speed;
        self.pos.x += self.wind;
    }
}

// Degenerate surface axes collapse to the range start.
fn sample<R: Rng + ?Sized>(rng: &mut R, range: Range<f32>) -> f32 {
    if range.is_empty() {
        range.start
    } else {
        rng.gen_range(range)
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Vec2,
    params: SnowParams,
    rng: ChaCha8Rng,
}

impl ParticleField {
    /// Populates a field for a `bounds.x` by `bounds.y` pixel surface.
    pub fn new(bounds: Vec2, params: SnowParams) -> Self {
        Self::with_rng(bounds, params, ChaCha8Rng::from_entropy())
    }

    /// Same as [`ParticleField::new`] with a fixed seed, for reproducible fields.
    pub fn with_seed(bounds: Vec2, params: SnowParams, seed: u64) -> Self {
        Self::with_rng(bounds, params, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(bounds: Vec2, params: SnowParams, rng: ChaCha8Rng) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            bounds,
            params,
            rng,
        };
        field.populate();
        field
    }

    fn populate(&mut self) {
        let count = self.params.density() as usize;
        let (bounds, speed) = (self.bounds, self.params.speed());
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles
                .push(Particle::random(&mut self.rng, bounds, speed, true));
        }
        debug!(
            "populated {} flakes on {}x{} (speed x{})",
            count, bounds.x, bounds.y, speed
        );
    }

    /// Advances every flake by one fixed frame step and reseeds the ones that
    /// fell past the bottom edge. Returns how many were reseeded.
    pub fn step(&mut self) -> usize {
        let (bounds, speed) = (self.bounds, self.params.speed());
        let mut reseeded = 0;
        for particle in self.particles.iter_mut() {
            particle.advance();
            if particle.pos.y >= bounds.y {
                *particle = Particle::random(&mut self.rng, bounds, speed, false);
                reseeded += 1;
            }
        }
        reseeded
    }

    /// Records new surface bounds. Flakes in flight keep their positions,
    /// except when growing out of an empty surface: those flakes were all
    /// placed at the origin, so the field is repopulated instead.
    pub fn resize(&mut self, bounds: Vec2) -> bool {
        if bounds == self.bounds {
            return false;
        }
        debug!(
            "field resized {}x{} -> {}x{}",
            self.bounds.x, self.bounds.y, bounds.x, bounds.y
        );
        let degenerate = self.bounds.x <= 0.0 || self.bounds.y <= 0.0;
        self.bounds = bounds;
        if degenerate {
            self.populate();
        }
        true
    }

    /// Replaces the parameters and repopulates from scratch when they changed.
    pub fn set_params(&mut self, params: SnowParams) -> bool {
        if params == self.params {
            return false;
        }
        self.params = params;
        self.populate();
        true
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn params(&self) -> SnowParams {
        self.params
    }
}
