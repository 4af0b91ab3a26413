//! Snow overlay component: mounts a particle field on a [`Surface`] and keeps
//! it animating through a [`FrameScheduler`] until unmounted.
use snowfield_core::{ParticleField, SnowParams};
use snowfield_platform::{FrameHandle, FrameScheduler, Result, Rgba8, Surface, SurfaceSize};
use tracing::{debug, info};

mod pixels;
pub use crate::pixels::PixelSurface;

pub const FLAKE_COLOR: Rgba8 = Rgba8::WHITE;

struct Mounted<S> {
    surface: S,
    field: ParticleField,
}

pub struct SnowOverlay<S, F> {
    scheduler: F,
    params: SnowParams,
    mounted: Option<Mounted<S>>,
    pending: Option<FrameHandle>,
    seed: Option<u64>,
}

impl<S: Surface, F: FrameScheduler> SnowOverlay<S, F> {
    pub fn new(scheduler: F, params: SnowParams) -> Self {
        Self {
            scheduler,
            params,
            mounted: None,
            pending: None,
            seed: None,
        }
    }

    /// Seeds every field this overlay builds, for reproducible animation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Starts animating on `surface`. Without a surface the overlay stays idle.
    pub fn mount(&mut self, surface: Option<S>) {
        let Some(surface) = surface else {
            debug!("no drawing surface available; snow overlay stays idle");
            return;
        };
        if self.mounted.is_some() {
            self.unmount();
        }
        let bounds = surface.size().as_vec2();
        let field = match self.seed {
            Some(seed) => ParticleField::with_seed(bounds, self.params, seed),
            None => ParticleField::new(bounds, self.params),
        };
        info!(
            "snow overlay mounted: {}x{}, {} flakes, speed x{}",
            bounds.x,
            bounds.y,
            field.len(),
            self.params.speed()
        );
        self.mounted = Some(Mounted { surface, field });
        self.pending = Some(self.scheduler.request_frame());
    }

    /// Cancels the pending frame and hands the surface back to the host.
    pub fn unmount(&mut self) -> Option<S> {
        let mounted = self.mounted.take()?;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        info!("snow overlay unmounted");
        Some(mounted.surface)
    }

    /// Mounts or unmounts to follow the host's visibility decision.
    /// `make_surface` only runs when a mount is needed.
    pub fn sync_active(&mut self, active: bool, make_surface: impl FnOnce() -> Option<S>) {
        match (active, self.is_mounted()) {
            (true, false) => self.mount(make_surface()),
            (false, true) => {
                self.unmount();
            }
            _ => {}
        }
    }

    /// Runs one animation frame if `handle` is the frame this overlay is
    /// waiting for. Stale and cancelled handles are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if self.pending != Some(handle) {
            debug!("ignoring stale frame callback {:?}", handle);
            return false;
        }
        self.pending = None;
        let Some(mounted) = self.mounted.as_mut() else {
            return false;
        };

        mounted.surface.clear();
        mounted.field.step();
        for flake in mounted.field.particles() {
            mounted
                .surface
                .fill_circle(flake.pos, flake.radius, FLAKE_COLOR.with_opacity(flake.opacity));
        }

        self.pending = Some(self.scheduler.request_frame());
        true
    }

    /// Follows a viewport change. Flakes in flight are not repositioned.
    pub fn resize(&mut self, size: SurfaceSize) -> Result<()> {
        let Some(mounted) = self.mounted.as_mut() else {
            return Ok(());
        };
        if mounted.surface.size() == size {
            return Ok(());
        }
        mounted.surface.resize(size)?;
        mounted.field.resize(size.as_vec2());
        debug!("snow overlay resized to {}x{}", size.width, size.height);
        Ok(())
    }

    /// New density or speed: a mounted field is repopulated from scratch.
    pub fn set_params(&mut self, params: SnowParams) {
        if params == self.params {
            return;
        }
        self.params = params;
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.field.set_params(params);
            info!(
                "snow repopulated: {} flakes, speed x{}",
                params.density(),
                params.speed()
            );
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn particle_count(&self) -> usize {
        self.mounted.as_ref().map_or(0, |m| m.field.len())
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.mounted.as_ref().map(|m| &m.field)
    }

    pub fn surface(&self) -> Option<&S> {
        self.mounted.as_ref().map(|m| &m.surface)
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }
}
