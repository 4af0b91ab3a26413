//! Session state behind the landing window: which page shows, whether it
//! snows, whether designer mode is open, and when preferences need saving.
//!
//! Kept free of egui drawing so every decision can run headless.

use std::time::Instant;

use snowfield_core::{Preferences, Theme, View};
use snowfield_overlay::{PixelSurface, SnowOverlay};
use snowfield_platform::{FrameScheduler, SurfaceSize};
use tracing::{info, warn};

use crate::designer::{DesignerUnlock, PanelOutcome};

pub struct Session<F> {
    prefs: Preferences,
    overlay: SnowOverlay<PixelSurface, F>,
    snowing: bool,
    designer_open: bool,
    clock_settings_open: bool,
    unlock: DesignerUnlock,
    dirty: bool,
}

impl<F: FrameScheduler> Session<F> {
    pub fn new(prefs: Preferences, scheduler: F) -> Self {
        let overlay = SnowOverlay::new(scheduler, prefs.snow_params());
        Self::with_overlay(prefs, overlay)
    }

    pub fn with_overlay(prefs: Preferences, overlay: SnowOverlay<PixelSurface, F>) -> Self {
        Self {
            prefs,
            overlay,
            snowing: false,
            designer_open: false,
            clock_settings_open: false,
            unlock: DesignerUnlock::default(),
            dirty: false,
        }
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    /// Direct access for the designer and clock panels. Report what they
    /// changed through [`Session::designer_changed`] or [`Session::mark_dirty`].
    pub fn prefs_mut(&mut self) -> &mut Preferences {
        &mut self.prefs
    }

    pub fn overlay(&self) -> &SnowOverlay<PixelSurface, F> {
        &self.overlay
    }

    pub fn snowing(&self) -> bool {
        self.snowing
    }

    pub fn designer_open(&self) -> bool {
        self.designer_open
    }

    pub fn clock_settings_open_mut(&mut self) -> &mut bool {
        &mut self.clock_settings_open
    }

    /// Snow runs only while requested and the theme is dark.
    pub fn snow_active(&self) -> bool {
        self.prefs.theme.is_dark() && self.snowing
    }

    /// Flips snow on or off. Ignored in the light theme.
    pub fn toggle_snow(&mut self) -> bool {
        if self.prefs.theme.is_dark() {
            self.snowing = !self.snowing;
            info!("snow {}", if self.snowing { "on" } else { "off" });
        }
        self.snowing
    }

    /// Switches theme; the light theme also stops the snow.
    pub fn toggle_theme(&mut self) -> Theme {
        if self.prefs.set_theme(self.prefs.theme.toggled()) {
            self.snowing = false;
        }
        info!("theme switched to {:?}", self.prefs.theme);
        self.dirty = true;
        self.prefs.theme
    }

    pub fn toggle_view(&mut self) -> View {
        self.prefs.view = self.prefs.view.toggled();
        self.clock_settings_open = false;
        info!("showing {:?} view", self.prefs.view);
        self.dirty = true;
        self.prefs.view
    }

    /// Escape from the clock page. Returns whether the view changed.
    pub fn go_home(&mut self) -> bool {
        if self.prefs.view == View::Home {
            return false;
        }
        self.toggle_view();
        true
    }

    /// Feeds a click on the name heading into the unlock gesture.
    pub fn heading_clicked(&mut self, now: Instant) -> bool {
        if !self.unlock.click(now) {
            return false;
        }
        self.designer_open = !self.designer_open;
        info!("designer mode {}", if self.designer_open { "on" } else { "off" });
        true
    }

    /// Applies what the designer panel reported for this frame.
    pub fn designer_changed(&mut self, outcome: PanelOutcome) {
        if outcome.changed {
            self.overlay.set_params(self.prefs.snow_params());
            self.dirty = true;
        }
        if outcome.exit {
            self.designer_open = false;
            info!("designer mode off");
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether preferences changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// One display refresh of the snow overlay at `size` physical pixels.
    /// Mounting waits until the window has a non-empty area.
    pub fn snow_frame(&mut self, size: SurfaceSize) -> Option<&PixelSurface> {
        let active = self.snow_active();
        self.overlay
            .sync_active(active, || (size.area() > 0).then(|| PixelSurface::new(size)));
        if let Err(err) = self.overlay.resize(size) {
            warn!("failed to resize snow overlay: {err}");
        }
        if let Some(handle) = self.overlay.pending_frame() {
            self.overlay.on_frame(handle);
        }
        self.overlay.surface().filter(|_| size.area() > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::scheduler::EguiFrameScheduler;

    const WINDOW: SurfaceSize = SurfaceSize {
        width: 320,
        height: 200,
    };

    fn session(prefs: Preferences) -> Session<EguiFrameScheduler> {
        let scheduler = EguiFrameScheduler::new(egui::Context::default());
        let overlay = SnowOverlay::new(scheduler, prefs.snow_params()).with_seed(5);
        Session::with_overlay(prefs, overlay)
    }

    #[test]
    fn light_theme_stops_running_snow() {
        let mut session = session(Preferences::default());
        assert!(session.toggle_snow());
        assert!(session.snow_frame(WINDOW).is_some());
        assert!(session.overlay().is_mounted());

        assert_eq!(session.toggle_theme(), Theme::Light);
        assert!(!session.snowing());
        assert!(!session.snow_active());
        assert!(session.snow_frame(WINDOW).is_none());
        assert!(!session.overlay().is_mounted());
        assert_eq!(session.overlay().scheduler().cancelled(), 1);
        assert!(session.take_dirty());
        assert!(!session.take_dirty());

        // Back to dark: snow stays off until asked for again.
        assert_eq!(session.toggle_theme(), Theme::Dark);
        assert!(!session.snow_active());
    }

    #[test]
    fn snow_toggle_is_ignored_in_light_theme() {
        let mut session = session(Preferences {
            theme: Theme::Light,
            ..Preferences::default()
        });
        assert!(!session.toggle_snow());
        assert!(session.snow_frame(WINDOW).is_none());
    }

    #[test]
    fn designer_change_repopulates_running_snow() {
        let mut session = session(Preferences::default());
        session.toggle_snow();
        session.snow_frame(WINDOW);
        assert_eq!(session.overlay().particle_count(), 80);

        session.prefs_mut().snow_density = 200;
        session.designer_changed(PanelOutcome {
            changed: true,
            exit: false,
        });
        assert_eq!(session.overlay().particle_count(), 200);
        assert!(session.take_dirty());

        // Unchanged panel: nothing to save.
        session.designer_changed(PanelOutcome::default());
        assert!(!session.take_dirty());
    }

    #[test]
    fn designer_settings_apply_when_snow_starts_later() {
        let mut session = session(Preferences::default());
        session.prefs_mut().snow_density = 12;
        session.designer_changed(PanelOutcome {
            changed: true,
            exit: false,
        });
        session.toggle_snow();
        session.snow_frame(WINDOW);
        assert_eq!(session.overlay().particle_count(), 12);
    }

    #[test]
    fn triple_click_toggles_designer_and_exit_closes_it() {
        let mut session = session(Preferences::default());
        let start = Instant::now();
        assert!(!session.heading_clicked(start));
        assert!(!session.heading_clicked(start + Duration::from_millis(300)));
        assert!(session.heading_clicked(start + Duration::from_millis(600)));
        assert!(session.designer_open());

        session.designer_changed(PanelOutcome {
            changed: false,
            exit: true,
        });
        assert!(!session.designer_open());
        assert!(!session.take_dirty());
    }

    #[test]
    fn view_switch_persists_and_escape_returns_home() {
        let mut session = session(Preferences::default());
        assert!(!session.go_home());
        assert!(!session.take_dirty());

        *session.clock_settings_open_mut() = true;
        assert_eq!(session.toggle_view(), View::Clock);
        assert!(!*session.clock_settings_open_mut());
        assert!(session.take_dirty());

        assert!(session.go_home());
        assert_eq!(session.prefs().view, View::Home);
        assert!(session.take_dirty());
    }

    #[test]
    fn empty_window_defers_the_mount() {
        let mut session = session(Preferences::default());
        session.toggle_snow();
        assert!(session.snow_frame(SurfaceSize::new(0, 0)).is_none());
        assert!(!session.overlay().is_mounted());

        let surface = session.snow_frame(SurfaceSize::new(800, 600));
        assert!(surface.is_some());
        let field = session.overlay().field().unwrap();
        let at_left_edge = field.particles().iter().filter(|p| p.pos.x < 1.0).count();
        assert!(at_left_edge < 5);
    }
}
