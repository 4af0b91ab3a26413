//! eframe host for the landing page, the clock page and the snow overlay.

use std::time::Instant;

use snowfield_core::{FontFamily, Preferences, PreferencesStore, Theme, View};
use snowfield_overlay::PixelSurface;
use snowfield_platform::SurfaceSize;
use tracing::info;

pub mod bubbles;
pub mod clock;
pub mod designer;
pub mod fonts;
pub mod hint;
pub mod host;
pub mod persist;
pub mod scheduler;

use crate::bubbles::BubbleField;
use crate::designer::designer_panel;
use crate::hint::HintSchedule;
use crate::host::Session;
use crate::persist::PreferencesWriter;
use crate::scheduler::EguiFrameScheduler;

const LIGHT_BACKGROUND: egui::Color32 = egui::Color32::WHITE;
const DARK_ACCENT: egui::Color32 = egui::Color32::from_rgb(96, 165, 250);
const LIGHT_ACCENT: egui::Color32 = egui::Color32::from_rgb(186, 230, 253);
const DARK_FOOTER: egui::Color32 = egui::Color32::from_rgb(100, 116, 139);
const LIGHT_FOOTER: egui::Color32 = egui::Color32::from_rgb(148, 163, 184);

/// Opens the landing window and blocks until it is closed.
pub fn run(preferences: Preferences, store: PreferencesStore) -> eframe::Result<()> {
    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = egui::ViewportBuilder::default()
        .with_title("Snowfield")
        .with_inner_size([960.0, 640.0]);
    eframe::run_native(
        "Snowfield",
        native_options,
        Box::new(move |creation_context| {
            Ok(Box::new(LandingApp::new(
                &creation_context.egui_ctx,
                preferences,
                store,
            )))
        }),
    )
}

pub struct LandingApp {
    session: Session<EguiFrameScheduler>,
    writer: PreferencesWriter,
    snow_texture: Option<egui::TextureHandle>,
    bubbles: BubbleField,
    hints: HintSchedule,
    started: Instant,
    font: FontFamily,
}

impl LandingApp {
    pub fn new(context: &egui::Context, prefs: Preferences, store: PreferencesStore) -> Self {
        apply_theme(context, prefs.theme);
        let font = fonts::apply_font(context, prefs.font_family);
        info!(
            "landing page ready (theme {:?}, {:?} view, preferences at {})",
            prefs.theme,
            prefs.view,
            store.path().display()
        );
        let now = Instant::now();
        Self {
            session: Session::new(prefs, EguiFrameScheduler::new(context.clone())),
            writer: PreferencesWriter::spawn(store),
            snow_texture: None,
            bubbles: BubbleField::new(),
            hints: HintSchedule::new(now),
            started: now,
            font,
        }
    }

    fn page(&mut self, context: &egui::Context, now: Instant) {
        let prefs = self.session.prefs();
        let fill = page_background(prefs);
        self.bubbles.tick(now, prefs.bubbles_paused);
        let hint = self.hints.poll(now);

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(fill))
            .show(context, |ui| {
                let rect = ui.max_rect();
                let prefs = self.session.prefs();
                self.bubbles.paint(
                    ui.painter(),
                    rect,
                    prefs.theme,
                    prefs.bubble_color,
                    prefs.bubble_opacity,
                );
                match prefs.view {
                    View::Home => {
                        if let Some(progress) = hint {
                            let seconds = now.duration_since(self.started).as_secs_f32();
                            let color = hint::hint_color(
                                prefs.falling_text_style,
                                prefs.holographic_color,
                                prefs.holo_opacity,
                                seconds,
                            );
                            hint::paint_hint(ui.painter(), rect, progress, color);
                        }
                        self.home_page(ui, now);
                    }
                    View::Clock => clock::clock_page(ui, prefs, chrono::Utc::now()),
                }
                footer(ui, self.session.prefs());
            });
    }

    fn home_page(&mut self, ui: &mut egui::Ui, now: Instant) {
        let prefs = self.session.prefs();
        let dark = prefs.theme.is_dark();
        let accent = if dark { DARK_ACCENT } else { LIGHT_ACCENT };
        let name = egui::RichText::new(&prefs.profile.name).size(96.0).strong();
        let tagline = egui::RichText::new(&prefs.profile.tagline)
            .size(40.0)
            .strong()
            .color(accent);
        let links = prefs.profile.links.clone();

        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.25);
            let heading = ui.add(egui::Label::new(name).sense(egui::Sense::click()));
            if heading.clicked() {
                self.session.heading_clicked(now);
            }
            ui.add_space(24.0);
            ui.label(tagline);
            ui.add_space(32.0);
            for link in &links {
                ui.hyperlink_to(link.label.as_str(), &link.url);
            }
        });
    }

    fn controls(&mut self, context: &egui::Context) {
        let mut toggle_theme = false;
        let mut toggle_view = false;
        egui::Area::new(egui::Id::new("snowfield-controls"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-24.0, -24.0])
            .show(context, |ui| {
                ui.horizontal(|ui| {
                    let prefs = self.session.prefs();
                    let view_label = match prefs.view {
                        View::Home => "Clock",
                        View::Clock => "Home",
                    };
                    toggle_view = ui.button(view_label).clicked();
                    if prefs.view == View::Clock && ui.button("Clock settings").clicked() {
                        let open = self.session.clock_settings_open_mut();
                        *open = !*open;
                    }
                    // Snow is only offered on the dark theme.
                    if self.session.prefs().theme.is_dark()
                        && ui.selectable_label(self.session.snowing(), "Snow").clicked()
                    {
                        self.session.toggle_snow();
                    }
                    let label = match self.session.prefs().theme {
                        Theme::Dark => "Light",
                        Theme::Light => "Dark",
                    };
                    toggle_theme = ui.button(label).clicked();
                });
            });
        if toggle_view {
            self.session.toggle_view();
        }
        if toggle_theme {
            apply_theme(context, self.session.toggle_theme());
        }
        if context.input(|input| input.key_pressed(egui::Key::Escape)) {
            self.session.go_home();
        }
    }

    fn panels(&mut self, context: &egui::Context) {
        if self.session.prefs().view == View::Clock {
            let mut open = *self.session.clock_settings_open_mut();
            if clock::clock_settings(context, self.session.prefs_mut(), &mut open) {
                self.session.mark_dirty();
            }
            *self.session.clock_settings_open_mut() = open;
        }
        if self.session.designer_open() {
            let outcome = designer_panel(context, self.session.prefs_mut());
            self.session.designer_changed(outcome);
            let wanted = self.session.prefs().font_family;
            if outcome.changed && wanted != self.font {
                self.font = fonts::apply_font(context, wanted);
            }
        }
    }

    /// One display refresh of the snow overlay.
    fn snow(&mut self, context: &egui::Context) {
        let screen = context.screen_rect();
        let scale = context.pixels_per_point();
        let size = SurfaceSize::new(
            (screen.width() * scale).round() as u32,
            (screen.height() * scale).round() as u32,
        );
        match self.session.snow_frame(size) {
            Some(surface) => paint_snow(context, surface, &mut self.snow_texture, screen),
            None => self.snow_texture = None,
        }
    }

    /// Keeps the clock ticking each second and the animations moving. With
    /// the bubbles paused the home page only wakes for the next hint.
    fn schedule_repaint(&self, context: &egui::Context, now: Instant) {
        let prefs = self.session.prefs();
        if prefs.view == View::Clock {
            context.request_repaint_after(clock::until_next_second(chrono::Utc::now()));
        }
        if !prefs.bubbles_paused {
            context.request_repaint();
        } else if prefs.view == View::Home {
            context.request_repaint_after(self.hints.next_wake(now));
        }
    }
}

impl eframe::App for LandingApp {
    fn update(&mut self, context: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.page(context, now);
        self.snow(context);
        self.controls(context);
        self.panels(context);
        if self.session.take_dirty() {
            self.writer.save(self.session.prefs().clone());
        }
        self.schedule_repaint(context, now);
    }
}

fn apply_theme(context: &egui::Context, theme: Theme) {
    context.set_visuals(match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    });
}

/// Dark pages use the designer background color, faded toward black by its
/// opacity. Light pages stay white.
fn page_background(prefs: &Preferences) -> egui::Color32 {
    match prefs.theme {
        Theme::Dark => {
            let [r, g, b] = prefs.background_color.0;
            let opacity = f32::from(prefs.bg_opacity.min(100)) / 100.0;
            egui::Color32::BLACK.lerp_to_gamma(egui::Color32::from_rgb(r, g, b), opacity)
        }
        Theme::Light => LIGHT_BACKGROUND,
    }
}

fn footer(ui: &mut egui::Ui, prefs: &Preferences) {
    let color = if prefs.theme.is_dark() {
        DARK_FOOTER
    } else {
        LIGHT_FOOTER
    };
    let rect = ui.max_rect();
    ui.painter().text(
        egui::pos2(rect.center().x, rect.bottom() - 32.0),
        egui::Align2::CENTER_BOTTOM,
        format!("2026 ❤ {}", prefs.profile.name),
        egui::FontId::proportional(18.0),
        color,
    );
}

/// Uploads the overlay pixels and paints them on the background layer. The
/// page content is already there, so flakes land above it and below windows.
fn paint_snow(
    context: &egui::Context,
    surface: &PixelSurface,
    texture: &mut Option<egui::TextureHandle>,
    screen: egui::Rect,
) {
    use snowfield_platform::Surface;

    let size = surface.size();
    let image = egui::ColorImage::from_rgba_premultiplied(
        [size.width as usize, size.height as usize],
        surface.as_bytes(),
    );
    match texture {
        Some(handle) => handle.set(image, egui::TextureOptions::LINEAR),
        None => {
            *texture = Some(context.load_texture(
                "snowfield-overlay",
                image,
                egui::TextureOptions::LINEAR,
            ))
        }
    }
    let Some(texture) = texture.as_ref() else {
        return;
    };
    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    context
        .layer_painter(egui::LayerId::background())
        .image(texture.id(), screen, uv, egui::Color32::WHITE);
}
