//! Persisted landing-page preferences.
//!
//! Stored as TOML by default. JSON is accepted as well so settings exported
//! from the web build (camelCase keys) load without conversion.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::{ClockFormat, ClockZone};
use crate::color::HexColor;
use crate::error::PrefsError;
use crate::params::{SnowParams, DEFAULT_DENSITY, DEFAULT_SPEED};

/// Density values offered by the designer panel.
pub const DENSITY_RANGE: RangeInclusive<u32> = 0..=500;
/// Speed multipliers offered by the designer panel.
pub const SPEED_RANGE: RangeInclusive<f32> = 0.1..=5.0;
/// Opacity sliders, in percent.
pub const OPACITY_RANGE: RangeInclusive<u8> = 0..=100;

pub const DEFAULT_BUBBLE_COLOR: HexColor = HexColor::rgb(0x3b, 0x82, 0xf6);
pub const DEFAULT_HOLOGRAPHIC_COLOR: HexColor = HexColor::rgb(0xff, 0xff, 0xff);
pub const DEFAULT_BACKGROUND_COLOR: HexColor = HexColor::rgb(0x02, 0x06, 0x17);
pub const DEFAULT_CLOCK_COLOR: HexColor = HexColor::rgb(0xff, 0xff, 0xff);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Which page the window shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Clock,
}

impl View {
    pub fn toggled(self) -> Self {
        match self {
            View::Home => View::Clock,
            View::Clock => View::Home,
        }
    }
}

/// Look of the periodic falling hint text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallingTextStyle {
    #[default]
    #[serde(rename = "default")]
    Holographic,
    Matrix,
    Cyber,
    Outrun,
}

impl FallingTextStyle {
    pub const ALL: [FallingTextStyle; 4] = [
        FallingTextStyle::Holographic,
        FallingTextStyle::Matrix,
        FallingTextStyle::Cyber,
        FallingTextStyle::Outrun,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FallingTextStyle::Holographic => "Holographic",
            FallingTextStyle::Matrix => "Matrix",
            FallingTextStyle::Cyber => "Cyber",
            FallingTextStyle::Outrun => "Outrun",
        }
    }
}

/// Page font. Anything other than the two known names reads as `Inter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontFamily {
    #[default]
    Inter,
    ComicSans,
}

impl FontFamily {
    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Inter => "Inter",
            FontFamily::ComicSans => "Comic Sans MS",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FontFamily::Inter => "Default",
            FontFamily::ComicSans => "Comic Sans",
        }
    }
}

impl From<String> for FontFamily {
    fn from(value: String) -> Self {
        if value == FontFamily::ComicSans.name() {
            FontFamily::ComicSans
        } else {
            FontFamily::Inter
        }
    }
}

impl From<FontFamily> for String {
    fn from(family: FontFamily) -> Self {
        family.name().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub tagline: String,
    pub links: Vec<SocialLink>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Dylan".into(),
            tagline: "</3".into(),
            links: vec![SocialLink {
                label: "GitHub".into(),
                url: "https://github.com/aurates".into(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    #[serde(alias = "app_view")]
    pub view: View,
    #[serde(alias = "clockFormat")]
    pub clock_format: ClockFormat,
    #[serde(alias = "clock_show_date", alias = "showDate")]
    pub show_date: bool,
    #[serde(alias = "clock_timezone")]
    pub timezone: ClockZone,
    #[serde(alias = "snowDensity")]
    pub snow_density: u32,
    #[serde(alias = "snowSpeed")]
    pub snow_speed: f32,
    #[serde(alias = "bubbleColor")]
    pub bubble_color: HexColor,
    #[serde(alias = "bubbleOpacity")]
    pub bubble_opacity: u8,
    #[serde(alias = "bubblesPaused")]
    pub bubbles_paused: bool,
    #[serde(alias = "holographicColor")]
    pub holographic_color: HexColor,
    #[serde(alias = "holoOpacity")]
    pub holo_opacity: u8,
    #[serde(alias = "backgroundColor")]
    pub background_color: HexColor,
    #[serde(alias = "bgOpacity")]
    pub bg_opacity: u8,
    #[serde(alias = "clockColor")]
    pub clock_color: HexColor,
    #[serde(alias = "fallingTextStyle")]
    pub falling_text_style: FallingTextStyle,
    #[serde(alias = "fontFamily")]
    pub font_family: FontFamily,
    pub profile: Profile,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            view: View::default(),
            clock_format: ClockFormat::default(),
            show_date: false,
            timezone: ClockZone::default(),
            snow_density: DEFAULT_DENSITY,
            snow_speed: DEFAULT_SPEED,
            bubble_color: DEFAULT_BUBBLE_COLOR,
            bubble_opacity: *OPACITY_RANGE.end(),
            bubbles_paused: false,
            holographic_color: DEFAULT_HOLOGRAPHIC_COLOR,
            holo_opacity: *OPACITY_RANGE.end(),
            background_color: DEFAULT_BACKGROUND_COLOR,
            bg_opacity: *OPACITY_RANGE.end(),
            clock_color: DEFAULT_CLOCK_COLOR,
            falling_text_style: FallingTextStyle::default(),
            font_family: FontFamily::default(),
            profile: Profile::default(),
        }
    }
}

impl Preferences {
    /// Pulls every value back into the range the designer panel can produce.
    pub fn sanitized(mut self) -> Self {
        self.snow_density = self
            .snow_density
            .clamp(*DENSITY_RANGE.start(), *DENSITY_RANGE.end());
        self.snow_speed = if self.snow_speed.is_finite() {
            self.snow_speed
                .clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end())
        } else {
            DEFAULT_SPEED
        };
        for opacity in [
            &mut self.bubble_opacity,
            &mut self.holo_opacity,
            &mut self.bg_opacity,
        ] {
            *opacity = (*opacity).min(*OPACITY_RANGE.end());
        }
        self
    }

    pub fn snow_params(&self) -> SnowParams {
        SnowParams::new(self.snow_density, self.snow_speed)
    }

    /// Restores every designer setting (colors, opacities, bubbles, snow,
    /// hint style, font). Theme, view, clock settings and profile are kept.
    pub fn reset_designer(&mut self) {
        *self = Preferences {
            theme: self.theme,
            view: self.view,
            clock_format: self.clock_format,
            show_date: self.show_date,
            timezone: self.timezone,
            profile: std::mem::take(&mut self.profile),
            ..Preferences::default()
        };
    }

    /// Applies `theme` and reports whether snow has to stop (light theme).
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        self.theme = theme;
        !theme.is_dark()
    }

    pub fn from_toml_str(text: &str) -> Result<Self, PrefsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> Result<String, PrefsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, PrefsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self) -> Result<String, PrefsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

/// File-backed preferences. The format follows the file extension.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> Format {
        match self.path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Toml,
        }
    }

    /// Loads and sanitizes preferences. A missing file yields the defaults.
    pub fn load(&self) -> Result<Preferences, PrefsError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "no preferences at {}; using defaults",
                    self.path.display()
                );
                return Ok(Preferences::default());
            }
            Err(err) => return Err(PrefsError::io(&self.path, err)),
        };
        let prefs = match self.format() {
            Format::Toml => Preferences::from_toml_str(&text)?,
            Format::Json => Preferences::from_json_str(&text)?,
        };
        debug!("loaded preferences from {}", self.path.display());
        Ok(prefs.sanitized())
    }

    /// Writes to a sibling temp file first, then renames it over the target.
    pub fn save(&self, prefs: &Preferences) -> Result<(), PrefsError> {
        let text = match self.format() {
            Format::Toml => prefs.to_toml_string()?,
            Format::Json => prefs.to_json_string()?,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| PrefsError::io(parent, err))?;
            }
        }
        let mut tmp = OsString::from(self.path.as_os_str());
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, text).map_err(|err| PrefsError::io(&tmp, err))?;
        fs::rename(&tmp, &self.path).map_err(|err| PrefsError::io(&self.path, err))?;
        debug!("saved preferences to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "snowfield-prefs-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn defaults_match_designer_reset() {
        let prefs = Preferences::default();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.snow_density, 80);
        assert_eq!(prefs.snow_speed, 1.0);
        assert_eq!(prefs.snow_params(), SnowParams::default());
    }

    #[test]
    fn toml_round_trip() {
        let mut prefs = Preferences::default();
        prefs.theme = Theme::Light;
        prefs.view = View::Clock;
        prefs.clock_format = ClockFormat::WithSeconds;
        prefs.show_date = true;
        prefs.timezone = ClockZone::Utc(-5);
        prefs.snow_density = 250;
        prefs.snow_speed = 2.5;
        prefs.bubble_color = HexColor::rgb(10, 20, 30);
        prefs.bubbles_paused = true;
        prefs.bg_opacity = 40;
        prefs.falling_text_style = FallingTextStyle::Outrun;
        prefs.font_family = FontFamily::ComicSans;
        prefs.profile.links.push(SocialLink {
            label: "Blog".into(),
            url: "https://example.com".into(),
        });
        let text = prefs.to_toml_string().unwrap();
        assert!(text.contains("timezone = \"Etc/GMT+5\""));
        assert!(text.contains("clock_format = \"HH:mm:ss\""));
        assert!(text.contains("bubble_color = \"#0a141e\""));
        assert_eq!(Preferences::from_toml_str(&text).unwrap(), prefs);

        let json = prefs.to_json_string().unwrap();
        assert_eq!(Preferences::from_json_str(&json).unwrap(), prefs);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let prefs = Preferences::from_toml_str("snow_density = 12\n").unwrap();
        assert_eq!(prefs.snow_density, 12);
        assert_eq!(prefs.snow_speed, DEFAULT_SPEED);
        assert_eq!(prefs.profile, Profile::default());
    }

    #[test]
    fn web_cookie_json_loads() {
        let cookie = r##"{
            "bubbleColor": "#38bdf8",
            "bubbleOpacity": 70,
            "bubblesPaused": true,
            "clockColor": "#ffffff",
            "holographicColor": "#6b21a8",
            "holoOpacity": 90,
            "backgroundColor": "#0f172a",
            "bgOpacity": 80,
            "snowDensity": 320,
            "snowSpeed": 1.7,
            "fallingTextStyle": "matrix",
            "fontFamily": "Comic Sans MS"
        }"##;
        let prefs = Preferences::from_json_str(cookie).unwrap();
        assert_eq!(prefs.snow_density, 320);
        assert_eq!(prefs.snow_speed, 1.7);
        assert_eq!(prefs.bubble_color, HexColor::rgb(0x38, 0xbd, 0xf8));
        assert_eq!(prefs.bubble_opacity, 70);
        assert!(prefs.bubbles_paused);
        assert_eq!(prefs.holographic_color, HexColor::rgb(0x6b, 0x21, 0xa8));
        assert_eq!(prefs.holo_opacity, 90);
        assert_eq!(prefs.background_color, HexColor::rgb(0x0f, 0x17, 0x2a));
        assert_eq!(prefs.bg_opacity, 80);
        assert_eq!(prefs.falling_text_style, FallingTextStyle::Matrix);
        assert_eq!(prefs.font_family, FontFamily::ComicSans);
        assert_eq!(prefs.theme, Theme::Dark);
    }

    #[test]
    fn clock_cookies_load() {
        let cookies = r#"{
            "app_view": "clock",
            "clock_format": "HH:mm:ss",
            "clock_show_date": true,
            "clock_timezone": "Etc/GMT-9"
        }"#;
        let prefs = Preferences::from_json_str(cookies).unwrap();
        assert_eq!(prefs.view, View::Clock);
        assert_eq!(prefs.clock_format, ClockFormat::WithSeconds);
        assert!(prefs.show_date);
        assert_eq!(prefs.timezone, ClockZone::Utc(9));
    }

    #[test]
    fn unknown_font_falls_back_to_inter() {
        let prefs = Preferences::from_json_str(r#"{ "fontFamily": "Papyrus" }"#).unwrap();
        assert_eq!(prefs.font_family, FontFamily::Inter);
    }

    #[test]
    fn bad_color_is_an_error() {
        let err = Preferences::from_toml_str("bubble_color = \"blue\"\n").unwrap_err();
        assert!(matches!(err, PrefsError::Toml(_)));
    }

    #[test]
    fn sanitize_clamps_out_of_range_values() {
        let prefs = Preferences {
            snow_density: 9_000,
            snow_speed: 40.0,
            ..Preferences::default()
        }
        .sanitized();
        assert_eq!(prefs.snow_density, 500);
        assert_eq!(prefs.snow_speed, 5.0);

        let prefs = Preferences {
            snow_speed: f32::NAN,
            ..Preferences::default()
        }
        .sanitized();
        assert_eq!(prefs.snow_speed, DEFAULT_SPEED);

        let prefs = Preferences {
            snow_speed: 0.0,
            bubble_opacity: 250,
            holo_opacity: 101,
            bg_opacity: 60,
            ..Preferences::default()
        }
        .sanitized();
        assert_eq!(prefs.snow_speed, 0.1);
        assert_eq!(prefs.bubble_opacity, 100);
        assert_eq!(prefs.holo_opacity, 100);
        assert_eq!(prefs.bg_opacity, 60);
    }

    #[test]
    fn light_theme_stops_snow() {
        let mut prefs = Preferences::default();
        assert!(prefs.set_theme(Theme::Light));
        assert_eq!(prefs.theme, Theme::Light);
        assert!(!prefs.set_theme(Theme::Dark));
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn designer_reset_keeps_theme_clock_and_profile() {
        let mut prefs = Preferences {
            theme: Theme::Light,
            view: View::Clock,
            timezone: ClockZone::Utc(3),
            snow_density: 5,
            snow_speed: 4.0,
            bubble_color: HexColor::rgb(1, 2, 3),
            bubbles_paused: true,
            holo_opacity: 10,
            background_color: HexColor::rgb(200, 0, 0),
            font_family: FontFamily::ComicSans,
            falling_text_style: FallingTextStyle::Cyber,
            ..Preferences::default()
        };
        prefs.profile.name = "Someone".into();
        prefs.reset_designer();

        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.view, View::Clock);
        assert_eq!(prefs.timezone, ClockZone::Utc(3));
        assert_eq!(prefs.profile.name, "Someone");
        assert_eq!(prefs.snow_density, DEFAULT_DENSITY);
        assert_eq!(prefs.snow_speed, DEFAULT_SPEED);
        assert_eq!(prefs.bubble_color, DEFAULT_BUBBLE_COLOR);
        assert!(!prefs.bubbles_paused);
        assert_eq!(prefs.holo_opacity, 100);
        assert_eq!(prefs.background_color, DEFAULT_BACKGROUND_COLOR);
        assert_eq!(prefs.font_family, FontFamily::Inter);
        assert_eq!(prefs.falling_text_style, FallingTextStyle::Holographic);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = scratch_dir("missing");
        let store = PreferencesStore::new(dir.join("preferences.toml"));
        assert_eq!(store.load().unwrap(), Preferences::default());
    }

    #[test]
    fn store_round_trips_both_formats() {
        let dir = scratch_dir("roundtrip");
        let prefs = Preferences {
            snow_density: 123,
            snow_speed: 0.5,
            ..Preferences::default()
        };
        for file in ["nested/preferences.toml", "preferences.json"] {
            let store = PreferencesStore::new(dir.join(file));
            store.save(&prefs).unwrap();
            assert_eq!(store.load().unwrap(), prefs);
        }
        let json = fs::read_to_string(dir.join("preferences.json")).unwrap();
        assert!(json.trim_start().starts_with('{'));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_sanitizes_file_contents() {
        let dir = scratch_dir("sanitize");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("preferences.toml");
        fs::write(&path, "snow_density = 100000\nsnow_speed = 0.01\n").unwrap();
        let prefs = PreferencesStore::new(&path).load().unwrap();
        assert_eq!(prefs.snow_density, 500);
        assert_eq!(prefs.snow_speed, 0.1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = scratch_dir("malformed");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("preferences.json");
        fs::write(&path, "{ not json").unwrap();
        let err = PreferencesStore::new(&path).load().unwrap_err();
        assert!(matches!(err, PrefsError::Json(_)));
        let _ = fs::remove_dir_all(&dir);
    }
}
