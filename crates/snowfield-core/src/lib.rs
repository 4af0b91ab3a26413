//! Snowfield core engine: platform-agnostic snow simulation, clock formatting
//! and persisted preferences.

pub mod clock;
pub mod color;
pub mod error;
pub mod field;
pub mod params;
pub mod prefs;

pub use clock::{ClockFormat, ClockReading, ClockZone};
pub use color::HexColor;
pub use error::PrefsError;
pub use field::{Particle, ParticleField};
pub use params::SnowParams;
pub use prefs::{
    FallingTextStyle, FontFamily, Preferences, PreferencesStore, Profile, SocialLink, Theme, View,
};
