use std::path::PathBuf;

use snowfield_core::{Preferences, PreferencesStore};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const PREFS_ENV: &str = "SNOWFIELD_PREFS";

fn main() {
    // Init logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Snowfield starting");
    let store = PreferencesStore::new(preferences_path());
    let preferences = match store.load() {
        Ok(preferences) => preferences,
        Err(e) => {
            warn!("ignoring unreadable preferences: {e}");
            Preferences::default()
        }
    };

    if let Err(e) = snowfield_ui::run(preferences, store) {
        eprintln!("Snowfield error: {e}");
        std::process::exit(1);
    }
}

fn preferences_path() -> PathBuf {
    if let Some(path) = env_path(PREFS_ENV) {
        return path;
    }
    config_dir().join("snowfield").join("preferences.toml")
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name).map(PathBuf::from)
}

cfg_if::cfg_if! {
    if #[cfg(target_os = "windows")] {
        fn config_dir() -> PathBuf {
            env_path("APPDATA").unwrap_or_else(|| PathBuf::from("."))
        }
    } else if #[cfg(target_os = "macos")] {
        fn config_dir() -> PathBuf {
            env_path("HOME")
                .map(|home| home.join("Library").join("Application Support"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
    } else {
        fn config_dir() -> PathBuf {
            env_path("XDG_CONFIG_HOME")
                .or_else(|| env_path("HOME").map(|home| home.join(".config")))
                .unwrap_or_else(|| PathBuf::from("."))
        }
    }
}
