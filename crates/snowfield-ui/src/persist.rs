use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use snowfield_core::{Preferences, PreferencesStore};
use tracing::{debug, warn};

pub enum PrefsCommand {
    Save(Preferences),
    Shutdown,
}

/// Background thread that owns the preferences store. The UI only sends.
pub struct PreferencesWriter {
    sender: Sender<PrefsCommand>,
    handle: Option<JoinHandle<()>>,
}

impl PreferencesWriter {
    pub fn spawn(store: PreferencesStore) -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded::<PrefsCommand>();
        let handle = std::thread::Builder::new()
            .name("prefs-writer".into())
            .spawn(move || run_writer(store, receiver));
        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!("failed to start preferences writer: {err}");
                None
            }
        };
        Self { sender, handle }
    }

    pub fn save(&self, prefs: Preferences) {
        if self.sender.send(PrefsCommand::Save(prefs)).is_err() {
            warn!("preferences writer is gone; change not persisted");
        }
    }
}

impl Drop for PreferencesWriter {
    fn drop(&mut self) {
        let _ = self.sender.send(PrefsCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("preferences writer panicked");
            }
        }
    }
}

fn run_writer(store: PreferencesStore, receiver: Receiver<PrefsCommand>) {
    while let Ok(command) = receiver.recv() {
        let mut latest = match command {
            PrefsCommand::Save(prefs) => prefs,
            PrefsCommand::Shutdown => break,
        };
        // Slider drags queue many updates; only the newest is written.
        let mut stop = false;
        for queued in receiver.try_iter() {
            match queued {
                PrefsCommand::Save(prefs) => latest = prefs,
                PrefsCommand::Shutdown => {
                    stop = true;
                    break;
                }
            }
        }
        match store.save(&latest) {
            Ok(()) => debug!("preferences written to {}", store.path().display()),
            Err(err) => warn!("failed to write preferences: {err}"),
        }
        if stop {
            break;
        }
    }
    debug!("preferences writer exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn latest_preferences_win() {
        let dir = std::env::temp_dir().join(format!("snowfield-writer-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("preferences.toml");

        let writer = PreferencesWriter::spawn(PreferencesStore::new(&path));
        for density in [10, 20, 30, 40] {
            writer.save(Preferences {
                snow_density: density,
                ..Preferences::default()
            });
        }
        drop(writer);

        let saved = PreferencesStore::new(&path).load().unwrap();
        assert_eq!(saved.snow_density, 40);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn idle_writer_shuts_down_without_writing() {
        let dir = std::env::temp_dir()
            .join(format!("snowfield-writer-idle-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("preferences.toml");

        drop(PreferencesWriter::spawn(PreferencesStore::new(&path)));

        assert!(!path.exists());
    }
}
