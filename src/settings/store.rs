//! Settings store seam
//!
//! The real store (GSettings, a config file watcher, a preferences UI) lives
//! outside this crate. The engine only needs typed reads, a way to notice
//! that something changed, and a full snapshot to diff against.

use super::schema::{SettingValue, Settings, SettingsKey};
use super::SettingsResult;
use parking_lot::Mutex as ParkingMutex;
use std::sync::Arc;

/// Key-value settings store with change notification by generation counter.
pub trait SettingsStore {
    fn get(&self, key: SettingsKey) -> SettingValue;

    fn set(&self, key: SettingsKey, value: SettingValue) -> SettingsResult<()>;

    /// Bumped on every successful write. The engine polls it each tick.
    fn generation(&self) -> u64;

    fn snapshot(&self) -> Settings;
}

struct StoreInner {
    settings: Settings,
    generation: u64,
}

/// In-memory store. Cloning shares the same underlying values, so one clone
/// can live in a preferences UI thread while the engine polls another.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<ParkingMutex<StoreInner>>,
}

impl MemoryStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(ParkingMutex::new(StoreInner {
                settings,
                generation: 0,
            })),
        }
    }

    /// Replace every value at once (preset import, file reload).
    pub fn replace(&self, settings: Settings) {
        let mut inner = self.inner.lock();
        if inner.settings != settings {
            inner.settings = settings;
            inner.generation += 1;
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: SettingsKey) -> SettingValue {
        self.inner.lock().settings.get(key)
    }

    fn set(&self, key: SettingsKey, value: SettingValue) -> SettingsResult<()> {
        let mut inner = self.inner.lock();
        if inner.settings.get(key) == value {
            return Ok(());
        }
        inner.settings.set(key, value)?;
        inner.generation += 1;
        tracing::trace!("Setting {} changed (generation {})", key, inner.generation);
        Ok(())
    }

    fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    fn snapshot(&self) -> Settings {
        self.inner.lock().settings.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_bumps_only_on_change() {
        let store = MemoryStore::default();
        assert_eq!(store.generation(), 0);

        store.set(SettingsKey::Glow, SettingValue::Bool(true)).unwrap();
        assert_eq!(store.generation(), 1);

        store.set(SettingsKey::Glow, SettingValue::Bool(true)).unwrap();
        assert_eq!(store.generation(), 1);

        assert!(store.set(SettingsKey::Glow, SettingValue::Int(3)).is_err());
        assert_eq!(store.generation(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::default();
        let ui_handle = store.clone();

        ui_handle.set(SettingsKey::Size, SettingValue::Int(150)).unwrap();

        assert_eq!(store.get(SettingsKey::Size), SettingValue::Int(150));
        assert_eq!(store.snapshot().size, 150);
    }

    #[test]
    fn test_replace() {
        let store = MemoryStore::default();
        store.replace(Settings::default());
        assert_eq!(store.generation(), 0);

        store.replace(Settings {
            auto_hide: true,
            ..Settings::default()
        });
        assert_eq!(store.generation(), 1);
        assert!(store.snapshot().auto_hide);
    }
}
