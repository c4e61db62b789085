//! Session registry: at most one live scene per session key.
//!
//! The key map sits behind one lock, so create/destroy/lookup is
//! check-then-act. Each scene has its own lock. Operations on different
//! keys never wait on each other beyond the map lookup.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::scene::Scene;

/// Shared, lockable handle to a live scene.
pub type SceneHandle = Arc<Mutex<Scene>>;

/// Lock a scene handle.
///
/// Scene operations validate before they mutate, so a scene behind a
/// poisoned lock is still consistent and is recovered.
pub fn lock_scene(handle: &SceneHandle) -> MutexGuard<'_, Scene> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-scoped map from session key (a room name) to its scene.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    scenes: Mutex<HashMap<String, SceneHandle>>,
}

impl SceneRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new empty scene under `key`.
    pub fn start_session(&self, key: &str) -> TrackerResult<SceneHandle> {
        let mut scenes = self.map();
        match scenes.entry(key.to_string()) {
            Entry::Occupied(_) => Err(TrackerError::SessionExists(key.to_string())),
            Entry::Vacant(slot) => {
                let handle = Arc::new(Mutex::new(Scene::new(key)));
                slot.insert(Arc::clone(&handle));
                info!(session = key, "scene started");
                Ok(handle)
            }
        }
    }

    /// End the scene under `key`, returning its handle.
    pub fn end_session(&self, key: &str) -> TrackerResult<SceneHandle> {
        let handle = self
            .map()
            .remove(key)
            .ok_or_else(|| TrackerError::NoSession(key.to_string()))?;
        info!(session = key, "scene ended");
        Ok(handle)
    }

    /// Look up the scene under `key`.
    pub fn get(&self, key: &str) -> TrackerResult<SceneHandle> {
        self.map()
            .get(key)
            .cloned()
            .ok_or_else(|| TrackerError::NoSession(key.to_string()))
    }

    /// Run `f` against the locked scene under `key`.
    ///
    /// Calls for the same key are serialized by the scene lock.
    pub fn with_scene<T>(
        &self,
        key: &str,
        f: impl FnOnce(&mut Scene) -> TrackerResult<T>,
    ) -> TrackerResult<T> {
        let handle = self.get(key)?;
        let mut scene = lock_scene(&handle);
        f(&mut scene)
    }

    /// Whether a scene is running under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.map().contains_key(key)
    }

    /// Keys with a live scene, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.map().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of live scenes.
    pub fn len(&self) -> usize {
        self.map().len()
    }

    /// Returns true if no scene is running.
    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }

    fn map(&self) -> MutexGuard<'_, HashMap<String, SceneHandle>> {
        self.scenes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
