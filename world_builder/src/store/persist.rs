//! Durable local state: the full object list as one JSON file.
//!
//! `JsonFileStore` subscribes to the store and rewrites the file after every
//! mutation — synchronous, no batching. A failed write is logged and
//! otherwise unhandled; the next mutation tries again.

use std::fs;
use std::path::{Path, PathBuf};

use crate::store::object::SceneObject;
use crate::store::store::{StoreEvent, StoreObserver};

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, objects: &[SceneObject]) {
        let json = match serde_json::to_string_pretty(objects) {
            Ok(json) => json,
            Err(err) => {
                eprintln!("genesis: failed to serialize scene: {err}");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).ok();
        }
        if let Err(err) = fs::write(&self.path, json) {
            eprintln!(
                "genesis: failed to persist scene to {}: {err}",
                self.path.display()
            );
        }
    }
}

impl StoreObserver for JsonFileStore {
    fn on_change(&mut self, _event: &StoreEvent, objects: &[SceneObject]) {
        self.write(objects);
    }
}

/// Reloads the persisted object list verbatim. A missing file is a fresh
/// scene; a corrupt file is logged and treated as empty.
pub fn load_objects(path: &Path) -> Vec<SceneObject> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&json) {
        Ok(objects) => objects,
        Err(err) => {
            eprintln!(
                "genesis: ignoring corrupt scene file {}: {err}",
                path.display()
            );
            Vec::new()
        }
    }
}
