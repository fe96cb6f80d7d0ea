//! Premade body loading

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{DesktopError, DesktopResult};
use crate::premade::PremadeDef;

/// Fetches the body of a premade panel
pub trait PremadeLoader {
    /// Load the body text for `def`
    fn load(&self, def: &PremadeDef) -> DesktopResult<String>;
}

/// Loader serving bodies from memory, keyed by `file`
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    bodies: BTreeMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body under a file path
    pub fn insert(&mut self, file: impl Into<String>, body: impl Into<String>) {
        self.bodies.insert(file.into(), body.into());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, file: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(file, body);
        self
    }
}

impl PremadeLoader for MemoryLoader {
    fn load(&self, def: &PremadeDef) -> DesktopResult<String> {
        self.bodies
            .get(&def.file)
            .cloned()
            .ok_or_else(|| DesktopError::FetchFailed(format!("no content for {}", def.file)))
    }
}

/// Loader reading bodies from files below a root directory
#[derive(Clone, Debug)]
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `file` below the root, refusing absolute and `..` paths.
    fn resolve(&self, file: &str) -> Option<PathBuf> {
        let rel = Path::new(file);
        let plain = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        (plain && !file.is_empty()).then(|| self.root.join(rel))
    }
}

impl PremadeLoader for DirLoader {
    fn load(&self, def: &PremadeDef) -> DesktopResult<String> {
        let path = self
            .resolve(&def.file)
            .ok_or_else(|| DesktopError::FetchFailed(format!("invalid file path: {}", def.file)))?;
        debug!(premade_id = %def.id, path = %path.display(), "loading premade content");
        std::fs::read_to_string(&path)
            .map_err(|e| DesktopError::FetchFailed(format!("{}: {}", path.display(), e)))
    }
}
