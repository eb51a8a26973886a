//! Sink boundary: idempotent materialization of containers and items.
//!
//! The pipeline never deletes or overwrites sink entities. Repeated runs are
//! additive only, so both operations must return the existing entity when
//! called with the same arguments again.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::VarmapResult;

/// Opaque identifier of a container in the sink.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque identifier of a leaf item in the sink.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// External system that materializes variant containers and items.
///
/// Called sequentially from a single thread; no locking discipline required
/// of implementations.
pub trait VariantSink {
    /// Root container under which everything is created.
    fn root(&self) -> ContainerId;

    /// Return the container with this name under `parent`, creating it if
    /// absent. Calling twice with identical arguments must return the same
    /// identifier without creating a duplicate.
    fn ensure_container(&mut self, parent: &ContainerId, name: &str) -> VarmapResult<ContainerId>;

    /// Same idempotency contract for a leaf item within a container.
    fn ensure_item(&mut self, container: &ContainerId, name: &str) -> VarmapResult<ItemId>;
}

/// In-memory sink, used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    root: String,
    containers: Vec<String>,
    items: Vec<String>,
}

impl MemorySink {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            containers: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Container identifiers in creation order.
    pub fn containers(&self) -> &[String] {
        &self.containers
    }

    /// Item identifiers in creation order.
    pub fn items(&self) -> &[String] {
        &self.items
    }
}

impl VariantSink for MemorySink {
    fn root(&self) -> ContainerId {
        ContainerId::new(self.root.clone())
    }

    fn ensure_container(&mut self, parent: &ContainerId, name: &str) -> VarmapResult<ContainerId> {
        let id = format!("{}/{}", parent.as_str(), name);
        if !self.containers.contains(&id) {
            self.containers.push(id.clone());
        }
        Ok(ContainerId(id))
    }

    fn ensure_item(&mut self, container: &ContainerId, name: &str) -> VarmapResult<ItemId> {
        let id = format!("{}/{}", container.as_str(), name);
        if !self.items.contains(&id) {
            self.items.push(id.clone());
        }
        Ok(ItemId(id))
    }
}

/// Filesystem-backed sink: containers are directories, items marker files.
#[derive(Debug)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl VariantSink for DirSink {
    fn root(&self) -> ContainerId {
        ContainerId::new(self.root.to_string_lossy().into_owned())
    }

    fn ensure_container(&mut self, parent: &ContainerId, name: &str) -> VarmapResult<ContainerId> {
        let path = Path::new(parent.as_str()).join(name);
        if !path.is_dir() {
            debug!("creating container: {}", path.display());
            fs::create_dir_all(&path)?;
        }
        Ok(ContainerId::new(path.to_string_lossy().into_owned()))
    }

    fn ensure_item(&mut self, container: &ContainerId, name: &str) -> VarmapResult<ItemId> {
        let path = Path::new(container.as_str()).join(name);
        if !path.is_file() {
            debug!("creating item: {}", path.display());
        }
        // create(true) without truncate: existing content is left untouched.
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        Ok(ItemId::new(path.to_string_lossy().into_owned()))
    }
}
