//! Persistent identity storage.
//!
//! Two scalar values survive process restarts: the display name and the
//! session id. They are read once at startup and written whenever the
//! server issues a session (`connected`). The store is injected so the
//! runtime never touches the filesystem directly.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use palaver_client::Identity;
use thiserror::Error;

/// Identity storage errors.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stored file is not valid identity data.
    #[error("malformed identity file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The identity could not be encoded.
    #[error("failed to encode identity: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Persistent key-value storage for the client identity.
pub trait IdentityStore {
    /// Read the stored identity. `Ok(None)` when nothing is stored yet.
    fn load(&self) -> Result<Option<Identity>, IdentityError>;

    /// Write the identity, replacing any previous value.
    fn store(&self, identity: &Identity) -> Result<(), IdentityError>;
}

/// Identity store backed by a TOML file.
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    /// Store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform data directory, falling back to the working
    /// directory when none is available.
    pub fn default_location() -> Self {
        let path = dirs::data_dir()
            .map_or_else(|| PathBuf::from("palaver-identity.toml"), |dir| {
                dir.join("palaver").join("identity.toml")
            });
        Self::new(path)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self) -> Result<Option<Identity>, IdentityError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(toml::from_str(&raw)?))
    }

    fn store(&self, identity: &Identity) -> Result<(), IdentityError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(identity)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// In-memory identity store for tests and ephemeral sessions.
///
/// Clones share the same backing slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityStore {
    slot: Arc<Mutex<Option<Identity>>>,
}

impl MemoryIdentityStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> Result<Option<Identity>, IdentityError> {
        let slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(slot.clone())
    }

    fn store(&self, identity: &Identity) -> Result<(), IdentityError> {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(identity.clone());
        Ok(())
    }
}
