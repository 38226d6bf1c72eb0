//! Client-held session state.
//!
//! The credential is the only shared mutable resource in the client: it is
//! read before every call and may be cleared by any call that observes an
//! expiry response. Writes are single-field replace/clear operations, so
//! last-write-wins is acceptable and no further discipline is imposed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use deportes_elite_core::{AuthToken, Order};
use thiserror::Error;

/// Errors from the persistent stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store i/o error: {0}")]
    Io(#[from] io::Error),

    /// The stored record could not be decoded.
    #[error("stored record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The in-process lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Where the session credential lives.
///
/// Implementations must tolerate concurrent replace/clear calls; the
/// gateway performs no coordination beyond reading before each request.
pub trait CredentialStore: Send + Sync {
    /// Read the current credential, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing store cannot be read.
    fn load(&self) -> Result<Option<AuthToken>, StoreError>;

    /// Replace the credential.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing store cannot be written.
    fn store(&self, token: &AuthToken) -> Result<(), StoreError>;

    /// Delete the credential (logout, or expiry observed by the gateway).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing store cannot be written.
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-process credential store, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<AuthToken>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<AuthToken>, StoreError> {
        Ok(self
            .token
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .clone())
    }

    fn store(&self, token: &AuthToken) -> Result<(), StoreError> {
        *self.token.write().map_err(|_| StoreError::Poisoned)? = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.token.write().map_err(|_| StoreError::Poisoned)? = None;
        Ok(())
    }
}

/// Credential persisted as a single token string in a file.
///
/// This is the analog of the browser's `localStorage["authToken"]` slot:
/// it survives process restarts until explicit logout or observed expiry.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<AuthToken>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(AuthToken::new(token)))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, token: &AuthToken) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token.expose())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Transient slot for the order created by checkout, consumed once by the
/// confirmation view.
///
/// The analog of `sessionStorage["lastOrder"]`: the record is written after
/// a successful checkout and deleted when read, preserving the original's
/// avoid-a-second-round-trip handoff and its delete-on-unload cleanup.
#[derive(Debug, Clone)]
pub struct LastOrderStore {
    path: PathBuf,
}

impl LastOrderStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Save the created order for the confirmation view.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the record cannot be written.
    pub fn save(&self, order: &Order) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec(order)?)?;
        Ok(())
    }

    /// Take the stored order, removing it.
    ///
    /// The slot is cleared even if the stored record fails to decode.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the record cannot be read or decoded.
    pub fn take(&self) -> Result<Option<Order>, StoreError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let removed = fs::remove_file(&self.path);
        let order = serde_json::from_slice::<Order>(&contents)?;
        removed?;
        Ok(Some(order))
    }
}
