//! In-memory data store for the storefront.
//!
//! # Collections
//!
//! - `users` - Registered accounts, indexed by ID and by case-folded email
//! - `products` - Vendor product listings, kept in insertion order
//!
//! Each collection sits behind its own `RwLock`. Every mutation runs under
//! the collection's write lock, so ID assignment and check-then-insert
//! sequences are atomic with respect to concurrent requests.
//!
//! # Snapshots
//!
//! A [`Database`] opened with a [`SnapshotFile`] loads its contents from
//! that file and rewrites it after every mutation. Without one, data lives
//! only as long as the process.

pub mod products;
pub mod seed;
pub mod snapshot;
pub mod users;

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

use marketboard_core::UserId;

use crate::models::{Product, User};
pub use products::ProductRepository;
pub use snapshot::{Snapshot, SnapshotFile};
pub use users::UserRepository;

/// Errors returned by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint would be violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Reading or writing the snapshot file failed.
    #[error("snapshot I/O failed: {0}")]
    Persistence(#[from] std::io::Error),

    /// The snapshot could not be encoded or decoded.
    #[error("snapshot encoding failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data violates an invariant.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

#[derive(Debug, Default)]
pub(crate) struct UserTable {
    pub(crate) by_id: HashMap<UserId, User>,
    /// Case-folded email -> user ID.
    pub(crate) by_email: HashMap<String, UserId>,
}

impl UserTable {
    fn from_users(users: Vec<User>) -> Result<Self, RepositoryError> {
        let mut table = Self::default();
        for user in users {
            let key = user.email.lookup_key();
            if table.by_email.insert(key, user.id).is_some() {
                return Err(RepositoryError::DataCorruption(format!(
                    "duplicate email in snapshot: {}",
                    user.email
                )));
            }
            table.by_id.insert(user.id, user);
        }
        Ok(table)
    }
}

/// The storefront's data store.
///
/// Constructed once at startup and shared through application state.
/// Access the collections through [`UserRepository`] and
/// [`ProductRepository`].
#[derive(Debug)]
pub struct Database {
    pub(crate) users: RwLock<UserTable>,
    pub(crate) products: RwLock<Vec<Product>>,
    snapshot: Option<SnapshotFile>,
    /// Serializes snapshot writes so the newest state always lands last.
    snapshot_lock: Mutex<()>,
}

impl Database {
    /// Create an empty, memory-only store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            users: RwLock::new(UserTable::default()),
            products: RwLock::new(Vec::new()),
            snapshot: None,
            snapshot_lock: Mutex::new(()),
        }
    }

    /// Open a store backed by a snapshot file.
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first mutation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the file exists but cannot be read or
    /// decoded, or if it holds two accounts with the same email.
    pub async fn open(snapshot: SnapshotFile) -> Result<Self, RepositoryError> {
        let loaded = snapshot.load().await?.unwrap_or_default();
        let users = UserTable::from_users(loaded.users)?;

        tracing::info!(
            path = %snapshot.path().display(),
            users = users.by_id.len(),
            products = loaded.products.len(),
            "Loaded store snapshot"
        );

        Ok(Self {
            users: RwLock::new(users),
            products: RwLock::new(loaded.products),
            snapshot: Some(snapshot),
            snapshot_lock: Mutex::new(()),
        })
    }

    /// Repository for user accounts.
    #[must_use]
    pub const fn users(&self) -> UserRepository<'_> {
        UserRepository::new(self)
    }

    /// Repository for products.
    #[must_use]
    pub const fn products(&self) -> ProductRepository<'_> {
        ProductRepository::new(self)
    }

    /// Write the current state to the snapshot file, if there is one.
    pub(crate) async fn persist(&self) -> Result<(), RepositoryError> {
        let Some(file) = &self.snapshot else {
            return Ok(());
        };

        let _guard = self.snapshot_lock.lock().await;

        let mut users: Vec<User> = self.users.read().await.by_id.values().cloned().collect();
        users.sort_by_key(|user| user.created_at);
        let products = self.products.read().await.clone();

        file.save(&Snapshot::new(users, products)).await
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::in_memory()
    }
}
