//! Directory lookup seam
//!
//! The console reads user entries from an external identity store. The
//! [`DirectoryLookup`] trait is the boundary the page logic depends on;
//! [`MemoryDirectory`] is the in-process implementation used by tests and
//! local development.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{AccountConsoleError, Result};
use crate::record::{attrs, UserRecord};

#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// Fetch the record for a login name, `None` when no entry matches.
    async fn find_by_uid(&self, uid: &str) -> Result<Option<UserRecord>>;
}

/// In-memory directory keyed by `uid`.
///
/// Backs tests and local development; a deployment wires its real directory
/// client behind [`DirectoryLookup`] instead.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    records: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record stored under its `uid`.
    pub async fn insert(&self, record: UserRecord) -> Result<()> {
        let uid = record
            .uid()
            .ok_or_else(|| AccountConsoleError::MissingAttribute(attrs::UID.to_string()))?
            .to_string();
        self.records.write().await.insert(uid, record);
        Ok(())
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl DirectoryLookup for MemoryDirectory {
    async fn find_by_uid(&self, uid: &str) -> Result<Option<UserRecord>> {
        let records = self.records.read().await;
        let record = records.get(uid).cloned();
        tracing::debug!(uid = %uid, found = record.is_some(), "directory lookup");
        Ok(record)
    }
}
