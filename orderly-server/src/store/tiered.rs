//! Two-tier store composition
//!
//! When a remote backend is configured it is authoritative; the local file
//! is a last-resort read fallback and a backup write target. Policy per
//! operation:
//!
//! - read failure of the primary → warn, read the secondary
//! - write failure of the primary → best-effort same write to the
//!   secondary, then re-signal the original error
//!
//! There is no merge or reconciliation between the tiers.

use std::sync::Arc;

use shared::models::Location;

use super::{LocationStore, StoreResult};
use async_trait::async_trait;

/// Primary/secondary store composition
pub struct TieredStore {
    primary: Arc<dyn LocationStore>,
    backup: Option<Arc<dyn LocationStore>>,
}

impl TieredStore {
    /// Single-tier store (no fallback)
    pub fn single(primary: Arc<dyn LocationStore>) -> Self {
        Self {
            primary,
            backup: None,
        }
    }

    /// Remote primary with a local backup tier
    pub fn with_backup(primary: Arc<dyn LocationStore>, backup: Arc<dyn LocationStore>) -> Self {
        tracing::info!(
            primary = primary.backend(),
            backup = backup.backend(),
            "Tiered store initialized"
        );
        Self {
            primary,
            backup: Some(backup),
        }
    }
}

#[async_trait]
impl LocationStore for TieredStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Location>> {
        match self.primary.get(id).await {
            Ok(found) => Ok(found),
            Err(e) => match &self.backup {
                Some(backup) => {
                    tracing::warn!(
                        location_id = %id,
                        error = %e,
                        "Primary store read failed, falling back to {}",
                        backup.backend()
                    );
                    backup.get(id).await
                }
                None => Err(e),
            },
        }
    }

    async fn put(&self, location: &Location) -> StoreResult<()> {
        match self.primary.put(location).await {
            Ok(()) => Ok(()),
            Err(e) => {
                if let Some(backup) = &self.backup {
                    tracing::error!(
                        location_id = %location.id,
                        error = %e,
                        "Primary store write failed, writing backup to {}",
                        backup.backend()
                    );
                    match backup.put(location).await {
                        Ok(()) => tracing::info!(
                            location_id = %location.id,
                            "Location backed up to secondary store"
                        ),
                        Err(backup_err) => tracing::error!(
                            location_id = %location.id,
                            error = %backup_err,
                            "Backup write also failed"
                        ),
                    }
                }
                // The failure is surfaced, not swallowed, after the backup attempt
                Err(e)
            }
        }
    }

    async fn list(&self) -> StoreResult<Vec<Location>> {
        match self.primary.list().await {
            Ok(locations) => Ok(locations),
            Err(e) => match &self.backup {
                Some(backup) => {
                    tracing::warn!(
                        error = %e,
                        "Primary store list failed, falling back to {}",
                        backup.backend()
                    );
                    backup.list().await
                }
                None => Err(e),
            },
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        match self.primary.delete(id).await {
            Ok(existed) => {
                if let Some(backup) = &self.backup {
                    // Keep the backup tier from resurrecting deleted locations
                    if let Err(backup_err) = backup.delete(id).await {
                        tracing::warn!(
                            location_id = %id,
                            error = %backup_err,
                            "Backup delete failed"
                        );
                    }
                }
                Ok(existed)
            }
            Err(e) => {
                if let Some(backup) = &self.backup {
                    tracing::error!(
                        location_id = %id,
                        error = %e,
                        "Primary store delete failed, deleting from backup"
                    );
                    let _ = backup.delete(id).await;
                }
                Err(e)
            }
        }
    }

    fn backend(&self) -> &'static str {
        self.primary.backend()
    }
}
