//! QueueManager - position bookkeeping and entry state transitions
//!
//! Every mutation is a full read-modify-write cycle against the location
//! store: fetch the aggregate, mutate the in-memory queue list, write the
//! whole record back. There is no locking or versioning around the cycle;
//! two simultaneous mutations of one location can race (acknowledged
//! limitation of the deployment model).
//!
//! # Operation flow
//!
//! ```text
//! join(location_id, ...)
//!     ├─ 1. Validate input (before any storage access)
//!     ├─ 2. Fetch aggregate from the store (never from the mirror)
//!     ├─ 3. position = waiting count + 1, append entry
//!     ├─ 4. Persist whole aggregate
//!     └─ 5. Refresh mirror, return entry
//! ```
//!
//! Position invariant: at any instant the positions of all waiting entries
//! in one location form a contiguous sequence 1..N. `leave` renumbers the
//! remaining waiting entries; `serve_next` removes the minimum so the rest
//! already form 1..N-1 and are left untouched.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    EntryStatus, JoinRequest, Location, LocationCreate, PositionInfo, QueueEntry, QueueStats,
};

use crate::services::QrService;
use crate::store::{LocationStore, StoreError};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_ref, validate_required_text,
    validate_text,
};

/// Fixed linear wait model: minutes per waiting person
pub const WAIT_MINUTES_PER_PERSON: u32 = 5;

/// Length of the location-id prefix embedded in entry ids
const ENTRY_ID_PREFIX_LEN: usize = 8;

/// Queue manager over a location store
///
/// The mirror is a best-effort in-process copy of the last-read location
/// set. It is refreshed on successful reads and writes, consulted only when
/// every storage tier fails on a read path, and never used to seed a
/// mutation.
pub struct QueueManager {
    store: Arc<dyn LocationStore>,
    qr: Option<Arc<QrService>>,
    mirror: DashMap<String, Location>,
}

impl QueueManager {
    pub fn new(store: Arc<dyn LocationStore>, qr: Option<Arc<QrService>>) -> Self {
        Self {
            store,
            qr,
            mirror: DashMap::new(),
        }
    }

    /// Active storage backend name (health reporting)
    pub fn storage_backend(&self) -> &'static str {
        self.store.backend()
    }

    fn storage_err(e: StoreError) -> AppError {
        AppError::storage(e.to_string())
    }

    /// Fetch for a read-only path: mirror is the last resort when the store
    /// fails entirely.
    async fn read_location(&self, id: &str) -> AppResult<Location> {
        match self.store.get(id).await {
            Ok(Some(location)) => {
                self.mirror.insert(id.to_string(), location.clone());
                Ok(location)
            }
            Ok(None) => Err(AppError::location_not_found(id)),
            Err(e) => match self.mirror.get(id) {
                Some(cached) => {
                    tracing::warn!(
                        location_id = %id,
                        error = %e,
                        "Store read failed, serving location from in-process mirror"
                    );
                    Ok(cached.value().clone())
                }
                None => Err(Self::storage_err(e)),
            },
        }
    }

    /// Fetch for a mutating path: always from the store, never the mirror.
    async fn load_for_update(&self, id: &str) -> AppResult<Location> {
        match self.store.get(id).await {
            Ok(Some(location)) => Ok(location),
            Ok(None) => Err(AppError::location_not_found(id)),
            Err(e) => Err(Self::storage_err(e)),
        }
    }

    async fn persist(&self, location: &Location) -> AppResult<()> {
        self.store
            .put(location)
            .await
            .map_err(Self::storage_err)?;
        self.mirror
            .insert(location.id.clone(), location.clone());
        Ok(())
    }

    /// Entry id: location prefix + random suffix, e.g. `3f29ab10-9c41d2ee`.
    /// The prefix makes the owning location recoverable from the id alone.
    fn entry_id(location_id: &str) -> String {
        let prefix: String = location_id.chars().take(ENTRY_ID_PREFIX_LEN).collect();
        let suffix: String = Uuid::new_v4()
            .to_string()
            .chars()
            .take(ENTRY_ID_PREFIX_LEN)
            .collect();
        format!("{prefix}-{suffix}")
    }

    fn estimate_wait(position: u32) -> u32 {
        position * WAIT_MINUTES_PER_PERSON
    }

    // ==================== Locations ====================

    /// Create a location with an empty queue
    ///
    /// QR generation is best effort: a failure logs a warning and leaves the
    /// references unset, the location is still created.
    pub async fn create_location(&self, payload: LocationCreate) -> AppResult<Location> {
        validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
        validate_text(&payload.description, "description", MAX_NOTE_LEN)?;

        let mut location = Location::new(payload.name, payload.description, payload.capacity);

        if let Some(qr) = &self.qr {
            match qr.generate(&location.id).await {
                Ok(paths) => {
                    location.join_qr = Some(paths.join);
                    location.status_qr = Some(paths.status);
                }
                Err(e) => {
                    tracing::warn!(
                        location_id = %location.id,
                        error = %e,
                        "QR generation failed, creating location without codes"
                    );
                }
            }
        }

        self.persist(&location).await?;
        tracing::info!(location_id = %location.id, name = %location.name, "Location created");
        Ok(location)
    }

    /// Fetch one location
    pub async fn get_location(&self, id: &str) -> AppResult<Location> {
        self.read_location(id).await
    }

    /// Fetch all locations, newest last
    ///
    /// On store failure the mirror contents are returned as an availability
    /// fallback.
    pub async fn list_locations(&self) -> AppResult<Vec<Location>> {
        let mut locations = match self.store.list().await {
            Ok(locations) => {
                self.mirror.clear();
                for location in &locations {
                    self.mirror.insert(location.id.clone(), location.clone());
                }
                locations
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Store list failed, serving locations from in-process mirror"
                );
                self.mirror.iter().map(|kv| kv.value().clone()).collect()
            }
        };
        locations.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(locations)
    }

    /// Delete a location and its queue history
    pub async fn delete_location(&self, id: &str) -> AppResult<()> {
        let location = self.load_for_update(id).await?;

        self.store.delete(id).await.map_err(Self::storage_err)?;
        self.mirror.remove(id);

        if let Some(qr) = &self.qr {
            qr.remove(&location).await;
        }

        tracing::info!(location_id = %id, "Location deleted");
        Ok(())
    }

    // ==================== Queue operations ====================

    /// Join the queue at a location
    ///
    /// The new entry's position is (current waiting count) + 1, which keeps
    /// the 1..N invariant without renumbering anyone.
    pub async fn join(&self, request: JoinRequest) -> AppResult<QueueEntry> {
        // Input validation happens before any storage access
        validate_required_text(&request.display_name, "display_name", MAX_NAME_LEN)?;
        validate_text(&request.contact, "contact", MAX_SHORT_TEXT_LEN)?;
        validate_text(&request.notes, "notes", MAX_NOTE_LEN)?;
        validate_optional_ref(&request.attachment, "attachment")?;

        let mut location = self.load_for_update(&request.location_id).await?;

        let position = location.waiting_count() + 1;
        let entry = QueueEntry {
            id: Self::entry_id(&location.id),
            display_name: request.display_name,
            contact: request.contact,
            notes: request.notes,
            status: EntryStatus::Waiting,
            position,
            joined_at: Utc::now(),
            served_at: None,
            left_at: None,
            attachment: request.attachment,
        };

        location.queue.push(entry.clone());
        location.touch();
        self.persist(&location).await?;

        tracing::info!(
            location_id = %location.id,
            entry_id = %entry.id,
            position = position,
            "Visitor joined queue"
        );
        Ok(entry)
    }

    /// Leave the queue
    ///
    /// Only a waiting entry can leave; the remaining waiting entries are
    /// renumbered to a gap-free 1..N preserving their relative order.
    pub async fn leave(&self, location_id: &str, entry_id: &str) -> AppResult<()> {
        let mut location = self.load_for_update(location_id).await?;

        let entry = location
            .queue
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| AppError::entry_not_found(entry_id))?;

        if !entry.is_waiting() {
            return Err(AppError::with_message(
                ErrorCode::EntryNotWaiting,
                format!("Queue entry {entry_id} is not waiting"),
            ));
        }

        entry.status = EntryStatus::Left;
        entry.left_at = Some(Utc::now());

        Self::renumber_waiting(&mut location);
        location.touch();
        self.persist(&location).await?;

        tracing::info!(location_id = %location_id, entry_id = %entry_id, "Visitor left queue");
        Ok(())
    }

    /// Reassign contiguous positions 1..N to the waiting entries, ordered
    /// by their current position (stable: nobody overtakes anybody).
    fn renumber_waiting(location: &mut Location) {
        let mut waiting: Vec<&mut QueueEntry> = location
            .queue
            .iter_mut()
            .filter(|e| e.is_waiting())
            .collect();
        waiting.sort_by_key(|e| e.position);
        for (rank, entry) in waiting.iter_mut().enumerate() {
            entry.position = rank as u32 + 1;
        }
    }

    /// Serve the waiting entry with the minimum position
    ///
    /// Returns `Ok(None)` on an empty queue without mutating anything.
    /// The other waiting entries keep their position values — removing the
    /// minimum leaves them as the new 1..N-1 sequence already.
    pub async fn serve_next(&self, location_id: &str) -> AppResult<Option<QueueEntry>> {
        let mut location = self.load_for_update(location_id).await?;

        let next_idx = location
            .queue
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_waiting())
            .min_by_key(|(_, e)| e.position)
            .map(|(idx, _)| idx);

        let Some(idx) = next_idx else {
            tracing::info!(location_id = %location_id, "No one waiting in queue");
            return Ok(None);
        };

        {
            let entry = &mut location.queue[idx];
            entry.status = EntryStatus::Served;
            entry.served_at = Some(Utc::now());
        }
        location.served_total += 1;
        location.touch();
        self.persist(&location).await?;

        let served = location.queue[idx].clone();
        tracing::info!(
            location_id = %location_id,
            entry_id = %served.id,
            display_name = %served.display_name,
            "Visitor served"
        );
        Ok(Some(served))
    }

    /// Position lookup for a waiting entry
    ///
    /// Served or left entries report not-found: position lookup is for
    /// active waits only.
    pub async fn position(&self, location_id: &str, entry_id: &str) -> AppResult<PositionInfo> {
        let location = self.read_location(location_id).await?;

        let entry = location
            .queue
            .iter()
            .find(|e| e.id == entry_id && e.is_waiting())
            .ok_or_else(|| AppError::entry_not_found(entry_id))?;

        Ok(PositionInfo {
            position: entry.position,
            total_waiting: location.waiting_count(),
            display_name: entry.display_name.clone(),
            joined_at: entry.joined_at,
            estimated_wait: Self::estimate_wait(entry.position),
        })
    }

    /// Live statistics for one location
    pub async fn stats(&self, location_id: &str) -> AppResult<QueueStats> {
        let location = self.read_location(location_id).await?;
        let waiting_count = location.waiting_count();

        Ok(QueueStats {
            name: location.name.clone(),
            waiting_count,
            served_count: location.served_count(),
            served_total: location.served_total,
            capacity: location.capacity,
            estimated_wait: Self::estimate_wait(waiting_count),
        })
    }

    /// Waiting entries sorted by position (admin console)
    pub async fn waiting_list(&self, location_id: &str) -> AppResult<Vec<QueueEntry>> {
        let location = self.read_location(location_id).await?;
        let mut waiting: Vec<QueueEntry> = location
            .queue
            .iter()
            .filter(|e| e.is_waiting())
            .cloned()
            .collect();
        waiting.sort_by_key(|e| e.position);
        Ok(waiting)
    }

    /// Resolve the owning location from an entry id prefix
    ///
    /// The prefix is matched against all known location ids; the first
    /// match wins. Prefix collisions across locations are possible by
    /// construction of the id format.
    pub async fn resolve_location(&self, entry_id: &str) -> AppResult<String> {
        let (prefix, _) = entry_id
            .split_once('-')
            .ok_or_else(|| AppError::invalid_request("Malformed entry id"))?;

        let locations = self.list_locations().await?;
        locations
            .iter()
            .find(|location| location.id.starts_with(prefix))
            .map(|location| location.id.clone())
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::LocationNotFound,
                    format!("No location matches entry {entry_id}"),
                )
            })
    }
}
