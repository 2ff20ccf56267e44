//! Location and queue entry models
//!
//! A [`Location`] is one aggregate record: site metadata plus the embedded
//! list of [`QueueEntry`] values. The store persists and retrieves whole
//! aggregates; `position` is the authoritative order of waiting entries
//! (insertion order carries no meaning).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a queue entry
///
/// `Waiting` is the only non-terminal state; an entry transitions exactly
/// once to `Served` (via serve-next) or `Left` (via leave).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// In the queue, counted in position arithmetic
    Waiting,
    /// Served by staff (terminal)
    Served,
    /// Left the queue voluntarily (terminal)
    Left,
}

/// One visitor's record of joining, waiting and exiting a queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Entry ID: `{location id prefix}-{random suffix}`.
    /// The prefix allows resolving the owning location from an entry ID.
    pub id: String,
    /// Visitor-supplied display name
    pub display_name: String,
    /// Contact info (phone/email), free-form
    #[serde(default)]
    pub contact: String,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Lifecycle state
    pub status: EntryStatus,
    /// 1-based rank among currently-waiting entries.
    /// Invariant: waiting positions in one location are contiguous 1..N.
    pub position: u32,
    /// When the visitor joined
    pub joined_at: DateTime<Utc>,
    /// Set when the entry transitions to `Served`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub served_at: Option<DateTime<Utc>>,
    /// Set when the entry transitions to `Left`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_at: Option<DateTime<Utc>>,
    /// Opaque reference to an uploaded receipt, stored verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

impl QueueEntry {
    /// Whether this entry participates in position arithmetic
    pub fn is_waiting(&self) -> bool {
        self.status == EntryStatus::Waiting
    }
}

/// A physical site offering a walk-in queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// UUID v4, generated at creation, immutable
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Descriptive capacity, not enforced by the queue core
    #[serde(default)]
    pub capacity: u32,
    /// All entries, every status; terminal entries are kept as history
    #[serde(default)]
    pub queue: Vec<QueueEntry>,
    /// Monotone counter of persons served over the location's lifetime
    #[serde(default)]
    pub served_total: u64,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
    /// Filename of the join QR code asset, when generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_qr: Option<String>,
    /// Filename of the status-check QR code asset, when generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_qr: Option<String>,
}

impl Location {
    /// Create a new location with an empty queue
    pub fn new(name: impl Into<String>, description: impl Into<String>, capacity: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            capacity,
            queue: Vec::new(),
            served_total: 0,
            created_at: now,
            updated_at: now,
            join_qr: None,
            status_qr: None,
        }
    }

    /// Count of entries currently waiting
    pub fn waiting_count(&self) -> u32 {
        self.queue.iter().filter(|e| e.is_waiting()).count() as u32
    }

    /// Count of entries served within the retained queue list
    ///
    /// May differ from `served_total` in deployments that prune terminal
    /// entries; `served_total` never decreases.
    pub fn served_count(&self) -> u32 {
        self.queue
            .iter()
            .filter(|e| e.status == EntryStatus::Served)
            .count() as u32
    }

    /// Refresh `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Create location payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub capacity: u32,
}

/// Location list item (public listing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub capacity: u32,
    pub waiting_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_qr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_qr: Option<String>,
}

impl From<&Location> for LocationSummary {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.clone(),
            name: location.name.clone(),
            description: location.description.clone(),
            capacity: location.capacity,
            waiting_count: location.waiting_count(),
            join_qr: location.join_qr.clone(),
            status_qr: location.status_qr.clone(),
        }
    }
}

/// Join queue payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    pub location_id: String,
    pub display_name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub notes: String,
    /// Opaque receipt reference from a prior upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

/// Position lookup result for a waiting entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionInfo {
    pub position: u32,
    pub total_waiting: u32,
    pub display_name: String,
    pub joined_at: DateTime<Utc>,
    /// Estimated wait in minutes (position × fixed per-person constant)
    pub estimated_wait: u32,
}

/// Live statistics for one location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStats {
    pub name: String,
    pub waiting_count: u32,
    /// Served entries still present in the queue list
    pub served_count: u32,
    /// Cumulative persisted counter
    pub served_total: u64,
    pub capacity: u32,
    /// Estimated wait in minutes for a new joiner
    pub estimated_wait: u32,
}
