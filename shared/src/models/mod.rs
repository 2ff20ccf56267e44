//! Data models
//!
//! Entity types persisted in the location store plus the payload/response
//! types used by the HTTP API.

pub mod location;

pub use location::{
    EntryStatus, JoinRequest, Location, LocationCreate, LocationSummary, PositionInfo,
    QueueEntry, QueueStats,
};
