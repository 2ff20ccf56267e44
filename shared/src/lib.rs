//! Shared types for the Orderly queue service
//!
//! This crate holds everything both the server and external tooling need to
//! agree on:
//!
//! - **Models** (`models`): location aggregates and queue entries
//! - **Errors** (`error`): unified error codes, categories and API responses

pub mod error;
pub mod models;

// Re-export common types
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{EntryStatus, Location, QueueEntry};
