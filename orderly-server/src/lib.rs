//! Orderly Server - walk-in queue management for physical locations
//!
//! # Architecture overview
//!
//! Visitors join a location's queue by scanning a QR code, track their
//! position, and staff serve the queue in order. Core pieces:
//!
//! - **Queue manager** (`queue`): position bookkeeping and entry state
//!   transitions over whole location aggregates
//! - **Location store** (`store`): DynamoDB table or local JSON file,
//!   composed as a two-tier store with one-shot fallback
//! - **Auth** (`auth`): JWT + Argon2 admin authentication
//! - **HTTP API** (`api`): RESTful JSON interface
//!
//! # Module structure
//!
//! ```text
//! orderly-server/src/
//! ├── core/          # Configuration, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── auth/          # JWT service, admin credentials, middleware
//! ├── queue/         # Queue manager (positions, transitions)
//! ├── store/         # Location store contract and backends
//! ├── services/      # QR generation, S3 asset storage
//! └── utils/         # Logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod queue;
pub mod services;
pub mod store;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use queue::QueueManager;
pub use store::{DynamoStore, FileStore, LocationStore, TieredStore};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   ____          __          __
  / __ \_________/ /__  _____/ /_  __
 / / / / ___/ __  / _ \/ ___/ / / / /
/ /_/ / /  / /_/ /  __/ /  / / /_/ /
\____/_/   \__,_/\___/_/  /_/\__, /
                            /____/
    "#
    );
}
