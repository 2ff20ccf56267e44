//! Authentication
//!
//! JWT token service, env-sourced admin credentials (Argon2 verified) and
//! the admin-gate middleware for staff routes.

pub mod credentials;
pub mod jwt;
pub mod middleware;

pub use credentials::AdminCredentials;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_admin;
