//! Services - external collaborators of the queue core
//!
//! - [`AssetStorage`]: S3-backed storage for QR codes and receipt uploads
//! - [`QrService`]: QR code rendering for join/status pages

pub mod assets;
pub mod qr;

pub use assets::AssetStorage;
pub use qr::{QrPaths, QrService};
