use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/orderly | Working directory (data file, QR codes, uploads, logs) |
/// | HTTP_PORT | 3000 | HTTP service port |
/// | ENVIRONMENT | development | Runtime environment |
/// | BASE_URL | http://localhost:3000 | Public base URL encoded into QR codes |
/// | DATA_FILE | queue_data.json | Local store file name under WORK_DIR |
/// | DYNAMODB_TABLE | (unset) | DynamoDB table; when set, the remote store is authoritative |
/// | S3_BUCKET | (unset) | S3 bucket for QR codes and receipt uploads |
/// | ADMIN_USERNAME | admin | Admin login name |
/// | ADMIN_PASSWORD | admin | Admin password (change outside development) |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/orderly HTTP_PORT=8080 DYNAMODB_TABLE=orderlyqueues cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the data file, QR codes, uploads and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Public base URL encoded into join/status QR codes
    pub base_url: String,
    /// Local store file name (under work_dir)
    pub data_file: String,
    /// DynamoDB table name; when set, the remote table is the primary store
    pub dynamodb_table: Option<String>,
    /// S3 bucket for QR code and receipt assets; local files when unset
    pub s3_bucket: Option<String>,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Admin login name
    pub admin_username: String,
    /// Admin password (hashed at startup)
    pub admin_password: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/orderly".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            data_file: std::env::var("DATA_FILE").unwrap_or_else(|_| "queue_data.json".into()),
            dynamodb_table: std::env::var("DYNAMODB_TABLE").ok().filter(|s| !s.is_empty()),
            s3_bucket: std::env::var("S3_BUCKET").ok().filter(|s| !s.is_empty()),
            jwt: JwtConfig::default(),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".into()),
        }
    }

    /// Override work_dir and port, for test setups
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Path of the local store file
    pub fn data_file_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.data_file)
    }

    /// Directory for locally stored QR code images
    pub fn qr_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("qrcodes")
    }

    /// Directory for locally stored receipt uploads
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    /// Directory for log files
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work_dir subdirectories if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(self.qr_dir())?;
        std::fs::create_dir_all(self.uploads_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
