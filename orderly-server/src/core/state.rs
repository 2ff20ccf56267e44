use std::sync::Arc;

use crate::auth::{AdminCredentials, JwtService};
use crate::core::Config;
use crate::queue::QueueManager;
use crate::services::{AssetStorage, QrService};
use crate::store::{DynamoStore, FileStore, LocationStore, TieredStore};

/// Server state - holds shared references to all services
///
/// `ServerState` is cloned into every handler via axum state; all fields are
/// either cheap to clone or behind `Arc`.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Configuration (immutable) |
/// | manager | Arc<QueueManager> | Queue bookkeeping over the location store |
/// | jwt_service | Arc<JwtService> | JWT issuing and validation |
/// | credentials | Arc<AdminCredentials> | Admin login verification |
/// | assets | Option<Arc<AssetStorage>> | S3 asset storage when configured |
/// | qr | Arc<QrService> | QR code rendering and storage |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Queue manager over the configured location store
    pub manager: Arc<QueueManager>,
    /// JWT service
    pub jwt_service: Arc<JwtService>,
    /// Admin credentials
    pub credentials: Arc<AdminCredentials>,
    /// S3 asset storage (None: assets are stored under work_dir)
    pub assets: Option<Arc<AssetStorage>>,
    /// QR code service
    pub qr: Arc<QrService>,
}

impl ServerState {
    /// Initialize server state
    ///
    /// Wiring order:
    /// 1. work_dir structure (ensure directories exist)
    /// 2. AWS clients (only when DYNAMODB_TABLE or S3_BUCKET is set)
    /// 3. Location store: DynamoDB primary with local-file backup, or the
    ///    local file alone
    /// 4. QR service, queue manager, JWT, admin credentials
    ///
    /// # Panics
    ///
    /// Panics when the work directory cannot be created.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        // AWS config is loaded once and shared by both clients
        let aws_config = if config.dynamodb_table.is_some() || config.s3_bucket.is_some() {
            Some(aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await)
        } else {
            None
        };

        let assets = match (&config.s3_bucket, &aws_config) {
            (Some(bucket), Some(aws)) => Some(Arc::new(AssetStorage::new(
                aws_sdk_s3::Client::new(aws),
                bucket.clone(),
            ))),
            _ => None,
        };

        let file_store = Arc::new(FileStore::new(config.data_file_path()));
        let store: Arc<dyn LocationStore> = match (&config.dynamodb_table, &aws_config) {
            (Some(table), Some(aws)) => {
                let remote = Arc::new(DynamoStore::new(
                    aws_sdk_dynamodb::Client::new(aws),
                    table.clone(),
                ));
                Arc::new(TieredStore::with_backup(remote, file_store))
            }
            _ => {
                tracing::info!(
                    path = %config.data_file_path().display(),
                    "No DynamoDB table configured, using local file store"
                );
                Arc::new(TieredStore::single(file_store))
            }
        };

        let qr = Arc::new(QrService::new(
            config.base_url.clone(),
            config.qr_dir(),
            assets.clone(),
        ));
        let manager = Arc::new(QueueManager::new(store, Some(qr.clone())));
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let credentials = Arc::new(AdminCredentials::new(
            &config.admin_username,
            &config.admin_password,
        ));

        Self {
            config: config.clone(),
            manager,
            jwt_service,
            credentials,
            assets,
            qr,
        }
    }
}
