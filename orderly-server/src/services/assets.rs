//! S3 asset storage
//!
//! Holds QR code images (`qrcodes/...`) and receipt uploads
//! (`receipts/...`). Reads are served through presigned GET URLs so the
//! bucket can stay private.

use aws_sdk_s3::Client;
use aws_sdk_s3::presigning::PresigningConfig;
use std::time::Duration;

use shared::error::{AppError, AppResult, ErrorCode};

/// S3-backed asset storage
pub struct AssetStorage {
    client: Client,
    bucket: String,
}

impl AssetStorage {
    pub fn new(client: Client, bucket: String) -> Self {
        tracing::info!(bucket = %bucket, "S3 asset storage initialized");
        Self { client, bucket }
    }

    /// Upload raw bytes under the given key
    pub async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> AppResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(data.into())
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "S3 upload failed");
                AppError::with_message(ErrorCode::AssetStorageFailed, "Asset upload failed")
            })?;

        tracing::debug!(key = %key, "Asset uploaded to S3");
        Ok(())
    }

    /// Generate a presigned GET URL for an asset
    pub async fn presigned_url(&self, key: &str, expires_secs: u64) -> AppResult<String> {
        let presigning = PresigningConfig::expires_in(Duration::from_secs(expires_secs))
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create presigning config");
                AppError::new(ErrorCode::InternalError)
            })?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "Failed to generate presigned URL");
                AppError::new(ErrorCode::InternalError)
            })?;

        Ok(presigned.uri().to_string())
    }

    /// Delete an asset (best effort on caller side)
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "S3 delete failed");
                AppError::with_message(ErrorCode::AssetStorageFailed, "Asset delete failed")
            })?;
        Ok(())
    }
}
