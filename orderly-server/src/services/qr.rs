//! QR code service
//!
//! Renders two PNG codes per location — one pointing at the join page, one
//! at the status-check page — and stores them in S3 when configured,
//! otherwise under `work_dir/qrcodes`.

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use image::Luma;
use qrcode::{EcLevel, QrCode};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Location;

use super::AssetStorage;

/// Presigned URL lifetime for QR images (1 hour)
const QR_URL_EXPIRY_SECS: u64 = 3600;

/// Filenames of the generated code pair
pub struct QrPaths {
    pub join: String,
    pub status: String,
}

/// QR rendering and storage
pub struct QrService {
    base_url: String,
    qr_dir: PathBuf,
    assets: Option<Arc<AssetStorage>>,
}

impl QrService {
    pub fn new(base_url: String, qr_dir: PathBuf, assets: Option<Arc<AssetStorage>>) -> Self {
        Self {
            base_url,
            qr_dir,
            assets,
        }
    }

    fn s3_key(filename: &str) -> String {
        format!("qrcodes/{filename}")
    }

    /// Render one URL as a PNG buffer
    fn render_png(data: &str) -> AppResult<Vec<u8>> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)
            .map_err(|e| AppError::with_message(ErrorCode::QrGenerationFailed, e.to_string()))?;

        let img = code
            .render::<Luma<u8>>()
            .module_dimensions(10, 10)
            .build();

        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .map_err(|e| {
                AppError::with_message(ErrorCode::QrGenerationFailed, e.to_string())
            })?;
        Ok(buffer)
    }

    /// Generate the join/status code pair for a location
    pub async fn generate(&self, location_id: &str) -> AppResult<QrPaths> {
        let join_name = format!("{location_id}_join.png");
        let status_name = format!("{location_id}_status.png");

        let join_png = Self::render_png(&format!("{}/queue/{}", self.base_url, location_id))?;
        let status_png =
            Self::render_png(&format!("{}/status_check/{}", self.base_url, location_id))?;

        match &self.assets {
            Some(assets) => {
                assets.put(&Self::s3_key(&join_name), join_png, "image/png").await?;
                assets
                    .put(&Self::s3_key(&status_name), status_png, "image/png")
                    .await?;
            }
            None => {
                tokio::fs::create_dir_all(&self.qr_dir).await.map_err(|e| {
                    AppError::with_message(ErrorCode::QrGenerationFailed, e.to_string())
                })?;
                tokio::fs::write(self.qr_dir.join(&join_name), join_png)
                    .await
                    .map_err(|e| {
                        AppError::with_message(ErrorCode::QrGenerationFailed, e.to_string())
                    })?;
                tokio::fs::write(self.qr_dir.join(&status_name), status_png)
                    .await
                    .map_err(|e| {
                        AppError::with_message(ErrorCode::QrGenerationFailed, e.to_string())
                    })?;
            }
        }

        tracing::info!(
            location_id = %location_id,
            join = %join_name,
            status = %status_name,
            "QR codes generated"
        );
        Ok(QrPaths {
            join: join_name,
            status: status_name,
        })
    }

    /// Resolve a stored QR filename to a fetchable URL
    ///
    /// Presigned S3 URL when S3 is configured, otherwise the local serving
    /// route.
    pub async fn url_for(&self, filename: &str) -> AppResult<String> {
        match &self.assets {
            Some(assets) => {
                assets
                    .presigned_url(&Self::s3_key(filename), QR_URL_EXPIRY_SECS)
                    .await
            }
            None => Ok(format!("/api/qr/{filename}")),
        }
    }

    /// Read a locally stored QR image (only meaningful without S3)
    pub async fn read_local(&self, filename: &str) -> AppResult<Vec<u8>> {
        tokio::fs::read(self.qr_dir.join(filename))
            .await
            .map_err(|_| AppError::not_found(format!("QR image {filename}")))
    }

    /// Remove a location's QR assets, best effort
    pub async fn remove(&self, location: &Location) {
        for filename in [&location.join_qr, &location.status_qr].into_iter().flatten() {
            let result = match &self.assets {
                Some(assets) => assets.delete(&Self::s3_key(filename)).await,
                None => tokio::fs::remove_file(self.qr_dir.join(filename))
                    .await
                    .map_err(|e| AppError::internal(e.to_string())),
            };
            if let Err(e) = result {
                tracing::warn!(file = %filename, error = %e, "Failed to remove QR asset");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_png_produces_png_bytes() {
        let png = QrService::render_png("http://localhost:3000/queue/abc").unwrap();
        // PNG magic number
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[tokio::test]
    async fn test_generate_writes_local_files() {
        let dir = tempfile::tempdir().unwrap();
        let service = QrService::new(
            "http://localhost:3000".to_string(),
            dir.path().to_path_buf(),
            None,
        );

        let paths = service.generate("loc-12345").await.unwrap();
        assert_eq!(paths.join, "loc-12345_join.png");
        assert_eq!(paths.status, "loc-12345_status.png");
        assert!(dir.path().join(&paths.join).exists());
        assert!(dir.path().join(&paths.status).exists());

        let bytes = service.read_local(&paths.join).await.unwrap();
        assert!(!bytes.is_empty());
    }
}
