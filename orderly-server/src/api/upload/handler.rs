//! Receipt Upload Handler
//!
//! Visitors may attach a receipt (e.g. proof of purchase) when joining a
//! queue. The upload happens first; the returned reference is passed in
//! the join request and stored verbatim on the entry — the queue core
//! never interprets it.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

use shared::error::{AppError, AppResult, ErrorCode};

use crate::core::ServerState;

/// Maximum file size (10MB)
const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Supported receipt formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp", "pdf"];

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Opaque reference to pass as `attachment` when joining
    pub reference: String,
    pub size: usize,
    pub format: String,
}

fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// POST /api/upload - upload a receipt attachment
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    // Find the file field
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::validation(format!("Invalid multipart request: {e}"))
    })? {
        let name = field.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            original_filename = field.file_name().map(|s| s.to_string());
            field_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = field_data
        .ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;

    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }

    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!("File too large: {} bytes (max {})", data.len(), MAX_FILE_SIZE),
        ));
    }

    // Validate file extension
    let filename = original_filename.unwrap_or_default();
    let ext = PathBuf::from(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!(
                "Unsupported format '{ext}'. Supported: {}",
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }

    let size = data.len();
    let reference = format!("receipts/{}.{}", Uuid::new_v4(), ext);

    match &state.assets {
        Some(assets) => {
            assets.put(&reference, data, content_type_for(&ext)).await?;
        }
        None => {
            let path = state.config.uploads_dir().join(&reference);
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::with_message(ErrorCode::AssetStorageFailed, e.to_string())
                })?;
            }
            tokio::fs::write(&path, data).await.map_err(|e| {
                AppError::with_message(ErrorCode::AssetStorageFailed, e.to_string())
            })?;
        }
    }

    tracing::info!(
        original_name = %filename,
        reference = %reference,
        size = size,
        "Receipt uploaded"
    );

    Ok(Json(UploadResponse {
        reference,
        size,
        format: ext,
    }))
}
