//! Print submission handler.

use std::path::{Path, PathBuf};

use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use printhub_core::error::{AppError, ErrorKind};
use printhub_core::result::AppResult;
use printhub_core::types::JobId;
use printhub_entity::document::DocumentKind;
use printhub_entity::job::OriginContext;
use printhub_worker::{DispatchOutcome, IncomingFile};

use crate::dto::response::{ApiResponse, PrintResponse};
use crate::error::ApiError;
use crate::extractors::Requester;
use crate::state::AppState;

/// The `file` part of the upload.
struct UploadedFile {
    file_name: Option<String>,
    mime_type: String,
    data: Bytes,
}

/// POST /api/print: multipart upload with `file`, `chat_id`, `message_id`
pub async fn submit(
    State(state): State<AppState>,
    requester: Requester,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let max_mb = state.config.storage.max_file_mb;
    let max_bytes = state.config.storage.max_file_bytes();
    let multipart_error = |e: MultipartError| -> AppError {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            too_large(max_mb)
        } else {
            AppError::validation(format!("Multipart error: {e}"))
        }
    };

    let mut upload: Option<UploadedFile> = None;
    let mut chat_id: i64 = 0;
    let mut message_id: i64 = 0;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(String::from);
                let mime_type = field.content_type().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                upload = Some(UploadedFile {
                    file_name,
                    mime_type,
                    data,
                });
            }
            "chat_id" => {
                let text = field.text().await.map_err(multipart_error)?;
                chat_id = parse_id("chat_id", &text)?;
            }
            "message_id" => {
                let text = field.text().await.map_err(multipart_error)?;
                message_id = parse_id("message_id", &text)?;
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::validation("file is required"))?;

    if upload.data.len() as u64 > max_bytes {
        return Err(too_large(max_mb).into());
    }

    let kind = DocumentKind::from_mime(&upload.mime_type).ok_or_else(|| {
        AppError::unsupported_media(format!("Unsupported file type: {}", upload.mime_type))
    })?;

    if kind.needs_conversion() && !state.executor().conversion_enabled() {
        return Err(AppError::unsupported_media(
            "Office documents are not accepted: conversion is disabled",
        )
        .into());
    }

    let file_name = upload
        .file_name
        .as_deref()
        .and_then(sanitize_file_name)
        .unwrap_or_else(|| default_file_name(kind, &upload.mime_type));

    let path = save_upload(&state.config.storage.save_dir, &file_name, &upload.data).await?;
    let saved_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(file_name);

    tracing::info!(
        user_id = requester.user_id(),
        chat_id,
        message_id,
        kind = %kind,
        size = upload.data.len(),
        "Received '{}'",
        saved_name
    );

    let outcome = state
        .dispatcher
        .handle_incoming_file(
            IncomingFile::new(path, kind),
            state.config.printer.print_options(),
            OriginContext {
                chat_id,
                message_id,
            },
        )
        .await?;

    let status = match &outcome {
        DispatchOutcome::Printed => StatusCode::OK,
        DispatchOutcome::Queued { .. } => StatusCode::ACCEPTED,
        DispatchOutcome::Failed { reason } => {
            return Err(AppError::external_service(reason.clone()).into());
        }
    };

    let body = ApiResponse::ok(PrintResponse {
        file_name: saved_name,
        outcome,
    });
    Ok((status, Json(body)).into_response())
}

fn too_large(max_mb: u64) -> AppError {
    AppError::payload_too_large(format!("File too large (max {max_mb} MB)"))
}

fn parse_id(field: &str, text: &str) -> AppResult<i64> {
    text.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("{field} must be an integer")))
}

/// Reduce a client-supplied file name to a safe single path component.
///
/// Returns `None` when nothing usable remains.
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.').to_string();

    if cleaned.is_empty() { None } else { Some(cleaned) }
}

fn default_file_name(kind: DocumentKind, mime: &str) -> String {
    match kind {
        DocumentKind::Pdf => "document.pdf".to_string(),
        DocumentKind::Image => {
            let subtype = mime
                .split(';')
                .next()
                .and_then(|m| m.trim().split('/').nth(1))
                .unwrap_or("jpg");
            let ext = if subtype.eq_ignore_ascii_case("jpeg") {
                "jpg"
            } else {
                subtype
            };
            format!("photo.{}", ext.to_ascii_lowercase())
        }
        DocumentKind::Office => "document".to_string(),
    }
}

/// Write the upload to `dir` under a collision-free name.
async fn save_upload(dir: &Path, file_name: &str, data: &[u8]) -> AppResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to create upload directory: {}", dir.display()),
            e,
        )
    })?;

    let prefix = JobId::new().short();
    let path = dir.join(format!("{prefix}_{file_name}"));

    tokio::fs::write(&path, data).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to save upload: {}", path.display()),
            e,
        )
    })?;

    Ok(path)
}
