use chrono::{DateTime, Utc};
use tracing::info;

use crate::backend::IntakeBackend;
use crate::error::IntakeError;
use crate::types::UploadFile;

/// Images plus PDF, nothing else.
pub const ALLOWED_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "application/pdf",
];

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Reject disallowed files before any network traffic.
pub fn validate(file: &UploadFile) -> Result<(), IntakeError> {
    if !ALLOWED_TYPES.contains(&file.content_type.as_str()) {
        return Err(IntakeError::UnsupportedFileType(file.content_type.clone()));
    }
    if file.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(IntakeError::FileTooLarge {
            name: file.name.clone(),
            size: file.bytes.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Collapse every run of characters outside `[A-Za-z0-9_.-]` into one `_`.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// Storage path for a file: `{folder}/{millis}-{sanitized}`. The timestamp
/// keeps repeated uploads of the same filename from colliding; the storage
/// API refuses overwrites regardless.
pub fn object_path(folder: &str, uploaded_at: DateTime<Utc>, file_name: &str) -> String {
    format!(
        "{}/{}-{}",
        folder,
        uploaded_at.timestamp_millis(),
        sanitize_filename(file_name)
    )
}

/// Upload Gateway. Absent file → `Ok(None)`; otherwise validate, derive the
/// path and forward to the backend in a single attempt.
pub async fn upload<B: IntakeBackend>(
    backend: &B,
    file: Option<&UploadFile>,
    folder: &str,
) -> Result<Option<String>, IntakeError> {
    let Some(file) = file else {
        return Ok(None);
    };
    validate(file)?;

    let path = object_path(folder, Utc::now(), &file.name);
    backend
        .upload_object(&path, &file.content_type, file.bytes.clone())
        .await?;
    info!(path = %path, size = file.bytes.len(), "document stored");
    Ok(Some(path))
}
