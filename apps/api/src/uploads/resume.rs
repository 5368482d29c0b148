use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResume {
    pub key: String,
    pub url: String,
    pub content_type: String,
    pub size: usize,
}

/// Keeps ASCII letters, digits, `.`, `-` and `_`; everything else becomes `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "resume".to_string()
    } else {
        cleaned.to_string()
    }
}

pub fn resume_key(user_id: &str, file_name: &str) -> String {
    format!(
        "resumes/{}/{}-{}",
        sanitize_file_name(user_id),
        Uuid::new_v4(),
        sanitize_file_name(file_name)
    )
}

/// Rejects empty, oversized and non-document uploads.
pub fn check_upload(content_type: &str, size: usize) -> Result<(), AppError> {
    if size == 0 {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if size > MAX_RESUME_BYTES {
        return Err(AppError::Validation(format!(
            "Resume exceeds the {} MB limit",
            MAX_RESUME_BYTES / (1024 * 1024)
        )));
    }
    if !ALLOWED_TYPES.contains(&content_type) {
        return Err(AppError::Validation(format!(
            "Unsupported resume type '{content_type}'"
        )));
    }
    Ok(())
}

pub async fn store_resume(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    endpoint: &str,
    user_id: &str,
    file_name: &str,
    content_type: &str,
    body: Bytes,
) -> Result<StoredResume, AppError> {
    check_upload(content_type, body.len())?;

    let key = resume_key(user_id, file_name);
    let size = body.len();
    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(body))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Resume upload failed: {e}")))?;

    info!("Uploaded resume to s3://{bucket}/{key} ({size} bytes)");

    Ok(StoredResume {
        url: format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
        key,
        content_type: content_type.to_string(),
        size,
    })
}
