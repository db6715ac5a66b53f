//! Object-storage archive for rendered presentation documents.
//!
//! Rendered HTML is written to S3 (MinIO locally) at send time so the
//! presentation row can carry a durable document URL. Archival is best-effort
//! from the send pipeline's point of view — the caller decides what a failure
//! means.

use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
pub async fn build_s3_client(config: &Config) -> S3Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "talentdeck-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    S3Client::new(&s3_config)
}

/// Uploads a rendered presentation document and returns its object URL.
/// Re-sends overwrite the same key so the recorded URL stays stable.
pub async fn archive_document(
    s3: &S3Client,
    config: &Config,
    presentation_id: Uuid,
    html: &str,
) -> Result<String, AppError> {
    let key = document_key(presentation_id);

    s3.put_object()
        .bucket(&config.s3_bucket)
        .key(&key)
        .content_type("text/html; charset=utf-8")
        .body(ByteStream::from(Bytes::from(html.to_owned())))
        .send()
        .await
        .map_err(|e| AppError::S3(e.to_string()))?;

    Ok(document_url(config, &key))
}

fn document_key(presentation_id: Uuid) -> String {
    format!("presentations/{presentation_id}.html")
}

fn document_url(config: &Config, key: &str) -> String {
    format!(
        "{}/{}/{}",
        config.s3_endpoint.trim_end_matches('/'),
        config.s3_bucket,
        key
    )
}
