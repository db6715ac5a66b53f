use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::mailer::Mailer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Archive for rendered presentation documents.
    pub s3: S3Client,
    pub llm: LlmClient,
    /// Pluggable delivery channel for rendered presentations. Default: ResendMailer.
    pub mailer: Arc<dyn Mailer>,
    pub config: Config,
}
