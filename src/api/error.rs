// ==========================================
// Perdas Dashboard - API Error Types
// ==========================================
// Converts layer errors into the surface the presentation layer handles.
// ==========================================

use thiserror::Error;

use crate::engine::error::InvalidPeriodSpec;
use crate::importer::error::IngestionError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Sheet name not present in the configured workbook profile.
    #[error("unknown sheet: {0}")]
    UnknownSheet(String),

    #[error("ingestion failed: {0}")]
    Ingestion(#[from] IngestionError),

    #[error("invalid period: {0}")]
    Period(#[from] InvalidPeriodSpec),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for the API layer.
pub type ApiResult<T> = Result<T, ApiError>;
