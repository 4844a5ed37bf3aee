// ==========================================
// Perdas Dashboard - Ingestion Error Types
// ==========================================
// Only structural failures surface here. Malformed cells never abort a
// load; they degrade to missing values inside the cleaner.
// ==========================================

use thiserror::Error;

/// Fatal-per-sheet ingestion failures. Never retried: a different input
/// file is the only fix.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .xlsx/.xlsm/.xls)")]
    UnsupportedFormat(String),

    #[error("failed to open workbook: {0}")]
    WorkbookError(String),

    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    #[error(
        "column count mismatch in sheet {sheet} (row {row}): expected {expected}, found {found}"
    )]
    ColumnCountMismatch {
        sheet: String,
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl From<std::io::Error> for IngestionError {
    fn from(err: std::io::Error) -> Self {
        IngestionError::WorkbookError(err.to_string())
    }
}

impl From<calamine::Error> for IngestionError {
    fn from(err: calamine::Error) -> Self {
        IngestionError::WorkbookError(err.to_string())
    }
}

/// Result type alias for the importer layer.
pub type IngestResult<T> = Result<T, IngestionError>;
