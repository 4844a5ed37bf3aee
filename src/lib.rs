// ==========================================
// Perdas Dashboard - Core Library
// ==========================================
// Data pipeline behind the avarias / prevenção retail loss dashboards:
// workbook ingestion, record normalization, period filtering and the
// aggregate views every chart and table is driven by.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - records and value types
pub mod domain;

// Configuration layer - worksheet schemas
pub mod config;

// Importer layer - ingestion & normalization
pub mod importer;

// Engine layer - period filtering & aggregation
pub mod engine;

// API layer - presentation-facing facade
pub mod api;

// Logging
pub mod logging;

// ==========================================
// Re-exports
// ==========================================

// Domain types
pub use domain::{
    CrossTabCell, CurrencyDialect, GroupKey, LossRecord, Measure, RankEntry, SummaryRow,
    TimeBucket, Totals, TrendPoint,
};

// Configuration
pub use config::{ColumnRole, SheetSchema, WorkbookProfile};

// Importer
pub use importer::{
    load_sheet, normalize, ExcelWorkbook, IngestResult, IngestionError, MemoryWorkbook, RawCell,
    RawTable, SheetSource,
};

// Engine
pub use engine::{
    filter_by_period, period_over_period_change, rolling_average, summarize, top_n, totals,
    InvalidPeriodSpec, PeriodSpec,
};

// API
pub use api::{ApiError, ApiResult, DashboardApi, SeasonalView, SheetView, TrendView};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Perdas Dashboard";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
