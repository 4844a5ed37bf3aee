// ==========================================
// Perdas Dashboard - Ingestion & Normalization Layer
// ==========================================
// Workbook -> raw table -> normalized record set. Cell-level failures
// degrade to missing values; only structural failures raise.
// ==========================================

pub mod cleaner;
pub mod error;
pub mod normalizer;
pub mod workbook;

pub use cleaner::{coerce_quantity, coerce_text, parse_currency, parse_date_br};
pub use error::{IngestResult, IngestionError};
pub use normalizer::{all_quantities_positive, normalize};
pub use workbook::{load_sheet, ExcelWorkbook, MemoryWorkbook, RawCell, RawTable, SheetSource};
