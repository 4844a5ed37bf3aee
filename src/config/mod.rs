// ==========================================
// Perdas Dashboard - Configuration Layer
// ==========================================
// Worksheet layout configuration shared by importer and API
// ==========================================

pub mod sheet_schema;

pub use sheet_schema::{ColumnRole, SheetSchema, WorkbookProfile};
