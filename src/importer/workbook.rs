// ==========================================
// Perdas Dashboard - Workbook Access
// ==========================================
// Sheet sources (calamine-backed Excel, in-memory fixtures) and the
// positional raw-table extraction. The first rows of every production
// sheet are a banner plus a decorative header; both are skipped and
// columns are bound to semantic roles by position only.
// ==========================================

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader, Sheets};
use chrono::NaiveDate;
use tracing::debug;

use crate::config::sheet_schema::{ColumnRole, SheetSchema};
use crate::importer::error::{IngestResult, IngestionError};

// ==========================================
// RawCell - typed view of one source cell
// ==========================================

/// One spreadsheet cell after extraction, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    /// Trimmed, non-empty text.
    Text(String),
    Number(f64),
    /// Native spreadsheet date cell.
    Date(NaiveDate),
    Empty,
}

impl RawCell {
    pub fn text(value: impl Into<String>) -> Self {
        RawCell::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawCell::Empty)
    }
}

impl From<&Data> for RawCell {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => RawCell::Empty,
            Data::Int(i) => RawCell::Number(*i as f64),
            Data::Float(f) => RawCell::Number(*f),
            Data::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    RawCell::Empty
                } else {
                    RawCell::Text(trimmed.to_string())
                }
            }
            Data::Bool(b) => RawCell::Text(b.to_string()),
            Data::DateTime(_) | Data::DateTimeIso(_) => cell
                .as_datetime()
                .map(|dt| RawCell::Date(dt.date()))
                .unwrap_or(RawCell::Empty),
            _ => RawCell::Empty,
        }
    }
}

// ==========================================
// RawTable - positional extraction result
// ==========================================

/// The rows of one sheet after banner skipping, still uncoerced.
/// Every row carries exactly `schema.column_count()` cells.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub schema: SheetSchema,
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    /// Cell of a row for a given role, `None` when the variant lacks the
    /// role entirely.
    pub fn cell_in<'a>(&self, row: &'a [RawCell], role: ColumnRole) -> Option<&'a RawCell> {
        self.schema.position(role).and_then(|idx| row.get(idx))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// SheetSource - workbook abstraction
// ==========================================

/// Read-only workbook handle. Opened once, consulted on demand.
pub trait SheetSource {
    fn sheet_names(&self) -> Vec<String>;

    /// Full cell grid of a sheet, banner rows included.
    fn read_grid(&mut self, sheet: &str) -> IngestResult<Vec<Vec<RawCell>>>;
}

// ==========================================
// ExcelWorkbook - calamine-backed source
// ==========================================

pub struct ExcelWorkbook {
    sheets: Sheets<BufReader<File>>,
}

impl std::fmt::Debug for ExcelWorkbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExcelWorkbook").finish_non_exhaustive()
    }
}

impl ExcelWorkbook {
    /// Opens an Excel workbook (.xlsx / .xlsm / .xls).
    pub fn open<P: AsRef<Path>>(path: P) -> IngestResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(IngestionError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xlsm" && ext != "xls" {
            return Err(IngestionError::UnsupportedFormat(ext));
        }

        let sheets = open_workbook_auto(path)
            .map_err(|e| IngestionError::WorkbookError(e.to_string()))?;

        Ok(Self { sheets })
    }
}

impl SheetSource for ExcelWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names().to_vec()
    }

    fn read_grid(&mut self, sheet: &str) -> IngestResult<Vec<Vec<RawCell>>> {
        let range = self
            .sheets
            .worksheet_range(sheet)
            .map_err(|e| IngestionError::WorkbookError(e.to_string()))?;

        Ok(range
            .rows()
            .map(|row| row.iter().map(RawCell::from).collect())
            .collect())
    }
}

// ==========================================
// MemoryWorkbook - in-memory source
// ==========================================

/// Workbook backed by in-memory grids. Used by the test suite and by
/// callers embedding fixture data.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, Vec<Vec<RawCell>>)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, grid: Vec<Vec<RawCell>>) -> Self {
        self.sheets.push((name.into(), grid));
        self
    }
}

impl SheetSource for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_grid(&mut self, sheet: &str) -> IngestResult<Vec<Vec<RawCell>>> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, grid)| grid.clone())
            .ok_or_else(|| IngestionError::SheetNotFound(sheet.to_string()))
    }
}

// ==========================================
// load_sheet - positional extraction
// ==========================================

/// Extracts the raw table of one sheet: verifies the sheet exists, skips
/// `schema.skip_rows` leading rows, drops fully blank rows, and checks
/// every data row is at least as wide as the schema. Extra trailing
/// columns are ignored (the prevention sheets are wider than A:H).
pub fn load_sheet(
    source: &mut dyn SheetSource,
    sheet: &str,
    schema: &SheetSchema,
) -> IngestResult<RawTable> {
    if !source.sheet_names().iter().any(|name| name == sheet) {
        return Err(IngestionError::SheetNotFound(sheet.to_string()));
    }

    let grid = source.read_grid(sheet)?;
    let expected = schema.column_count();
    let mut rows = Vec::new();

    for (idx, mut row) in grid.into_iter().enumerate().skip(schema.skip_rows) {
        if row.iter().all(RawCell::is_empty) {
            continue;
        }
        if row.len() < expected {
            return Err(IngestionError::ColumnCountMismatch {
                sheet: sheet.to_string(),
                row: idx + 1,
                expected,
                found: row.len(),
            });
        }
        row.truncate(expected);
        rows.push(row);
    }

    debug!(sheet, rows = rows.len(), "sheet extracted");

    Ok(RawTable {
        schema: schema.clone(),
        rows,
    })
}
