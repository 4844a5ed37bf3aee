// ==========================================
// Perdas Dashboard - Sheet Schema Configuration
// ==========================================
// The four near-duplicate dashboard scripts collapse into one pipeline
// parameterized by column layout + currency dialect. Source header text
// is decorative; columns are assigned semantic roles positionally.
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::CurrencyDialect;

// ==========================================
// Column roles
// ==========================================

/// Semantic role of one source column, assigned by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    /// Free-text date, `dd/mm/yyyy`.
    Date,
    Barcode,
    InternalCode,
    Description,
    Quantity,
    /// Spoilage family: unit sale value.
    UnitSaleValue,
    /// Spoilage family: unit cost value.
    UnitCostValue,
    /// Spoilage family: source-provided total sale value.
    TotalSaleValue,
    /// Spoilage family: source-provided total cost value.
    TotalCostValue,
    /// Prevention family: single unit value column (`VLR. UNI.`).
    UnitValue,
    /// Prevention family: single total column (`TOTAL`).
    Total,
    /// Prevention family: preventive-action tag (`PREV.`).
    PreventionTag,
    /// Present in the sheet but not consumed.
    Ignore,
}

// ==========================================
// Sheet schema
// ==========================================

/// Positional layout and parsing rules of one worksheet variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSchema {
    /// Ordered semantic roles, one per source column (column A first).
    pub columns: Vec<ColumnRole>,
    pub dialect: CurrencyDialect,
    /// Leading rows to discard: the banner row plus the decorative
    /// header row in both production families.
    pub skip_rows: usize,
}

impl SheetSchema {
    /// The "Avarias" family (Padaria / Salgados / Rotisseria): unit and
    /// total columns for both sale and cost, legacy comma-decimal currency.
    pub fn spoilage() -> Self {
        Self {
            columns: vec![
                ColumnRole::Date,
                ColumnRole::InternalCode,
                ColumnRole::Description,
                ColumnRole::Quantity,
                ColumnRole::UnitSaleValue,
                ColumnRole::UnitCostValue,
                ColumnRole::TotalSaleValue,
                ColumnRole::TotalCostValue,
            ],
            dialect: CurrencyDialect::CommaDecimal,
            skip_rows: 2,
        }
    }

    /// The "Prevenção" family (A:H): single unit/total value pair plus the
    /// preventive-action tag, last-separator currency.
    pub fn prevention() -> Self {
        Self {
            columns: vec![
                ColumnRole::Date,
                ColumnRole::Barcode,
                ColumnRole::InternalCode,
                ColumnRole::Description,
                ColumnRole::Quantity,
                ColumnRole::UnitValue,
                ColumnRole::Total,
                ColumnRole::PreventionTag,
            ],
            dialect: CurrencyDialect::LastSeparator,
            skip_rows: 2,
        }
    }

    /// Column index of a role, `None` when the variant lacks it.
    pub fn position(&self, role: ColumnRole) -> Option<usize> {
        self.columns.iter().position(|c| *c == role)
    }

    pub fn has_role(&self, role: ColumnRole) -> bool {
        self.position(role).is_some()
    }

    /// Minimum number of columns a data row must provide.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether this variant carries cost-side values at all.
    pub fn has_cost_columns(&self) -> bool {
        self.has_role(ColumnRole::UnitCostValue) || self.has_role(ColumnRole::TotalCostValue)
    }
}

// ==========================================
// Workbook profile
// ==========================================

/// Maps each worksheet of a workbook to its schema. The `DashboardApi`
/// is constructed with one profile per workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookProfile {
    sheets: Vec<(String, SheetSchema)>,
}

impl WorkbookProfile {
    pub fn new() -> Self {
        Self { sheets: Vec::new() }
    }

    pub fn with_sheet(mut self, name: impl Into<String>, schema: SheetSchema) -> Self {
        self.sheets.push((name.into(), schema));
        self
    }

    /// Production spoilage workbook ("SISTEMA DE GESTÃO DE AVARIAS").
    pub fn spoilage_default() -> Self {
        Self::new()
            .with_sheet("Avarias Padaria", SheetSchema::spoilage())
            .with_sheet("Avarias Salgados", SheetSchema::spoilage())
            .with_sheet("Avarias Rotisseria", SheetSchema::spoilage())
    }

    /// Production prevention workbook ("SISTEMA GERAL PREVENÇÃO").
    pub fn prevention_default() -> Self {
        Self::new()
            .with_sheet("Recuperação de Avarias", SheetSchema::prevention())
            .with_sheet("Furtos Recuperados", SheetSchema::prevention())
            .with_sheet("Quebra Mês", SheetSchema::prevention())
            .with_sheet("Quebra Deg", SheetSchema::prevention())
    }

    pub fn schema(&self, sheet: &str) -> Option<&SheetSchema> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, schema)| schema)
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }
}

impl Default for WorkbookProfile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spoilage_schema_positions() {
        let schema = SheetSchema::spoilage();
        assert_eq!(schema.position(ColumnRole::Date), Some(0));
        assert_eq!(schema.position(ColumnRole::Quantity), Some(3));
        assert_eq!(schema.position(ColumnRole::PreventionTag), None);
        assert_eq!(schema.column_count(), 8);
        assert!(schema.has_cost_columns());
    }

    #[test]
    fn test_prevention_schema_positions() {
        let schema = SheetSchema::prevention();
        assert_eq!(schema.position(ColumnRole::Barcode), Some(1));
        assert_eq!(schema.position(ColumnRole::PreventionTag), Some(7));
        assert!(!schema.has_cost_columns());
        assert_eq!(schema.dialect, crate::domain::CurrencyDialect::LastSeparator);
    }

    #[test]
    fn test_profile_lookup() {
        let profile = WorkbookProfile::prevention_default();
        assert_eq!(profile.sheet_names().len(), 4);
        assert!(profile.schema("Furtos Recuperados").is_some());
        assert!(profile.schema("Inexistente").is_none());
    }
}
