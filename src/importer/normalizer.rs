// ==========================================
// Perdas Dashboard - Record Normalization
// ==========================================
// Raw table -> normalized record set. Applies the cell coercions per
// configured role, derives calendar fields and enforces the
// positive-quantity invariant.
// ==========================================

use tracing::debug;

use crate::config::sheet_schema::ColumnRole;
use crate::domain::record::LossRecord;
use crate::importer::cleaner::{coerce_quantity, coerce_text, parse_currency, parse_date_br};
use crate::importer::workbook::RawTable;

/// Normalizes every row of a raw table.
///
/// Rows whose quantity fails coercion or is not strictly positive are
/// dropped here. Rows with an unparseable date are kept with all calendar
/// fields missing; they surface in unfiltered views only.
pub fn normalize(table: &RawTable) -> Vec<LossRecord> {
    let dialect = table.schema.dialect;
    let rows_in = table.len();
    let mut records = Vec::with_capacity(rows_in);
    let mut dropped = 0usize;

    for row in &table.rows {
        let quantity = table
            .cell_in(row, ColumnRole::Quantity)
            .and_then(coerce_quantity);
        let quantity = match quantity {
            Some(q) if q > 0.0 => q,
            _ => {
                dropped += 1;
                continue;
            }
        };

        let mut record = LossRecord::new(
            table
                .cell_in(row, ColumnRole::Description)
                .and_then(coerce_text)
                .unwrap_or_default(),
            quantity,
        );

        if let Some(date) = table.cell_in(row, ColumnRole::Date).and_then(parse_date_br) {
            record.set_date(date);
        }

        record.barcode = table.cell_in(row, ColumnRole::Barcode).and_then(coerce_text);
        record.internal_code = table
            .cell_in(row, ColumnRole::InternalCode)
            .and_then(coerce_text);
        record.prevention_tag = table
            .cell_in(row, ColumnRole::PreventionTag)
            .and_then(coerce_text);

        let currency = |role: ColumnRole| -> Option<f64> {
            table
                .cell_in(row, role)
                .and_then(|cell| parse_currency(cell, dialect))
        };

        // The prevention family carries a single unit/total pair; it lands
        // on the sale side (the recovered sale value).
        record.unit_sale_value =
            currency(ColumnRole::UnitSaleValue).or_else(|| currency(ColumnRole::UnitValue));
        record.unit_cost_value = currency(ColumnRole::UnitCostValue);
        record.total_sale_value =
            currency(ColumnRole::TotalSaleValue).or_else(|| currency(ColumnRole::Total));
        record.total_cost_value = currency(ColumnRole::TotalCostValue);

        // A source-provided total wins; otherwise quantity × unit value.
        if record.total_sale_value.is_none() {
            record.total_sale_value = record.unit_sale_value.map(|unit| unit * quantity);
        }
        if record.total_cost_value.is_none() {
            record.total_cost_value = record.unit_cost_value.map(|unit| unit * quantity);
        }

        records.push(record);
    }

    debug!(
        rows_in,
        kept = records.len(),
        dropped,
        "normalization finished"
    );

    records
}

/// Convenience: checks the quantity invariant over a normalized set.
/// Exposed for assertions in integration tests and debug checks.
pub fn all_quantities_positive(records: &[LossRecord]) -> bool {
    records.iter().all(|r| r.quantity > 0.0)
}
