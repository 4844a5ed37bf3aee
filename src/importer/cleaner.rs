// ==========================================
// Perdas Dashboard - Cell Coercion
// ==========================================
// Quantity, currency and date coercion. Every function here is total:
// malformed input yields None, never an error. The positive-quantity
// filter downstream is what discards the resulting gaps.
// ==========================================

use chrono::NaiveDate;

use crate::domain::types::CurrencyDialect;
use crate::importer::workbook::RawCell;

/// Coerces a quantity cell into a number. Text is trimmed and parsed;
/// dates and empties are missing.
pub fn coerce_quantity(cell: &RawCell) -> Option<f64> {
    match cell {
        RawCell::Number(value) => Some(*value),
        RawCell::Text(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Parses a Brazilian-formatted currency cell (`R$ 1.234,56`) under the
/// schema's dialect. Numeric cells pass through unchanged.
pub fn parse_currency(cell: &RawCell, dialect: CurrencyDialect) -> Option<f64> {
    match cell {
        RawCell::Number(value) => Some(*value),
        RawCell::Text(text) => parse_currency_text(text, dialect),
        _ => None,
    }
}

fn parse_currency_text(raw: &str, dialect: CurrencyDialect) -> Option<f64> {
    let cleaned: String = raw
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let candidate = match dialect {
        CurrencyDialect::CommaDecimal => cleaned.replace(',', "."),
        CurrencyDialect::LastSeparator => match cleaned.rfind(',') {
            // Everything after the last comma is the decimal part; periods
            // before it are thousands separators.
            Some(pos) => decimal_split(&cleaned, pos),
            // No comma: the last period, if any, is the decimal point.
            None => match cleaned.rfind('.') {
                Some(pos) => decimal_split(&cleaned, pos),
                None => cleaned,
            },
        },
    };

    candidate.parse::<f64>().ok()
}

fn decimal_split(value: &str, separator_pos: usize) -> String {
    let (integer, decimal) = value.split_at(separator_pos);
    format!("{}.{}", integer.replace('.', ""), &decimal[1..])
}

/// Parses a `dd/mm/yyyy` date cell. Native date cells pass through.
pub fn parse_date_br(cell: &RawCell) -> Option<NaiveDate> {
    match cell {
        RawCell::Date(date) => Some(*date),
        RawCell::Text(text) => NaiveDate::parse_from_str(text.trim(), "%d/%m/%Y").ok(),
        _ => None,
    }
}

/// Coerces an identifier/label cell into text. Numeric cells (Excel loves
/// storing codes as numbers) render without a trailing `.0`.
pub fn coerce_text(cell: &RawCell) -> Option<String> {
    match cell {
        RawCell::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        RawCell::Number(value) => {
            if value.fract() == 0.0 && value.abs() < 1e15 {
                Some(format!("{}", *value as i64))
            } else {
                Some(value.to_string())
            }
        }
        _ => None,
    }
}
