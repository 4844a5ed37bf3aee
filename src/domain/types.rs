// ==========================================
// Perdas Dashboard - Core Value Types
// ==========================================
// Grouping keys, measures and time buckets shared by the
// aggregation engine and the dashboard API
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::record::LossRecord;

// ==========================================
// Currency dialect
// ==========================================

/// Currency text convention used by a workbook family.
///
/// The two production workbook families format currency inconsistently,
/// so the dialect is an explicit per-schema configuration choice rather
/// than a guess made per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencyDialect {
    /// Legacy spoilage convention: the comma is the decimal separator and
    /// no thousands separators are expected (`R$ 2,50`). Values that do
    /// carry a `.` thousands separator fail to parse and degrade to
    /// missing, which matches the historical behavior of that family.
    CommaDecimal,
    /// Prevention convention: the last `,` (or, failing that, the last
    /// `.`) is the decimal separator; every `.` before it is a thousands
    /// separator. Handles `R$ 1.234,56` and pre-normalized `1234.56`.
    LastSeparator,
}

// ==========================================
// Grouping keys
// ==========================================

/// Key a record set is grouped by when ranking or summarizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKey {
    /// Product/category label (`DESCRIÇÃO`).
    Description,
    /// Preventive-action tag (`PREV.`), prevention sheets only.
    PreventionTag,
    /// Calendar year + month, rendered `YYYY-MM`.
    YearMonth,
    /// Calendar year + ISO week, rendered `YYYY-Wnn`.
    YearIsoWeek,
}

impl GroupKey {
    /// Extracts the group key of a record, `None` when the record cannot
    /// participate in this grouping (missing tag, missing calendar fields).
    pub fn of(&self, record: &LossRecord) -> Option<String> {
        match self {
            GroupKey::Description => {
                if record.description.is_empty() {
                    None
                } else {
                    Some(record.description.clone())
                }
            }
            GroupKey::PreventionTag => record.prevention_tag.clone(),
            GroupKey::YearMonth => match (record.year, record.month) {
                (Some(y), Some(m)) => Some(format!("{y:04}-{m:02}")),
                _ => None,
            },
            GroupKey::YearIsoWeek => match (record.year, record.iso_week) {
                (Some(y), Some(w)) => Some(format!("{y:04}-W{w:02}")),
                _ => None,
            },
        }
    }
}

// ==========================================
// Measures
// ==========================================

/// Numeric measure summed by the aggregation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Measure {
    Quantity,
    TotalSaleValue,
    TotalCostValue,
}

impl Measure {
    /// Reads the measure off a record; missing currency values count as 0.
    pub fn of(&self, record: &LossRecord) -> f64 {
        match self {
            Measure::Quantity => record.quantity,
            Measure::TotalSaleValue => record.total_sale_value.unwrap_or(0.0),
            Measure::TotalCostValue => record.total_cost_value.unwrap_or(0.0),
        }
    }
}

// ==========================================
// Time buckets
// ==========================================

/// Calendar bucket used by the seasonal cross-tabulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeBucket {
    Month,
    IsoWeek,
}

impl TimeBucket {
    pub fn of(&self, record: &LossRecord) -> Option<u32> {
        match self {
            TimeBucket::Month => record.month,
            TimeBucket::IsoWeek => record.iso_week,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record_with_date(date: Option<NaiveDate>) -> LossRecord {
        let mut record = LossRecord::new("Pão", 2.0);
        record.unit_sale_value = Some(3.0);
        record.total_sale_value = Some(6.0);
        if let Some(d) = date {
            record.set_date(d);
        }
        record
    }

    #[test]
    fn test_group_key_year_month_and_week() {
        let record = record_with_date(NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(GroupKey::YearMonth.of(&record), Some("2024-03".to_string()));
        assert_eq!(
            GroupKey::YearIsoWeek.of(&record),
            Some("2024-W10".to_string())
        );
    }

    #[test]
    fn test_group_key_missing_fields() {
        let record = record_with_date(None);
        assert_eq!(GroupKey::YearMonth.of(&record), None);
        assert_eq!(GroupKey::YearIsoWeek.of(&record), None);
        assert_eq!(GroupKey::PreventionTag.of(&record), None);
    }

    #[test]
    fn test_measure_missing_currency_counts_as_zero() {
        let record = record_with_date(None);
        assert_eq!(Measure::Quantity.of(&record), 2.0);
        assert_eq!(Measure::TotalSaleValue.of(&record), 6.0);
        assert_eq!(Measure::TotalCostValue.of(&record), 0.0);
    }
}
