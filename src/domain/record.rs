// ==========================================
// Perdas Dashboard - Normalized Records
// ==========================================
// The normalized record produced by the importer and every derived
// aggregate row handed to the presentation layer
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// LossRecord - normalized row
// ==========================================

/// One normalized spoilage / recovery entry.
///
/// Invariants:
/// - `quantity > 0`: rows failing quantity coercion or with non-positive
///   quantity never leave the normalizer.
/// - The four calendar fields are either all present (valid source date)
///   or all `None` (unparseable date). Records without calendar fields
///   stay visible in unfiltered views but can never match a month or
///   week-range filter.
/// - `total_*` carries the source total when the sheet provides one,
///   otherwise `quantity × unit_*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossRecord {
    pub date: Option<NaiveDate>,
    pub year: Option<i32>,
    /// 1-12
    pub month: Option<u32>,
    /// 1-31
    pub day: Option<u32>,
    /// ISO 8601 week number, 1-53
    pub iso_week: Option<u32>,
    pub barcode: Option<String>,
    pub internal_code: Option<String>,
    pub description: String,
    pub quantity: f64,
    pub unit_sale_value: Option<f64>,
    pub unit_cost_value: Option<f64>,
    pub total_sale_value: Option<f64>,
    pub total_cost_value: Option<f64>,
    /// Preventive-action tag, prevention sheets only.
    pub prevention_tag: Option<String>,
}

impl LossRecord {
    pub fn new(description: impl Into<String>, quantity: f64) -> Self {
        Self {
            date: None,
            year: None,
            month: None,
            day: None,
            iso_week: None,
            barcode: None,
            internal_code: None,
            description: description.into(),
            quantity,
            unit_sale_value: None,
            unit_cost_value: None,
            total_sale_value: None,
            total_cost_value: None,
            prevention_tag: None,
        }
    }

    /// Sets the date and derives all calendar fields from it.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
        self.year = Some(date.year());
        self.month = Some(date.month());
        self.day = Some(date.day());
        self.iso_week = Some(date.iso_week().week());
    }

    /// Whether the record can participate in period-scoped views.
    pub fn has_calendar_fields(&self) -> bool {
        self.date.is_some()
    }
}

// ==========================================
// Aggregate rows
// ==========================================

/// One entry of a top-N ranking: group key plus summed measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    pub key: String,
    pub value: f64,
}

/// One row of the per-key summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub key: String,
    pub quantity: f64,
    pub total_sale_value: f64,
    pub total_cost_value: f64,
    /// First non-missing internal code seen for this key. Dirty data maps
    /// one description to several codes; first occurrence wins.
    pub internal_code: Option<String>,
}

/// Grand totals over a (period-filtered) record set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub quantity: f64,
    pub total_sale_value: f64,
    pub total_cost_value: f64,
    pub record_count: usize,
}

/// One cell of the seasonal year × bucket cross-tabulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossTabCell {
    pub year: i32,
    /// Month (1-12) or ISO week (1-53) depending on the requested bucket.
    pub bucket: u32,
    pub value: f64,
}

/// One point of a monthly trend series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub month: u32,
    pub value: f64,
    /// Trailing moving average (partial window at the series start).
    pub rolling_avg: f64,
    /// Percentage change vs. the previous point; 0 at the first point and
    /// whenever the previous value is 0.
    pub change_pct: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_date_derives_calendar_fields() {
        let mut record = LossRecord::new("Queijo", 1.0);
        assert!(!record.has_calendar_fields());

        record.set_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(record.year, Some(2024));
        assert_eq!(record.month, Some(3));
        assert_eq!(record.day, Some(5));
        assert_eq!(record.iso_week, Some(10));
        assert!(record.has_calendar_fields());
    }
}
