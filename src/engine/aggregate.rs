// ==========================================
// Perdas Dashboard - Grouped Aggregation
// ==========================================
// Stateless query functions over normalized records: totals, top-N
// rankings, per-key summaries and the seasonal cross-tabulation.
// All operations are total; empty input yields empty/zero output.
// ==========================================

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::domain::record::{CrossTabCell, LossRecord, RankEntry, SummaryRow, Totals};
use crate::domain::types::{GroupKey, Measure, TimeBucket};

// ==========================================
// Grouping accumulator (first-occurrence order)
// ==========================================

struct Grouper {
    order: Vec<String>,
    index: HashMap<String, usize>,
}

impl Grouper {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Slot of a key, inserting it at the end on first sight. Keeps
    /// grouping stable in source order, which is what makes ranking
    /// tie-breaks deterministic.
    fn slot(&mut self, key: String) -> usize {
        if let Some(idx) = self.index.get(&key) {
            return *idx;
        }
        let idx = self.order.len();
        self.index.insert(key.clone(), idx);
        self.order.push(key);
        idx
    }
}

// ==========================================
// top_n
// ==========================================

/// Sums `measure` per distinct `key` and returns the `n` largest,
/// descending. Ties keep first-occurrence order (stable sort).
pub fn top_n(records: &[LossRecord], key: GroupKey, measure: Measure, n: usize) -> Vec<RankEntry> {
    let mut grouper = Grouper::new();
    let mut sums: Vec<f64> = Vec::new();

    for record in records {
        let Some(group) = key.of(record) else {
            continue;
        };
        let idx = grouper.slot(group);
        if idx == sums.len() {
            sums.push(0.0);
        }
        sums[idx] += measure.of(record);
    }

    let mut entries: Vec<RankEntry> = grouper
        .order
        .into_iter()
        .zip(sums)
        .map(|(key, value)| RankEntry { key, value })
        .collect();

    entries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    entries.truncate(n);
    entries
}

// ==========================================
// summarize
// ==========================================

/// One row per distinct key, in first-occurrence order: summed quantity,
/// sale and cost totals, plus the first non-missing internal code.
pub fn summarize(records: &[LossRecord], key: GroupKey) -> Vec<SummaryRow> {
    let mut grouper = Grouper::new();
    let mut rows: Vec<SummaryRow> = Vec::new();

    for record in records {
        let Some(group) = key.of(record) else {
            continue;
        };
        let idx = grouper.slot(group.clone());
        if idx == rows.len() {
            rows.push(SummaryRow {
                key: group,
                quantity: 0.0,
                total_sale_value: 0.0,
                total_cost_value: 0.0,
                internal_code: None,
            });
        }

        let row = &mut rows[idx];
        row.quantity += record.quantity;
        row.total_sale_value += record.total_sale_value.unwrap_or(0.0);
        row.total_cost_value += record.total_cost_value.unwrap_or(0.0);
        if row.internal_code.is_none() {
            row.internal_code = record.internal_code.clone();
        }
    }

    rows
}

// ==========================================
// totals
// ==========================================

/// Grand totals of a record set. Missing currency values count as zero.
pub fn totals(records: &[LossRecord]) -> Totals {
    let mut out = Totals::default();
    for record in records {
        out.quantity += record.quantity;
        out.total_sale_value += record.total_sale_value.unwrap_or(0.0);
        out.total_cost_value += record.total_cost_value.unwrap_or(0.0);
        out.record_count += 1;
    }
    out
}

// ==========================================
// cross_tab
// ==========================================

/// Year × bucket summed matrix, chronologically sorted. Records without
/// calendar fields cannot land in a bucket and are skipped.
pub fn cross_tab(records: &[LossRecord], bucket: TimeBucket, measure: Measure) -> Vec<CrossTabCell> {
    let mut cells: BTreeMap<(i32, u32), f64> = BTreeMap::new();

    for record in records {
        let (Some(year), Some(b)) = (record.year, bucket.of(record)) else {
            continue;
        };
        *cells.entry((year, b)).or_insert(0.0) += measure.of(record);
    }

    cells
        .into_iter()
        .map(|((year, bucket), value)| CrossTabCell {
            year,
            bucket,
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(desc: &str, qty: f64, sale: f64) -> LossRecord {
        let mut r = LossRecord::new(desc, qty);
        r.total_sale_value = Some(sale);
        r
    }

    #[test]
    fn test_top_n_empty_table() {
        assert!(top_n(&[], GroupKey::Description, Measure::Quantity, 10).is_empty());
    }

    #[test]
    fn test_top_n_fewer_keys_than_n() {
        let records = vec![record("Pão", 10.0, 25.0), record("Leite", 4.0, 20.0)];
        let ranking = top_n(&records, GroupKey::Description, Measure::Quantity, 10);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].key, "Pão");
        assert_eq!(ranking[0].value, 10.0);
    }

    #[test]
    fn test_top_n_sums_and_sorts_descending() {
        let records = vec![
            record("Pão", 2.0, 5.0),
            record("Leite", 9.0, 45.0),
            record("Pão", 4.0, 10.0),
        ];
        let ranking = top_n(&records, GroupKey::Description, Measure::Quantity, 2);
        assert_eq!(ranking[0].key, "Leite");
        assert_eq!(ranking[0].value, 9.0);
        assert_eq!(ranking[1].key, "Pão");
        assert_eq!(ranking[1].value, 6.0);
    }

    #[test]
    fn test_top_n_stable_tie_break() {
        let records = vec![
            record("Bolo", 5.0, 1.0),
            record("Alface", 5.0, 1.0),
            record("Carne", 5.0, 1.0),
        ];
        let ranking = top_n(&records, GroupKey::Description, Measure::Quantity, 3);
        let keys: Vec<&str> = ranking.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["Bolo", "Alface", "Carne"]);
    }

    #[test]
    fn test_summarize_first_internal_code_wins() {
        let mut first = record("Pão", 2.0, 5.0);
        first.internal_code = None;
        let mut second = record("Pão", 3.0, 7.5);
        second.internal_code = Some("1001".to_string());
        let mut third = record("Pão", 1.0, 2.5);
        third.internal_code = Some("9999".to_string());

        let rows = summarize(&[first, second, third], GroupKey::Description);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, 6.0);
        assert_eq!(rows[0].total_sale_value, 15.0);
        assert_eq!(rows[0].internal_code.as_deref(), Some("1001"));
    }

    #[test]
    fn test_totals_empty_and_missing_values() {
        assert_eq!(totals(&[]), Totals::default());

        let mut r = LossRecord::new("Pão", 2.0);
        r.total_sale_value = None;
        let t = totals(&[r]);
        assert_eq!(t.quantity, 2.0);
        assert_eq!(t.total_sale_value, 0.0);
        assert_eq!(t.record_count, 1);
    }

    #[test]
    fn test_cross_tab_by_month() {
        let mut jan_a = record("Pão", 1.0, 10.0);
        jan_a.set_date(NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
        let mut jan_b = record("Pão", 1.0, 15.0);
        jan_b.set_date(NaiveDate::from_ymd_opt(2023, 1, 20).unwrap());
        let mut mar = record("Pão", 1.0, 30.0);
        mar.set_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        let dateless = record("Pão", 1.0, 99.0);

        let cells = cross_tab(
            &[jan_a, jan_b, mar, dateless],
            TimeBucket::Month,
            Measure::TotalSaleValue,
        );

        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].year, 2023);
        assert_eq!(cells[0].bucket, 1);
        assert_eq!(cells[0].value, 25.0);
        assert_eq!(cells[1].year, 2024);
        assert_eq!(cells[1].bucket, 3);
    }
}
