// ==========================================
// Perdas Dashboard - Time Series Helpers
// ==========================================
// Monthly series extraction, trailing moving average and
// period-over-period change. Degenerate inputs yield well-defined
// sentinel results, never errors.
// ==========================================

use std::collections::BTreeMap;

use crate::domain::record::{LossRecord, TrendPoint};
use crate::domain::types::Measure;

/// Chronological (year, month, summed measure) buckets. Records without
/// calendar fields are skipped.
pub fn monthly_series(records: &[LossRecord], measure: Measure) -> Vec<(i32, u32, f64)> {
    let mut buckets: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for record in records {
        let (Some(year), Some(month)) = (record.year, record.month) else {
            continue;
        };
        *buckets.entry((year, month)).or_insert(0.0) += measure.of(record);
    }
    buckets
        .into_iter()
        .map(|((year, month), value)| (year, month, value))
        .collect()
}

/// Trailing moving average. The first `window - 1` points average over
/// however many points exist so far; a zero window behaves as 1.
pub fn rolling_average(series: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(series.len());
    for i in 0..series.len() {
        let start = (i + 1).saturating_sub(window);
        let slice = &series[start..=i];
        out.push(slice.iter().sum::<f64>() / slice.len() as f64);
    }
    out
}

/// Percentage change vs. the previous point. The first point and any
/// point following a zero value yield the 0 "no change" sentinel; the
/// result never carries an infinity or NaN.
pub fn period_over_period_change(series: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(series.len());
    for i in 0..series.len() {
        if i == 0 {
            out.push(0.0);
            continue;
        }
        let previous = series[i - 1];
        if previous == 0.0 {
            out.push(0.0);
            continue;
        }
        let change = (series[i] - previous) / previous * 100.0;
        out.push(if change.is_finite() { change } else { 0.0 });
    }
    out
}

/// Assembles the trend-chart feed: one point per (year, month) with the
/// summed measure, its rolling average and the month-over-month change.
pub fn trend_points(records: &[LossRecord], measure: Measure, window: usize) -> Vec<TrendPoint> {
    let series = monthly_series(records, measure);
    let values: Vec<f64> = series.iter().map(|(_, _, v)| *v).collect();
    let averages = rolling_average(&values, window);
    let changes = period_over_period_change(&values);

    series
        .into_iter()
        .zip(averages)
        .zip(changes)
        .map(|(((year, month, value), rolling_avg), change_pct)| TrendPoint {
            year,
            month,
            value,
            rolling_avg,
            change_pct,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_rolling_average_partial_window() {
        assert_eq!(rolling_average(&[10.0, 20.0, 30.0], 3), vec![10.0, 15.0, 20.0]);
    }

    #[test]
    fn test_rolling_average_degenerate_windows() {
        assert_eq!(rolling_average(&[5.0, 7.0], 0), vec![5.0, 7.0]);
        assert!(rolling_average(&[], 3).is_empty());
    }

    #[test]
    fn test_period_over_period_change_zero_division() {
        assert_eq!(period_over_period_change(&[0.0, 50.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_period_over_period_change_basic() {
        let changes = period_over_period_change(&[100.0, 150.0, 75.0]);
        assert_eq!(changes[0], 0.0);
        assert_eq!(changes[1], 50.0);
        assert_eq!(changes[2], -50.0);
    }

    #[test]
    fn test_monthly_series_is_chronological() {
        let mut feb = LossRecord::new("Pão", 1.0);
        feb.total_sale_value = Some(20.0);
        feb.set_date(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        let mut jan = LossRecord::new("Pão", 1.0);
        jan.total_sale_value = Some(10.0);
        jan.set_date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        let mut dec = LossRecord::new("Pão", 1.0);
        dec.total_sale_value = Some(5.0);
        dec.set_date(NaiveDate::from_ymd_opt(2023, 12, 10).unwrap());

        let series = monthly_series(&[feb, jan, dec], crate::domain::Measure::TotalSaleValue);
        assert_eq!(
            series,
            vec![(2023, 12, 5.0), (2024, 1, 10.0), (2024, 2, 20.0)]
        );
    }

    #[test]
    fn test_trend_points_combine_series_helpers() {
        let mut jan = LossRecord::new("Pão", 2.0);
        jan.set_date(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        let mut feb = LossRecord::new("Pão", 4.0);
        feb.set_date(NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());

        let points = trend_points(&[jan, feb], crate::domain::Measure::Quantity, 2);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, 2.0);
        assert_eq!(points[0].change_pct, 0.0);
        assert_eq!(points[1].rolling_avg, 3.0);
        assert_eq!(points[1].change_pct, 100.0);
    }
}
