// ==========================================
// Perdas Dashboard - Dashboard API Tests
// ==========================================
// The facade the presentation layer calls: per-sheet views, trend and
// seasonal feeds, caching and error surfacing.
// ==========================================


use std::sync::Arc;

use perdas_dashboard::engine::PeriodSpec;
use perdas_dashboard::{ApiError, DashboardApi, Measure, TimeBucket};

fn spoilage_api() -> DashboardApi {
    DashboardApi::new(
        Box::new(test_helpers::spoilage_workbook()),
        test_helpers::spoilage_profile(),
    )
}

fn prevention_api() -> DashboardApi {
    DashboardApi::new(
        Box::new(test_helpers::prevention_workbook()),
        test_helpers::prevention_profile(),
    )
}

#[test]
fn test_sheet_view_month_period() {
    let mut api = spoilage_api();
    let view = api
        .sheet_view(
            "Avarias Padaria",
            &PeriodSpec::month(3).unwrap(),
            10,
            &[],
        )
        .unwrap();

    assert!(view.has_data);
    // March fixture: Pão x10 @ 2,50 and Bolo x2 @ 12,00.
    assert_eq!(view.totals.quantity, 12.0);
    assert_eq!(view.totals.total_sale_value, 49.0);
    assert_eq!(view.totals.total_cost_value, 24.0);

    assert_eq!(view.top_by_quantity[0].key, "Pão");
    assert_eq!(view.top_by_sale_value[0].key, "Pão");
    assert_eq!(view.top_by_sale_value[0].value, 25.0);

    // Spoilage sheets carry cost columns but no prevention tag.
    assert!(view.top_by_cost_value.is_some());
    assert!(view.top_by_prevention.is_none());

    let summary = &view.summary;
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].key, "Pão");
    assert_eq!(summary[0].internal_code.as_deref(), Some("1001"));
}

#[test]
fn test_sheet_view_empty_period_signals_no_data() {
    let mut api = spoilage_api();
    let view = api
        .sheet_view(
            "Avarias Padaria",
            &PeriodSpec::month(12).unwrap(),
            10,
            &[],
        )
        .unwrap();

    assert!(!view.has_data);
    assert!(view.records.is_empty());
    assert!(view.top_by_quantity.is_empty());
    assert_eq!(view.totals.record_count, 0);
}

#[test]
fn test_sheet_view_unknown_sheet() {
    let mut api = spoilage_api();
    let err = api
        .sheet_view("Avarias Açougue", &PeriodSpec::All, 10, &[])
        .unwrap_err();
    assert!(matches!(err, ApiError::UnknownSheet(_)));
}

#[test]
fn test_prevention_filter_restricts_records() {
    let mut api = prevention_api();

    let tags = api.prevention_tags("Furtos Recuperados").unwrap();
    assert_eq!(tags, vec!["Câmeras".to_string(), "Etiqueta".to_string()]);

    let filter = vec!["Câmeras".to_string()];
    let view = api
        .sheet_view("Furtos Recuperados", &PeriodSpec::All, 5, &filter)
        .unwrap();

    assert_eq!(view.records.len(), 2);
    assert!(view
        .records
        .iter()
        .all(|r| r.prevention_tag.as_deref() == Some("Câmeras")));
    assert_eq!(view.totals.total_sale_value, 179.80);

    // Prevention sheets expose the prevention ranking, no cost ranking.
    let by_prevention = view.top_by_prevention.unwrap();
    assert_eq!(by_prevention.len(), 1);
    assert_eq!(by_prevention[0].key, "Câmeras");
    assert!(view.top_by_cost_value.is_none());
}

#[test]
fn test_trend_view_rolling_average_and_change() {
    let mut api = spoilage_api();
    let trend = api
        .trend_view("Avarias Padaria", Measure::Quantity, 3)
        .unwrap();

    // March (Pão 10 + Bolo 2) then April (Pão 4).
    assert_eq!(trend.points.len(), 2);
    assert_eq!(trend.points[0].value, 12.0);
    assert_eq!(trend.points[0].change_pct, 0.0);
    assert_eq!(trend.points[1].value, 4.0);
    assert_eq!(trend.points[1].rolling_avg, 8.0);
    assert!((trend.points[1].change_pct - (-66.666_666_666_666_67)).abs() < 1e-9);
}

#[test]
fn test_seasonal_view_by_month() {
    let mut api = spoilage_api();
    let seasonal = api
        .seasonal_view("Avarias Padaria", TimeBucket::Month, Measure::Quantity)
        .unwrap();

    assert_eq!(seasonal.cells.len(), 2);
    assert_eq!(seasonal.cells[0].year, 2024);
    assert_eq!(seasonal.cells[0].bucket, 3);
    assert_eq!(seasonal.cells[0].value, 12.0);
    assert_eq!(seasonal.cells[1].bucket, 4);
}

#[test]
fn test_normalized_table_is_cached_per_sheet() {
    let mut api = spoilage_api();
    let first = api.normalized("Avarias Padaria").unwrap();
    let second = api.normalized("Avarias Padaria").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_sheet_view_serializes_for_the_presentation_layer() {
    let mut api = spoilage_api();
    let view = api
        .sheet_view("Avarias Padaria", &PeriodSpec::month(3).unwrap(), 10, &[])
        .unwrap();

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["sheet"], "Avarias Padaria");
    assert_eq!(json["has_data"], true);
    assert!(json["top_by_quantity"].is_array());
    assert!(json["top_by_prevention"].is_null());
}
