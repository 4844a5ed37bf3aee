// ==========================================
// Perdas Dashboard - Dashboard API
// ==========================================
// The surface the presentation layer consumes: per-sheet normalized
// tables (cached per sheet), period-scoped views, trend and seasonal
// feeds. Period selection is always an explicit argument; no ambient
// session state lives below this layer.
// ==========================================

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::config::sheet_schema::{ColumnRole, WorkbookProfile};
use crate::domain::record::{CrossTabCell, LossRecord, RankEntry, SummaryRow, Totals, TrendPoint};
use crate::domain::types::{GroupKey, Measure, TimeBucket};
use crate::engine::aggregate::{cross_tab, summarize, top_n, totals};
use crate::engine::period::{filter_by_period, PeriodSpec};
use crate::engine::series::trend_points;
use crate::importer::normalizer::normalize;
use crate::importer::workbook::{load_sheet, ExcelWorkbook, SheetSource};

// ==========================================
// View DTOs
// ==========================================

/// Everything one dashboard page needs for a sheet + period selection.
#[derive(Debug, Clone, Serialize)]
pub struct SheetView {
    pub sheet: String,
    pub period: PeriodSpec,
    /// Explicit "no data" signal: false means every list below is empty
    /// and the page must render its empty state instead of blank charts.
    pub has_data: bool,
    pub totals: Totals,
    pub top_by_quantity: Vec<RankEntry>,
    pub top_by_sale_value: Vec<RankEntry>,
    /// Only for variants carrying cost columns.
    pub top_by_cost_value: Option<Vec<RankEntry>>,
    /// Only for variants carrying the prevention tag.
    pub top_by_prevention: Option<Vec<RankEntry>>,
    pub summary: Vec<SummaryRow>,
    pub records: Vec<LossRecord>,
}

/// Monthly trend feed for one sheet.
#[derive(Debug, Clone, Serialize)]
pub struct TrendView {
    pub sheet: String,
    pub measure: Measure,
    pub points: Vec<TrendPoint>,
}

/// Seasonal year × bucket heatmap feed for one sheet.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonalView {
    pub sheet: String,
    pub bucket: TimeBucket,
    pub measure: Measure,
    pub cells: Vec<CrossTabCell>,
}

// ==========================================
// DashboardApi
// ==========================================

/// Facade over one workbook. Normalized tables are cached per sheet for
/// the lifetime of the instance (one instance per session); aggregate
/// views are recomputed on every call.
pub struct DashboardApi {
    source: Box<dyn SheetSource>,
    profile: WorkbookProfile,
    cache: HashMap<String, Arc<Vec<LossRecord>>>,
}

impl DashboardApi {
    pub fn new(source: Box<dyn SheetSource>, profile: WorkbookProfile) -> Self {
        Self {
            source,
            profile,
            cache: HashMap::new(),
        }
    }

    /// Opens an Excel workbook with the given profile.
    pub fn open_excel<P: AsRef<Path>>(path: P, profile: WorkbookProfile) -> ApiResult<Self> {
        let source = ExcelWorkbook::open(path)?;
        Ok(Self::new(Box::new(source), profile))
    }

    /// Sheets the profile knows about, in configured order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.profile.sheet_names()
    }

    /// Normalized record set of a sheet; loaded and normalized once,
    /// then served from the per-sheet cache.
    pub fn normalized(&mut self, sheet: &str) -> ApiResult<Arc<Vec<LossRecord>>> {
        if let Some(records) = self.cache.get(sheet) {
            return Ok(Arc::clone(records));
        }

        let schema = self
            .profile
            .schema(sheet)
            .ok_or_else(|| ApiError::UnknownSheet(sheet.to_string()))?
            .clone();

        let raw = load_sheet(self.source.as_mut(), sheet, &schema)?;
        let records = Arc::new(normalize(&raw));
        info!(sheet, records = records.len(), "sheet normalized");

        self.cache.insert(sheet.to_string(), Arc::clone(&records));
        Ok(records)
    }

    /// Distinct prevention tags of a sheet, first-occurrence order.
    /// Feeds the dashboard's multiselect filter.
    pub fn prevention_tags(&mut self, sheet: &str) -> ApiResult<Vec<String>> {
        let records = self.normalized(sheet)?;
        let mut tags: Vec<String> = Vec::new();
        for record in records.iter() {
            if let Some(tag) = &record.prevention_tag {
                if !tags.iter().any(|t| t == tag) {
                    tags.push(tag.clone());
                }
            }
        }
        Ok(tags)
    }

    /// The main per-sheet view: totals, rankings, summary and detail
    /// records for an explicit period. `prevention_filter`, when
    /// non-empty, restricts to records tagged with any of the given
    /// prevention tags.
    pub fn sheet_view(
        &mut self,
        sheet: &str,
        period: &PeriodSpec,
        top: usize,
        prevention_filter: &[String],
    ) -> ApiResult<SheetView> {
        let (has_cost, has_prevention) = {
            let schema = self
                .profile
                .schema(sheet)
                .ok_or_else(|| ApiError::UnknownSheet(sheet.to_string()))?;
            (
                schema.has_cost_columns(),
                schema.has_role(ColumnRole::PreventionTag),
            )
        };

        let records = self.normalized(sheet)?;
        let mut scoped = filter_by_period(&records, period);
        if !prevention_filter.is_empty() {
            scoped.retain(|record| {
                record
                    .prevention_tag
                    .as_deref()
                    .map_or(false, |tag| prevention_filter.iter().any(|f| f == tag))
            });
        }

        let view = SheetView {
            sheet: sheet.to_string(),
            period: period.clone(),
            has_data: !scoped.is_empty(),
            totals: totals(&scoped),
            top_by_quantity: top_n(&scoped, GroupKey::Description, Measure::Quantity, top),
            top_by_sale_value: top_n(&scoped, GroupKey::Description, Measure::TotalSaleValue, top),
            top_by_cost_value: has_cost
                .then(|| top_n(&scoped, GroupKey::Description, Measure::TotalCostValue, top)),
            top_by_prevention: has_prevention
                .then(|| top_n(&scoped, GroupKey::PreventionTag, Measure::TotalSaleValue, top)),
            summary: summarize(&scoped, GroupKey::Description),
            records: scoped,
        };
        Ok(view)
    }

    /// Monthly trend with rolling average and month-over-month change.
    /// Spans every period (the trend chart is never period-scoped).
    pub fn trend_view(
        &mut self,
        sheet: &str,
        measure: Measure,
        window: usize,
    ) -> ApiResult<TrendView> {
        let records = self.normalized(sheet)?;
        Ok(TrendView {
            sheet: sheet.to_string(),
            measure,
            points: trend_points(&records, measure, window),
        })
    }

    /// Seasonal year × month-or-week matrix over all periods.
    pub fn seasonal_view(
        &mut self,
        sheet: &str,
        bucket: TimeBucket,
        measure: Measure,
    ) -> ApiResult<SeasonalView> {
        let records = self.normalized(sheet)?;
        Ok(SeasonalView {
            sheet: sheet.to_string(),
            bucket,
            measure,
            cells: cross_tab(&records, bucket, measure),
        })
    }
}
