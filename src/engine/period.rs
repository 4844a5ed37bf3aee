// ==========================================
// Perdas Dashboard - Period Specification & Filtering
// ==========================================
// Explicit period selection: the spec is always a parameter, never read
// from ambient session state. Week ranges are the fixed calendar
// quartiles the dashboards expose (1-7 / 8-14 / 15-21 / 22-31).
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::record::LossRecord;
use crate::engine::error::InvalidPeriodSpec;

/// The four fixed day-range buckets offered per month. The last bucket
/// runs to 31 and simply absorbs whatever days a shorter month has.
pub const WEEK_BUCKETS: [(u32, u32); 4] = [(1, 7), (8, 14), (15, 21), (22, 31)];

// ==========================================
// PeriodSpec
// ==========================================

/// Requested reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodSpec {
    /// No period restriction; feeds year-over-year and seasonal views.
    All,
    /// Calendar month, 1-12.
    Month(u32),
    /// Day range within a month, both ends inclusive.
    WeekRange {
        month: u32,
        day_start: u32,
        day_end: u32,
    },
}

impl PeriodSpec {
    /// Validated month spec.
    pub fn month(month: u32) -> Result<Self, InvalidPeriodSpec> {
        check_month(month, &month.to_string())?;
        Ok(PeriodSpec::Month(month))
    }

    /// Validated week-range spec.
    pub fn week_range(
        month: u32,
        day_start: u32,
        day_end: u32,
    ) -> Result<Self, InvalidPeriodSpec> {
        let input = format!("{month}: {day_start}-{day_end}");
        check_month(month, &input)?;
        if day_start < 1 || day_end > 31 || day_start > day_end {
            return Err(InvalidPeriodSpec::new(
                input,
                "day range must satisfy 1 <= start <= end <= 31",
            ));
        }
        Ok(PeriodSpec::WeekRange {
            month,
            day_start,
            day_end,
        })
    }

    /// Parses the day-range strings the dashboards render, e.g.
    /// `"Dia 22-31"` or `"22-31"`.
    pub fn parse_week_range(month: u32, text: &str) -> Result<Self, InvalidPeriodSpec> {
        let stripped = text.trim().trim_start_matches("Dia").trim();
        let (start, end) = stripped.split_once('-').ok_or_else(|| {
            InvalidPeriodSpec::new(text, "expected `<start>-<end>` day range")
        })?;

        let day_start: u32 = start
            .trim()
            .parse()
            .map_err(|_| InvalidPeriodSpec::new(text, "start day is not a number"))?;
        let day_end: u32 = end
            .trim()
            .parse()
            .map_err(|_| InvalidPeriodSpec::new(text, "end day is not a number"))?;

        Self::week_range(month, day_start, day_end)
    }

    /// The four fixed week buckets of a month, in calendar order.
    pub fn week_buckets(month: u32) -> Result<Vec<Self>, InvalidPeriodSpec> {
        WEEK_BUCKETS
            .iter()
            .map(|(start, end)| Self::week_range(month, *start, *end))
            .collect()
    }

    /// Whether a record falls inside this period. Records without
    /// calendar fields never match a scoped period.
    pub fn matches(&self, record: &LossRecord) -> bool {
        match self {
            PeriodSpec::All => true,
            PeriodSpec::Month(month) => record.month == Some(*month),
            PeriodSpec::WeekRange {
                month,
                day_start,
                day_end,
            } => {
                record.month == Some(*month)
                    && record
                        .day
                        .map_or(false, |day| day >= *day_start && day <= *day_end)
            }
        }
    }
}

fn check_month(month: u32, input: &str) -> Result<(), InvalidPeriodSpec> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(InvalidPeriodSpec::new(input, "month must be in 1..=12"))
    }
}

// ==========================================
// filter_by_period
// ==========================================

/// Pure subset query. Empty input yields empty output.
pub fn filter_by_period(records: &[LossRecord], spec: &PeriodSpec) -> Vec<LossRecord> {
    records
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect()
}
