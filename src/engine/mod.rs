// ==========================================
// Perdas Dashboard - Period & Aggregation Engine
// ==========================================
// Pure query layer over normalized records. No state, no I/O; the only
// error path is a malformed period specification.
// ==========================================

pub mod aggregate;
pub mod error;
pub mod period;
pub mod series;

pub use aggregate::{cross_tab, summarize, top_n, totals};
pub use error::InvalidPeriodSpec;
pub use period::{filter_by_period, PeriodSpec, WEEK_BUCKETS};
pub use series::{monthly_series, period_over_period_change, rolling_average, trend_points};
