// ==========================================
// Perdas Dashboard - Domain Layer
// ==========================================
// Entities and value types only. No I/O, no engine logic.
// ==========================================

pub mod record;
pub mod types;

pub use record::{CrossTabCell, LossRecord, RankEntry, SummaryRow, Totals, TrendPoint};
pub use types::{CurrencyDialect, GroupKey, Measure, TimeBucket};
