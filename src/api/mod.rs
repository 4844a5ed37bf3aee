// ==========================================
// Perdas Dashboard - API Layer
// ==========================================
// Facade and DTOs consumed by the presentation layer. Rendering, filter
// widgets and session state live outside this crate.
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod format;

pub use dashboard_api::{DashboardApi, SeasonalView, SheetView, TrendView};
pub use error::{ApiError, ApiResult};
