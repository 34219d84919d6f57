// ==========================================
// 工厂生产跟踪系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口，校验输入并转换错误
// ==========================================

pub mod access_gate;
pub mod batch_api;
pub mod error;
pub mod history_api;
pub mod report_api;
pub mod sku_api;

// 重导出核心类型
pub use access_gate::{AccessGate, AdminToken};
pub use batch_api::BatchApi;
pub use error::{ApiError, ApiResult};
pub use history_api::{BatchInfo, HistoryApi, HistoryView, ProductionTotals};
pub use report_api::{ReportApi, ReportFile};
pub use sku_api::SkuApi;
