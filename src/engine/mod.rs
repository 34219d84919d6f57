// ==========================================
// 工厂生产跟踪系统 - 引擎层
// ==========================================
// 职责: 纯业务规则（批次号计算、历史过滤与汇总）
// 红线: 不含数据访问逻辑
// ==========================================

pub mod batch_number;
pub mod history;

// 重导出核心类型
pub use batch_number::{format_batch_number, next_batch_number};
pub use history::{filter_batches, filter_for_day, summarize, DateWindow, HistoryFilter, HistorySummary};
