// ==========================================
// 工厂生产跟踪系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与构造规则
// 红线: 不含数据访问逻辑,不含过滤/汇总逻辑
// ==========================================

pub mod batch;
pub mod sku;

// 重导出核心类型
pub use batch::Batch;
pub use sku::Sku;
