// ==========================================
// 工厂生产跟踪系统 - 配置层
// ==========================================
// 职责: 系统配置的读写入口
// ==========================================

pub mod config_manager;

pub use config_manager::ConfigManager;
