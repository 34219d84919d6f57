// ==========================================
// 工厂生产跟踪系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{AccessGate, BatchApi, HistoryApi, ReportApi, SkuApi};
use crate::config::ConfigManager;
use crate::repository::{BatchRepository, SkuRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源，
/// 所有组件共享同一个数据库连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// SKU 管理 API
    pub sku_api: Arc<SkuApi>,

    /// 生产批次录入 API
    pub batch_api: Arc<BatchApi>,

    /// 生产历史查询 API
    pub history_api: Arc<HistoryApi>,

    /// 生产报表导出 API
    pub report_api: Arc<ReportApi>,

    /// 管理员访问门禁
    pub access_gate: Arc<AccessGate>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库连接并初始化表结构
    /// 2. 初始化所有Repository
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let conn = crate::db::open_and_init(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let sku_repo = Arc::new(SkuRepository::from_connection(conn.clone()));
        let batch_repo = Arc::new(BatchRepository::from_connection(conn.clone()));

        // 配置管理器
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 初始化API层
        // ==========================================
        let sku_api = Arc::new(SkuApi::new(sku_repo.clone()));
        let batch_api = Arc::new(BatchApi::new(
            batch_repo.clone(),
            sku_repo.clone(),
            config_manager.clone(),
        ));
        let history_api = Arc::new(HistoryApi::new(batch_repo.clone()));
        let report_api = Arc::new(ReportApi::new(batch_repo, sku_repo));
        let access_gate = Arc::new(AccessGate::new(config_manager));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            sku_api,
            batch_api,
            history_api,
            report_api,
            access_gate,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 优先级
/// 1. 环境变量 PRODUCTION_TRACKER_DB_PATH（便于调试/测试/CI）
/// 2. 用户数据目录/production-tracker/production_tracker.db
/// 3. 回退: ./production_tracker.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("PRODUCTION_TRACKER_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./production_tracker.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("production-tracker");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("production_tracker.db");
        }
    }

    path.to_string_lossy().to_string()
}
