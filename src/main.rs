// ==========================================
// 工厂生产跟踪系统 - 主入口
// ==========================================
// 技术栈: Rust + SQLite
// ==========================================

use production_tracker::app::{get_default_db_path, AppState};
use production_tracker::logging;

fn main() {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", production_tracker::APP_NAME);
    tracing::info!("系统版本: {}", production_tracker::VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    // 创建AppState
    let app_state = match AppState::new(db_path) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("无法初始化AppState: {}", e);
            std::process::exit(1);
        }
    };

    // 启动检查: 输出当前数据概况
    match app_state.sku_api.list_skus() {
        Ok(skus) => tracing::info!("已登记 SKU 数: {}", skus.len()),
        Err(e) => tracing::warn!("SKU 查询失败: {}", e),
    }
    match app_state.history_api.production_totals() {
        Ok(totals) => tracing::info!(
            "累计生产件数: {}，当日生产件数: {}",
            totals.total_pieces,
            totals.today_pieces
        ),
        Err(e) => tracing::warn!("生产总览查询失败: {}", e),
    }

    tracing::info!("初始化完成，库模式使用: production_tracker::app::AppState");
}
