// ==========================================
// 工厂生产跟踪系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免“部分模块外键开启/部分不开启”
// - 统一 busy_timeout，减少偶发 busy 错误
// - 统一建表语句，保证测试库与运行库结构一致
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库表结构（幂等）
///
/// 表:
/// - skus: 产品 SKU 主数据（code 大小写不敏感唯一）
/// - batches: 生产批次记录（外键引用 skus）
/// - config_kv: 配置键值表（scope + key）
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS skus (
            sku_id      TEXT PRIMARY KEY,
            code        TEXT NOT NULL UNIQUE COLLATE NOCASE,
            name        TEXT NOT NULL,
            description TEXT,
            created_at  TEXT NOT NULL,
            created_by  TEXT
        );

        CREATE TABLE IF NOT EXISTS batches (
            batch_id     TEXT PRIMARY KEY,
            sku_id       TEXT NOT NULL REFERENCES skus(sku_id),
            batch_number TEXT NOT NULL,
            pieces       INTEGER NOT NULL,
            created_at   TEXT NOT NULL,
            created_by   TEXT
        );

        -- 批次号按 (SKU, 日历日) 分配，查询按 SKU + 创建时间过滤
        CREATE INDEX IF NOT EXISTS idx_batches_sku_created ON batches(sku_id, created_at);
        CREATE INDEX IF NOT EXISTS idx_batches_created ON batches(created_at);

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key      TEXT NOT NULL,
            value    TEXT NOT NULL,
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )?;
    Ok(())
}

/// 打开连接并保证表结构存在（应用启动/测试共用入口）
pub fn open_and_init(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = open_sqlite_connection(db_path)?;
    init_schema(&conn)?;
    Ok(conn)
}
