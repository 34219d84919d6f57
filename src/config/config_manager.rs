// ==========================================
// 工厂生产跟踪系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 管理员访问口令配置键
pub const KEY_ADMIN_ACCESS_SECRET: &str = "admin_access_secret";

/// 单批最大件数配置键
pub const KEY_MAX_PIECES_PER_BATCH: &str = "max_pieces_per_batch";

/// 管理员访问口令默认值
pub const DEFAULT_ADMIN_ACCESS_SECRET: &str = "admin123";

/// 单批最大件数默认值
pub const DEFAULT_MAX_PIECES_PER_BATCH: i64 = 10_000;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = crate::db::open_and_init(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }
        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值（scope_id='global'，存在则覆盖）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
            ON CONFLICT(scope_id, key) DO UPDATE SET value = excluded.value
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// 管理员访问口令（未配置时使用默认值）
    pub fn admin_access_secret(&self) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(KEY_ADMIN_ACCESS_SECRET)?
            .unwrap_or_else(|| DEFAULT_ADMIN_ACCESS_SECRET.to_string()))
    }

    /// 单批最大件数（未配置或解析失败时使用默认值）
    pub fn max_pieces_per_batch(&self) -> Result<i64, Box<dyn Error>> {
        let value = self
            .get_config_value(KEY_MAX_PIECES_PER_BATCH)?
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_MAX_PIECES_PER_BATCH);
        Ok(value)
    }
}
