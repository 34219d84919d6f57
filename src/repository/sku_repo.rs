// ==========================================
// 工厂生产跟踪系统 - SKU 数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑，只负责数据访问
// 约束: 所有查询使用参数化，防止 SQL 注入
// ==========================================

use crate::domain::sku::Sku;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// SkuRepository - SKU 仓储
// ==========================================
/// SKU 仓储
/// 职责: 管理 skus 表的插入与查询
pub struct SkuRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SkuRepository {
    /// 创建新的 SkuRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_and_init(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 创建 SKU
    pub fn create(&self, sku: &Sku) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO skus (sku_id, code, name, description, created_at, created_by)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                sku.sku_id,
                sku.code,
                sku.name,
                sku.description,
                sku.created_at.to_rfc3339(),
                sku.created_by,
            ],
        )?;
        Ok(())
    }

    /// 按主键查询
    pub fn find_by_id(&self, sku_id: &str) -> RepositoryResult<Option<Sku>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT sku_id, code, name, description, created_at, created_by
            FROM skus
            WHERE sku_id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![sku_id], map_sku_row);
        match result {
            Ok(sku) => Ok(Some(sku)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 按编码查询（大小写不敏感）
    pub fn find_by_code(&self, code: &str) -> RepositoryResult<Option<Sku>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT sku_id, code, name, description, created_at, created_by
            FROM skus
            WHERE code = ?1 COLLATE NOCASE
            "#,
        )?;

        let result = stmt.query_row(params![code], map_sku_row);
        match result {
            Ok(sku) => Ok(Some(sku)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 查询全部 SKU（按创建时间倒序，最新在前）
    pub fn list_all(&self) -> RepositoryResult<Vec<Sku>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT sku_id, code, name, description, created_at, created_by
            FROM skus
            ORDER BY created_at DESC
            "#,
        )?;

        let skus = stmt
            .query_map([], map_sku_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(skus)
    }

}

// ==========================================
// 辅助函数
// ==========================================

/// 行映射: skus 表 → Sku
fn map_sku_row(row: &Row<'_>) -> SqliteResult<Sku> {
    Ok(Sku {
        sku_id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        created_at: parse_timestamp(&row.get::<_, String>(4)?),
        created_by: row.get(5)?,
    })
}

/// 解析 RFC3339 时间戳（异常值回退到 UNIX 纪元）
pub(crate) fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH)
}
