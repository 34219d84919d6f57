// ==========================================
// 工厂生产跟踪系统 - 生产批次数据仓储
// ==========================================
// 红线: Repository 不含过滤/汇总逻辑（引擎层职责）
// 例外: 批次号分配是存储层原子原语——“读当日最大号 + 插入”必须在
//       同一事务内完成，否则并发写入会产生重复批次号
// ==========================================

use crate::domain::batch::Batch;
use crate::engine::batch_number;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sku_repo::parse_timestamp;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// BatchRepository - 生产批次仓储
// ==========================================
/// 生产批次仓储
/// 职责: 管理 batches 表的插入与查询，读取时联表填充 SKU 冗余字段
pub struct BatchRepository {
    conn: Arc<Mutex<Connection>>,
}

impl BatchRepository {
    /// 创建新的 BatchRepository 实例
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

    /// 创建批次并分配批次号（原子）
    ///
    /// 同一事务内:
    /// 1. 读取 SKU 冗余字段（不存在则 NotFound）
    /// 2. 取该 SKU 当日已有批次号的最大值，+1 后 3 位补零
    /// 3. 插入批次记录
    ///
    /// # 返回
    /// - Ok(Batch): 含已分配批次号的完整记录
    pub fn create_with_generated_number(
        &self,
        sku_id: &str,
        pieces: i64,
        created_by: Option<&str>,
    ) -> RepositoryResult<Batch> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        // 1) SKU 冗余字段
        let sku_row: Option<(String, String)> = tx
            .query_row(
                "SELECT code, name FROM skus WHERE sku_id = ?1",
                params![sku_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let (sku_code, sku_name) = sku_row.ok_or_else(|| RepositoryError::NotFound {
            entity: "Sku".to_string(),
            id: sku_id.to_string(),
        })?;

        // 2) 当日批次号（日历日按 UTC 计）
        let now = Utc::now();
        let day = now.date_naive().to_string();
        let mut stmt = tx.prepare(
            r#"
            SELECT batch_number FROM batches
            WHERE sku_id = ?1 AND date(created_at) = ?2
            "#,
        )?;
        let existing = stmt
            .query_map(params![sku_id, day], |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<Vec<String>>>()?;
        drop(stmt);

        let number = batch_number::next_batch_number(existing.iter().map(|s| s.as_str()));

        // 3) 插入
        let batch = Batch {
            batch_id: uuid::Uuid::new_v4().to_string(),
            sku_id: sku_id.to_string(),
            sku_code,
            sku_name,
            batch_number: number,
            pieces,
            created_at: now,
            created_by: created_by.map(|s| s.to_string()),
        };
        tx.execute(
            r#"
            INSERT INTO batches (batch_id, sku_id, batch_number, pieces, created_at, created_by)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                batch.batch_id,
                batch.sku_id,
                batch.batch_number,
                batch.pieces,
                batch.created_at.to_rfc3339(),
                batch.created_by,
            ],
        )?;

        tx.commit()?;
        Ok(batch)
    }

    /// 查询全部批次（联表 SKU，按创建时间倒序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Batch>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT b.batch_id, b.sku_id, s.code, s.name,
                   b.batch_number, b.pieces, b.created_at, b.created_by
            FROM batches b
            JOIN skus s ON s.sku_id = b.sku_id
            ORDER BY b.created_at DESC
            "#,
        )?;

        let batches = stmt
            .query_map([], map_batch_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(batches)
    }

}

// ==========================================
// 辅助函数
// ==========================================

/// 行映射: batches ⋈ skus → Batch
fn map_batch_row(row: &Row<'_>) -> SqliteResult<Batch> {
    Ok(Batch {
        batch_id: row.get(0)?,
        sku_id: row.get(1)?,
        sku_code: row.get(2)?,
        sku_name: row.get(3)?,
        batch_number: row.get(4)?,
        pieces: row.get(5)?,
        created_at: parse_timestamp(&row.get::<_, String>(6)?),
        created_by: row.get(7)?,
    })
}
