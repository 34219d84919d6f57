// ==========================================
// 工厂生产跟踪系统 - 生产批次录入 API
// ==========================================
// 职责: 批次录入校验、批次号自动分配、列表查询
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::batch::Batch;
use crate::repository::batch_repo::BatchRepository;
use crate::repository::sku_repo::SkuRepository;

// ==========================================
// BatchApi - 生产批次录入 API
// ==========================================

/// 生产批次录入 API
///
/// 职责：
/// 1. 录入校验（SKU 存在性、件数范围）
/// 2. 批次号分配（委托仓储原子原语，按 SKU + 日历日 递增）
/// 3. 列表查询
pub struct BatchApi {
    batch_repo: Arc<BatchRepository>,
    sku_repo: Arc<SkuRepository>,
    config: Arc<ConfigManager>,
}

impl BatchApi {
    /// 创建新的 BatchApi 实例
    pub fn new(
        batch_repo: Arc<BatchRepository>,
        sku_repo: Arc<SkuRepository>,
        config: Arc<ConfigManager>,
    ) -> Self {
        Self {
            batch_repo,
            sku_repo,
            config,
        }
    }

    /// 录入生产批次
    ///
    /// # 参数
    /// - sku_id: 所属 SKU（必须已存在）
    /// - pieces: 生产件数（正整数，上限由配置决定，默认 10000）
    /// - operator: 操作员标识（可选）
    ///
    /// # 返回
    /// - Ok(Batch): 含自动分配批次号的批次记录
    /// - Err(ApiError::InvalidInput): 件数非法，账本不变
    /// - Err(ApiError::NotFound): SKU 不存在，账本不变
    pub fn add_batch(
        &self,
        sku_id: &str,
        pieces: i64,
        operator: Option<&str>,
    ) -> ApiResult<Batch> {
        // 参数校验（任何失败都不触及存储）
        let sku_id = sku_id.trim();
        if sku_id.is_empty() {
            return Err(ApiError::InvalidInput("SKU标识不能为空".to_string()));
        }
        if pieces <= 0 {
            return Err(ApiError::InvalidInput(
                "生产件数必须为正整数".to_string(),
            ));
        }
        let max_pieces = self
            .config
            .max_pieces_per_batch()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        if pieces > max_pieces {
            return Err(ApiError::InvalidInput(format!(
                "单批件数不能超过{}",
                max_pieces
            )));
        }

        // SKU 存在性检查
        if self.sku_repo.find_by_id(sku_id)?.is_none() {
            return Err(ApiError::NotFound(format!("SKU(id={})不存在", sku_id)));
        }

        // 批次号分配与插入在同一事务内完成（避免读-写竞态）
        let batch = self
            .batch_repo
            .create_with_generated_number(sku_id, pieces, operator)?;

        tracing::info!(
            batch_id = %batch.batch_id,
            sku_code = %batch.sku_code,
            batch_number = %batch.batch_number,
            pieces,
            "生产批次已录入"
        );
        Ok(batch)
    }

    /// 查询全部批次（最新在前）
    pub fn list_batches(&self) -> ApiResult<Vec<Batch>> {
        Ok(self.batch_repo.list_all()?)
    }
}
