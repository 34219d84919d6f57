// ==========================================
// 工厂生产跟踪系统 - 生产历史查询 API
// ==========================================
// 职责: 历史视图过滤、汇总统计、总览计数
// 说明: 过滤/汇总委托引擎层纯函数，本层只做数据装配
// ==========================================

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiResult;
use crate::domain::batch::Batch;
use crate::engine::history::{self, HistoryFilter, HistorySummary};
use crate::repository::batch_repo::BatchRepository;

// ==========================================
// HistoryApi - 生产历史查询 API
// ==========================================

/// 生产历史查询 API
pub struct HistoryApi {
    batch_repo: Arc<BatchRepository>,
}

impl HistoryApi {
    /// 创建新的 HistoryApi 实例
    pub fn new(batch_repo: Arc<BatchRepository>) -> Self {
        Self { batch_repo }
    }

    /// 按过滤条件查询历史视图
    ///
    /// # 返回
    /// - HistoryView: 匹配批次（最新在前）+ 汇总统计 + 账本是否为空
    ///
    /// 空结果是合法输出；ledger_empty 用于区分“还没有任何批次”
    /// 与“有批次但没有匹配项”两种空态提示。
    pub fn query(&self, filter: &HistoryFilter) -> ApiResult<HistoryView> {
        let all = self.batch_repo.list_all()?;
        let ledger_empty = all.is_empty();

        let now = Utc::now();
        let matched = history::filter_batches(&all, filter, now);
        let summary = history::summarize(&matched);

        Ok(HistoryView {
            batches: matched.into_iter().map(BatchInfo::from).collect(),
            summary,
            ledger_empty,
        })
    }

    /// 生产总览计数（工作台顶部卡片）
    ///
    /// # 返回
    /// - ProductionTotals: 累计总件数 + 当日件数
    pub fn production_totals(&self) -> ApiResult<ProductionTotals> {
        let all = self.batch_repo.list_all()?;
        let today = Utc::now().date_naive();

        let total_pieces: i64 = all.iter().map(|b| b.pieces).sum();
        let today_pieces: i64 = all
            .iter()
            .filter(|b| b.calendar_day() == today)
            .map(|b| b.pieces)
            .sum();

        Ok(ProductionTotals {
            total_pieces,
            today_pieces,
        })
    }
}

// ==========================================
// DTO 类型定义
// ==========================================

/// 历史视图返回值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryView {
    /// 匹配批次（按创建时间倒序）
    pub batches: Vec<BatchInfo>,

    /// 汇总统计
    pub summary: HistorySummary,

    /// 账本是否完全为空（用于空态提示文案）
    pub ledger_empty: bool,
}

/// 批次展示信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInfo {
    pub batch_id: String,
    pub sku_id: String,
    pub sku_code: String,
    pub sku_name: String,
    pub batch_number: String,
    pub pieces: i64,
    /// 创建时间（RFC3339）
    pub created_at: String,
}

impl From<Batch> for BatchInfo {
    fn from(batch: Batch) -> Self {
        Self {
            batch_id: batch.batch_id,
            sku_id: batch.sku_id,
            sku_code: batch.sku_code,
            sku_name: batch.sku_name,
            batch_number: batch.batch_number,
            pieces: batch.pieces,
            created_at: batch.created_at.to_rfc3339(),
        }
    }
}

/// 生产总览计数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionTotals {
    /// 累计总件数
    pub total_pieces: i64,

    /// 当日件数
    pub today_pieces: i64,
}
