// ==========================================
// 工厂生产跟踪系统 - 历史过滤与汇总引擎
// ==========================================
// 红线: 纯函数，不做任何数据访问与状态变更
// 过滤条件之间为逻辑与（AND）
// ==========================================

use crate::domain::batch::Batch;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// DateWindow - 相对日期窗口
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateWindow {
    /// 不限时间
    All,
    /// 当日（UTC 日历日相等，非 24 小时窗口）
    Today,
    /// 最近 7 天（created_at >= now - 7d）
    Last7Days,
    /// 最近 30 天（created_at >= now - 30d）
    Last30Days,
}

impl DateWindow {
    /// 判定批次是否落在窗口内
    pub fn contains(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            DateWindow::All => true,
            DateWindow::Today => created_at.date_naive() == now.date_naive(),
            DateWindow::Last7Days => created_at >= now - Duration::days(7),
            DateWindow::Last30Days => created_at >= now - Duration::days(30),
        }
    }
}

// ==========================================
// HistoryFilter - 历史查询过滤条件
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryFilter {
    /// 自由文本搜索（大小写不敏感，匹配 SKU 编码/名称/批次号）
    pub search: Option<String>,
    /// 精确匹配 SKU
    pub sku_id: Option<String>,
    /// 日期窗口
    pub date_window: DateWindow,
}

impl Default for HistoryFilter {
    fn default() -> Self {
        Self {
            search: None,
            sku_id: None,
            date_window: DateWindow::All,
        }
    }
}

impl HistoryFilter {
    /// 判定单个批次是否满足全部条件
    pub fn matches(&self, batch: &Batch, now: DateTime<Utc>) -> bool {
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() {
                let hit = batch.sku_code.to_lowercase().contains(&needle)
                    || batch.sku_name.to_lowercase().contains(&needle)
                    || batch.batch_number.to_lowercase().contains(&needle);
                if !hit {
                    return false;
                }
            }
        }

        if let Some(sku_id) = &self.sku_id {
            if &batch.sku_id != sku_id {
                return false;
            }
        }

        self.date_window.contains(batch.created_at, now)
    }
}

// ==========================================
// HistorySummary - 汇总统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// 匹配批次数
    pub total_batches: usize,
    /// 匹配批次件数合计
    pub total_pieces: i64,
    /// 匹配批次涉及的去重 SKU 数
    pub unique_skus: usize,
}

// ==========================================
// 过滤 / 排序 / 汇总
// ==========================================

/// 过滤批次并按创建时间倒序（历史视图：最新在前）
pub fn filter_batches(batches: &[Batch], filter: &HistoryFilter, now: DateTime<Utc>) -> Vec<Batch> {
    let mut matched: Vec<Batch> = batches
        .iter()
        .filter(|b| filter.matches(b, now))
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matched
}

/// 过滤指定日历日（可选指定 SKU）的批次，按创建时间正序（报表视图：时间顺序）
pub fn filter_for_day(batches: &[Batch], day: NaiveDate, sku_id: Option<&str>) -> Vec<Batch> {
    let mut matched: Vec<Batch> = batches
        .iter()
        .filter(|b| b.calendar_day() == day)
        .filter(|b| sku_id.map_or(true, |id| b.sku_id == id))
        .cloned()
        .collect();
    matched.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    matched
}

/// 汇总统计（空集合是合法输入，返回全零）
pub fn summarize(batches: &[Batch]) -> HistorySummary {
    let unique: HashSet<&str> = batches.iter().map(|b| b.sku_id.as_str()).collect();
    HistorySummary {
        total_batches: batches.len(),
        total_pieces: batches.iter().map(|b| b.pieces).sum(),
        unique_skus: unique.len(),
    }
}
