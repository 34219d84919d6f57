// ==========================================
// 工厂生产跟踪系统 - 生产报表导出 API
// ==========================================
// 职责: 按日期 + SKU 过滤生成报表（CSV，行尾带合计行）
// 约束: 导出为管理员操作，必须持有 AccessGate 签发的令牌
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::access_gate::AdminToken;
use crate::api::error::{ApiError, ApiResult};
use crate::engine::history::{self, HistorySummary};
use crate::repository::batch_repo::BatchRepository;
use crate::repository::sku_repo::SkuRepository;

// ==========================================
// ReportApi - 生产报表导出 API
// ==========================================

/// 生产报表导出 API
pub struct ReportApi {
    batch_repo: Arc<BatchRepository>,
    sku_repo: Arc<SkuRepository>,
}

impl ReportApi {
    /// 创建新的 ReportApi 实例
    pub fn new(batch_repo: Arc<BatchRepository>, sku_repo: Arc<SkuRepository>) -> Self {
        Self {
            batch_repo,
            sku_repo,
        }
    }

    /// 报表预览汇总（管理面板汇总卡片，不写文件）
    ///
    /// # 参数
    /// - report_date: 报表日历日
    /// - sku_id: 限定 SKU（None = 全部）
    pub fn daily_summary(
        &self,
        report_date: NaiveDate,
        sku_id: Option<&str>,
    ) -> ApiResult<HistorySummary> {
        let all = self.batch_repo.list_all()?;
        let matched = history::filter_for_day(&all, report_date, sku_id);
        Ok(history::summarize(&matched))
    }

    /// 导出生产报表
    ///
    /// # 参数
    /// - token: 管理员令牌（AccessGate 签发）
    /// - report_date: 报表日历日
    /// - sku_id: 限定 SKU（None = 全部）
    /// - out_dir: 输出目录
    ///
    /// # 返回
    /// - Ok(ReportFile): 报表路径、文件名与汇总
    /// - Err(ApiError::NoData): 所选条件下没有生产记录，不生成空报表
    ///
    /// # 报表结构
    /// - 每批次一行（按创建时间正序），列: 序号/日期/时间/SKU编码/产品名称/批次号/生产件数
    /// - 行尾合计行（产品名称列为 TOTAL，件数列为合计）
    /// - 文件名编码报表日期与 SKU 过滤条件
    pub fn export(
        &self,
        token: &AdminToken,
        report_date: NaiveDate,
        sku_id: Option<&str>,
        out_dir: &Path,
    ) -> ApiResult<ReportFile> {
        let all = self.batch_repo.list_all()?;
        let matched = history::filter_for_day(&all, report_date, sku_id);

        if matched.is_empty() {
            return Err(ApiError::NoData(format!(
                "{}没有符合条件的生产记录",
                report_date
            )));
        }

        let summary = history::summarize(&matched);
        let file_name = self.report_file_name(report_date, sku_id)?;
        let path = out_dir.join(&file_name);

        let mut writer = csv::Writer::from_path(&path)
            .map_err(|e| ApiError::ExportError(format!("无法创建报表文件: {}", e)))?;

        writer
            .write_record([
                "Sr. No.",
                "Date",
                "Time",
                "SKU Code",
                "Product Name",
                "Batch Number",
                "Pieces Produced",
            ])
            .map_err(|e| ApiError::ExportError(e.to_string()))?;

        for (index, batch) in matched.iter().enumerate() {
            writer
                .write_record([
                    (index + 1).to_string(),
                    batch.created_at.format("%Y-%m-%d").to_string(),
                    batch.created_at.format("%H:%M:%S").to_string(),
                    batch.sku_code.clone(),
                    batch.sku_name.clone(),
                    batch.batch_number.clone(),
                    batch.pieces.to_string(),
                ])
                .map_err(|e| ApiError::ExportError(e.to_string()))?;
        }

        // 合计行
        let total_pieces = summary.total_pieces.to_string();
        writer
            .write_record(["", "", "", "", "TOTAL", "", total_pieces.as_str()])
            .map_err(|e| ApiError::ExportError(e.to_string()))?;

        writer
            .flush()
            .map_err(|e| ApiError::ExportError(e.to_string()))?;

        tracing::info!(
            token_id = %token.token_id(),
            file = %path.display(),
            total_batches = summary.total_batches,
            total_pieces = summary.total_pieces,
            "生产报表已导出"
        );

        Ok(ReportFile {
            path,
            file_name,
            summary,
        })
    }

    /// 报表文件名: Production-Report_{DD-MM-YYYY}_{All-SKUs|编码}.csv
    fn report_file_name(&self, report_date: NaiveDate, sku_id: Option<&str>) -> ApiResult<String> {
        let sku_part = match sku_id {
            None => "All-SKUs".to_string(),
            Some(id) => self
                .sku_repo
                .find_by_id(id)?
                .map(|s| s.code)
                .unwrap_or_else(|| "Unknown".to_string()),
        };
        Ok(format!(
            "Production-Report_{}_{}.csv",
            report_date.format("%d-%m-%Y"),
            sku_part
        ))
    }
}

// ==========================================
// DTO 类型定义
// ==========================================

/// 报表导出结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFile {
    /// 报表文件完整路径
    pub path: PathBuf,

    /// 文件名（编码了日期与 SKU 过滤条件）
    pub file_name: String,

    /// 报表汇总
    pub summary: HistorySummary,
}
