// ==========================================
// 工厂生产跟踪系统 - 生产批次领域模型
// ==========================================
// 红线: batch_number 在 (SKU, 日历日) 范围内唯一且单调递增，起始 "001"
// 生命周期: 创建后不可变
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Batch - 生产批次记录
// ==========================================
// sku_code/sku_name 为展示用冗余字段，读取时由仓储联表填充
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub batch_id: String,           // 批次唯一标识（UUID）
    pub sku_id: String,             // 所属 SKU（外键）
    pub sku_code: String,           // SKU 编码（联表冗余）
    pub sku_name: String,           // 产品名称（联表冗余）
    pub batch_number: String,       // 批次号（按 SKU + 日历日 递增，3位补零）
    pub pieces: i64,                // 生产件数
    pub created_at: DateTime<Utc>,  // 创建时间
    pub created_by: Option<String>, // 创建人（操作员标识）
}

impl Batch {
    /// 批次创建时间所在的 UTC 日历日
    pub fn calendar_day(&self) -> chrono::NaiveDate {
        self.created_at.date_naive()
    }
}
