// ==========================================
// 工厂生产跟踪系统 - SKU 领域模型
// ==========================================
// 红线: code 全局唯一（大小写不敏感），入库前统一大写
// 生命周期: 创建后不可变，不支持更新/删除
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Sku - 产品 SKU 主数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sku {
    pub sku_id: String,              // SKU 唯一标识（UUID）
    pub code: String,                // SKU 编码（已归一化为大写）
    pub name: String,                // 产品名称
    pub description: Option<String>, // 描述（可选）
    pub created_at: DateTime<Utc>,   // 创建时间
    pub created_by: Option<String>,  // 创建人（操作员标识）
}

impl Sku {
    /// 构造新 SKU：分配 UUID、取当前时间
    ///
    /// 注意: 入参应已完成 trim/大写归一化与唯一性校验（API 层职责）
    pub fn new(
        code: String,
        name: String,
        description: Option<String>,
        created_by: Option<String>,
    ) -> Self {
        Self {
            sku_id: uuid::Uuid::new_v4().to_string(),
            code,
            name,
            description,
            created_at: Utc::now(),
            created_by,
        }
    }
}
