// ==========================================
// 工厂生产跟踪系统 - SKU 管理 API
// ==========================================
// 职责: SKU 录入校验、唯一性检查、列表查询
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::sku::Sku;
use crate::repository::sku_repo::SkuRepository;

/// SKU 编码最小长度
const MIN_CODE_LEN: usize = 2;

// ==========================================
// SkuApi - SKU 管理 API
// ==========================================

/// SKU 管理 API
///
/// 职责：
/// 1. 录入校验（必填、长度、唯一性）
/// 2. 编码归一化（trim + 大写）
/// 3. 列表查询
pub struct SkuApi {
    sku_repo: Arc<SkuRepository>,
}

impl SkuApi {
    /// 创建新的 SkuApi 实例
    pub fn new(sku_repo: Arc<SkuRepository>) -> Self {
        Self { sku_repo }
    }

    /// 新增 SKU
    ///
    /// # 参数
    /// - code: SKU 编码（trim 后至少 2 字符，入库统一大写）
    /// - name: 产品名称（必填）
    /// - description: 描述（可选）
    /// - operator: 操作员标识（可选，用于记录归属）
    ///
    /// # 返回
    /// - Ok(Sku): 创建成功的 SKU
    /// - Err(ApiError::InvalidInput): 校验失败，注册表不变
    /// - Err(ApiError::BusinessRuleViolation): 编码重复（大小写不敏感），注册表不变
    pub fn add_sku(
        &self,
        code: &str,
        name: &str,
        description: Option<&str>,
        operator: Option<&str>,
    ) -> ApiResult<Sku> {
        // 参数校验（任何失败都不触及存储）
        let code = code.trim();
        if code.is_empty() {
            return Err(ApiError::InvalidInput("SKU编码不能为空".to_string()));
        }
        if code.chars().count() < MIN_CODE_LEN {
            return Err(ApiError::InvalidInput(format!(
                "SKU编码至少{}个字符",
                MIN_CODE_LEN
            )));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("产品名称不能为空".to_string()));
        }

        let code = code.to_uppercase();
        let description = description
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .map(|d| d.to_string());

        // 唯一性检查（大小写不敏感）
        if self.sku_repo.find_by_code(&code)?.is_some() {
            return Err(ApiError::BusinessRuleViolation(format!(
                "SKU编码已存在: {}",
                code
            )));
        }

        let sku = Sku::new(
            code,
            name.to_string(),
            description,
            operator.map(|s| s.to_string()),
        );
        self.sku_repo.create(&sku)?;

        tracing::info!(sku_id = %sku.sku_id, code = %sku.code, "SKU已创建");
        Ok(sku)
    }

    /// 查询全部 SKU（最新在前）
    pub fn list_skus(&self) -> ApiResult<Vec<Sku>> {
        Ok(self.sku_repo.list_all()?)
    }

    /// 按主键查询 SKU
    pub fn get_sku(&self, sku_id: &str) -> ApiResult<Option<Sku>> {
        if sku_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("SKU标识不能为空".to_string()));
        }
        Ok(self.sku_repo.find_by_id(sku_id)?)
    }
}
