// ==========================================
// 工厂生产跟踪系统 - 管理员访问门禁
// ==========================================
// 职责: 共享口令校验，签发管理员令牌
// 设计: 校验通过后签发能力令牌（AdminToken），受保护操作只认令牌，
//       不在每次调用时重复比对口令
// 已知弱点: 明文共享口令、无会话过期、无限流（单机单用户场景接受）
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;

// ==========================================
// AdminToken - 管理员能力令牌
// ==========================================

/// 管理员能力令牌
///
/// 只能由 AccessGate::authenticate 签发（构造器私有），
/// 持有令牌即代表通过了口令校验。
#[derive(Debug, Clone)]
pub struct AdminToken {
    token_id: String,
    granted_at: DateTime<Utc>,
}

impl AdminToken {
    fn issue() -> Self {
        Self {
            token_id: uuid::Uuid::new_v4().to_string(),
            granted_at: Utc::now(),
        }
    }

    /// 令牌标识（日志/审计用）
    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    /// 签发时间
    pub fn granted_at(&self) -> DateTime<Utc> {
        self.granted_at
    }
}

// ==========================================
// AccessGate - 访问门禁
// ==========================================

/// 管理员访问门禁
pub struct AccessGate {
    config: Arc<ConfigManager>,
}

impl AccessGate {
    /// 创建新的 AccessGate 实例
    pub fn new(config: Arc<ConfigManager>) -> Self {
        Self { config }
    }

    /// 校验口令并签发管理员令牌
    ///
    /// # 返回
    /// - Ok(AdminToken): 口令正确
    /// - Err(ApiError::AccessDenied): 口令错误，不签发令牌
    pub fn authenticate(&self, input: &str) -> ApiResult<AdminToken> {
        let secret = self
            .config
            .admin_access_secret()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;

        if input != secret {
            tracing::warn!("管理员口令校验失败");
            return Err(ApiError::AccessDenied("口令错误".to_string()));
        }

        let token = AdminToken::issue();
        tracing::info!(token_id = %token.token_id(), "管理员令牌已签发");
        Ok(token)
    }
}
