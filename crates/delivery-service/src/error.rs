//! 投放服务错误类型定义

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// 对外统一的内部错误提示
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// 投放服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("campaign not found")]
    CampaignNotFound(String),

    /// 候选查询超时
    #[error("candidate query timed out after {0:?}")]
    Timeout(Duration),

    /// 存储返回的行无法解释
    #[error("malformed row: {0}")]
    MalformedRow(String),

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
}

impl DeliveryError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::CampaignNotFound(_) => StatusCode::NOT_FOUND,
            Self::Timeout(_) | Self::MalformedRow(_) | Self::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 返回错误码（用于日志和指标）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CampaignNotFound(_) => "CAMPAIGN_NOT_FOUND",
            Self::Timeout(_) => "QUERY_TIMEOUT",
            Self::MalformedRow(_) => "MALFORMED_ROW",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl IntoResponse for DeliveryError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, code = self.error_code(), "请求处理失败");
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, DeliveryError>;
