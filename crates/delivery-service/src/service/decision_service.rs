//! 投放决策服务
//!
//! 组合归一化器与活动仓储，对外只暴露四种结论：
//! 参数错误、无匹配、有匹配、内部错误。

use std::sync::Arc;
use std::time::{Duration, Instant};

use targeting_engine::{Campaign, DeliveryRequest, ValidationError};
use tracing::{error, info, instrument, warn};

use super::reporter::DecisionReporter;
use crate::error::{DeliveryError, Result};
use crate::repository::CampaignRepositoryTrait;

/// 决策结论
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// 请求参数缺失
    BadRequest(ValidationError),
    /// 没有可投放的活动
    NoMatch,
    /// 可投放活动，按 ID 升序
    Matched(Vec<Campaign>),
    /// 检索失败或超时，细节只进日志
    InternalError,
}

impl Decision {
    pub fn kind(&self) -> DecisionKind {
        match self {
            Self::BadRequest(_) => DecisionKind::BadRequest,
            Self::NoMatch => DecisionKind::NoMatch,
            Self::Matched(_) => DecisionKind::Matched,
            Self::InternalError => DecisionKind::InternalError,
        }
    }
}

/// 决策结论类别，用作指标标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionKind {
    BadRequest,
    NoMatch,
    Matched,
    InternalError,
}

impl DecisionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::NoMatch => "no_match",
            Self::Matched => "matched",
            Self::InternalError => "internal_error",
        }
    }
}

/// 投放决策服务
pub struct DecisionService {
    repo: Arc<dyn CampaignRepositoryTrait>,
    reporter: Arc<dyn DecisionReporter>,
    query_timeout: Duration,
}

impl DecisionService {
    pub fn new(
        repo: Arc<dyn CampaignRepositoryTrait>,
        reporter: Arc<dyn DecisionReporter>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            reporter,
            query_timeout,
        }
    }

    /// 对原始请求参数做出投放决策
    #[instrument(skip(self))]
    pub async fn decide(&self, app: &str, country: &str, os: &str) -> Decision {
        let start = Instant::now();

        let decision = self.resolve(app, country, os).await;

        let elapsed = start.elapsed();
        let kind = decision.kind();
        self.reporter.record_decision(kind, elapsed);

        let matched = match &decision {
            Decision::Matched(campaigns) => campaigns.len(),
            _ => 0,
        };
        info!(
            app = %app,
            country = %country,
            os = %os,
            outcome = kind.as_str(),
            matched,
            elapsed_ms = elapsed.as_millis() as u64,
            "Delivery decision made"
        );

        decision
    }

    async fn resolve(&self, app: &str, country: &str, os: &str) -> Decision {
        let request = match DeliveryRequest::parse(app, country, os) {
            Ok(request) => request,
            Err(e) => {
                warn!(reason = %e, "Rejected delivery request");
                return Decision::BadRequest(e);
            }
        };

        match self.retrieve(&request).await {
            Ok(campaigns) if campaigns.is_empty() => Decision::NoMatch,
            Ok(campaigns) => Decision::Matched(campaigns),
            Err(e) => {
                error!(
                    error = %e,
                    code = e.error_code(),
                    app = %request.app,
                    country = %request.country,
                    os = %request.os,
                    "Candidate retrieval failed"
                );
                Decision::InternalError
            }
        }
    }

    /// 带超时的候选检索，超时视为检索失败
    async fn retrieve(&self, request: &DeliveryRequest) -> Result<Vec<Campaign>> {
        let start = Instant::now();
        let result = tokio::time::timeout(self.query_timeout, self.repo.find_eligible(request)).await;
        self.reporter.record_query(start.elapsed());

        match result {
            Ok(campaigns) => campaigns,
            Err(_) => Err(DeliveryError::Timeout(self.query_timeout)),
        }
    }

    /// 获取单个活动
    #[instrument(skip(self))]
    pub async fn get_campaign(&self, id: &str) -> Result<Campaign> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| DeliveryError::CampaignNotFound(id.to_string()))
    }

    /// 列出全部上线活动
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<Campaign>> {
        self.repo.list_active().await
    }
}
