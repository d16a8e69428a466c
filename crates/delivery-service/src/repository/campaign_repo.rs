//! PostgreSQL 活动仓储
//!
//! 下推策略的 WHERE 子句由 [`Axis`] 表机械生成，列名与求值器使用的维度一一对应；
//! 进程内策略取回全部上线活动及规则行，交给 [`RuleEvaluator`] 逐条求值。

use std::sync::OnceLock;
use std::time::Instant;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use targeting_engine::{
    Axis, Campaign, CampaignStatus, DeliveryRequest, RuleEvaluator, TargetingRule,
};
use targeting_shared::config::MatchStrategy;
use tracing::{debug, instrument};

use super::traits::CampaignRepositoryTrait;
use crate::error::{DeliveryError, Result};

/// campaigns 表行
#[derive(Debug, FromRow)]
struct CampaignRow {
    cid: String,
    name: String,
    img: String,
    cta: String,
    status: String,
}

impl From<CampaignRow> for Campaign {
    fn from(row: CampaignRow) -> Self {
        Campaign::new(
            row.cid,
            row.name,
            row.img,
            row.cta,
            CampaignStatus::from(row.status.as_str()),
        )
    }
}

/// 活动与规则的联表行
#[derive(Debug, FromRow)]
struct CandidateRow {
    cid: String,
    name: String,
    img: String,
    cta: String,
    status: String,
    include_country: Option<Vec<String>>,
    exclude_country: Option<Vec<String>>,
    include_os: Option<Vec<String>>,
    exclude_os: Option<Vec<String>>,
    include_app: Option<Vec<String>>,
    exclude_app: Option<Vec<String>>,
}

impl CandidateRow {
    fn into_pair(self) -> (Campaign, TargetingRule) {
        let rule = TargetingRule {
            campaign_id: self.cid.clone(),
            include_country: self.include_country,
            exclude_country: self.exclude_country,
            include_os: self.include_os,
            exclude_os: self.exclude_os,
            include_app: self.include_app,
            exclude_app: self.exclude_app,
        };
        let campaign = Campaign::new(
            self.cid,
            self.name,
            self.img,
            self.cta,
            CampaignStatus::from(self.status.as_str()),
        );
        (campaign, rule)
    }
}

/// 只折叠 ASCII 字母的 SQL 表达式，对应 Rust 端的 `to_ascii_lowercase`
fn ascii_fold_expr(column: &str) -> String {
    format!(
        "translate({}, 'ABCDEFGHIJKLMNOPQRSTUVWXYZ', 'abcdefghijklmnopqrstuvwxyz')",
        column
    )
}

/// 下推查询语句
///
/// 排序使用 C collation，与进程内按字节序排序的结果一致。
/// 参数按 [`Axis::ALL`] 顺序绑定，值为折叠后的请求属性。
/// NULL 或空数组表示该维度不限制。数组元素用 translate 只折叠 ASCII 字母，
/// 结果不受数据库 LC_CTYPE 影响，与进程内求值一致。
pub fn pushdown_query() -> &'static str {
    static QUERY: OnceLock<String> = OnceLock::new();
    QUERY.get_or_init(build_pushdown_query)
}

fn build_pushdown_query() -> String {
    let fold = ascii_fold_expr("v");
    let predicates: Vec<String> = Axis::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, axis)| {
            let param = i + 1;
            let include = axis.include_column();
            let exclude = axis.exclude_column();
            [
                format!(
                    "(tr.{include} IS NULL OR cardinality(tr.{include}) = 0 \
                     OR EXISTS (SELECT 1 FROM unnest(tr.{include}) v WHERE {fold} = ${param}))"
                ),
                format!(
                    "(tr.{exclude} IS NULL \
                     OR NOT EXISTS (SELECT 1 FROM unnest(tr.{exclude}) v WHERE {fold} = ${param}))"
                ),
            ]
        })
        .collect();

    format!(
        "SELECT c.cid, c.name, c.img, c.cta, c.status \
         FROM campaigns c \
         WHERE c.status = '{}' \
         AND EXISTS (SELECT 1 FROM targeting_rules tr WHERE tr.cid = c.cid AND {}) \
         ORDER BY c.cid COLLATE \"C\"",
        CampaignStatus::ACTIVE,
        predicates.join(" AND ")
    )
}

/// PostgreSQL 活动仓储
pub struct PgCampaignRepository {
    pool: PgPool,
    strategy: MatchStrategy,
}

impl PgCampaignRepository {
    pub fn new(pool: PgPool, strategy: MatchStrategy) -> Self {
        Self { pool, strategy }
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// 数据库完成状态过滤和集合匹配
    async fn find_pushdown(&self, request: &DeliveryRequest) -> Result<Vec<Campaign>> {
        let mut query = sqlx::query_as::<_, CampaignRow>(pushdown_query());
        for axis in Axis::ALL {
            query = query.bind(request.folded(axis));
        }

        let rows = query.fetch_all(&self.pool).await.map_err(map_row_error)?;

        Ok(rows.into_iter().map(Campaign::from).collect())
    }

    /// 取回全部上线活动及规则行，进程内求值
    async fn find_in_process(&self, request: &DeliveryRequest) -> Result<Vec<Campaign>> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT c.cid, c.name, c.img, c.cta, c.status,
                   tr.include_country, tr.exclude_country,
                   tr.include_os, tr.exclude_os,
                   tr.include_app, tr.exclude_app
            FROM campaigns c
            JOIN targeting_rules tr ON c.cid = tr.cid
            WHERE c.status = $1
            ORDER BY c.cid
            "#,
        )
        .bind(CampaignStatus::ACTIVE)
        .fetch_all(&self.pool)
        .await
        .map_err(map_row_error)?;

        debug!(candidates = rows.len(), "Loaded in-process candidates");

        Ok(RuleEvaluator::select_eligible(
            rows.into_iter().map(CandidateRow::into_pair),
            request,
        ))
    }
}

#[async_trait]
impl CampaignRepositoryTrait for PgCampaignRepository {
    #[instrument(skip(self), fields(strategy = self.strategy.as_str()))]
    async fn find_eligible(&self, request: &DeliveryRequest) -> Result<Vec<Campaign>> {
        let start = Instant::now();

        let campaigns = match self.strategy {
            MatchStrategy::Pushdown => self.find_pushdown(request).await?,
            MatchStrategy::InProcess => self.find_in_process(request).await?,
        };

        debug!(
            matched = campaigns.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Eligible campaigns fetched"
        );

        Ok(campaigns)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Option<Campaign>> {
        let row = sqlx::query_as::<_, CampaignRow>(
            r#"
            SELECT cid, name, img, cta, status
            FROM campaigns
            WHERE cid = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_row_error)?;

        Ok(row.map(Campaign::from))
    }

    #[instrument(skip(self))]
    async fn list_active(&self) -> Result<Vec<Campaign>> {
        let rows = sqlx::query_as::<_, CampaignRow>(
            r#"
            SELECT cid, name, img, cta, status
            FROM campaigns
            WHERE status = $1
            ORDER BY cid COLLATE "C"
            "#,
        )
        .bind(CampaignStatus::ACTIVE)
        .fetch_all(&self.pool)
        .await
        .map_err(map_row_error)?;

        Ok(rows.into_iter().map(Campaign::from).collect())
    }
}

/// 解码失败归为格式错误行，其余按数据库错误处理
fn map_row_error(err: sqlx::Error) -> DeliveryError {
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            DeliveryError::MalformedRow(err.to_string())
        }
        other => DeliveryError::Database(other),
    }
}
