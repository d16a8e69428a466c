//! 广告投放决策服务
//!
//! 根据请求的应用、国家和操作系统返回可投放的上线活动。
//!
//! ## 模块结构
//!
//! - `repository`: 活动数据访问（PostgreSQL 下推 / 进程内，内存实现）
//! - `service`: 投放决策编排与指标上报
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由与中间件装配
//! - `state`: 应用状态
//! - `dto`: 请求和响应结构
//! - `error`: 错误类型定义

pub mod dto;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{DeliveryError, Result};
pub use repository::{CampaignRepositoryTrait, InMemoryCampaignRepository, PgCampaignRepository};
pub use service::{Decision, DecisionKind, DecisionReporter, DecisionService, MetricsReporter, NoopReporter};
pub use state::AppState;
