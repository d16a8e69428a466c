//! 定向规则引擎
//!
//! 广告投放决策的纯计算核心，不包含任何 I/O：
//! - 活动与定向规则的领域模型
//! - 请求属性归一化与校验
//! - 按维度（国家 / 操作系统 / 应用）独立求值的 include/exclude 集合匹配
//! - 候选活动的筛选、去重与排序

pub mod axis;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod normalizer;

pub use axis::Axis;
pub use error::ValidationError;
pub use evaluator::{RuleEvaluator, Verdict};
pub use models::{Campaign, CampaignStatus, DeliveryRequest, TargetingRule};
pub use normalizer::AttributeNormalizer;
