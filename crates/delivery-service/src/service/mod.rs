//! 服务层
//!
//! 投放决策的编排：归一化 → 候选检索（带超时）→ 结果分类 → 指标上报。

mod decision_service;
mod reporter;

pub use decision_service::{Decision, DecisionKind, DecisionService};
pub use reporter::{DecisionReporter, MetricsReporter, NoopReporter};

