//! 决策结果上报
//!
//! 决策服务每次得出结论后调用上报器，生产环境接 Prometheus，测试中使用空实现或 mock。

use std::time::Duration;

use targeting_shared::observability::metrics;

use super::DecisionKind;

/// 决策指标上报接口
#[cfg_attr(test, mockall::automock)]
pub trait DecisionReporter: Send + Sync {
    /// 记录一次决策结果及总耗时
    fn record_decision(&self, kind: DecisionKind, elapsed: Duration);

    /// 记录一次候选检索耗时（含超时）
    fn record_query(&self, elapsed: Duration);
}

/// Prometheus 上报器
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsReporter;

impl DecisionReporter for MetricsReporter {
    fn record_decision(&self, kind: DecisionKind, elapsed: Duration) {
        metrics::record_delivery_request(kind.as_str(), elapsed.as_secs_f64());
    }

    fn record_query(&self, elapsed: Duration) {
        metrics::record_db_query(elapsed.as_secs_f64());
    }
}

/// 不上报任何指标
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl DecisionReporter for NoopReporter {
    fn record_decision(&self, _kind: DecisionKind, _elapsed: Duration) {}

    fn record_query(&self, _elapsed: Duration) {}
}
