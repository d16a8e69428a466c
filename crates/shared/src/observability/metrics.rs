//! Prometheus 指标模块
//!
//! 基于 metrics crate 和 metrics-exporter-prometheus 实现指标收集与导出。
//! 指标由业务路由上的 `/metrics` 端点渲染，供 Prometheus 抓取。

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

use super::ObservabilityConfig;

/// 与 Prometheus 客户端默认值一致的直方图桶
const DEFAULT_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// 全局 Prometheus handle，recorder 只能安装一次
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// 指标渲染句柄
#[derive(Clone)]
pub struct MetricsHandle {
    inner: PrometheusHandle,
}

impl MetricsHandle {
    /// 渲染 Prometheus 文本格式
    pub fn render(&self) -> String {
        self.inner.render()
    }
}

/// 安装 Prometheus recorder
///
/// 重复调用返回首次安装的 handle。
pub fn init(config: &ObservabilityConfig) -> Result<MetricsHandle> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(MetricsHandle {
            inner: handle.clone(),
        });
    }

    let handle = PrometheusBuilder::new()
        .set_buckets(&DEFAULT_BUCKETS)?
        .install_recorder()?;

    let handle = PROMETHEUS_HANDLE.get_or_init(|| handle).clone();

    register_common_metrics(&config.service_name);

    Ok(MetricsHandle { inner: handle })
}

/// 注册指标描述
///
/// 这些描述会出现在 /metrics 端点的 HELP 注释中
fn register_common_metrics(service_name: &str) {
    metrics::describe_counter!("http_requests_total", "Total number of HTTP requests");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );

    metrics::describe_counter!(
        "delivery_requests_total",
        "Total number of delivery requests"
    );
    metrics::describe_histogram!(
        "delivery_request_duration_seconds",
        "Duration of delivery request handling in seconds"
    );
    metrics::describe_histogram!(
        "db_query_duration_seconds",
        "Duration of database queries in seconds"
    );

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

/// 获取全局 Prometheus handle
pub fn get_handle() -> Option<MetricsHandle> {
    PROMETHEUS_HANDLE.get().map(|handle| MetricsHandle {
        inner: handle.clone(),
    })
}

// ============================================================================
// 指标记录函数
// ============================================================================

/// 记录 HTTP 请求
#[inline]
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status_str = status.to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str
    )
    .record(duration_secs);
}

/// 记录投放决策结果
#[inline]
pub fn record_delivery_request(status: &str, duration_secs: f64) {
    metrics::counter!("delivery_requests_total", "status" => status.to_string()).increment(1);

    metrics::histogram!(
        "delivery_request_duration_seconds",
        "status" => status.to_string()
    )
    .record(duration_secs);
}

/// 记录候选查询耗时
#[inline]
pub fn record_db_query(duration_secs: f64) {
    metrics::histogram!("db_query_duration_seconds").record(duration_secs);
}
