//! 统一可观测性模块
//!
//! 提供 metrics、logging 的统一初始化和管理。
//! 所有入口通过单一入口点配置可观测性，确保一致的指标命名。

pub mod metrics;
pub mod middleware;
pub mod tracing;

use ::tracing::info;
use anyhow::Result;
use serde::Deserialize;

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// 服务名称，用于标识日志和指标的来源
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// 日志级别（如 "info", "debug"），RUST_LOG 优先
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// 是否启用 JSON 格式日志
    #[serde(default)]
    pub json_logs: bool,

    /// 是否安装 Prometheus recorder
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_service_name() -> String {
    "unknown-service".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_level: default_log_level(),
            json_logs: false,
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

impl ObservabilityConfig {
    /// 注入服务名
    pub fn with_service_name(mut self, service_name: &str) -> Self {
        self.service_name = service_name.to_string();
        self
    }
}

/// 可观测性资源守卫
///
/// 持有 Prometheus handle 的生命周期，供 /metrics 端点渲染。
pub struct ObservabilityGuard {
    metrics_handle: Option<metrics::MetricsHandle>,
}

impl ObservabilityGuard {
    /// 创建一个空的 Guard（用于测试或禁用可观测性时）
    pub fn empty() -> Self {
        Self {
            metrics_handle: None,
        }
    }

    /// 获取指标 handle，未启用 metrics 时为 None
    pub fn metrics_handle(&self) -> Option<metrics::MetricsHandle> {
        self.metrics_handle.clone()
    }
}

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        info!("Shutting down observability...");
    }
}

/// 统一初始化可观测性
///
/// 初始化顺序：
/// 1. Tracing（日志）
/// 2. Metrics（Prometheus 指标，可关闭）
///
/// # Example
///
/// ```ignore
/// use targeting_shared::{config::AppConfig, observability};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = AppConfig::load("delivery-service")?;
///     let _guard = observability::init(&config.observability)?;
///     Ok(())
/// }
/// ```
pub fn init(config: &ObservabilityConfig) -> Result<ObservabilityGuard> {
    tracing::init(config)?;

    info!(
        service = %config.service_name,
        metrics_enabled = config.metrics_enabled,
        json_logs = config.json_logs,
        "Observability initialized"
    );

    let metrics_handle = if config.metrics_enabled {
        Some(metrics::init(config)?)
    } else {
        None
    };

    Ok(ObservabilityGuard { metrics_handle })
}
