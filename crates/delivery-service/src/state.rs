//! 应用状态定义

use std::sync::Arc;

use targeting_shared::database::Database;
use targeting_shared::observability::metrics::MetricsHandle;

use crate::service::DecisionService;

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    /// 服务名，用于探针响应
    pub service_name: String,
    pub decision_service: Arc<DecisionService>,
    /// 内存数据集运行时为 None
    pub database: Option<Database>,
    /// 未启用 metrics 时为 None
    pub metrics: Option<MetricsHandle>,
}

impl AppState {
    pub fn new(service_name: impl Into<String>, decision_service: Arc<DecisionService>) -> Self {
        Self {
            service_name: service_name.into(),
            decision_service,
            database: None,
            metrics: None,
        }
    }

    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    pub fn with_metrics(mut self, metrics: Option<MetricsHandle>) -> Self {
        self.metrics = metrics;
        self
    }
}
