//! 探针与指标处理器

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::warn;

use crate::dto::{HealthResponse, ReadinessChecks, ReadinessResponse};
use crate::state::AppState;

/// 存活探针：进程正常即返回 healthy
pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}

/// 就绪探针：检查数据库连接
pub async fn ready(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let database = match &state.database {
        Some(db) => match db.health_check().await {
            Ok(()) => "ok",
            Err(e) => {
                warn!(error = %e, code = e.code(), "Database readiness check failed");
                "fail"
            }
        },
        None => "skipped",
    };

    Json(ReadinessResponse {
        status: if database == "fail" { "degraded" } else { "ok" }.to_string(),
        service: state.service_name.clone(),
        checks: ReadinessChecks {
            database: database.to_string(),
        },
    })
}

/// Prometheus 指标
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}
