//! 广告投放决策服务入口

use std::sync::Arc;

use delivery_service::{
    AppState, DecisionService, MetricsReporter, PgCampaignRepository, routes,
};
use targeting_shared::{config::AppConfig, database::Database, observability};
use tokio::net::TcpListener;
use tracing::info;

const SERVICE_NAME: &str = "delivery-service";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(SERVICE_NAME)?;

    let guard = observability::init(&config.observability)?;

    info!(
        environment = %config.environment,
        strategy = config.delivery.strategy.as_str(),
        "Starting {} on {}",
        SERVICE_NAME,
        config.server_addr()
    );

    let db = Database::connect(&config.database).await?;
    if config.database.run_migrations {
        db.run_migrations().await?;
    }

    let repo = Arc::new(PgCampaignRepository::new(
        db.pool().clone(),
        config.delivery.strategy,
    ));
    let decision_service = Arc::new(DecisionService::new(
        repo,
        Arc::new(MetricsReporter),
        config.delivery.query_timeout(),
    ));

    let state = AppState::new(&config.service_name, decision_service)
        .with_database(db.clone())
        .with_metrics(guard.metrics_handle());

    let app = routes::app(state, config.server.request_timeout());

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 收到 SIGTERM 或 Ctrl+C 后停止接收新连接，等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// 监听关闭信号
///
/// K8s 通过 SIGTERM 通知 Pod 停止；本地开发通过 Ctrl+C。
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "注册 Ctrl+C 处理器失败");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "注册 SIGTERM 处理器失败");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
