//! 测试环境管理

use std::time::{Duration, Instant};

use anyhow::{Result, bail};

use super::api_client::DeliveryClient;

/// 测试环境配置
#[derive(Debug, Clone)]
pub struct TestEnvConfig {
    /// 投放服务地址
    pub delivery_service_url: String,
    /// 等待服务就绪的超时时间
    pub service_ready_timeout: Duration,
}

impl Default for TestEnvConfig {
    fn default() -> Self {
        Self {
            // 使用 127.0.0.1 而非 localhost，避免 IPv6 连接问题
            delivery_service_url: std::env::var("DELIVERY_SERVICE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".into()),
            service_ready_timeout: Duration::from_secs(30),
        }
    }
}

/// 测试环境
pub struct TestEnvironment {
    pub config: TestEnvConfig,
    pub api: DeliveryClient,
}

impl TestEnvironment {
    pub async fn setup() -> Result<Self> {
        Self::setup_with_config(TestEnvConfig::default()).await
    }

    pub async fn setup_with_config(config: TestEnvConfig) -> Result<Self> {
        let api = DeliveryClient::new(&config.delivery_service_url)?;
        let env = Self { config, api };
        env.wait_until_ready().await?;
        Ok(env)
    }

    /// 轮询存活探针直到服务可用
    async fn wait_until_ready(&self) -> Result<()> {
        let deadline = Instant::now() + self.config.service_ready_timeout;
        loop {
            if self.api.healthz().await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                bail!(
                    "delivery service at {} not ready within {:?}",
                    self.config.delivery_service_url,
                    self.config.service_ready_timeout
                );
            }
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
    }
}
