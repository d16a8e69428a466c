//! 投放服务端到端测试
//!
//! 针对运行中的 delivery-server（已执行种子迁移）验证：
//! - v1 / v2 两个入口的决策结果与状态码
//! - 活动查询接口
//! - 探针与指标端点
//!
//! ## 运行方式
//!
//! ```bash
//! DELIVERY_SERVICE_URL=http://127.0.0.1:8080 cargo test --test e2e -- --ignored
//! ```

pub mod api_client;
pub mod setup;
pub mod suites;

pub use api_client::DeliveryClient;
pub use setup::{TestEnvConfig, TestEnvironment};
