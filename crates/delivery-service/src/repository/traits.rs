//! 仓储 Trait 定义
//!
//! 服务层依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;
use targeting_engine::{Campaign, DeliveryRequest};

use crate::error::Result;

/// 活动仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepositoryTrait: Send + Sync {
    /// 查找可投放给该请求的上线活动，按 ID 升序且去重
    async fn find_eligible(&self, request: &DeliveryRequest) -> Result<Vec<Campaign>>;

    /// 按 ID 获取单个活动（不限状态）
    async fn get_by_id(&self, id: &str) -> Result<Option<Campaign>>;

    /// 列出所有上线活动，按 ID 升序
    async fn list_active(&self) -> Result<Vec<Campaign>>;
}
