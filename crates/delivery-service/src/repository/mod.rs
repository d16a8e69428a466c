//! 活动数据访问层
//!
//! - `PgCampaignRepository`: PostgreSQL 实现，支持下推和进程内两种匹配策略
//! - `InMemoryCampaignRepository`: 内存实现，用于测试和本地运行
//!
//! 两种实现遵循同一契约：只返回上线活动，按活动 ID 升序，同一活动只出现一次。

mod campaign_repo;
mod memory_repo;
mod traits;

pub use campaign_repo::{PgCampaignRepository, pushdown_query};
pub use memory_repo::InMemoryCampaignRepository;
pub use traits::*;
