//! 内存活动仓储
//!
//! 进程内策略的内存版本，数据集整体驻留内存，供测试和本地运行使用。

use async_trait::async_trait;
use dashmap::DashMap;
use targeting_engine::{Campaign, DeliveryRequest, RuleEvaluator, TargetingRule};

use super::traits::CampaignRepositoryTrait;
use crate::error::Result;

/// 内存活动仓储
#[derive(Default)]
pub struct InMemoryCampaignRepository {
    campaigns: DashMap<String, Campaign>,
    rules: DashMap<String, Vec<TargetingRule>>,
}

impl InMemoryCampaignRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以活动 + 规则对构造数据集
    pub fn with_dataset<I>(dataset: I) -> Self
    where
        I: IntoIterator<Item = (Campaign, TargetingRule)>,
    {
        let repo = Self::new();
        for (campaign, rule) in dataset {
            repo.insert_campaign(campaign);
            repo.add_rule(rule);
        }
        repo
    }

    /// 写入或覆盖活动
    pub fn insert_campaign(&self, campaign: Campaign) {
        self.campaigns.insert(campaign.id.clone(), campaign);
    }

    /// 追加一条规则行，同一活动可以有多条
    pub fn add_rule(&self, rule: TargetingRule) {
        self.rules
            .entry(rule.campaign_id.clone())
            .or_default()
            .push(rule);
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    /// 活动与规则的内连接，没有规则行的活动不出现
    fn candidates(&self) -> Vec<(Campaign, TargetingRule)> {
        let mut pairs = Vec::new();
        for entry in self.rules.iter() {
            if let Some(campaign) = self.campaigns.get(entry.key()) {
                for rule in entry.value() {
                    pairs.push((campaign.clone(), rule.clone()));
                }
            }
        }
        pairs
    }
}

#[async_trait]
impl CampaignRepositoryTrait for InMemoryCampaignRepository {
    async fn find_eligible(&self, request: &DeliveryRequest) -> Result<Vec<Campaign>> {
        Ok(RuleEvaluator::select_eligible(self.candidates(), request))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Campaign>> {
        Ok(self.campaigns.get(id).map(|c| c.value().clone()))
    }

    async fn list_active(&self) -> Result<Vec<Campaign>> {
        let mut active: Vec<Campaign> = self
            .campaigns
            .iter()
            .filter(|entry| entry.status.is_active())
            .map(|entry| entry.value().clone())
            .collect();
        active.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(active)
    }
}
