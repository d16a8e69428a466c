//! 定向规则求值器
//!
//! 每个维度独立判断，再取合取：
//! 1. include 列表存在且不含请求值 → 不匹配
//! 2. exclude 列表存在且含请求值 → 不匹配
//! 3. 否则该维度通过
//!
//! exclude 与 include 互不依赖，两者同时命中同一值时 exclude 生效。
//! 所有比较只忽略 ASCII 字母的大小写，非 ASCII 字符按原样比较，
//! 与数据库下推查询的折叠方式一致。

use std::collections::BTreeMap;

use crate::axis::Axis;
use crate::models::{Campaign, DeliveryRequest, TargetingRule};

/// 单个活动的求值结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 可投放
    Eligible,
    /// 活动未上线
    Inactive,
    /// include 列表未命中
    NotIncluded(Axis),
    /// exclude 列表命中
    Excluded(Axis),
}

impl Verdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }
}

/// 定向规则求值器
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// 规则是否匹配请求（不考虑活动状态）
    pub fn matches(rule: &TargetingRule, request: &DeliveryRequest) -> bool {
        Self::check_rule(rule, request).is_none()
    }

    /// 活动 + 规则对请求的完整求值
    pub fn evaluate(
        campaign: &Campaign,
        rule: &TargetingRule,
        request: &DeliveryRequest,
    ) -> Verdict {
        if !campaign.status.is_active() {
            return Verdict::Inactive;
        }

        Self::check_rule(rule, request).unwrap_or(Verdict::Eligible)
    }

    /// 从候选集合中筛选可投放活动
    ///
    /// 同一活动可能因多条规则行重复出现，任一行匹配即入选且只保留一次；
    /// 结果按活动 ID 升序。
    pub fn select_eligible<I>(candidates: I, request: &DeliveryRequest) -> Vec<Campaign>
    where
        I: IntoIterator<Item = (Campaign, TargetingRule)>,
    {
        let mut eligible: BTreeMap<String, Campaign> = BTreeMap::new();

        for (campaign, rule) in candidates {
            if eligible.contains_key(&campaign.id) {
                continue;
            }
            if Self::evaluate(&campaign, &rule, request).is_eligible() {
                eligible.insert(campaign.id.clone(), campaign);
            }
        }

        eligible.into_values().collect()
    }

    /// 返回第一个不通过的维度结论，全部通过返回 None
    fn check_rule(rule: &TargetingRule, request: &DeliveryRequest) -> Option<Verdict> {
        Axis::ALL
            .into_iter()
            .find_map(|axis| Self::check_axis(rule, request, axis))
    }

    fn check_axis(rule: &TargetingRule, request: &DeliveryRequest, axis: Axis) -> Option<Verdict> {
        let value = request.folded(axis);

        if let Some(include) = rule.include_list(axis) {
            if !contains_folded(include, &value) {
                return Some(Verdict::NotIncluded(axis));
            }
        }

        if let Some(exclude) = rule.exclude_list(axis) {
            if contains_folded(exclude, &value) {
                return Some(Verdict::Excluded(axis));
            }
        }

        None
    }
}

fn contains_folded(list: &[String], folded: &str) -> bool {
    list.iter().any(|entry| entry.eq_ignore_ascii_case(folded))
}
