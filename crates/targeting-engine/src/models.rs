//! 定向引擎领域模型

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::error::ValidationError;
use crate::normalizer::AttributeNormalizer;

/// 活动状态
///
/// 数据库中以文本存储，只有精确等于 `ACTIVE` 的值视为上线，其余一律视为未上线。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    #[default]
    Inactive,
}

impl CampaignStatus {
    pub const ACTIVE: &'static str = "ACTIVE";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => Self::ACTIVE,
            Self::Inactive => "INACTIVE",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<&str> for CampaignStatus {
    fn from(value: &str) -> Self {
        if value == Self::ACTIVE {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

/// 广告活动
///
/// JSON 字段名与对外接口保持一致：`cid` / `name` / `img` / `cta` / `status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(rename = "cid")]
    pub id: String,
    pub name: String,
    #[serde(rename = "img")]
    pub image: String,
    pub cta: String,
    pub status: CampaignStatus,
}

impl Campaign {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        image: impl Into<String>,
        cta: impl Into<String>,
        status: CampaignStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.into(),
            cta: cta.into(),
            status,
        }
    }
}

/// 定向规则
///
/// 与活动一对一。六个列表字段均可缺省，缺省或空列表都表示该维度不做限制。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetingRule {
    pub campaign_id: String,
    #[serde(default)]
    pub include_country: Option<Vec<String>>,
    #[serde(default)]
    pub exclude_country: Option<Vec<String>>,
    #[serde(default)]
    pub include_os: Option<Vec<String>>,
    #[serde(default)]
    pub exclude_os: Option<Vec<String>>,
    #[serde(default)]
    pub include_app: Option<Vec<String>>,
    #[serde(default)]
    pub exclude_app: Option<Vec<String>>,
}

impl TargetingRule {
    /// 创建一条不限制任何维度的规则
    pub fn open(campaign_id: impl Into<String>) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            ..Default::default()
        }
    }

    /// 设置某维度的 include 列表
    pub fn include<I, S>(mut self, axis: Axis, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.include_slot(axis) = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// 设置某维度的 exclude 列表
    pub fn exclude<I, S>(mut self, axis: Axis, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.exclude_slot(axis) = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// 获取某维度生效的 include 列表，空列表按缺省处理
    pub fn include_list(&self, axis: Axis) -> Option<&[String]> {
        let list = match axis {
            Axis::Country => &self.include_country,
            Axis::Os => &self.include_os,
            Axis::App => &self.include_app,
        };
        non_empty(list)
    }

    /// 获取某维度生效的 exclude 列表，空列表按缺省处理
    pub fn exclude_list(&self, axis: Axis) -> Option<&[String]> {
        let list = match axis {
            Axis::Country => &self.exclude_country,
            Axis::Os => &self.exclude_os,
            Axis::App => &self.exclude_app,
        };
        non_empty(list)
    }

    /// 所有维度均无限制
    pub fn is_open(&self) -> bool {
        Axis::ALL
            .iter()
            .all(|axis| self.include_list(*axis).is_none() && self.exclude_list(*axis).is_none())
    }

    fn include_slot(&mut self, axis: Axis) -> &mut Option<Vec<String>> {
        match axis {
            Axis::Country => &mut self.include_country,
            Axis::Os => &mut self.include_os,
            Axis::App => &mut self.include_app,
        }
    }

    fn exclude_slot(&mut self, axis: Axis) -> &mut Option<Vec<String>> {
        match axis {
            Axis::Country => &mut self.exclude_country,
            Axis::Os => &mut self.exclude_os,
            Axis::App => &mut self.exclude_app,
        }
    }
}

fn non_empty(list: &Option<Vec<String>>) -> Option<&[String]> {
    list.as_deref().filter(|values| !values.is_empty())
}

/// 投放请求
///
/// 每次决策新建，不持久化。通过 [`DeliveryRequest::parse`] 构造时
/// country / os 已转小写，app 保留原始大小写，比较时统一忽略 ASCII 大小写。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub app: String,
    pub country: String,
    pub os: String,
}

impl DeliveryRequest {
    /// 从原始请求参数构造（归一化 + 校验）
    pub fn parse(app: &str, country: &str, os: &str) -> Result<Self, ValidationError> {
        AttributeNormalizer::normalize(app, country, os)
    }

    /// 获取某维度的请求值
    pub fn value(&self, axis: Axis) -> &str {
        match axis {
            Axis::Country => &self.country,
            Axis::Os => &self.os,
            Axis::App => &self.app,
        }
    }

    /// 获取某维度用于比较的值（仅折叠 ASCII 字母）
    pub fn folded(&self, axis: Axis) -> String {
        self.value(axis).to_ascii_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_campaign_json_field_names() {
        let campaign = Campaign::new(
            "spotify",
            "Spotify - Music for everyone",
            "https://somelink",
            "Download",
            CampaignStatus::Active,
        );

        let value = serde_json::to_value(&campaign).unwrap();
        assert_eq!(
            value,
            json!({
                "cid": "spotify",
                "name": "Spotify - Music for everyone",
                "img": "https://somelink",
                "cta": "Download",
                "status": "ACTIVE"
            })
        );
    }

    #[test]
    fn test_status_from_stored_text() {
        assert_eq!(CampaignStatus::from("ACTIVE"), CampaignStatus::Active);
        assert_eq!(CampaignStatus::from("INACTIVE"), CampaignStatus::Inactive);
        assert_eq!(CampaignStatus::from("paused"), CampaignStatus::Inactive);
        // 存储值区分大小写
        assert_eq!(CampaignStatus::from("active"), CampaignStatus::Inactive);
    }

    #[test]
    fn test_empty_list_treated_as_absent() {
        let rule = TargetingRule::open("c1")
            .include(Axis::Country, Vec::<String>::new())
            .exclude(Axis::Os, ["web"]);

        assert!(rule.include_list(Axis::Country).is_none());
        assert_eq!(rule.exclude_list(Axis::Os), Some(&["web".to_string()][..]));
        assert!(!rule.is_open());
        assert!(TargetingRule::open("c2").is_open());
    }

    #[test]
    fn test_rule_deserialization_with_missing_lists() {
        let rule: TargetingRule = serde_json::from_str(
            r#"{"campaign_id": "duolingo", "include_os": ["android", "ios"], "exclude_country": null}"#,
        )
        .unwrap();

        assert_eq!(rule.campaign_id, "duolingo");
        assert!(rule.exclude_country.is_none());
        assert!(rule.include_app.is_none());
        assert_eq!(rule.include_list(Axis::Os).map(|l| l.len()), Some(2));
    }

    #[test]
    fn test_request_value_by_axis() {
        let request = DeliveryRequest::parse("Com.Test", "US", "Android").unwrap();
        assert_eq!(request.value(Axis::App), "Com.Test");
        assert_eq!(request.folded(Axis::App), "com.test");
        assert_eq!(request.value(Axis::Country), "us");
        assert_eq!(request.value(Axis::Os), "android");
    }
}
