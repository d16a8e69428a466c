//! 投放服务 HTTP 客户端

use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// 投放接口返回的活动
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CampaignResponse {
    pub cid: String,
    pub name: String,
    pub img: String,
    pub cta: String,
    pub status: String,
}

/// 一次投放请求的结果
#[derive(Debug)]
pub struct DeliveryOutcome {
    pub status: StatusCode,
    pub campaigns: Vec<CampaignResponse>,
    pub error: Option<String>,
    pub request_id: Option<String>,
}

impl DeliveryOutcome {
    pub fn ids(&self) -> Vec<&str> {
        self.campaigns.iter().map(|c| c.cid.as_str()).collect()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct DeliveryClient {
    client: Client,
    base_url: String,
}

impl DeliveryClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 调用 /{version}/delivery，参数为 None 时不带该参数
    pub async fn deliver(
        &self,
        version: &str,
        app: Option<&str>,
        country: Option<&str>,
        os: Option<&str>,
    ) -> Result<DeliveryOutcome> {
        let params: Vec<(&str, &str)> = [("app", app), ("country", country), ("os", os)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect();

        let response = self
            .client
            .get(format!("{}/{}/delivery", self.base_url, version))
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.bytes().await?;

        let mut outcome = DeliveryOutcome {
            status,
            campaigns: vec![],
            error: None,
            request_id,
        };

        match status {
            StatusCode::OK => outcome.campaigns = serde_json::from_slice(&body)?,
            StatusCode::NO_CONTENT => {}
            _ => outcome.error = Some(serde_json::from_slice::<ErrorBody>(&body)?.error),
        }

        Ok(outcome)
    }

    pub async fn get_campaign(&self, cid: &str) -> Result<(StatusCode, serde_json::Value)> {
        let response = self
            .client
            .get(format!("{}/v1/campaigns/{}", self.base_url, cid))
            .send()
            .await?;
        let status = response.status();
        Ok((status, response.json().await?))
    }

    pub async fn list_campaigns(&self) -> Result<Vec<CampaignResponse>> {
        let response = self
            .client
            .get(format!("{}/v1/campaigns", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn healthz(&self) -> Result<serde_json::Value> {
        let response = self
            .client
            .get(format!("{}/healthz", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn metrics(&self) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/metrics", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}
