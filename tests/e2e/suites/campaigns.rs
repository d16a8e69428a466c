//! 活动查询与探针测试套件

use reqwest::StatusCode;

use crate::setup::TestEnvironment;

#[tokio::test]
#[ignore = "需要运行服务"]
async fn test_list_and_get_campaigns() {
    let env = TestEnvironment::setup().await.unwrap();

    let campaigns = env.api.list_campaigns().await.unwrap();
    let ids: Vec<&str> = campaigns.iter().map(|c| c.cid.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert!(ids.contains(&"spotify"));
    assert!(campaigns.iter().all(|c| c.status == "ACTIVE"));

    let (status, body) = env.api.get_campaign("duolingo").await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Duolingo: Best way to learn");

    let (status, body) = env.api.get_campaign("does-not-exist").await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "campaign not found");
}

#[tokio::test]
#[ignore = "需要运行服务"]
async fn test_healthz() {
    let env = TestEnvironment::setup().await.unwrap();

    let body = env.api.healthz().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}
