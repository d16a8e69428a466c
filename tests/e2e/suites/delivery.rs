//! 投放决策测试套件
//!
//! 依赖种子迁移中的 spotify / duolingo / subwaysurfer 三个活动。

use reqwest::StatusCode;

use crate::setup::TestEnvironment;

const VERSIONS: [&str; 2] = ["v1", "v2"];

#[tokio::test]
#[ignore = "需要运行服务"]
async fn test_seed_scenarios_on_both_bindings() {
    let env = TestEnvironment::setup().await.unwrap();

    let cases: [(&str, &str, &str, &[&str]); 5] = [
        ("com.gametion.ludokinggame", "us", "android", &["spotify", "subwaysurfer"]),
        ("com.test", "germany", "android", &["duolingo"]),
        ("com.test", "germany", "ios", &["duolingo"]),
        ("com.test", "us", "web", &[]),
        ("com.test", "germany", "web", &[]),
    ];

    for version in VERSIONS {
        for (app, country, os, expected) in cases {
            let outcome = env
                .api
                .deliver(version, Some(app), Some(country), Some(os))
                .await
                .unwrap();

            if expected.is_empty() {
                assert_eq!(outcome.status, StatusCode::NO_CONTENT, "{} {} {} {}", version, app, country, os);
            } else {
                assert_eq!(outcome.status, StatusCode::OK, "{} {} {} {}", version, app, country, os);
                assert_eq!(outcome.ids(), expected.to_vec());
            }
        }
    }
}

#[tokio::test]
#[ignore = "需要运行服务"]
async fn test_missing_parameters() {
    let env = TestEnvironment::setup().await.unwrap();

    for version in VERSIONS {
        let outcome = env
            .api
            .deliver(version, None, Some("us"), Some("android"))
            .await
            .unwrap();
        assert_eq!(outcome.status, StatusCode::BAD_REQUEST);
        assert_eq!(outcome.error.as_deref(), Some("missing app param"));

        let outcome = env
            .api
            .deliver(version, Some("com.test"), Some("  "), None)
            .await
            .unwrap();
        assert_eq!(outcome.error.as_deref(), Some("missing country param"));

        let outcome = env
            .api
            .deliver(version, Some("com.test"), Some("us"), None)
            .await
            .unwrap();
        assert_eq!(outcome.error.as_deref(), Some("missing os param"));
    }
}

#[tokio::test]
#[ignore = "需要运行服务"]
async fn test_case_insensitive_and_request_id() {
    let env = TestEnvironment::setup().await.unwrap();

    let lower = env
        .api
        .deliver("v2", Some("com.gametion.ludokinggame"), Some("us"), Some("android"))
        .await
        .unwrap();
    let upper = env
        .api
        .deliver("v2", Some("COM.GAMETION.LUDOKINGGAME"), Some("US"), Some("ANDROID"))
        .await
        .unwrap();

    assert_eq!(lower.status, upper.status);
    assert_eq!(lower.campaigns, upper.campaigns);
    assert!(lower.request_id.is_some());
}

#[tokio::test]
#[ignore = "需要运行服务"]
async fn test_metrics_record_outcomes() {
    let env = TestEnvironment::setup().await.unwrap();

    env.api
        .deliver("v1", Some("com.test"), Some("us"), Some("web"))
        .await
        .unwrap();

    let body = env.api.metrics().await.unwrap();
    assert!(body.contains("delivery_requests_total"));
    assert!(body.contains("db_query_duration_seconds"));
}
