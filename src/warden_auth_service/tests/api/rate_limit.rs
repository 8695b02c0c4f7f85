use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn should_return_429_once_the_burst_is_spent() {
    let app = TestApp::with_overrides(json!({
        "rate_limit": { "enabled": true, "requests_per_minute": 1, "burst": 2 }
    }))
    .await;

    assert_eq!(app.get_health().await.status().as_u16(), 200);
    assert_eq!(app.get_health().await.status().as_u16(), 200);

    let response = app.get_health().await;
    assert_eq!(response.status().as_u16(), 429);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "error": "rate limit exceeded", "message": "too many requests", "code": 429 })
    );
}

#[tokio::test]
async fn disabled_limiter_never_rejects() {
    let app = TestApp::new().await;

    for _ in 0..30 {
        assert_eq!(app.get_health().await.status().as_u16(), 200);
    }
}
