use crate::helpers::TestApp;

#[tokio::test]
async fn health_returns_200_with_service_identity() {
    let app = TestApp::new().await;

    let response = app.get_health().await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "warden");
    assert_eq!(body["version"], "1.0.0");
}

#[tokio::test]
async fn ready_returns_200_when_the_store_answers() {
    let app = TestApp::new().await;

    let response = app.get_ready().await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn every_response_carries_json_content_type() {
    let app = TestApp::new().await;

    let response = app.get_validate(None).await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
}
