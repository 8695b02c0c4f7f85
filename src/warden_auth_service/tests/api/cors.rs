use crate::helpers::{ALLOWED_ORIGIN, TestApp};

async fn get_health_from(app: &TestApp, origin: &str) -> reqwest::Response {
    app.http_client
        .get(format!("{}/health", app.address))
        .header("origin", origin)
        .send()
        .await
        .expect("Failed to execute request.")
}

#[tokio::test]
async fn allowed_origin_is_echoed() {
    let app = TestApp::new().await;

    let response = get_health_from(&app, ALLOWED_ORIGIN).await;

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(ALLOWED_ORIGIN)
    );
}

#[tokio::test]
async fn unknown_origin_gets_no_cors_headers() {
    let app = TestApp::new().await;

    let response = get_health_from(&app, "https://evil.example").await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.headers().get("access-control-allow-origin").is_none());
}
