use serde_json::json;

use crate::helpers::{TestApp, get_random_email};

#[tokio::test]
async fn should_return_200_with_a_new_pair() {
    let app = TestApp::new().await;
    let signup = app.signup_user(&get_random_email()).await;

    let response = app
        .post_refresh(&json!({ "refresh_token": signup["refresh_token"] }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body.get("email").is_none());
    assert_ne!(body["access_token"], signup["access_token"]);
    assert_ne!(body["refresh_token"], signup["refresh_token"]);

    let validated = app.get_validate(body["access_token"].as_str()).await;
    assert_eq!(validated.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_401_for_invalid_refresh_token() {
    let app = TestApp::new().await;

    let response = app
        .post_refresh(&json!({ "refresh_token": "not-a-token" }))
        .await;
    assert_eq!(response.status().as_u16(), 401);

    let error: serde_json::Value = response.json().await.unwrap();
    assert_eq!(error["error"], "invalid refresh token");
    assert_eq!(error["message"], "token refresh failed");
}

#[tokio::test]
async fn should_return_400_if_refresh_token_missing() {
    let app = TestApp::new().await;

    let response = app.post_refresh(&json!({})).await;
    assert_eq!(response.status().as_u16(), 400);

    let error: serde_json::Value = response.json().await.unwrap();
    assert_eq!(error["error"], "refresh_token is required");
}
