use crate::helpers::{TestApp, get_random_email};

#[tokio::test]
async fn should_return_200_for_a_fresh_access_token() {
    let app = TestApp::new().await;
    let email = get_random_email();
    let signup = app.signup_user(&email).await;

    let response = app
        .get_validate(signup["access_token"].as_str())
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["valid"], true);
    assert_eq!(body["user_id"], signup["user_id"]);
    assert_eq!(body["email"], email.to_lowercase());
}

#[tokio::test]
async fn refresh_token_also_identifies_the_user() {
    let app = TestApp::new().await;
    let signup = app.signup_user(&get_random_email()).await;

    let response = app
        .get_validate(signup["refresh_token"].as_str())
        .await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_401_without_bearer_token() {
    let app = TestApp::new().await;

    let response = app.get_validate(None).await;
    assert_eq!(response.status().as_u16(), 401);

    let error: serde_json::Value = response.json().await.unwrap();
    assert_eq!(error["message"], "missing authorization header");
}

#[tokio::test]
async fn should_return_401_for_invalid_token() {
    let app = TestApp::new().await;

    let response = app.get_validate(Some("invalid.token.value")).await;
    assert_eq!(response.status().as_u16(), 401);

    let error: serde_json::Value = response.json().await.unwrap();
    assert_eq!(error["error"], "invalid token");
    assert_eq!(error["message"], "token validation failed");
}
