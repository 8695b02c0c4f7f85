use serde_json::json;

use crate::helpers::{STRONG_PASSWORD, TestApp, get_random_email};

#[tokio::test]
async fn should_return_200_if_valid_credentials() {
    let app = TestApp::new().await;
    let email = get_random_email();
    let signup = app.signup_user(&email).await;

    let response = app
        .post_login(&json!({ "email": email, "password": STRONG_PASSWORD }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["user_id"], signup["user_id"]);
    assert_eq!(body["email"], email.to_lowercase());
    assert_ne!(body["access_token"], signup["access_token"]);
}

#[tokio::test]
async fn should_return_401_if_incorrect_credentials() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.signup_user(&email).await;

    let test_cases = [
        json!({ "email": email, "password": "WrongP@ss999" }),
        json!({ "email": get_random_email(), "password": STRONG_PASSWORD }),
        json!({ "email": "not-an-email", "password": STRONG_PASSWORD }),
    ];

    for body in test_cases {
        let response = app.post_login(&body).await;
        assert_eq!(response.status().as_u16(), 401, "Failed for input: {body}");

        let error: serde_json::Value = response.json().await.unwrap();
        assert_eq!(error["error"], "invalid credentials", "Failed for input: {body}");
        assert_eq!(error["message"], "login failed");
    }
}

#[tokio::test]
async fn should_return_400_if_fields_are_missing() {
    let app = TestApp::new().await;

    let response = app.post_login(&json!({ "password": STRONG_PASSWORD })).await;
    assert_eq!(response.status().as_u16(), 400);

    let error: serde_json::Value = response.json().await.unwrap();
    assert_eq!(error["error"], "email is required");
    assert_eq!(error["message"], "validation failed");
}
