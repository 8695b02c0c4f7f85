use serde_json::json;

use crate::helpers::{STRONG_PASSWORD, TestApp, get_random_email};

#[tokio::test]
async fn should_return_201_if_valid_input() {
    let app = TestApp::new().await;
    let email = get_random_email();

    let response = app
        .post_signup(&json!({ "email": email, "password": STRONG_PASSWORD }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["email"], email.to_lowercase());
    assert!(body["user_id"].as_str().is_some());
    assert_eq!(body["access_token"].as_str().unwrap().split('.').count(), 3);
    assert_eq!(body["refresh_token"].as_str().unwrap().split('.').count(), 3);
}

#[tokio::test]
async fn should_return_400_if_invalid_input() {
    let app = TestApp::new().await;

    let test_cases = [
        (
            json!({ "email": "not-an-email", "password": STRONG_PASSWORD }),
            "invalid email format",
        ),
        (
            json!({ "email": get_random_email(), "password": "short" }),
            "password must be at least 8 characters",
        ),
        (
            json!({ "email": get_random_email(), "password": "alllowercase" }),
            "password must contain at least 3 of: uppercase letter, lowercase letter, digit, special character",
        ),
        (json!({ "email": "", "password": STRONG_PASSWORD }), "email is required"),
        (json!({ "email": get_random_email() }), "password is required"),
    ];

    for (body, expected_error) in test_cases {
        let response = app.post_signup(&body).await;
        assert_eq!(response.status().as_u16(), 400, "Failed for input: {body}");

        let error: serde_json::Value = response.json().await.unwrap();
        assert_eq!(error["error"], expected_error, "Failed for input: {body}");
        assert_eq!(error["code"], 400);
    }
}

#[tokio::test]
async fn should_return_409_if_email_already_exists() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.signup_user(&email).await;

    let response = app
        .post_signup(&json!({ "email": email.to_uppercase(), "password": STRONG_PASSWORD }))
        .await;
    assert_eq!(response.status().as_u16(), 409);

    let error: serde_json::Value = response.json().await.unwrap();
    assert_eq!(error["error"], "email already in use");
    assert_eq!(error["message"], "signup failed");
}

#[tokio::test]
async fn concurrent_signups_for_one_email_create_one_account() {
    let app = TestApp::new().await;
    let email = get_random_email();
    let body = json!({ "email": email, "password": STRONG_PASSWORD });

    let responses = signup_concurrently(&app, &body, 8).await;

    let created = responses.iter().filter(|status| **status == 201).count();
    let conflicts = responses.iter().filter(|status| **status == 409).count();
    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
}

async fn signup_concurrently(app: &TestApp, body: &serde_json::Value, n: usize) -> Vec<u16> {
    let handles: Vec<_> = (0..n)
        .map(|_| {
            let client = app.http_client.clone();
            let url = format!("{}/api/v1/auth/signup", app.address);
            let body = body.clone();
            tokio::spawn(async move {
                client
                    .post(url)
                    .json(&body)
                    .send()
                    .await
                    .unwrap()
                    .status()
                    .as_u16()
            })
        })
        .collect();

    let mut statuses = Vec::with_capacity(n);
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }
    statuses
}
