use fake::{Fake, faker::internet::en::SafeEmail};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use warden_adapters::config::{
    AuthServiceSetting,
    test::{APP_ADDRESS, JWT_SECRET},
};
use warden_auth_service::{
    Argon2PasswordHasher, AuthService, HashMapUserStore, JwtAuthConfig, JwtTokenIssuer,
};

pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const STRONG_PASSWORD: &str = "SecureP@ss123";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_overrides(json!({})).await
    }

    /// Spawn the service with test settings, `overrides` merged on top.
    pub async fn with_overrides(overrides: serde_json::Value) -> Self {
        let mut document = json!({
            "app": { "environment": "test" },
            "auth": {
                "jwt": { "secret": JWT_SECRET },
                "allowed_origins": [ALLOWED_ORIGIN]
            },
            "hashing": { "memory_cost_kib": 4096, "iterations": 1, "parallelism": 1 },
            "rate_limit": { "enabled": false }
        });
        merge(&mut document, overrides);

        let settings = AuthServiceSetting::from_json(&document.to_string())
            .expect("Failed to build test settings");

        let password_hasher =
            Argon2PasswordHasher::from_settings(&settings.hashing).expect("Invalid hashing params");
        let token_issuer = JwtTokenIssuer::new(JwtAuthConfig::from(&settings.auth.jwt));
        let service = AuthService::new(
            HashMapUserStore::new(),
            password_hasher,
            token_issuer,
            &settings,
        );

        let listener = TcpListener::bind(APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let allowed_origins = Some(settings.auth.allowed_origins.clone());
        tokio::spawn(service.run_standalone(
            listener,
            allowed_origins,
            std::future::pending(),
        ));

        let http_client = reqwest::Client::builder()
            .build()
            .expect("Failed to build HTTP client");

        Self {
            address,
            http_client,
        }
    }

    pub async fn get_health(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/health", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_ready(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/ready", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_signup<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: Serialize,
    {
        self.http_client
            .post(format!("{}/api/v1/auth/signup", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: Serialize,
    {
        self.http_client
            .post(format!("{}/api/v1/auth/login", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_refresh<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: Serialize,
    {
        self.http_client
            .post(format!("{}/api/v1/auth/refresh", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_validate(&self, token: Option<&str>) -> reqwest::Response {
        let mut request = self
            .http_client
            .get(format!("{}/api/v1/auth/validate", &self.address));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    /// Sign up a fresh user and return the response body.
    pub async fn signup_user(&self, email: &str) -> serde_json::Value {
        let response = self
            .post_signup(&json!({ "email": email, "password": STRONG_PASSWORD }))
            .await;
        assert_eq!(response.status().as_u16(), 201);
        response.json().await.expect("Failed to parse signup body")
    }
}

pub fn get_random_email() -> String {
    SafeEmail().fake()
}

fn merge(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (key, value) in overrides {
                merge(base.entry(key).or_insert(serde_json::Value::Null), value);
            }
        }
        (base, overrides) => *base = overrides,
    }
}
