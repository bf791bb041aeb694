#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use student_api_rust::auth::TokenValidator;
use student_api_rust::config::AppConfig;
use student_api_rust::database::MemoryStudentStore;
use student_api_rust::services::StudentService;
use student_api_rust::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// In-process server backed by the memory store. Each test gets its own.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let vars = HashMap::from([
            ("PORT", port.to_string()),
            ("JWT_SECRET", TEST_SECRET.to_string()),
            ("API_ENABLE_REQUEST_LOGGING", "false".to_string()),
        ]);
        let config = AppConfig::from_lookup(|key| vars.get(key).cloned());
        config.validate()?;

        let students = StudentService::new(Arc::new(MemoryStudentStore::new()), config.api.request_timeout());
        let validator = TokenValidator::new(&config.security)?;

        let bind_addr = format!("127.0.0.1:{}", port);
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("failed to bind {}", bind_addr))?;

        let router = app(AppState::new(students, validator, config));
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            base_url: format!("http://{}", bind_addr),
            client: reqwest::Client::new(),
            handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /students with a token for `user_id`
    pub async fn create_student(&self, user_id: &str, body: &Value) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.url("/students"))
            .bearer_auth(mint_token(user_id, Duration::from_secs(600)))
            .json(body)
            .send()
            .await?;
        Ok(response)
    }

    pub async fn list_students(&self) -> Result<Vec<Value>> {
        let response = self.client.get(self.url("/students")).send().await?;
        Ok(response.json().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// HS256 token signed with the test secret, expiring `ttl` from now
pub fn mint_token(user_id: &str, ttl: Duration) -> String {
    let exp = chrono::Utc::now().timestamp() + ttl.as_secs() as i64;
    sign(json!({ "user_id": user_id, "exp": exp }))
}

pub fn expired_token(user_id: &str) -> String {
    let exp = chrono::Utc::now().timestamp() - 3600;
    sign(json!({ "user_id": user_id, "exp": exp }))
}

pub fn sign(claims: Value) -> String {
    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_SECRET.as_bytes()))
        .expect("failed to sign test token")
}

pub fn ada() -> Value {
    json!({
        "fname": "Ada",
        "lname": "Lovelace",
        "email": "ada@x.io",
        "gender": "F",
        "dateofbirth": "1815-12-10"
    })
}
