mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{ada, expired_token, mint_token, sign, TestServer};
use std::time::Duration;

async fn post_with_header(server: &TestServer, authorization: Option<String>) -> Result<reqwest::Response> {
    let mut request = server.client.post(server.url("/students")).json(&ada());
    if let Some(value) = authorization {
        request = request.header("Authorization", value);
    }
    Ok(request.send().await?)
}

async fn assert_rejected(server: &TestServer, authorization: Option<String>) -> Result<()> {
    let res = post_with_header(server, authorization.clone()).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "header {:?}", authorization);

    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Unauthorized");
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn missing_header_is_rejected_and_nothing_is_stored() -> Result<()> {
    let server = TestServer::spawn().await?;

    assert_rejected(&server, None).await?;
    assert!(server.list_students().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    assert_rejected(&server, Some("Bearer garbage".to_string())).await
}

#[tokio::test]
async fn expired_token_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    assert_rejected(&server, Some(format!("Bearer {}", expired_token("user-1")))).await
}

#[tokio::test]
async fn wrong_scheme_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = mint_token("user-1", Duration::from_secs(600));

    assert_rejected(&server, Some(format!("Basic {}", token))).await?;
    assert_rejected(&server, Some(format!("Bearer {} extra", token))).await?;
    assert_rejected(&server, Some(token)).await
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let forged = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({ "user_id": "intruder", "exp": chrono::Utc::now().timestamp() + 600 }),
        &jsonwebtoken::EncodingKey::from_secret(b"not-the-server-secret"),
    )?;

    assert_rejected(&server, Some(format!("Bearer {}", forged))).await
}

#[tokio::test]
async fn token_without_user_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = sign(json!({ "exp": chrono::Utc::now().timestamp() + 600 }));

    assert_rejected(&server, Some(format!("Bearer {}", token))).await
}

#[tokio::test]
async fn valid_token_is_accepted_with_any_scheme_case() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = mint_token("user-42", Duration::from_secs(600));

    let res = post_with_header(&server, Some(format!("bearer {}", token))).await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = res.json().await?;
    assert_eq!(body["createdby"], "user-42");
    Ok(())
}

#[tokio::test]
async fn subject_claim_identifies_the_caller() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = sign(json!({ "sub": "user-sub", "exp": chrono::Utc::now().timestamp() + 600 }));

    let res = post_with_header(&server, Some(format!("Bearer {}", token))).await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = res.json().await?;
    assert_eq!(body["createdby"], "user-sub");
    Ok(())
}

#[tokio::test]
async fn read_routes_do_not_require_a_token() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.client.get(server.url("/students")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
