use std::collections::HashSet;
use std::net::SocketAddr;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

async fn start_server(capacity: usize) -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.store.capacity = capacity;
    let app = server::startup::build_app(&cfg);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn phone() -> Value {
    json!({"name": "Phone", "brand": "Apple", "model": "13 Pro Max"})
}

#[tokio::test]
async fn e2e_create_get_delete_lifecycle() -> anyhow::Result<()> {
    let app = start_server(10).await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/api/v1/devices", app.base_url)).json(&phone()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["name"], "Phone");
    assert_eq!(created["brand"], "Apple");
    assert_eq!(created["model"], "13 Pro Max");

    let res = c.get(format!("{}/api/v1/devices/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    let res = c.delete(format!("{}/api/v1/devices/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    let res = c.get(format!("{}/api/v1/devices/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.delete(format!("{}/api/v1/devices/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_get_unknown_device_not_found() -> anyhow::Result<()> {
    let app = start_server(10).await?;
    let res = reqwest::get(format!("{}/api/v1/devices/nonexistent-id", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert!(body["error"].as_str().unwrap_or_default().contains("nonexistent-id"));
    Ok(())
}

#[tokio::test]
async fn e2e_client_supplied_id_is_replaced() -> anyhow::Result<()> {
    let app = start_server(10).await?;
    let res = reqwest::Client::new()
        .post(format!("{}/api/v1/devices", app.base_url))
        .json(&json!({"id": "mine", "name": "Phone", "brand": "Apple", "model": ""}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_ne!(created["id"], "mine");
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_create_is_bad_request() -> anyhow::Result<()> {
    let app = start_server(10).await?;
    let c = reqwest::Client::new();
    let url = format!("{}/api/v1/devices", app.base_url);

    let res = c.post(&url).json(&json!({"name": "!name$", "brand": "Apple"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.post(&url).json(&json!({"name": "12334"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_full_store_rejects_with_service_unavailable() -> anyhow::Result<()> {
    let app = start_server(2).await?;
    let c = reqwest::Client::new();
    let url = format!("{}/api/v1/devices", app.base_url);

    for _ in 0..2 {
        let res = c.post(&url).json(&phone()).send().await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }
    let res = c.post(&url).json(&phone()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_creates_get_unique_ids() -> anyhow::Result<()> {
    const N: usize = 50;
    let app = start_server(N).await?;
    let c = reqwest::Client::new();
    let url = format!("{}/api/v1/devices", app.base_url);

    let mut handles = Vec::with_capacity(N);
    for _ in 0..N {
        let c = c.clone();
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            let res = c.post(&url).json(&phone()).send().await?;
            assert_eq!(res.status(), HttpStatusCode::CREATED);
            let body = res.json::<Value>().await?;
            Ok::<_, reqwest::Error>(body["id"].as_str().unwrap_or_default().to_string())
        }));
    }

    let mut ids = HashSet::new();
    for h in handles {
        ids.insert(h.await??);
    }
    assert_eq!(ids.len(), N);

    let res = c.post(&url).json(&phone()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn e2e_request_id_header() -> anyhow::Result<()> {
    let app = start_server(10).await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let generated = res.headers().get("x-request-id").and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(uuid::Uuid::parse_str(generated).is_ok());

    let res = c
        .get(format!("{}/health", app.base_url))
        .header("x-request-id", "trace-me")
        .send()
        .await?;
    assert_eq!(res.headers().get("x-request-id").and_then(|v| v.to_str().ok()), Some("trace-me"));
    Ok(())
}

#[tokio::test]
async fn e2e_metrics_and_docs_are_served() -> anyhow::Result<()> {
    let app = start_server(10).await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/api/v1/devices", app.base_url)).json(&phone()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.get(format!("{}/metrics", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let text = res.text().await?;
    assert!(text.contains("device_api_operations_total"));
    assert!(text.contains("device_api_devices_stored"));

    let res = c.get(format!("{}/api-docs/openapi.json", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc = res.json::<Value>().await?;
    assert!(doc["paths"].get("/api/v1/devices/{id}").is_some());
    Ok(())
}
