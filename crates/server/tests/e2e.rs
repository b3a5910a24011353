use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, AppState};
use service::address::repository::JsonAddressRepository;
use service::address::service::AddressService;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Isolated temp data file per test run
    let data_file = std::env::temp_dir().join(format!("addressbook_e2e_{}.json", Uuid::new_v4()));
    let repo = JsonAddressRepository::new(data_file).await?;
    let state = AppState {
        addresses: Arc::new(AddressService::new(repo)),
    };

    let app: Router = routes::build_router(state, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_list_on_empty_storage_is_empty_array() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .get(format!("{}/api/addresses", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_save_assigns_id_and_round_trips() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/api/addresses", app.base_url))
        .json(&json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@example.com",
            "phone": "555-0100",
            "city": "Springfield",
            "labels": "friends"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let saved = res.json::<Value>().await?;
    let id = saved["id"].as_str().expect("id assigned").to_string();
    assert!(!id.is_empty());
    assert_eq!(saved["firstName"], "Jane");
    assert_eq!(saved["city"], "Springfield");

    // Re-fetch via List: attribute values survive unchanged
    let res = c.get(format!("{}/api/addresses", app.base_url)).send().await?;
    let list = res.json::<Vec<Value>>().await?;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0], saved);
    Ok(())
}

#[tokio::test]
async fn e2e_save_with_stored_id_replaces_record() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/api/addresses", app.base_url))
        .json(&json!({"firstName": "Jane", "city": "Springfield"}))
        .send()
        .await?;
    let id = res.json::<Value>().await?["id"].as_str().unwrap().to_string();

    let res = c
        .post(format!("{}/api/addresses", app.base_url))
        .json(&json!({"id": id, "firstName": "Janet", "city": "Shelbyville"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let replaced = res.json::<Value>().await?;
    assert_eq!(replaced["id"], Value::String(id.clone()));
    assert_eq!(replaced["firstName"], "Janet");

    // exactly one record for that id, with the new value
    let list = c
        .get(format!("{}/api/addresses", app.base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    let matching: Vec<_> = list.iter().filter(|a| a["id"] == json!(id)).collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0]["city"], "Shelbyville");
    Ok(())
}

#[tokio::test]
async fn e2e_double_delete_both_succeed() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/api/addresses", app.base_url))
        .json(&json!({"firstName": "Jane"}))
        .send()
        .await?;
    let id = res.json::<Value>().await?["id"].as_str().unwrap().to_string();

    let res = c
        .delete(format!("{}/api/addresses/{}", app.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // retried delete of the same id is still a success
    let res = c
        .delete(format!("{}/api/addresses/{}", app.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let list = c
        .get(format!("{}/api/addresses", app.base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert!(list.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_non_json_body_is_client_error() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(format!("{}/api/addresses", app.base_url))
        .header("content-type", "application/json")
        .body("this is not json")
        .send()
        .await?;
    assert!(res.status().is_client_error());
    Ok(())
}
