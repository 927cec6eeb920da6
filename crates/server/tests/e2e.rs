use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::InMemoryDealStore;
use tokio::net::TcpListener;

use server::startup::build_app;

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Spawn the full router on an ephemeral port with its own store.
async fn start_server_with(store: InMemoryDealStore) -> anyhow::Result<TestApp> {
    let app = build_app(Arc::new(store));
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

async fn start_server() -> anyhow::Result<TestApp> {
    start_server_with(InMemoryDealStore::seeded()).await
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn new_deal() -> Value {
    json!({
        "seller": "Hydro Co",
        "buyer": "Steel Works",
        "country": "Norway",
        "technology": "Hydro",
        "capacity": "300",
        "term": "10 years",
        "date": "2022-02-01"
    })
}

fn ids(body: &Value) -> Vec<u64> {
    body["data"]
        .as_array()
        .map(|deals| deals.iter().filter_map(|d| d["id"].as_u64()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn e2e_root_and_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(!res.text().await?.is_empty());

    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_list_all_and_filtered() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let body = c.get(app.url("/api/deals")).send().await?.json::<Value>().await?;
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5]);

    let res = c.get(app.url("/api/deals?technology=Solar")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(ids(&res.json::<Value>().await?), vec![1, 4, 5]);

    let body = c.get(app.url("/api/deals?technology=Solar&country=Italy")).send().await?.json::<Value>().await?;
    assert_eq!(ids(&body), vec![4]);

    let body = c.get(app.url("/api/deals?colour=green")).send().await?.json::<Value>().await?;
    assert!(ids(&body).is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_get_by_id() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(app.url("/api/deals/3")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    let deals = body["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(deals.len(), 1);
    assert_eq!(deals[0]["seller"], "Another Power Seller");
    assert_eq!(deals[0]["country"], "France");
    assert_eq!(deals[0]["technology"], "Onshore Wind");

    let res = c.get(app.url("/api/deals/999")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Could not find this id"}));

    for raw in ["abc", "0"] {
        let res = c.get(app.url(&format!("/api/deals/{raw}"))).send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
        assert_eq!(res.json::<Value>().await?, json!({"error": "Could not find this id"}));
    }
    Ok(())
}

#[tokio::test]
async fn e2e_non_numeric_id_is_not_found_for_mutations() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.patch(app.url("/api/deals/abc")).json(&new_deal()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Could not find this id"}));

    let res = c.delete(app.url("/api/deals/abc")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Could not find this id"}));

    let body = c.get(app.url("/api/deals")).send().await?.json::<Value>().await?;
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5]);
    Ok(())
}

#[tokio::test]
async fn e2e_create_json_then_fetch() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(app.url("/api/deals")).json(&new_deal()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    let created = body["data"].clone();
    assert_eq!(created["id"], 6);
    assert_eq!(created["capacity"], 300);

    let body = c.get(app.url("/api/deals/6")).send().await?.json::<Value>().await?;
    assert_eq!(body["data"], json!([created]));

    let body = c.get(app.url("/api/deals")).send().await?.json::<Value>().await?;
    assert_eq!(ids(&body).len(), 6);
    Ok(())
}

#[tokio::test]
async fn e2e_create_form_encoded() -> anyhow::Result<()> {
    let app = start_server().await?;
    let form = [
        ("seller", "Form Seller"),
        ("buyer", "Form Buyer"),
        ("country", "Ireland"),
        ("technology", "Onshore Wind"),
        ("capacity", "42.9"),
        ("term", "6 months"),
        ("date", "2024-06-01"),
    ];
    let body = form_body(&form);
    let res = client()
        .post(app.url("/api/deals"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["seller"], "Form Seller");
    assert_eq!(body["data"]["capacity"], 42);
    Ok(())
}

#[tokio::test]
async fn e2e_create_accepts_json_suffix_content_type() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(app.url("/api/deals"))
        .header("content-type", "application/vnd.api+json; charset=utf-8")
        .body(new_deal().to_string())
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["id"], 6);
    assert_eq!(body["data"]["seller"], "Hydro Co");
    Ok(())
}

fn form_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v.replace(' ', "+")))
        .collect::<Vec<_>>()
        .join("&")
}

#[tokio::test]
async fn e2e_create_rejects_incomplete_payload() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let mut partial = new_deal();
    partial["buyer"] = json!("");
    let res = c.post(app.url("/api/deals")).json(&partial).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"error": "Empty or missing properties and/or values"})
    );

    let res = c
        .post(app.url("/api/deals"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let body = c.get(app.url("/api/deals")).send().await?.json::<Value>().await?;
    assert_eq!(ids(&body).len(), 5);
    Ok(())
}

#[tokio::test]
async fn e2e_update_replaces_deal() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.patch(app.url("/api/deals/1")).json(&new_deal()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["seller"], "Hydro Co");

    let body = c.get(app.url("/api/deals")).send().await?.json::<Value>().await?;
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5]);
    assert_eq!(body["data"][0]["technology"], "Hydro");
    Ok(())
}

#[tokio::test]
async fn e2e_update_checks_existence_before_payload() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.patch(app.url("/api/deals/77")).json(&json!({})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Could not find this id");

    let res = c.patch(app.url("/api/deals/2")).json(&json!({"seller": "Only"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Empty or missing properties and/or values");
    Ok(())
}

#[tokio::test]
async fn e2e_delete_returns_remaining() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.delete(app.url("/api/deals/2")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(ids(&res.json::<Value>().await?), vec![1, 3, 4, 5]);

    let res = c.delete(app.url("/api/deals/2")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Could not find this id");
    Ok(())
}

#[tokio::test]
async fn e2e_empty_store_assigns_first_id() -> anyhow::Result<()> {
    let app = start_server_with(InMemoryDealStore::new()).await?;
    let c = client();

    let body = c.get(app.url("/api/deals")).send().await?.json::<Value>().await?;
    assert!(ids(&body).is_empty());

    let res = c.post(app.url("/api/deals")).json(&new_deal()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?["data"]["id"], 1);
    Ok(())
}

#[tokio::test]
async fn e2e_metrics_and_openapi() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let _ = c.get(app.url("/api/deals")).send().await?;
    let res = c.get(app.url("/metrics")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.text().await?.contains("deals_operations_total"));

    let res = c.get(app.url("/api-docs/openapi.json")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc = res.json::<Value>().await?;
    assert!(doc["paths"].get("/api/deals").is_some());
    assert!(doc["paths"].get("/api/deals/{id}").is_some());
    Ok(())
}
