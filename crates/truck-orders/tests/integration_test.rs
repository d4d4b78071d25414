use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use resource_actor::{CollectionStore, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use truck_orders::clock::SystemClock;
use truck_orders::lifecycle::OrderSystem;
use truck_orders::model::Order;
use truck_orders::server::router;
use truck_orders::storage::UnconfiguredStore;

/// Serves the real router on an ephemeral port and returns its base URL.
async fn spawn_app(store: Arc<dyn CollectionStore<Order>>, production: bool) -> String {
    let system = OrderSystem::new(store, Arc::new(SystemClock));
    let app = router(system.app_state(production));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{address}")
}

async fn memory_app() -> String {
    spawn_app(Arc::new(MemoryStore::<Order>::new()), false).await
}

async fn create(client: &Client, base: &str, body: Value) -> Value {
    let response = client
        .post(format!("{base}/api/orders"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

async fn list(client: &Client, base: &str) -> Vec<Value> {
    let response = client.get(format!("{base}/api/orders")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.unwrap()
}

fn instant(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| panic!("not a timestamp: {value}"))
}

#[tokio::test]
async fn test_health_endpoints() {
    let base = memory_app().await;
    let client = Client::new();

    for path in ["/", "/api", "/api/health"] {
        let response = client.get(format!("{base}{path}")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], json!({"backend": "memory", "configured": true}));
        instant(&body["timestamp"]);
    }
}

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let base = memory_app().await;
    let client = Client::new();

    let created = create(
        &client,
        &base,
        json!({"items": [{"name": "Taco", "qty": 2}], "total": 8.5, "customerName": "Ana"}),
    )
    .await;

    assert!(created["id"].is_i64());
    assert_eq!(created["status"], "pending");
    assert_eq!(created["type"], "eat");
    assert_eq!(created["customerPhone"], "");
    assert!(created.get("updatedAt").is_none());

    let orders = list(&client, &base).await;
    assert_eq!(orders, vec![created.clone()]);
    assert_eq!(orders[0]["total"], 8.5);
    assert_eq!(orders[0]["items"], json!([{"name": "Taco", "qty": 2}]));

    let fetched: Value = client
        .get(format!("{base}/api/orders/{}", created["id"]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_client_cannot_choose_status_or_id() {
    let base = memory_app().await;
    let client = Client::new();

    let created = create(
        &client,
        &base,
        json!({"id": 5, "status": "completed", "createdAt": "2000-01-01T00:00:00.000Z"}),
    )
    .await;

    assert_ne!(created["id"], 5);
    assert_eq!(created["status"], "pending");
    assert!(instant(&created["createdAt"]) > instant(&json!("2000-01-01T00:00:00.000Z")));
}

#[tokio::test]
async fn test_empty_body_creates_default_order() {
    let base = memory_app().await;
    let client = Client::new();

    let response = client.post(format!("{base}/api/orders")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Value = response.json().await.unwrap();
    assert_eq!(created["items"], json!([]));
    assert_eq!(created["total"], 0);
    assert_eq!(created["type"], "eat");
    assert_eq!(created["customerName"], "");
}

#[tokio::test]
async fn test_null_fields_create_with_defaults() {
    let base = memory_app().await;
    let client = Client::new();

    let created = create(
        &client,
        &base,
        json!({"customerName": "Ana", "customerPhone": null, "items": null, "total": null, "type": null}),
    )
    .await;

    assert_eq!(created["customerName"], "Ana");
    assert_eq!(created["customerPhone"], "");
    assert_eq!(created["items"], json!([]));
    assert_eq!(created["total"], 0);
    assert_eq!(created["type"], "eat");
    assert_eq!(list(&client, &base).await, vec![created]);
}

#[tokio::test]
async fn test_unknown_fields_are_stored_with_the_order() {
    let base = memory_app().await;
    let client = Client::new();

    let created = create(
        &client,
        &base,
        json!({
            "customerName": "Ana",
            "notes": "no onions",
            "paymentMethod": {"kind": "card", "last4": "4242"},
            "status": "completed",
            "updatedAt": "2000-01-01T00:00:00.000Z"
        }),
    )
    .await;

    assert_eq!(created["notes"], "no onions");
    assert_eq!(created["paymentMethod"], json!({"kind": "card", "last4": "4242"}));
    assert_eq!(created["status"], "pending");
    assert!(created.get("updatedAt").is_none());

    let response = client
        .patch(format!("{base}/api/orders/{}", created["id"]))
        .json(&json!({"status": "ready", "notes": "extra salsa"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["notes"], "no onions");

    let orders = list(&client, &base).await;
    assert_eq!(orders, vec![updated]);
}

#[tokio::test]
async fn test_integer_total_stays_integer() {
    let base = memory_app().await;
    let client = Client::new();

    let created = create(&client, &base, json!({"total": 12})).await;
    assert!(created["total"].is_u64());
    assert_eq!(created["total"], 12);

    let orders = list(&client, &base).await;
    assert!(orders[0]["total"].is_u64());
}

#[tokio::test]
async fn test_clear_is_idempotent() {
    let base = memory_app().await;
    let client = Client::new();
    create(&client, &base, json!({"customerName": "Ana"})).await;

    for _ in 0..2 {
        let response = client.delete(format!("{base}/api/orders")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert!(body["message"].is_string());
    }

    assert!(list(&client, &base).await.is_empty());
}

#[tokio::test]
async fn test_missing_order_is_404_for_every_method() {
    let base = memory_app().await;
    let client = Client::new();
    let url = format!("{base}/api/orders/999999999");

    let responses = [
        client.get(&url).send().await.unwrap(),
        client.patch(&url).json(&json!({"status": "ready"})).send().await.unwrap(),
        client.delete(&url).send().await.unwrap(),
    ];

    for response in responses {
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Order not found");
    }
}

#[tokio::test]
async fn test_patch_merges_and_stamps_updated_at() {
    let base = memory_app().await;
    let client = Client::new();
    let created = create(
        &client,
        &base,
        json!({"items": [{"name": "Taco", "qty": 2}], "total": 8.5, "customerName": "Ana"}),
    )
    .await;

    let response = client
        .patch(format!("{base}/api/orders/{}", created["id"]))
        .json(&json!({"status": "ready", "id": 1, "createdAt": "2000-01-01T00:00:00.000Z"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let mut updated: Value = response.json().await.unwrap();

    assert_eq!(updated["status"], "ready");
    assert!(instant(&updated["updatedAt"]) > instant(&updated["createdAt"]));

    let object = updated.as_object_mut().unwrap();
    object.remove("updatedAt");
    object.insert("status".into(), json!("pending"));
    assert_eq!(updated, created);
}

#[tokio::test]
async fn test_delete_reduces_list() {
    let base = memory_app().await;
    let client = Client::new();
    let first = create(&client, &base, json!({"customerName": "Ana"})).await;
    create(&client, &base, json!({"customerName": "Ben"})).await;

    let response = client
        .delete(format!("{base}/api/orders/{}", first["id"]))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Order deleted");

    let orders = list(&client, &base).await;
    assert_eq!(orders.len(), 1);
    assert!(orders.iter().all(|order| order["id"] != first["id"]));
}

#[tokio::test]
async fn test_two_orders_end_to_end() {
    let base = memory_app().await;
    let client = Client::new();

    let a = create(&client, &base, json!({"customerName": "A"})).await;
    let b = create(&client, &base, json!({"customerName": "B"})).await;
    assert!(b["id"].as_i64().unwrap() > a["id"].as_i64().unwrap());
    assert_eq!(list(&client, &base).await, vec![a.clone(), b.clone()]);

    client
        .delete(format!("{base}/api/orders/{}", a["id"]))
        .send()
        .await
        .unwrap();
    assert_eq!(list(&client, &base).await, vec![b]);
}

#[tokio::test]
async fn test_rapid_creates_have_increasing_ids() {
    let base = memory_app().await;
    let client = Client::new();

    let mut previous = 0;
    for _ in 0..10 {
        let id = create(&client, &base, json!({})).await["id"].as_i64().unwrap();
        assert!(id > previous);
        previous = id;
    }
}

#[tokio::test]
async fn test_unknown_route_reports_path_and_method() {
    let base = memory_app().await;
    let client = Client::new();

    let response = client.get(format!("{base}/api/unknown")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"error": "Route not found", "path": "/api/unknown", "method": "GET"})
    );

    let response = client.put(format!("{base}/api/orders")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["method"], "PUT");
    assert_eq!(body["path"], "/api/orders");
}

#[tokio::test]
async fn test_non_numeric_id_is_route_miss() {
    let base = memory_app().await;
    let client = Client::new();

    let response = client.get(format!("{base}/api/orders/abc")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Route not found");
    assert_eq!(body["path"], "/api/orders/abc");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let base = memory_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/api/orders"))
        .body("{\"customerName\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Malformed payload");
    assert!(body["detail"].is_string());

    assert!(list(&client, &base).await.is_empty());
}

#[tokio::test]
async fn test_unconfigured_store_degrades_reads_and_fails_writes() {
    let base = spawn_app(Arc::new(UnconfiguredStore::<Order>::new()), false).await;
    let client = Client::new();

    assert!(list(&client, &base).await.is_empty());

    let response = client
        .post(format!("{base}/api/orders"))
        .json(&json!({"customerName": "Ana"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to save orders");
    assert!(body["detail"].as_str().unwrap().contains("no order store is configured"));

    let health: Value = client
        .get(format!("{base}/api/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        health["storage"],
        json!({"backend": "unconfigured", "configured": false})
    );
}

#[tokio::test]
async fn test_production_hides_error_detail() {
    let base = spawn_app(Arc::new(UnconfiguredStore::<Order>::new()), true).await;
    let client = Client::new();

    let response = client.delete(format!("{base}/api/orders")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Failed to save orders"}));
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let base = memory_app().await;
    let client = Client::new();

    let response = client
        .request(reqwest::Method::OPTIONS, format!("{base}/api/orders"))
        .header("Origin", "https://truck.example.com")
        .header("Access-Control-Request-Method", "PATCH")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
    let methods = response.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(methods.contains("PATCH"));
    assert!(methods.contains("DELETE"));
}
