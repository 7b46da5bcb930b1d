//! End-to-end tests that drive the JSON API through the full router.

use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::{Value, json};

use armada_ledger::{AppState, build_router, endpoints};

fn get_test_server() -> TestServer {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");
    let state = AppState::new(connection).expect("Could not create app state.");

    TestServer::new(build_router(state))
}

/// Register a customer and return its ID.
async fn register_customer(server: &TestServer, initial: &str) -> i64 {
    let response = server
        .post(endpoints::CUSTOMERS_API)
        .json(&json!({ "initial": initial }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

/// Register a truck and return its ID.
async fn register_truck(server: &TestServer, name: &str) -> i64 {
    let response = server
        .post(endpoints::TRUCKS_API)
        .json(&json!({ "name": name }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

fn transaction_form(date: &str, customer: &str, truck_id: i64, cost: f64, selling: f64) -> Value {
    json!({
        "date": date,
        "containerNo": "TEMU1234567",
        "invoiceNo": "INV-1",
        "destination": "Tanjung Priok",
        "cost": cost,
        "sellingPrice": selling,
        "customer": customer,
        "truckId": truck_id,
    })
}

#[tokio::test]
async fn create_transaction_stores_resolved_customer() {
    let server = get_test_server();
    let customer_id = register_customer(&server, "SKM").await;
    let truck_id = register_truck(&server, "B 9201 UIA").await;

    let response = server
        .post(endpoints::TRANSACTIONS_API)
        .json(&transaction_form("2025-06-10", "SKM", truck_id, 100.0, 150.0))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let transaction = response.json::<Value>();
    assert_eq!(transaction["customer"]["customerId"].as_i64(), Some(customer_id));
    assert_eq!(transaction["customer"]["initial"], "SKM");
    assert_eq!(transaction["isPrintedBon"], false);
}

#[tokio::test]
async fn create_transaction_with_unknown_customer_persists_nothing() {
    let server = get_test_server();
    let truck_id = register_truck(&server, "B 9201 UIA").await;

    let response = server
        .post(endpoints::TRANSACTIONS_API)
        .json(&transaction_form("2025-06-10", "XYZ", truck_id, 100.0, 150.0))
        .await;

    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["error"], "Customer tidak terdaftar");

    let transactions = server.get(endpoints::TRANSACTIONS_API).await.json::<Value>();
    assert_eq!(transactions.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn edit_transaction_responds_not_found_for_missing_id() {
    let server = get_test_server();
    register_customer(&server, "SKM").await;
    let truck_id = register_truck(&server, "B 9201 UIA").await;

    let response = server
        .put("/api/transactions/999")
        .json(&transaction_form("2025-06-10", "SKM", truck_id, 100.0, 150.0))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn summary_groups_totals_by_truck_name() {
    let server = get_test_server();
    register_customer(&server, "SKM").await;
    let truck_a = register_truck(&server, "Truck A").await;
    let truck_b = register_truck(&server, "Truck B").await;

    for (truck_id, cost, selling) in [
        (truck_a, 100.0, 150.0),
        (truck_a, 50.0, 80.0),
        (truck_b, 200.0, 300.0),
    ] {
        server
            .post(endpoints::TRANSACTIONS_API)
            .json(&transaction_form("2025-06-10", "SKM", truck_id, cost, selling))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    let response = server
        .get(endpoints::SUMMARY_API)
        .add_query_param("startDate", "2025-06-01")
        .add_query_param("endDate", "2025-06-30")
        .await;

    response.assert_status_ok();
    let summary = response.json::<Value>();
    assert_eq!(summary["Truck A"]["cost"], 150.0);
    assert_eq!(summary["Truck A"]["sellingPrice"], 230.0);
    assert_eq!(summary["Truck B"]["cost"], 200.0);
    assert_eq!(summary["Truck B"]["sellingPrice"], 300.0);
}

#[tokio::test]
async fn summary_drops_rows_with_unregistered_truck() {
    let server = get_test_server();
    register_customer(&server, "SKM").await;
    let truck_a = register_truck(&server, "Truck A").await;

    // The schema has no foreign key on truck_id, so a row can reference a
    // truck that was never registered. It must not appear in the report.
    for (truck_id, cost, selling) in [(truck_a, 100.0, 150.0), (999, 40.0, 60.0)] {
        server
            .post(endpoints::TRANSACTIONS_API)
            .json(&transaction_form("2025-06-10", "SKM", truck_id, cost, selling))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    let response = server
        .get(endpoints::SUMMARY_API)
        .add_query_param("startDate", "2025-06-01")
        .add_query_param("endDate", "2025-06-30")
        .await;

    response.assert_status_ok();
    let summary = response.json::<Value>();
    assert_eq!(summary.as_object().unwrap().len(), 1);
    assert_eq!(summary["Truck A"]["cost"], 100.0);
}

#[tokio::test]
async fn print_flags_transactions_and_responds_with_success_signal() {
    let server = get_test_server();
    register_customer(&server, "SKM").await;
    let truck_id = register_truck(&server, "B 9201 UIA").await;

    let transaction = server
        .post(endpoints::TRANSACTIONS_API)
        .json(&transaction_form("2025-06-10", "SKM", truck_id, 100.0, 150.0))
        .await
        .json::<Value>();
    let transaction_id = transaction["id"].as_i64().unwrap();

    let response = server
        .post(endpoints::PRINT_API)
        .json(&json!({ "transactionIds": [transaction_id], "docType": "bon" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "Print Success");

    let transactions = server.get(endpoints::TRANSACTIONS_API).await.json::<Value>();
    assert_eq!(transactions[0]["isPrintedBon"], true);
    assert_eq!(transactions[0]["isPrintedInvoice"], false);
}

#[tokio::test]
async fn print_failure_responds_with_generic_retry_message() {
    let server = get_test_server();

    let response = server
        .post(endpoints::PRINT_API)
        .json(&json!({ "transactionIds": [999], "docType": "tagihan" }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["error"], "Mohon coba kembali");
}

#[tokio::test]
async fn print_with_empty_selection_is_rejected() {
    let server = get_test_server();

    let response = server
        .post(endpoints::PRINT_API)
        .json(&json!({ "transactionIds": [], "docType": "bon" }))
        .await;

    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn misc_transactions_are_listed_per_truck() {
    let server = get_test_server();
    let truck_id = register_truck(&server, "B 9201 UIA").await;

    server
        .post(endpoints::MISC_TRANSACTIONS_API)
        .json(&json!({
            "date": "2025-06-10",
            "details": "Ganti ban",
            "cost": 250.0,
            "truckId": truck_id,
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .get(&format!("/api/trucks/{truck_id}/misc-transactions"))
        .await;

    response.assert_status_ok();
    let transactions = response.json::<Value>();
    assert_eq!(transactions.as_array().unwrap().len(), 1);
    assert_eq!(transactions[0]["details"], "Ganti ban");
}
