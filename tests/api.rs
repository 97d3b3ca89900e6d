//! End-to-end tests for the JSON API and the dashboard page.

use axum::http::StatusCode;
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use rusqlite::Connection;
use scraper::{Html, Selector};
use serde_json::{Value, json};

use outlay::{AppState, build_router};

fn new_test_server() -> TestServer {
    let conn = Connection::open_in_memory().unwrap();
    let state = AppState::new(conn).unwrap();

    TestServer::new(build_router(state))
}

async fn add_manual_expense(server: &TestServer, description: &str, amount: f64) {
    let response = server
        .post("/manual")
        .json(&json!({ "description": description, "amount": amount }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn manual_expense_round_trip() {
    let server = new_test_server();

    let response = server
        .post("/manual")
        .json(&json!({ "description": "Coffee", "amount": 4.5 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body.get("error").is_none());

    let expenses: Value = server.get("/api/expenses").await.json();
    assert_eq!(
        expenses,
        json!([{ "description": "Coffee", "amount": 4.5, "category": "Food" }])
    );

    let summary: Value = server.get("/api/summary").await.json();
    assert_eq!(summary, json!({ "Food": 4.5 }));
}

#[tokio::test]
async fn manual_expense_with_empty_description_is_rejected() {
    let server = new_test_server();

    let response = server
        .post("/manual")
        .json(&json!({ "description": "", "amount": 4.5 }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "Description cannot be empty");

    let expenses: Value = server.get("/api/expenses").await.json();
    assert_eq!(expenses, json!([]));
}

#[tokio::test]
async fn summary_total_matches_expense_total() {
    let server = new_test_server();
    add_manual_expense(&server, "Lunch", 12.5).await;
    add_manual_expense(&server, "Bus fare", 3.0).await;
    add_manual_expense(&server, "Electricity bill", 80.0).await;
    add_manual_expense(&server, "Dinner", 22.5).await;

    let expenses: Value = server.get("/api/expenses").await.json();
    let expense_total: f64 = expenses
        .as_array()
        .unwrap()
        .iter()
        .map(|expense| expense["amount"].as_f64().unwrap())
        .sum();

    let summary: Value = server.get("/api/summary").await.json();
    let summary_total: f64 = summary
        .as_object()
        .unwrap()
        .values()
        .map(|amount| amount.as_f64().unwrap())
        .sum();

    assert_eq!(expense_total, 118.0);
    assert!((summary_total - expense_total).abs() < 1e-9);
}

#[tokio::test]
async fn summary_preserves_first_seen_category_order() {
    let server = new_test_server();
    add_manual_expense(&server, "Movie tickets", 18.0).await;
    add_manual_expense(&server, "Lunch", 12.5).await;
    add_manual_expense(&server, "Another movie", 15.0).await;

    let summary: Value = server.get("/api/summary").await.json();

    // serde_json is configured to preserve object order, so the response
    // object's keys follow first appearance in the expense list.
    let categories: Vec<_> = summary.as_object().unwrap().keys().cloned().collect();
    assert_eq!(categories, ["Entertainment", "Food"]);
}

#[tokio::test]
async fn clear_all_empties_expenses_and_summary() {
    let server = new_test_server();
    add_manual_expense(&server, "Lunch", 12.5).await;
    add_manual_expense(&server, "Taxi home", 23.0).await;

    let response = server.post("/api/clear").await;
    response.assert_status_ok();

    let expenses: Value = server.get("/api/expenses").await.json();
    assert_eq!(expenses, json!([]));

    let summary: Value = server.get("/api/summary").await.json();
    assert_eq!(summary, json!({}));
}

fn csv_upload_form(file_name: &str, content: &str) -> MultipartForm {
    let part = Part::text(content.to_owned())
        .file_name(file_name.to_owned())
        .mime_type("text/csv");

    MultipartForm::new().add_part("file", part)
}

#[tokio::test]
async fn csv_upload_imports_expenses() {
    let server = new_test_server();
    let csv = "Description,Amount\n\
        Lunch,12.50\n\
        Taxi home,23.00\n";

    let response = server
        .post("/upload")
        .multipart(csv_upload_form("expenses.csv", csv))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Imported 2 expenses");

    let expenses: Value = server.get("/api/expenses").await.json();
    assert_eq!(
        expenses,
        json!([
            { "description": "Lunch", "amount": 12.5, "category": "Food" },
            { "description": "Taxi home", "amount": 23.0, "category": "Transport" }
        ])
    );
}

#[tokio::test]
async fn upload_without_file_part_is_rejected() {
    let server = new_test_server();
    let form = MultipartForm::new().add_text("notes", "no file here");

    let response = server.post("/upload").multipart(form).await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "No file part");
}

#[tokio::test]
async fn upload_without_file_name_is_rejected() {
    let server = new_test_server();
    let form = MultipartForm::new().add_text("file", "Description,Amount\n");

    let response = server.post("/upload").multipart(form).await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "No selected file");
}

#[tokio::test]
async fn upload_of_non_csv_file_is_rejected() {
    let server = new_test_server();

    let response = server
        .post("/upload")
        .multipart(csv_upload_form("receipt.png", "not a csv"))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid file type");
}

#[tokio::test]
async fn upload_with_bad_row_stores_nothing() {
    let server = new_test_server();
    let csv = "Description,Amount\n\
        Lunch,12.50\n\
        Taxi home,twenty\n";

    let response = server
        .post("/upload")
        .multipart(csv_upload_form("expenses.csv", csv))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Error processing file:")
    );

    let expenses: Value = server.get("/api/expenses").await.json();
    assert_eq!(expenses, json!([]));
}

#[tokio::test]
async fn dashboard_page_reflects_expenses() {
    let server = new_test_server();
    add_manual_expense(&server, "Lunch", 12.5).await;
    add_manual_expense(&server, "Taxi home", 23.0).await;

    let response = server.get("/").await;
    response.assert_status_ok();

    let html = Html::parse_document(&response.text());

    let row_selector = Selector::parse("tbody tr").unwrap();
    assert_eq!(html.select(&row_selector).count(), 2);

    let amount_selector = Selector::parse(".summary-card .amount").unwrap();
    let total = html
        .select(&amount_selector)
        .next()
        .unwrap()
        .text()
        .collect::<String>();
    assert_eq!(total, "$35.50");
}

#[tokio::test]
async fn unknown_route_returns_404_page() {
    let server = new_test_server();

    let response = server.get("/does-not-exist").await;

    response.assert_status_not_found();
    assert!(response.text().contains("404"));
}
