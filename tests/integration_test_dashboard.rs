mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        panic!("Response body is empty. Status: {}", status);
    }
    match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => panic!(
            "Failed to parse JSON: {:?}. Status: {}. Body: {:?}",
            e,
            status,
            String::from_utf8_lossy(&bytes)
        ),
    }
}

async fn get_dashboard(app: &TestApp, token: &str) -> Value {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/dashboard")
                .header(header::COOKIE, format!("session_token={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    parse_body(response).await
}

async fn submit_entry(app: &TestApp, token: &str, payload: Value) {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/student/input")
                .header(header::COOKIE, format!("session_token={}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_dashboard_requires_a_session() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/dashboard").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_students_see_only_their_own_entries() {
    let app = TestApp::new().await;

    // guru1 adds a second student.
    let guru_token = app.login("guru1", "guru123").await;
    let added = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/guru/add_student")
                .header(header::COOKIE, format!("session_token={}", guru_token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "username": "siswa2",
                        "password": "sandi2",
                        "full_name": "Siswa Dua"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(added.status(), StatusCode::OK);

    // siswa1 writes two entries, siswa2 writes one.
    let siswa1_token = app.login("siswa1", "siswa123").await;
    submit_entry(&app, &siswa1_token, json!({ "date": "2024-03-01" })).await;
    submit_entry(&app, &siswa1_token, json!({ "date": "2024-03-02" })).await;

    let siswa2_token = app.login("siswa2", "sandi2").await;
    submit_entry(&app, &siswa2_token, json!({ "date": "2024-03-03" })).await;

    let siswa1_dash = get_dashboard(&app, &siswa1_token).await;
    let entries = siswa1_dash["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e["date"] != "2024-03-03"));

    let siswa2_dash = get_dashboard(&app, &siswa2_token).await;
    assert_eq!(siswa2_dash["entries"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_guru_dashboard_collects_roster_entries_newest_first() {
    let app = TestApp::new().await;
    let siswa_token = app.login("siswa1", "siswa123").await;

    // Deliberately out of order.
    submit_entry(&app, &siswa_token, json!({ "date": "2024-03-02" })).await;
    submit_entry(&app, &siswa_token, json!({ "date": "2024-03-05" })).await;
    submit_entry(&app, &siswa_token, json!({ "date": "2024-03-01" })).await;

    let guru_token = app.login("guru1", "guru123").await;
    let dash = get_dashboard(&app, &guru_token).await;

    let students = dash["students"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["username"], "siswa1");
    assert!(students[0].get("password_hash").is_none());

    let dates: Vec<&str> = dash["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-03-05", "2024-03-02", "2024-03-01"]);

    // Joined display name comes from the student row.
    assert_eq!(dash["entries"][0]["student_name"], "Siswa Contoh");
}

#[tokio::test]
async fn test_guru_without_students_gets_empty_lists() {
    let app = TestApp::new().await;

    // A brand new guru supervises nobody.
    let admin_token = app.login("admin", "admin123").await;
    let created = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/add_user")
                .header(header::COOKIE, format!("session_token={}", admin_token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "username": "guru2",
                        "password": "rahasia2",
                        "role": "guru",
                        "full_name": "Guru Dua"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::OK);

    // Even with entries in the table from other students.
    let siswa_token = app.login("siswa1", "siswa123").await;
    submit_entry(&app, &siswa_token, json!({ "date": "2024-03-01" })).await;

    let guru2_token = app.login("guru2", "rahasia2").await;
    let dash = get_dashboard(&app, &guru2_token).await;

    assert_eq!(dash["students"].as_array().unwrap().len(), 0);
    assert_eq!(dash["entries"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_admin_dashboard_lists_accounts_not_entries() {
    let app = TestApp::new().await;

    let siswa_token = app.login("siswa1", "siswa123").await;
    submit_entry(&app, &siswa_token, json!({ "date": "2024-03-01" })).await;

    let admin_token = app.login("admin", "admin123").await;
    let dash = get_dashboard(&app, &admin_token).await;

    let gurus = dash["gurus"].as_array().unwrap();
    let siswa = dash["siswa"].as_array().unwrap();
    assert_eq!(gurus.len(), 1);
    assert_eq!(gurus[0]["username"], "guru1");
    assert_eq!(siswa.len(), 1);
    assert_eq!(siswa[0]["username"], "siswa1");

    // No journal content on the admin view.
    assert!(dash.get("entries").is_none());
    assert!(gurus[0].get("password_hash").is_none());
}
