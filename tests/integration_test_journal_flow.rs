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

async fn post_json(app: &TestApp, token: &str, uri: &str, payload: Value) -> axum::response::Response {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::COOKIE, format!("session_token={}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get(app: &TestApp, token: &str, uri: &str) -> axum::response::Response {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, format!("session_token={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

// One school day from end to end: the admin provisions a teacher, the teacher
// enrolls a student, the student journals, and each role sees exactly its own
// slice of the result.
#[tokio::test]
async fn test_full_journal_flow_across_all_three_roles() {
    let app = TestApp::new().await;

    // 1. Admin provisions a second teacher.
    let admin_token = app.login("admin", "admin123").await;
    let response = post_json(
        &app,
        &admin_token,
        "/admin/add_user",
        json!({
            "username": "guru2",
            "password": "guru234",
            "role": "guru",
            "full_name": "Guru Pembimbing 2"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let guru2 = parse_body(response).await;
    let guru2_id = guru2["id"].as_str().unwrap().to_string();

    // 2. The new teacher logs in and enrolls a student of their own.
    let guru2_token = app.login("guru2", "guru234").await;
    let response = post_json(
        &app,
        &guru2_token,
        "/guru/add_student",
        json!({
            "username": "andi",
            "password": "andi123",
            "full_name": "Andi Pratama"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let andi = parse_body(response).await;
    assert_eq!(andi["teacher_id"], guru2_id.as_str());

    // 3. The student logs in and files a journal for the day.
    let andi_token = app.login("andi", "andi123").await;
    let response = post_json(
        &app,
        &andi_token,
        "/student/input",
        json!({
            "date": "2024-01-01",
            "wake_time": "04:30",
            "prayer": ["subuh", "maghrib"],
            "sport": "jalan kaki",
            "food_notes": "sarapan roti",
            "study_notes": "bahasa indonesia",
            "community_notes": "membantu orang tua",
            "sleep_time": "21:15"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let dash = parse_body(get(&app, &andi_token, "/dashboard").await).await;
    assert_eq!(dash["user"]["username"], "andi");
    assert_eq!(dash["entries"].as_array().unwrap().len(), 1);
    assert_eq!(dash["entries"][0]["prayer"], "subuh,maghrib");

    // 4. The teacher's dashboard shows the roster and the journal, named.
    let dash = parse_body(get(&app, &guru2_token, "/dashboard").await).await;
    let students = dash["students"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["username"], "andi");

    let entries = dash["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["student_name"], "Andi Pratama");
    assert_eq!(entries[0]["date"], "2024-01-01");

    // The seeded guru1 supervises nobody new and sees none of this.
    let guru1_token = app.login("guru1", "guru123").await;
    let dash = parse_body(get(&app, &guru1_token, "/dashboard").await).await;
    assert_eq!(dash["entries"].as_array().unwrap().len(), 0);

    // 5. The admin sees accounts, not journal content.
    let response = get(&app, &admin_token, "/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!text.contains("2024-01-01"));

    let dash: Value = serde_json::from_str(&text).unwrap();
    let gurus = dash["gurus"].as_array().unwrap();
    assert!(gurus.iter().any(|g| g["username"] == "guru2"));
    let siswa = dash["siswa"].as_array().unwrap();
    assert!(siswa.iter().any(|s| s["username"] == "andi"));
}
