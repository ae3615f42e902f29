use std::sync::Arc;

use axum_test::TestServer;
use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use taskrank_api::{create_router, AppState, FixedClock};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

fn server() -> TestServer {
    let state = AppState::new(Arc::new(FixedClock(today())));
    TestServer::new(create_router(state)).unwrap()
}

fn due_in(days: i64) -> String {
    (today() + Duration::days(days)).format("%Y-%m-%d").to_string()
}

fn task(id: &str, title: &str, due: i64, hours: f64, importance: i64, deps: &[&str]) -> Value {
    json!({
        "id": id,
        "title": title,
        "due_date": due_in(due),
        "estimated_hours": hours,
        "importance": importance,
        "dependencies": deps,
        "completed": false,
    })
}

fn resume_and_portfolio(strategy: &str) -> Value {
    json!({
        "strategy": strategy,
        "tasks": [
            task("T2", "Portfolio", 7, 6.0, 7, &[]),
            task("T1", "Resume", 2, 1.0, 9, &[]),
        ]
    })
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let resp = server().get("/health").await;
    assert_eq!(resp.status_code(), 200);
    let body: Value = resp.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn analyze_ranks_tasks() {
    let resp = server()
        .post("/api/tasks/analyze/")
        .json(&resume_and_portfolio("smart_balance"))
        .await;

    assert_eq!(resp.status_code(), 200);
    let body: Value = resp.json();
    let ranked = body.as_array().unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0]["id"], "T1");
    assert_eq!(ranked[0]["final_score"], 7.5);
    assert_eq!(ranked[0]["urgency_score"], 8.0);
    assert_eq!(ranked[0]["effort_score"], 10.0);
    assert_eq!(ranked[0]["dependency_score"], 0.0);
    assert_eq!(ranked[0]["strategy"], "smart_balance");
    assert_eq!(ranked[0]["circular_dependency"], false);
    assert_eq!(ranked[0]["explanations"][4], "Importance: 9/10");
    assert_eq!(ranked[1]["id"], "T2");
}

#[tokio::test]
async fn analyze_without_trailing_slash() {
    let resp = server()
        .post("/api/tasks/analyze")
        .json(&resume_and_portfolio("deadline_driven"))
        .await;
    assert_eq!(resp.status_code(), 200);
    let body: Value = resp.json();
    assert_eq!(body[0]["strategy"], "deadline_driven");
}

#[tokio::test]
async fn every_strategy_picks_resume_first() {
    let server = server();
    for strategy in ["smart_balance", "fastest_wins", "high_impact", "deadline_driven"] {
        let resp = server
            .post("/api/tasks/suggest/")
            .json(&resume_and_portfolio(strategy))
            .await;
        assert_eq!(resp.status_code(), 200);
        let body: Value = resp.json();
        assert_eq!(body["recommended_task"]["id"], "T1", "{strategy}");
    }
}

#[tokio::test]
async fn completed_tasks_are_filtered_out() {
    let mut done = task("T1", "Done already", 1, 1.0, 10, &[]);
    done["completed"] = json!(true);
    let payload = json!({
        "tasks": [done, task("T2", "Next", 10, 3.0, 4, &["T1"])],
    });

    let resp = server().post("/api/tasks/analyze/").json(&payload).await;
    assert_eq!(resp.status_code(), 200);
    let body: Value = resp.json();
    let ranked = body.as_array().unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0]["id"], "T2");
    assert_eq!(ranked[0]["explanations"][3], "Has 1 prerequisite task.");
}

#[tokio::test]
async fn all_completed_yields_empty_results() {
    let mut done = task("T1", "Done", 1, 1.0, 10, &[]);
    done["completed"] = json!(true);
    let payload = json!({ "tasks": [done] });
    let server = server();

    let resp = server.post("/api/tasks/analyze/").json(&payload).await;
    assert_eq!(resp.status_code(), 200);
    assert_eq!(resp.json::<Value>(), json!([]));

    let resp = server.post("/api/tasks/suggest/").json(&payload).await;
    assert_eq!(resp.status_code(), 200);
    assert_eq!(resp.json::<Value>(), json!({ "recommended_task": null }));
}

#[tokio::test]
async fn cycles_are_flagged() {
    let payload = json!({
        "tasks": [
            task("X", "X", 5, 2.0, 5, &["Y"]),
            task("Y", "Y", 5, 2.0, 5, &["X"]),
        ],
    });

    let resp = server().post("/api/tasks/analyze/").json(&payload).await;
    let body: Value = resp.json();
    for scored in body.as_array().unwrap() {
        assert_eq!(scored["circular_dependency"], true);
        let explanations = scored["explanations"].as_array().unwrap();
        assert_eq!(
            explanations.last().unwrap(),
            "Circular dependency detected. Score reduced."
        );
    }
}

#[tokio::test]
async fn unknown_strategy_is_rejected() {
    let resp = server()
        .post("/api/tasks/analyze/")
        .json(&resume_and_portfolio("random"))
        .await;
    assert_eq!(resp.status_code(), 400);
    let body: Value = resp.json();
    assert_eq!(
        body["error"],
        "Invalid strategy 'random'. Allowed values: deadline_driven, fastest_wins, high_impact, smart_balance."
    );
}

#[tokio::test]
async fn missing_tasks_is_rejected() {
    let resp = server()
        .post("/api/tasks/suggest/")
        .json(&json!({ "strategy": "smart_balance" }))
        .await;
    assert_eq!(resp.status_code(), 400);
    assert_eq!(resp.json::<Value>()["error"], "'tasks' field is required.");
}

#[tokio::test]
async fn unknown_dependency_is_rejected() {
    let payload = json!({ "tasks": [task("T1", "Lonely", 3, 2.0, 5, &["T7"])] });
    let resp = server().post("/api/tasks/analyze/").json(&payload).await;
    assert_eq!(resp.status_code(), 400);
    assert_eq!(
        resp.json::<Value>()["error"],
        "Task T1: dependency 'T7' does not exist in the submitted tasks."
    );
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let resp = server().post("/api/tasks/analyze/").text("{not json").await;
    assert_eq!(resp.status_code(), 400);
    let error = resp.json::<Value>()["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("JSON parse error"), "{error}");
}

#[tokio::test]
async fn non_object_body_is_rejected() {
    let resp = server().post("/api/tasks/analyze/").json(&json!([1, 2])).await;
    assert_eq!(resp.status_code(), 400);
    assert_eq!(resp.json::<Value>()["error"], "Request body must be a JSON object.");
}
