mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::read_json;
use http_helpers::{authed_json_request, authed_request};
use std::sync::Arc;
use std::time::Duration;
use studymate::app::{build_router, AppState};
use studymate::auth::token;
use studymate::model::{Category, Difficulty, Question, Role, Test, User};
use studymate::store::memory::InMemoryStore;
use studymate::store::StudyStore;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "integration-secret";

fn build_state() -> (AppState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState {
        store: store.clone(),
        jwt_secret: SECRET.to_string(),
        bootstrap_enabled: false,
        bootstrap_token: None,
    };
    (state, store)
}

fn question(prompt: &str, options: &[&str], correct: usize) -> Question {
    Question {
        id: Uuid::new_v4(),
        question: prompt.into(),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct_answer: correct,
        explanation: Some(format!("because {}", options[correct])),
    }
}

async fn seed_test(store: &InMemoryStore, questions: Vec<Question>) -> Test {
    let test = Test {
        id: Uuid::new_v4(),
        title: "Midterm".into(),
        description: None,
        subject: "Math".into(),
        category: Category::College,
        subcategory: "BTech".into(),
        difficulty: Difficulty::Medium,
        duration: 45,
        questions,
        total_marks: 100.0,
        passing_marks: 40.0,
        uploaded_by: Uuid::new_v4(),
        attempts: 0,
        created_at: Utc::now(),
    };
    store.create_test(test).await.expect("test")
}

async fn seed_student(store: &InMemoryStore) -> String {
    let mut user = User::new("Student".into(), "s1@example.com".into(), Role::Student);
    user.category = Some(Category::College);
    user.subcategory = Some("BTech".into());
    let user = store.create_user(user).await.expect("user");
    token::mint(SECRET, user.id, Duration::from_secs(3600)).expect("token")
}

fn assert_no_key(value: &serde_json::Value, key: &str) {
    match value {
        serde_json::Value::Object(map) => {
            assert!(!map.contains_key(key), "found forbidden key {key}");
            for child in map.values() {
                assert_no_key(child, key);
            }
        }
        serde_json::Value::Array(items) => {
            for child in items {
                assert_no_key(child, key);
            }
        }
        _ => {}
    }
}

#[tokio::test]
async fn delivered_test_hides_answers_and_explanations() {
    let (state, store) = build_state();
    let test = seed_test(
        &store,
        vec![
            question("2+2?", &["3", "4"], 1),
            question("3*3?", &["6", "9"], 1),
        ],
    )
    .await;
    let token = seed_student(&store).await;

    let app = build_router(state);
    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/api/student/tests/{}", test.id),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_no_key(&body, "correctAnswer");
    assert_no_key(&body, "explanation");
    assert_eq!(body["test"]["questions"].as_array().map(Vec::len), Some(2));

    // The list endpoint uses the same projection.
    let response = app
        .oneshot(authed_request("GET", "/api/student/tests", &token))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_no_key(&body, "correctAnswer");
    assert_no_key(&body, "explanation");
}

#[tokio::test]
async fn difficulty_filter_applies_to_test_listing() {
    let (state, store) = build_state();
    seed_test(&store, vec![question("q", &["a", "b"], 0)]).await;
    let token = seed_student(&store).await;

    let app = build_router(state);
    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            "/api/student/tests?difficulty=Hard",
            &token,
        ))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_eq!(body["count"], serde_json::json!(0));

    let response = app
        .oneshot(authed_request(
            "GET",
            "/api/student/tests?difficulty=Medium",
            &token,
        ))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_eq!(body["count"], serde_json::json!(1));
}

#[tokio::test]
async fn submission_scores_and_increments_attempts() {
    let (state, store) = build_state();
    let questions = vec![
        question("q1", &["a", "b"], 0),
        question("q2", &["a", "b"], 1),
        question("q3", &["a", "b"], 0),
        question("q4", &["a", "b"], 1),
    ];
    let ids: Vec<Uuid> = questions.iter().map(|q| q.id).collect();
    let test = seed_test(&store, questions).await;
    let token = seed_student(&store).await;

    let app = build_router(state);
    let answers = serde_json::json!({
        "answers": [
            { "questionId": ids[0], "selectedAnswer": 0 },
            { "questionId": ids[1], "selectedAnswer": 1 },
            { "questionId": ids[2], "selectedAnswer": 0 },
            { "questionId": ids[3], "selectedAnswer": 0 },
        ]
    });
    let response = app
        .oneshot(authed_json_request(
            "POST",
            &format!("/api/student/tests/{}/submit", test.id),
            &token,
            answers,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let results = &body["results"];
    assert_eq!(results["totalQuestions"], serde_json::json!(4));
    assert_eq!(results["correctAnswers"], serde_json::json!(3));
    assert_eq!(results["score"], serde_json::json!(75.0));
    assert_eq!(results["passed"], serde_json::json!(true));
    assert_eq!(results["details"].as_array().map(Vec::len), Some(4));

    let stored = store.get_test(test.id).await.expect("test");
    assert_eq!(stored.attempts, 1);
}

#[tokio::test]
async fn unanswered_questions_count_as_wrong() {
    let (state, store) = build_state();
    let questions = vec![question("q1", &["a", "b"], 0), question("q2", &["a", "b"], 1)];
    let first = questions[0].id;
    let test = seed_test(&store, questions).await;
    let token = seed_student(&store).await;

    let app = build_router(state);
    let answers = serde_json::json!({
        "answers": [{ "questionId": first, "selectedAnswer": 0 }]
    });
    let response = app
        .oneshot(authed_json_request(
            "POST",
            &format!("/api/student/tests/{}/submit", test.id),
            &token,
            answers,
        ))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_eq!(body["results"]["correctAnswers"], serde_json::json!(1));
    assert_eq!(body["results"]["score"], serde_json::json!(50.0));
    let details = body["results"]["details"].as_array().expect("details");
    assert!(details
        .iter()
        .any(|d| d["userAnswer"].is_null() && d["isCorrect"] == serde_json::json!(false)));
}

#[tokio::test]
async fn submitting_to_missing_test_is_not_found() {
    let (state, store) = build_state();
    let token = seed_student(&store).await;

    let app = build_router(state);
    let response = app
        .oneshot(authed_json_request(
            "POST",
            &format!("/api/student/tests/{}/submit", Uuid::new_v4()),
            &token,
            serde_json::json!({ "answers": [] }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["message"], serde_json::json!("test not found"));
}

#[tokio::test]
async fn out_of_scope_test_listing_is_empty_but_direct_fetch_works() {
    let (state, store) = build_state();
    let test = seed_test(&store, vec![question("q", &["a", "b"], 0)]).await;
    let mut user = User::new("Student".into(), "school@example.com".into(), Role::Student);
    user.category = Some(Category::School);
    user.subcategory = Some("X".into());
    let user = store.create_user(user).await.expect("user");
    let token = token::mint(SECRET, user.id, Duration::from_secs(3600)).expect("token");

    let app = build_router(state);
    let response = app
        .clone()
        .oneshot(authed_request("GET", "/api/student/tests", &token))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_eq!(body["count"], serde_json::json!(0));

    // Direct fetch by id is not scope-filtered; discovery is.
    let response = app
        .oneshot(authed_request(
            "GET",
            &format!("/api/student/tests/{}", test.id),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}
