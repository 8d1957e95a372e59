mod common;

use axum::http::StatusCode;
use common::read_json;
use http_helpers::{authed_json_request, authed_request};
use std::sync::Arc;
use std::time::Duration;
use studymate::app::{build_router, AppState};
use studymate::auth::token;
use studymate::model::{Role, User};
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

async fn seed_role(store: &InMemoryStore, email: &str, role: Role) -> (User, String) {
    let user = store
        .create_user(User::new("Someone".into(), email.into(), role))
        .await
        .expect("user");
    let token = token::mint(SECRET, user.id, Duration::from_secs(3600)).expect("token");
    (user, token)
}

#[tokio::test]
async fn student_cannot_reach_admin_routes() {
    let (state, store) = build_state();
    let (_, token) = seed_role(&store, "s1@example.com", Role::Student).await;

    let app = build_router(state);
    let response = app
        .oneshot(authed_request("GET", "/api/admin/students", &token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(body["success"], serde_json::json!(false));
}

#[tokio::test]
async fn admin_creates_and_lists_students() {
    let (state, store) = build_state();
    let (_, token) = seed_role(&store, "admin@example.com", Role::Admin).await;

    let app = build_router(state);
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/students",
            &token,
            serde_json::json!({
                "name": "Asha",
                "email": "asha@example.com",
                "category": "College",
                "subcategory": "BTech"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["student"]["role"], serde_json::json!("student"));
    assert_eq!(body["student"]["category"], serde_json::json!("College"));
    // New students start with every permission enabled.
    assert_eq!(
        body["student"]["permissions"]["canAccessNotes"],
        serde_json::json!(true)
    );

    // Duplicate email is rejected.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/students",
            &token,
            serde_json::json!({ "name": "Other", "email": "asha@example.com" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .oneshot(authed_request("GET", "/api/admin/students", &token))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_eq!(body["count"], serde_json::json!(1));
}

#[tokio::test]
async fn block_toggle_flips_and_rejects_non_students() {
    let (state, store) = build_state();
    let (admin, admin_token) = seed_role(&store, "admin@example.com", Role::Admin).await;
    let (student, _) = seed_role(&store, "s1@example.com", Role::Student).await;

    let app = build_router(state);
    let uri = format!("/api/admin/students/{}/block", student.id);
    let response = app
        .clone()
        .oneshot(authed_json_request("PUT", &uri, &admin_token, serde_json::json!({})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["message"], serde_json::json!("student blocked"));
    assert_eq!(body["student"]["isBlocked"], serde_json::json!(true));

    let response = app
        .clone()
        .oneshot(authed_json_request("PUT", &uri, &admin_token, serde_json::json!({})))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_eq!(body["message"], serde_json::json!("student unblocked"));

    // An admin is not a valid block target.
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/admin/students/{}/block", admin.id),
            &admin_token,
            serde_json::json!({}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn permission_patch_applies_named_fields_only() {
    let (state, store) = build_state();
    let (_, admin_token) = seed_role(&store, "admin@example.com", Role::Admin).await;
    let (student, _) = seed_role(&store, "s1@example.com", Role::Student).await;

    let app = build_router(state);
    let uri = format!("/api/admin/students/{}/permissions", student.id);
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "PUT",
            &uri,
            &admin_token,
            serde_json::json!({ "permissions": { "canAccessNotes": false } }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(
        body["student"]["permissions"]["canAccessNotes"],
        serde_json::json!(false)
    );
    assert_eq!(
        body["student"]["permissions"]["canAccessBooks"],
        serde_json::json!(true)
    );

    // Unknown permission keys fail deserialization instead of being dropped.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "PUT",
            &uri,
            &admin_token,
            serde_json::json!({ "permissions": { "canAccessEverything": true } }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .oneshot(authed_request("GET", &uri, &admin_token))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_eq!(
        body["student"]["permissions"]["canAccessNotes"],
        serde_json::json!(false)
    );
}

#[tokio::test]
async fn scope_update_reassigns_category() {
    let (state, store) = build_state();
    let (_, admin_token) = seed_role(&store, "admin@example.com", Role::Admin).await;
    let (student, _) = seed_role(&store, "s1@example.com", Role::Student).await;

    let app = build_router(state);
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/admin/students/{}/scope", student.id),
            &admin_token,
            serde_json::json!({ "category": "School", "subcategory": "Class10" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["student"]["category"], serde_json::json!("School"));
    assert_eq!(body["student"]["subcategory"], serde_json::json!("Class10"));
}

#[tokio::test]
async fn deleting_students_is_superadmin_only() {
    let (state, store) = build_state();
    let (_, admin_token) = seed_role(&store, "admin@example.com", Role::Admin).await;
    let (_, super_token) = seed_role(&store, "root@example.com", Role::Superadmin).await;
    let (student, _) = seed_role(&store, "s1@example.com", Role::Student).await;

    let app = build_router(state);
    let uri = format!("/api/admin/students/{}", student.id);
    let response = app
        .clone()
        .oneshot(authed_request("DELETE", &uri, &admin_token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(authed_request("DELETE", &uri, &super_token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(authed_request("DELETE", &uri, &super_token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_crud_validates_marks_and_indices() {
    let (state, store) = build_state();
    let (_, token) = seed_role(&store, "admin@example.com", Role::Admin).await;

    let app = build_router(state);
    // passingMarks above totalMarks is rejected.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/tests",
            &token,
            serde_json::json!({
                "title": "Bad",
                "subject": "Math",
                "category": "College",
                "subcategory": "BTech",
                "questions": [],
                "totalMarks": 10.0,
                "passingMarks": 20.0
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], serde_json::json!("invalid test"));
    assert!(body["error"].as_str().is_some());

    // Out-of-range correct index is rejected.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/tests",
            &token,
            serde_json::json!({
                "title": "Bad2",
                "subject": "Math",
                "category": "College",
                "subcategory": "BTech",
                "questions": [
                    { "question": "q", "options": ["a", "b"], "correctAnswer": 2 }
                ],
                "totalMarks": 10.0,
                "passingMarks": 5.0
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A valid test is created with defaults filled in.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/tests",
            &token,
            serde_json::json!({
                "title": "Good",
                "subject": "Math",
                "category": "College",
                "subcategory": "BTech",
                "questions": [
                    { "question": "q", "options": ["a", "b"], "correctAnswer": 1 }
                ],
                "totalMarks": 10.0,
                "passingMarks": 5.0
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["test"]["difficulty"], serde_json::json!("Medium"));
    assert_eq!(body["test"]["duration"], serde_json::json!(30));
    assert_eq!(body["test"]["attempts"], serde_json::json!(0));
    let id = body["test"]["id"].as_str().expect("id").to_string();

    // Admin fetch returns the answer key.
    let response = app
        .oneshot(authed_request(
            "GET",
            &format!("/api/admin/tests/{id}"),
            &token,
        ))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_eq!(
        body["test"]["questions"][0]["correctAnswer"],
        serde_json::json!(1)
    );
}

#[tokio::test]
async fn analytics_counts_students_and_content() {
    let (state, store) = build_state();
    let (_, token) = seed_role(&store, "admin@example.com", Role::Admin).await;
    let (_, _) = seed_role(&store, "s1@example.com", Role::Student).await;
    let (blocked, _) = seed_role(&store, "s2@example.com", Role::Student).await;
    let mut blocked_user = store.get_user(blocked.id).await.expect("user");
    blocked_user.is_blocked = true;
    store.update_user(blocked_user).await.expect("update");

    let app = build_router(state);
    let response = app
        .oneshot(authed_request("GET", "/api/admin/analytics", &token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let students = &body["analytics"]["students"];
    assert_eq!(students["total"], serde_json::json!(2));
    assert_eq!(students["active"], serde_json::json!(1));
    assert_eq!(students["blocked"], serde_json::json!(1));
    assert_eq!(body["analytics"]["content"]["total"], serde_json::json!(0));
}

#[tokio::test]
async fn admin_accounts_are_superadmin_territory() {
    let (state, store) = build_state();
    let (_, admin_token) = seed_role(&store, "admin@example.com", Role::Admin).await;
    let (root, super_token) = seed_role(&store, "root@example.com", Role::Superadmin).await;

    let app = build_router(state);
    let response = app
        .clone()
        .oneshot(authed_request("GET", "/api/admin/admins", &admin_token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/admins",
            &super_token,
            serde_json::json!({ "name": "New Admin", "email": "new-admin@example.com" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["admin"]["role"], serde_json::json!("admin"));
    let new_admin_id = body["admin"]["id"].as_str().expect("id").to_string();

    let response = app
        .clone()
        .oneshot(authed_request("GET", "/api/admin/admins", &super_token))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_eq!(body["count"], serde_json::json!(3));

    let response = app
        .clone()
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/admin/admins/{new_admin_id}"),
            &super_token,
            serde_json::json!({ "name": "Renamed Admin" }),
        ))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_eq!(body["admin"]["name"], serde_json::json!("Renamed Admin"));

    // Superadmins cannot be deleted, admins can.
    let response = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/admin/admins/{}", root.id),
            &super_token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(
        body["message"],
        serde_json::json!("cannot delete a superadmin account")
    );

    let response = app
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/admin/admins/{new_admin_id}"),
            &super_token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_student_id_is_not_found() {
    let (state, store) = build_state();
    let (_, token) = seed_role(&store, "admin@example.com", Role::Admin).await;

    let app = build_router(state);
    let response = app
        .oneshot(authed_request(
            "GET",
            &format!("/api/admin/students/{}/permissions", Uuid::new_v4()),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["message"], serde_json::json!("student not found"));
}
