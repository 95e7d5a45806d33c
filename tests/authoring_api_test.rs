use std::env;
use std::sync::Once;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use question_authoring::middleware::auth::Claims;
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

static INIT: Once = Once::new();

fn setup_app() -> Router {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();
        env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
        env::set_var("JWT_SECRET", "test_secret_key");
        env::set_var("UPSTREAM_API_URL", "http://127.0.0.1:9/api");
        env::set_var("API_RPS", "1000");
        question_authoring::config::init_config().expect("init config");
    });
    let config = question_authoring::config::get_config();
    let state = question_authoring::AppState::new(config).expect("app state");
    question_authoring::routes::router(state, config.api_rps)
}

fn token(role: &str) -> String {
    let claims = Claims {
        sub: "user-1".into(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        role: Some(role.into()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test_secret_key"),
    )
    .expect("encode token")
}

async fn post_json(app: &Router, uri: &str, role: Option<&str>, body: JsonValue) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(role) = role {
        builder = builder.header("authorization", format!("Bearer {}", token(role)));
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, json)
}

fn capitals_question(correct: &[&str]) -> JsonValue {
    json!({
        "content": "Which of these are capital cities?",
        "question_type_id": 2,
        "subject_id": 1,
        "difficulty_level_id": 1,
        "answers": [
            { "id": "a", "content": { "text": "Paris" }, "order_index": 1 },
            { "id": "b", "content": { "text": "London" }, "order_index": 2 },
            { "id": "c", "content": { "text": "Berlin" }, "order_index": 3 }
        ],
        "answer_config": {
            "kind": "multiple_select",
            "options_count": 3,
            "correct": correct
        }
    })
}

#[tokio::test]
async fn health_is_public() {
    let app = setup_app();
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn authoring_requires_teacher_or_admin() {
    let app = setup_app();
    let body = json!({ "question": capitals_question(&["Paris"]) });

    let (status, _) = post_json(&app, "/api/questions/validate", None, body.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = post_json(&app, "/api/questions/validate", Some("student"), body.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "forbidden");

    let (status, _) = post_json(&app, "/api/questions/validate", Some("Admin"), body).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn multiple_select_validation_round() {
    let app = setup_app();

    let (status, json) = post_json(
        &app,
        "/api/questions/validate",
        Some("teacher"),
        json!({
            "question": capitals_question(&["Paris", "Berlin"]),
            "question_type_code": "MULTIPLE_SELECT"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valid"], true);

    let (status, json) = post_json(
        &app,
        "/api/questions/validate",
        Some("teacher"),
        json!({ "question": capitals_question(&["Paris", "Rome"]) }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["valid"], false);
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "answer_config.correct");
}

#[tokio::test]
async fn omitted_fields_are_reported_per_field() {
    let app = setup_app();
    let mut question = capitals_question(&["Paris"]);
    let object = question.as_object_mut().unwrap();
    object.remove("content");
    object["answer_config"]
        .as_object_mut()
        .unwrap()
        .remove("options_count");

    let (status, json) = post_json(
        &app,
        "/api/questions/validate",
        Some("teacher"),
        json!({ "question": question }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["valid"], false);
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["content", "answer_config.options_count"]);
}

#[tokio::test]
async fn unreadable_body_still_gets_field_errors() {
    let app = setup_app();
    let mut question = capitals_question(&["Paris"]);
    question["answer_config"]["kind"] = json!("essay");

    let (status, json) = post_json(
        &app,
        "/api/questions/validate",
        Some("teacher"),
        json!({ "question": question }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["valid"], false);
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0]["field"].as_str().unwrap().starts_with("question"));
}

#[tokio::test]
async fn drag_drop_draft_is_built_op_by_op() {
    let app = setup_app();

    let (status, json) = post_json(&app, "/api/drafts", Some("teacher"), json!({ "kind": "drag_drop" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let mut draft = json["draft"].clone();
    let first_zone = draft["answer_config"]["zones"][0]["id"].as_str().unwrap().to_string();
    assert_eq!(draft["answer_config"]["zones"][0]["text"], "Vùng 1");

    for op in [
        json!({ "op": "add_option", "text": "Cat" }),
        json!({ "op": "add_option", "text": "Dog" }),
        json!({ "op": "add_zone" }),
    ] {
        let (status, json) = post_json(
            &app,
            "/api/drafts/drag-drop",
            Some("teacher"),
            json!({ "draft": draft, "op": op }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        draft = json["draft"].clone();
    }
    assert_eq!(draft["answer_config"]["zones"][1]["text"], "Vùng 2");

    let cat = draft["answers"][0]["id"].as_str().unwrap().to_string();
    let dog = draft["answers"][1]["id"].as_str().unwrap().to_string();
    let second_zone = draft["answer_config"]["zones"][1]["id"].as_str().unwrap().to_string();

    for op in [
        json!({ "op": "assign", "option_id": cat, "zone_id": first_zone }),
        json!({ "op": "assign", "option_id": dog, "zone_id": second_zone }),
        json!({ "op": "rename_zone", "zone_id": first_zone, "label": "Pets" }),
    ] {
        let (status, json) = post_json(
            &app,
            "/api/drafts/drag-drop",
            Some("teacher"),
            json!({ "draft": draft, "op": op }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        draft = json["draft"].clone();
    }

    let (status, json) = post_json(
        &app,
        "/api/drafts/drag-drop",
        Some("teacher"),
        json!({ "draft": draft, "op": { "op": "remove_option", "option_id": cat } }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("At least 2"));

    draft["content"] = json!("Sort the animals");
    draft["question_type_id"] = json!(3);
    draft["subject_id"] = json!(1);
    draft["difficulty_level_id"] = json!(1);
    let (status, json) = post_json(
        &app,
        "/api/drafts/validate",
        Some("teacher"),
        json!({ "draft": draft, "question_type_code": "drag_drop" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", json);
}

#[tokio::test]
async fn drag_drop_ops_refuse_other_kinds() {
    let app = setup_app();
    let (_, json) = post_json(&app, "/api/drafts", Some("teacher"), json!({ "kind": "single_choice" })).await;

    let (status, _) = post_json(
        &app,
        "/api/drafts/drag-drop",
        Some("teacher"),
        json!({ "draft": json["draft"], "op": { "op": "add_zone" } }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn kind_change_discards_answers() {
    let app = setup_app();
    let (_, json) = post_json(&app, "/api/drafts", Some("teacher"), json!({ "kind": "single_choice" })).await;
    let mut draft = json["draft"].clone();
    draft["answers"] = json!([{ "id": "a", "content": { "text": "Paris" }, "order_index": 1 }]);

    let (status, json) = post_json(
        &app,
        "/api/drafts/kind",
        Some("teacher"),
        json!({ "draft": draft, "kind": "matching" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reset"], true);
    assert_eq!(json["draft"]["answers"], json!([]));
    assert_eq!(json["draft"]["answer_config"]["kind"], "matching");
}
