//! End-to-end tests of the record API on a fresh, seeded in-memory store.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use marketplace_api::{app, response::JSON_UTF8, AppState, Settings};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn seeded_app() -> Router {
    let state = AppState::init(&Settings::default()).await.unwrap();
    app(state, Settings::default().body_limit_bytes)
}

struct Reply {
    status: StatusCode,
    location: Option<String>,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            let bytes = serde_json::to_vec(&v).unwrap();
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::CONTENT_LENGTH, bytes.len());
            Body::from(bytes)
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let header_str = |name: header::HeaderName| {
        response
            .headers()
            .get(name)
            .map(|v: &header::HeaderValue| v.to_str().unwrap().to_string())
    };
    let location = header_str(header::LOCATION);
    let content_type = header_str(header::CONTENT_TYPE);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    Reply {
        status,
        location,
        content_type,
        body,
    }
}

fn petr() -> Value {
    json!({
        "first_name": "Petr",
        "last_name": "X",
        "age": 30,
        "email": "p@x.com",
        "role": "executor",
        "phone": "000"
    })
}

fn fix_tap_order() -> Value {
    json!({
        "name": "Fix tap",
        "description": "Kitchen tap drips",
        "start_date": "2021-06-01",
        "end_date": "2021-06-03",
        "address": "Mira 1",
        "price": 900,
        "customer_id": 1,
        "executor_id": 2
    })
}

#[tokio::test]
async fn seeded_user_update_then_delete() {
    let app = seeded_app().await;

    let got = send(&app, Method::GET, "/users/1/", None).await;
    assert_eq!(got.status, StatusCode::OK);
    assert_eq!(got.content_type.as_deref(), Some(JSON_UTF8));
    let user = got.json();
    assert_eq!(user["id"], 1);
    assert_eq!(user["first_name"], "Ivan");

    let put = send(&app, Method::PUT, "/users/1/", Some(petr())).await;
    assert_eq!(put.status, StatusCode::NO_CONTENT);
    assert!(put.body.is_empty());

    let mut expected = petr();
    expected["id"] = json!(1);
    assert_eq!(send(&app, Method::GET, "/users/1/", None).await.json(), expected);

    assert_eq!(send(&app, Method::DELETE, "/users/1/", None).await.status, StatusCode::NO_CONTENT);
    let gone = send(&app, Method::GET, "/users/1/", None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.json()["error"]["code"], "not_found");
}

#[tokio::test]
async fn created_user_reads_back_through_location() {
    let app = seeded_app().await;

    let post = send(&app, Method::POST, "/users/", Some(petr())).await;
    assert_eq!(post.status, StatusCode::CREATED);
    assert!(post.body.is_empty());
    let location = post.location.unwrap();
    assert_eq!(location, "/users/6/");

    let user = send(&app, Method::GET, &location, None).await.json();
    for key in ["first_name", "last_name", "age", "email", "role", "phone"] {
        assert_eq!(user[key], petr()[key], "{}", key);
    }
}

#[tokio::test]
async fn create_with_explicit_id_and_conflict() {
    let app = seeded_app().await;
    let mut body = petr();
    body["id"] = json!(100);
    let post = send(&app, Method::POST, "/users/", Some(body.clone())).await;
    assert_eq!(post.status, StatusCode::CREATED);
    assert_eq!(post.location.as_deref(), Some("/users/100/"));

    let again = send(&app, Method::POST, "/users/", Some(body)).await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.json()["error"]["code"], "conflict");
}

#[tokio::test]
async fn list_returns_every_seeded_row_in_id_order() {
    let app = seeded_app().await;
    let users = send(&app, Method::GET, "/users/", None).await;
    assert_eq!(users.status, StatusCode::OK);
    assert_eq!(users.content_type.as_deref(), Some(JSON_UTF8));
    let ids: Vec<i64> = users
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    assert_eq!(send(&app, Method::GET, "/orders/", None).await.json().as_array().unwrap().len(), 4);
    assert_eq!(send(&app, Method::GET, "/offers/", None).await.json().as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn order_dates_render_as_iso_and_end_date_is_its_own() {
    let app = seeded_app().await;
    let orders = send(&app, Method::GET, "/orders/", None).await.json();
    assert_eq!(orders[0]["start_date"], "2021-02-21");
    assert_eq!(orders[0]["end_date"], "2021-02-22");

    let one = send(&app, Method::GET, "/orders/2/", None).await.json();
    assert_eq!(one["start_date"], "2021-03-01");
    assert_eq!(one["end_date"], "2021-03-05");
}

#[tokio::test]
async fn created_order_reads_back_through_location() {
    let app = seeded_app().await;
    let post = send(&app, Method::POST, "/orders/", Some(fix_tap_order())).await;
    assert_eq!(post.status, StatusCode::CREATED);
    assert!(post.body.is_empty());
    let location = post.location.unwrap();
    assert_eq!(location, "/orders/5/");

    let mut expected = fix_tap_order();
    expected["id"] = json!(5);
    assert_eq!(send(&app, Method::GET, &location, None).await.json(), expected);
    assert_eq!(send(&app, Method::GET, "/orders/", None).await.json().as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn order_put_stores_submitted_end_date() {
    let app = seeded_app().await;
    let put = send(&app, Method::PUT, "/orders/1/", Some(fix_tap_order())).await;
    assert_eq!(put.status, StatusCode::NO_CONTENT);

    let order = send(&app, Method::GET, "/orders/1/", None).await.json();
    assert_eq!(order["start_date"], "2021-06-01");
    assert_eq!(order["end_date"], "2021-06-03");
    assert_eq!(order["name"], "Fix tap");
    assert_eq!(order["price"], 900);
}

#[tokio::test]
async fn order_with_seed_style_date_is_malformed() {
    let app = seeded_app().await;
    let mut body = fix_tap_order();
    body["end_date"] = json!("06/03/2021");
    let put = send(&app, Method::PUT, "/orders/1/", Some(body.clone())).await;
    assert_eq!(put.status, StatusCode::BAD_REQUEST);
    let err = put.json();
    assert_eq!(err["error"]["code"], "malformed_date");
    assert_eq!(err["error"]["details"]["field"], "end_date");
    assert_eq!(err["error"]["details"]["expected"], "YYYY-MM-DD");

    let post = send(&app, Method::POST, "/orders/", Some(body)).await;
    assert_eq!(post.status, StatusCode::BAD_REQUEST);
    assert_eq!(send(&app, Method::GET, "/orders/", None).await.json().as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn offer_post_creates_an_offer_not_an_order() {
    let app = seeded_app().await;
    let post = send(
        &app,
        Method::POST,
        "/offers/",
        Some(json!({"order_id": 2, "executor_id": 5})),
    )
    .await;
    assert_eq!(post.status, StatusCode::CREATED);
    let location = post.location.unwrap();
    assert_eq!(location, "/offers/6/");

    let offer = send(&app, Method::GET, &location, None).await.json();
    assert_eq!(offer, json!({"id": 6, "order_id": 2, "executor_id": 5}));

    let orders = send(&app, Method::GET, "/orders/", None).await.json();
    assert_eq!(orders.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn offer_put_and_delete() {
    let app = seeded_app().await;
    let put = send(
        &app,
        Method::PUT,
        "/offers/3/",
        Some(json!({"id": 99, "order_id": 1, "executor_id": 4})),
    )
    .await;
    assert_eq!(put.status, StatusCode::NO_CONTENT);
    assert_eq!(
        send(&app, Method::GET, "/offers/3/", None).await.json(),
        json!({"id": 3, "order_id": 1, "executor_id": 4})
    );

    assert_eq!(send(&app, Method::DELETE, "/offers/3/", None).await.status, StatusCode::NO_CONTENT);
    assert_eq!(send(&app, Method::GET, "/offers/3/", None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_missing_field_leaves_row_unchanged() {
    let app = seeded_app().await;
    let before = send(&app, Method::GET, "/users/2/", None).await.json();

    let mut body = petr();
    body.as_object_mut().unwrap().remove("age");
    let put = send(&app, Method::PUT, "/users/2/", Some(body)).await;
    assert_eq!(put.status, StatusCode::BAD_REQUEST);
    let err = put.json();
    assert_eq!(err["error"]["code"], "validation_error");
    assert_eq!(err["error"]["message"], "validation: age is required");

    assert_eq!(send(&app, Method::GET, "/users/2/", None).await.json(), before);
}

#[tokio::test]
async fn create_rejects_bad_bodies() {
    let app = seeded_app().await;

    let mut wrong_type = petr();
    wrong_type["age"] = json!("thirty");
    let reply = send(&app, Method::POST, "/users/", Some(wrong_type)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let mut extra = petr();
    extra["salary"] = json!(1);
    assert_eq!(send(&app, Method::POST, "/users/", Some(extra)).await.status, StatusCode::BAD_REQUEST);

    let not_object = send(&app, Method::POST, "/offers/", Some(json!([1, 2]))).await;
    assert_eq!(not_object.status, StatusCode::BAD_REQUEST);
    assert_eq!(not_object.content_type.as_deref(), Some(JSON_UTF8));

    assert_eq!(send(&app, Method::GET, "/users/", None).await.json().as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn missing_rows_are_not_found_on_every_item_method() {
    let app = seeded_app().await;
    assert_eq!(send(&app, Method::GET, "/orders/77/", None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        send(&app, Method::PUT, "/orders/77/", Some(fix_tap_order())).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(send(&app, Method::DELETE, "/orders/77/", None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, Method::GET, "/users/abc/", None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_user_does_not_cascade() {
    let app = seeded_app().await;
    assert_eq!(send(&app, Method::DELETE, "/users/2/", None).await.status, StatusCode::NO_CONTENT);

    let order = send(&app, Method::GET, "/orders/1/", None).await.json();
    assert_eq!(order["executor_id"], 2);
    let offer = send(&app, Method::GET, "/offers/1/", None).await.json();
    assert_eq!(offer["executor_id"], 2);
}

#[tokio::test]
async fn service_routes_answer() {
    let app = seeded_app().await;
    assert_eq!(send(&app, Method::GET, "/health", None).await.json(), json!({"status": "ok"}));
    assert_eq!(
        send(&app, Method::GET, "/ready", None).await.json(),
        json!({"status": "ok", "database": "ok"})
    );
    let version = send(&app, Method::GET, "/version", None).await.json();
    assert_eq!(version["name"], "marketplace-api");
}

#[tokio::test]
async fn ready_degrades_after_close() {
    let state = AppState::init(&Settings::default()).await.unwrap();
    let router = app(state.clone(), 1024);
    state.close().await;
    assert_eq!(
        send(&router, Method::GET, "/ready", None).await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn oversized_body_is_a_json_413() {
    let state = AppState::init(&Settings::default()).await.unwrap();
    let router = app(state, 32);
    let reply = send(&router, Method::POST, "/users/", Some(petr())).await;
    assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(reply.content_type.as_deref(), Some(JSON_UTF8));
    assert_eq!(reply.json()["error"]["code"], "payload_too_large");
    assert_eq!(send(&router, Method::GET, "/users/", None).await.json().as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn oversized_chunked_body_is_a_json_413() {
    let state = AppState::init(&Settings::default()).await.unwrap();
    let router = app(state, 32);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/users/")
        .body(Body::from(serde_json::to_vec(&petr()).unwrap()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_UTF8);
}

#[tokio::test]
async fn body_limit_above_axum_default_is_honoured() {
    let state = AppState::init(&Settings::default()).await.unwrap();
    let router = app(state, 4 * 1024 * 1024);
    let mut body = petr();
    body["last_name"] = json!("x".repeat(3 * 1024 * 1024));
    let post = send(&router, Method::POST, "/users/", Some(body)).await;
    assert_eq!(post.status, StatusCode::CREATED);
    let user = send(&router, Method::GET, &post.location.unwrap(), None).await.json();
    assert_eq!(user["last_name"].as_str().unwrap().len(), 3 * 1024 * 1024);
}

#[tokio::test]
async fn unseeded_store_starts_empty() {
    let settings = Settings {
        seed_on_start: false,
        ..Settings::default()
    };
    let state = AppState::init(&settings).await.unwrap();
    let router = app(state, settings.body_limit_bytes);
    assert_eq!(send(&router, Method::GET, "/users/", None).await.json(), json!([]));
    assert_eq!(send(&router, Method::GET, "/users/1/", None).await.status, StatusCode::NOT_FOUND);
}
