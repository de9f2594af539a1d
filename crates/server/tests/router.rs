use auth_client::AuthClient;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use chrono::NaiveDate;
use engine::{Clock, ExpenseStore};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use server::{RouteGuard, ServerState, router};
use tower::ServiceExt;
use wiremock::matchers::{header as header_is, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Nothing listens here; tests using it never reach the backend.
const NO_BACKEND: &str = "http://127.0.0.1:9";

fn app(auth_url: &str) -> Router {
    let today = NaiveDate::from_ymd_opt(2025, 2, 11).unwrap();
    let state = ServerState::new(
        ExpenseStore::mock().unwrap(),
        AuthClient::new(auth_url).unwrap(),
    )
    .with_clock(Clock::Fixed(today));
    router(state)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut req = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        req = req.header(header::COOKIE, format!("auth_token={token}"));
    }
    req.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, token: Option<&str>, form: &str) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        req = req.header(header::COOKIE, format!("auth_token={token}"));
    }
    req.body(Body::from(form.to_string())).unwrap()
}

fn location(res: &Response<Body>) -> &str {
    res.headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

fn set_cookie(res: &Response<Body>) -> Option<String> {
    res.headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
}

async fn body_bytes(res: Response<Body>) -> Vec<u8> {
    res.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_json(res: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(res).await).unwrap()
}

#[tokio::test]
async fn protected_page_without_token_redirects_to_login() {
    let res = app(NO_BACKEND)
        .oneshot(get("/expenses/list", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login?redirect=%2Fexpenses%2Flist");
}

#[tokio::test]
async fn unknown_page_under_protected_prefix_is_guarded() {
    let res = app(NO_BACKEND)
        .oneshot(get("/expenses/archive", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login?redirect=%2Fexpenses%2Farchive");

    let res = app(NO_BACKEND)
        .oneshot(get("/expenses/archive", Some("tok-1")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_page_with_token_redirects_to_dashboard() {
    let res = app(NO_BACKEND)
        .oneshot(get("/login", Some("tok-1")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/dashboard");

    let res = app(NO_BACKEND)
        .oneshot(get("/login?redirect=%2Fexpenses%2Flist", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["redirect"], "/expenses/list");
}

#[tokio::test]
async fn configured_login_page_under_root_prefix() {
    let state = ServerState::new(
        ExpenseStore::mock().unwrap(),
        AuthClient::new(NO_BACKEND).unwrap(),
    )
    .with_guard(
        RouteGuard::new(["/"])
            .with_login_path("/signin")
            .with_landing_path("/categories"),
    );

    let res = router(state.clone())
        .oneshot(get("/categories", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/signin?redirect=%2Fcategories");

    let res = router(state.clone())
        .oneshot(get("/signin", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = router(state).oneshot(get("/signin", Some("tok-1"))).await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/categories");
}

#[tokio::test]
async fn categories_are_public() {
    let res = app(NO_BACKEND)
        .oneshot(get("/categories", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await;
    assert_eq!(body["category_count"], 9);
    assert_eq!(body["expense_count"], 10);
    assert_eq!(body["total_cents"], 77_998);
    assert_eq!(body["categories"][0]["value"], "education");
    assert_eq!(body["categories"][0]["icon"], "graduation-cap");
    assert_eq!(body["categories"][8]["value"], "other");
}

#[tokio::test]
async fn category_search_and_sort() {
    let res = app(NO_BACKEND)
        .oneshot(get("/categories?search=food&sort=count", None))
        .await
        .unwrap();
    let body = body_json(res).await;
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["label"], "Food & Dining");
    assert_eq!(categories[0]["expense_count"], 3);
    assert_eq!(body["total_cents"], 77_998);

    let res = app(NO_BACKEND)
        .oneshot(get("/categories?sort=popular", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn dashboard_summarizes_current_month() {
    let res = app(NO_BACKEND)
        .oneshot(get("/dashboard", Some("tok-1")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await;
    assert_eq!(body["month_label"], "February 2025");
    assert_eq!(body["total_cents"], 77_998);
    assert_eq!(body["total"], "$779.98");
    assert_eq!(body["transaction_count"], 10);
    assert_eq!(body["total_trend"], Value::Null);
    assert_eq!(body["most_expensive"]["value"], "education");
    assert_eq!(body["average_daily_cents"], 11_143);
    assert_eq!(body["breakdown"].as_array().unwrap().len(), 8);
    assert_eq!(body["weekly"][1]["week_label"], "Feb 9");
    assert_eq!(body["weekly"][1]["amounts_cents"]["Food & Dining"], 13_100);
    assert_eq!(body["recent"].as_array().unwrap().len(), 10);
    assert_eq!(body["recent"][0]["date_label"], "Today");
}

#[tokio::test]
async fn expense_list_filters_and_sorts() {
    let res = app(NO_BACKEND)
        .oneshot(get(
            "/expenses/list?category=food&sort=amount&dir=asc",
            Some("tok-1"),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await;
    let ids: Vec<_> = body["expenses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["4", "8", "1"]);
    assert_eq!(body["count"], 3);
    assert_eq!(body["total_cents"], 14_300);
    assert_eq!(body["expenses"][0]["category_label"], "Food & Dining");
    assert_eq!(body["expenses"][0]["date_label"], "Yesterday");
}

#[tokio::test]
async fn expense_list_rejects_unknown_parameters() {
    for uri in [
        "/expenses/list?window=yesterday",
        "/expenses/list?category=gifts",
        "/expenses/list?dir=up",
    ] {
        let res = app(NO_BACKEND).oneshot(get(uri, Some("tok-1"))).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }
}

#[tokio::test]
async fn export_is_a_csv_attachment() {
    let res = app(NO_BACKEND)
        .oneshot(get("/expenses/export?search=coffee", Some("tok-1")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert!(
        res.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("expenses.csv")
    );

    let body = String::from_utf8(body_bytes(res).await).unwrap();
    assert_eq!(
        body,
        "id,date,category,description,amount\n4,2025-02-10,Food & Dining,Morning coffee,5.50\n"
    );
}

#[tokio::test]
async fn new_expense_form_lists_the_catalog() {
    let res = app(NO_BACKEND)
        .oneshot(get("/expenses/new", Some("tok-1")))
        .await
        .unwrap();
    let body = body_json(res).await;
    assert_eq!(body["today"], "2025-02-11");
    assert_eq!(body["categories"].as_array().unwrap().len(), 9);
    assert_eq!(body["categories"][0]["color"], "#6366f1");
}

#[tokio::test]
async fn new_expense_is_validated() {
    let res = app(NO_BACKEND)
        .oneshot(post_form(
            "/expenses/new",
            Some("tok-1"),
            "amount=12.50&description=Lunch&category=food",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/expenses/list");

    for form in [
        "amount=0&description=Lunch&category=food",
        "amount=12.345&description=Lunch&category=food",
        "amount=12&description=%20&category=food",
        "amount=12&description=Lunch&category=gifts",
        "amount=12&description=Lunch",
        "amount=12&description=Lunch&category=food&date=2025-02-30",
    ] {
        let res = app(NO_BACKEND)
            .oneshot(post_form("/expenses/new", Some("tok-1"), form))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY, "{form}");
        assert!(body_json(res).await["error"].is_string());
    }
}

#[tokio::test]
async fn login_stores_token_and_follows_redirect() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-1",
            "user": {"id": 1, "name": "Alice", "email": "alice@example.com"}
        })))
        .mount(&backend)
        .await;

    let res = app(&backend.uri())
        .oneshot(post_form(
            "/login",
            None,
            "email=alice%40example.com&password=secret&redirect=%2Fexpenses%2Flist",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/expenses/list");

    let cookie = set_cookie(&res).unwrap();
    assert!(cookie.starts_with("auth_token=tok-1"));
    assert!(cookie.contains("SameSite=Lax"));

    let res = app(&backend.uri())
        .oneshot(post_form(
            "/login",
            None,
            "email=alice%40example.com&password=secret&redirect=https%3A%2F%2Fevil.example",
        ))
        .await
        .unwrap();
    assert_eq!(location(&res), "/dashboard");
}

#[tokio::test]
async fn failed_login_is_unauthorized() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&backend)
        .await;

    let res = app(&backend.uri())
        .oneshot(post_form("/login", None, "email=alice%40example.com&password=nope"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(res).await["error"], "invalid credentials");
}

#[tokio::test]
async fn session_returns_current_user() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/user"))
        .and(header_is("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "name": "Alice", "email": "alice@example.com"
        })))
        .mount(&backend)
        .await;

    let res = app(&backend.uri())
        .oneshot(get("/session", Some("tok-1")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["name"], "Alice");

    let res = app(&backend.uri())
        .oneshot(get("/session", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rejected_session_clears_token() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&backend)
        .await;

    let res = app(&backend.uri())
        .oneshot(get("/session", Some("stale")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login?redirect=%2Fsession");
    let cookie = set_cookie(&res).unwrap();
    assert!(cookie.starts_with("auth_token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn logout_always_clears_token() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&backend)
        .await;

    let res = app(&backend.uri())
        .oneshot(post_form("/logout", Some("tok-1"), ""))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
    assert!(set_cookie(&res).unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn landing_lists_pages() {
    let res = app(NO_BACKEND).oneshot(get("/", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["name"], "Expense Tracker");
}
