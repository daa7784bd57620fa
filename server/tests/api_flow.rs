//! End-to-end API flow against the in-memory database.
//! Run: cargo test -p brewtab-server --test api_flow

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use brewtab_server::ServerState;
use brewtab_server::auth::hash_password;
use brewtab_server::db::models::{CafeCreate, StaffRole, User};

async fn setup() -> (Router, ServerState) {
    let state = ServerState::in_memory().await.unwrap();

    let cafe = state
        .cafes()
        .create(CafeCreate {
            slug: "bistro17".into(),
            name: "Bistro 17".into(),
            tagline: Some("Coffee and calm".into()),
            description: None,
            staff_phone: Some("9876543210".into()),
        })
        .await
        .unwrap();
    let cafe_id = cafe.id.unwrap();

    for (username, role) in [("asha", StaffRole::Admin), ("ravi", StaffRole::Staff)] {
        state
            .users()
            .create(User {
                id: None,
                cafe: cafe_id.clone(),
                username: username.into(),
                password_hash: hash_password("correct horse").unwrap(),
                role,
                is_active: true,
            })
            .await
            .unwrap();
    }

    (brewtab_server::api::router(state.clone()), state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_req(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn authed_get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn login(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        json_req(
            "POST",
            "/api/auth/login",
            json!({"cafe_slug": "bistro17", "username": username, "password": "correct horse"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let (app, _) = setup().await;
    let (status, body) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn login_rejects_bad_credentials_uniformly() {
    let (app, _) = setup().await;

    for (user, password) in [("asha", "wrong"), ("nobody", "correct horse")] {
        let (status, body) = send(
            &app,
            json_req(
                "POST",
                "/api/auth/login",
                json!({"cafe_slug": "bistro17", "username": user, "password": password}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid username or password");
    }
}

#[tokio::test]
async fn role_gates_deny_with_redirect_hints() {
    let (app, _) = setup().await;

    // anonymous: 401 and a sign-in redirect
    let (status, body) = send(&app, get("/api/staff/orders")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["redirect"], "/auth");

    // staff token on an admin route: 403 and a home redirect
    let staff_token = login(&app, "ravi").await;
    let (status, body) = send(&app, authed_get("/api/admin/menu-items", &staff_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["redirect"], "/");

    // admin covers staff routes
    let admin_token = login(&app, "asha").await;
    let (status, _) = send(&app, authed_get("/api/staff/orders", &admin_token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn order_flow_from_menu_to_served() {
    let (app, _) = setup().await;
    let admin = login(&app, "asha").await;
    let staff = login(&app, "ravi").await;

    // admin builds the catalog
    let (status, body) = send(
        &app,
        json_req(
            "POST",
            "/api/admin/menu-items",
            json!({"name": "Cold Coffee", "price": "99", "is_popular": true}),
            Some(&admin),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let item_id = body["data"]["id"].as_str().unwrap().to_string();

    // customers see it on the public menu
    let (status, body) = send(&app, get("/api/cafes/bistro17/menu")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Cold Coffee");

    // a table places an order
    let (status, body) = send(
        &app,
        json_req(
            "POST",
            "/api/cafes/bistro17/orders",
            json!({
                "table_number": "5",
                "items": [{"item_id": item_id, "name": "Cold Coffee", "quantity": 2, "price": "99"}],
                "customer_phone": "9876501234"
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let order = &body["data"]["order"];
    assert_eq!(order["status"], "new");
    assert_eq!(order["total_amount"], "198");
    let order_id = order["id"].as_str().unwrap().to_string();

    // whatsapp deep links for both sides
    let customer_link = body["data"]["customer_whatsapp"].as_str().unwrap();
    assert!(customer_link.starts_with("https://wa.me/919876501234?text="));
    let staff_link = body["data"]["staff_whatsapp"].as_str().unwrap();
    assert!(staff_link.starts_with("https://wa.me/919876543210?text="));

    // kitchen sees it in the active list
    let (status, body) = send(&app, authed_get("/api/staff/orders?active=true", &staff)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // advance three times: preparing, ready, served
    let advance_uri = format!("/api/staff/orders/{order_id}/advance");
    for expected in ["preparing", "ready", "served"] {
        let (status, body) = send(
            &app,
            json_req("POST", &advance_uri, json!({}), Some(&staff)),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["status"], expected);
    }

    // served orders leave the active list
    let (_, body) = send(&app, authed_get("/api/staff/orders?active=true", &staff)).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    // the table's tracking view still shows it
    let (status, body) = send(&app, get("/api/cafes/bistro17/tables/5/orders")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["status"], "served");
}

#[tokio::test]
async fn website_editor_round_trip_and_rendering() {
    let (app, _) = setup().await;
    let admin = login(&app, "asha").await;

    // malformed cta is rejected at save
    let (status, _) = send(
        &app,
        json_req(
            "PUT",
            "/api/admin/website",
            json!({"layout": "luxury", "blocks": [{"type": "cta", "data": {"heading": "Visit"}}]}),
            Some(&admin),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // a valid config with one unknown block saves fine
    let blocks = json!([
        {"type": "hero", "data": {"heading": "Slow mornings"}},
        {"type": "countdown", "data": {"until": "2027-01-01"}},
        {"type": "footer", "data": {}}
    ]);
    let (status, body) = send(
        &app,
        json_req(
            "PUT",
            "/api/admin/website",
            json!({"layout": "luxury", "blocks": blocks}),
            Some(&admin),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    // unknown block survives the round trip
    let (_, body) = send(&app, get("/api/cafes/bistro17/website")).await;
    assert_eq!(body["data"]["blocks"][1]["type"], "countdown");

    // rendered page keeps the knowns and skips the unknown
    let response = app.clone().oneshot(get("/api/cafes/bistro17/page")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec(),
    )
    .unwrap();
    assert!(html.contains("layout-luxury"));
    assert!(html.contains("Slow mornings"));
    assert!(html.contains("<footer>"));
    assert!(!html.contains("countdown"));
}

#[tokio::test]
async fn qr_links_point_at_the_public_entry() {
    let (app, _) = setup().await;
    let staff = login(&app, "ravi").await;

    let (status, body) = send(&app, authed_get("/api/staff/qr-links?count=3", &staff)).await;
    assert_eq!(status, StatusCode::OK);
    let links = body["data"].as_array().unwrap();
    assert_eq!(links.len(), 3);
    assert!(links[2]["url"].as_str().unwrap().ends_with("/bistro17?table=3"));
}

#[tokio::test]
async fn unknown_cafe_slug_is_not_found() {
    let (app, _) = setup().await;
    let (status, body) = send(&app, get("/api/cafes/no-such-place/menu")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}
