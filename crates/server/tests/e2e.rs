use std::net::SocketAddr;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::auth::{ServerAuthConfig, ServerState};
use server::routes;
use service::file::bookings::BookingService;

const TEST_API_KEY: &str = "test-key-123";

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Isolated store file per test run
    let store_path = std::env::temp_dir().join(format!("e2e_bookings_{}.json", Uuid::new_v4()));
    let bookings = BookingService::new(&store_path).await?;

    let state = ServerState {
        bookings,
        auth: ServerAuthConfig { api_key: TEST_API_KEY.into() },
    };

    let app: Router = routes::build_router(state, cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn bearer() -> String {
    format!("Bearer {}", TEST_API_KEY)
}

fn sample_booking() -> serde_json::Value {
    json!({
        "name": "Ava Chen",
        "email": "ava@example.com",
        "phone": "+1 555 0100",
        "projectType": "Documentary",
        "budget": "$10,000 - $25,000",
        "message": "Short documentary about coastal fishing towns.",
        "date": "2024-06-12T00:00:00.000Z"
    })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn e2e_bookings_require_bearer_token() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // no token
    let res = c.get(format!("{}/bookings", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "Unauthorized");

    // wrong token
    let res = c
        .get(format!("{}/bookings", app.base_url))
        .header("Authorization", "Bearer wrong-key")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    // malformed scheme
    let res = c
        .get(format!("{}/bookings", app.base_url))
        .header("Authorization", TEST_API_KEY)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    // CORS preflight is never challenged
    let res = c
        .request(reqwest::Method::OPTIONS, format!("{}/bookings", app.base_url))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await?;
    assert_ne!(res.status(), HttpStatusCode::UNAUTHORIZED);
    assert!(res.headers().contains_key("access-control-allow-origin"));

    // correct token works
    let res = c
        .get(format!("{}/bookings", app.base_url))
        .header("Authorization", bearer())
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
    Ok(())
}

#[tokio::test]
async fn e2e_booking_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // create
    let res = c
        .post(format!("{}/bookings", app.base_url))
        .header("Authorization", bearer())
        .json(&sample_booking())
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Booking submitted successfully");
    let booking_id = body["bookingId"].as_str().expect("bookingId").to_string();
    assert!(booking_id.starts_with("booking:"));

    // list sees it, with camelCase record fields
    let res = c
        .get(format!("{}/bookings", app.base_url))
        .header("Authorization", bearer())
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["count"], 1);
    assert_eq!(body["bookings"][0]["id"], booking_id.as_str());
    assert_eq!(body["bookings"][0]["projectType"], "Documentary");
    assert!(body["bookings"][0]["createdAt"].is_string());

    // fetch one: pending, no updatedAt yet
    let res = c
        .get(format!("{}/bookings/{}", app.base_url, booking_id))
        .header("Authorization", bearer())
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["booking"]["status"], "pending");
    assert!(body["booking"].get("updatedAt").is_none());

    // update status
    let res = c
        .patch(format!("{}/bookings/{}", app.base_url, booking_id))
        .header("Authorization", bearer())
        .json(&json!({"status": "confirmed"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Booking updated successfully");
    assert_eq!(body["booking"]["status"], "confirmed");
    assert!(body["booking"]["updatedAt"].is_string());

    // delete
    let res = c
        .delete(format!("{}/bookings/{}", app.base_url, booking_id))
        .header("Authorization", bearer())
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Booking deleted successfully");

    // gone now
    let res = c
        .get(format!("{}/bookings/{}", app.base_url, booking_id))
        .header("Authorization", bearer())
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    // second delete is a 404
    let res = c
        .delete(format!("{}/bookings/{}", app.base_url, booking_id))
        .header("Authorization", bearer())
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "Booking not found");
    Ok(())
}

#[tokio::test]
async fn e2e_create_missing_fields_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/bookings", app.base_url))
        .header("Authorization", bearer())
        .json(&json!({"name": "Ava Chen", "phone": "+1 555 0100"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    let error = body["error"].as_str().expect("error message");
    assert!(error.contains("email"));
    assert!(error.contains("message"));
    assert!(error.contains("date"));
    assert!(!error.contains("name"));

    // nothing was persisted
    let res = c
        .get(format!("{}/bookings", app.base_url))
        .header("Authorization", bearer())
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["count"], 0);
    Ok(())
}

#[tokio::test]
async fn e2e_list_sorted_newest_first() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    for i in 0..3 {
        let mut input = sample_booking();
        input["name"] = json!(format!("Client {i}"));
        let res = c
            .post(format!("{}/bookings", app.base_url))
            .header("Authorization", bearer())
            .json(&input)
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let res = c
        .get(format!("{}/bookings", app.base_url))
        .header("Authorization", bearer())
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["count"], 3);
    assert_eq!(body["bookings"][0]["name"], "Client 2");
    assert_eq!(body["bookings"][1]["name"], "Client 1");
    assert_eq!(body["bookings"][2]["name"], "Client 0");
    Ok(())
}

#[tokio::test]
async fn e2e_patch_unknown_id_or_status() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // unknown id
    let res = c
        .patch(format!("{}/bookings/booking:0-zzzzzz", app.base_url))
        .header("Authorization", bearer())
        .json(&json!({"status": "confirmed"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "Booking not found");

    // status outside the enumeration is rejected before the handler runs
    let res = c
        .post(format!("{}/bookings", app.base_url))
        .header("Authorization", bearer())
        .json(&sample_booking())
        .send()
        .await?;
    let booking_id = res.json::<serde_json::Value>().await?["bookingId"]
        .as_str()
        .expect("bookingId")
        .to_string();
    let res = c
        .patch(format!("{}/bookings/{}", app.base_url, booking_id))
        .header("Authorization", bearer())
        .json(&json!({"status": "archived"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

    // the stored record is untouched
    let res = c
        .get(format!("{}/bookings/{}", app.base_url, booking_id))
        .header("Authorization", bearer())
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["booking"]["status"], "pending");
    Ok(())
}
