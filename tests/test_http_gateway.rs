//! HTTP gateway test: start a fake backend in-process (axum on an ephemeral
//! port) and drive the editor through `RapClient`.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use rap_interface_editor::{
    Auth, EditorContext, GatewayError, InterfaceEditor, InterfaceGateway, InterfaceRecord,
    Location, RapClient, RecordingNavigator, SessionContext, SubmitError, TypeChoice,
};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Ok,
    /// Echoes the saved record with nulls in its string fields.
    NullEcho,
    Reject,
    Crash,
}

#[derive(Clone)]
struct Fake {
    mode: Mode,
    received: Arc<Mutex<Vec<(String, JsonValue, Option<String>)>>>,
}

async fn record(fake: &Fake, path: &str, headers: &HeaderMap, body: &JsonValue) {
    let cookie = headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    fake.received
        .lock()
        .await
        .push((path.to_string(), body.clone(), cookie));
}

fn respond(mode: Mode, data: JsonValue) -> axum::response::Response {
    match mode {
        Mode::Ok => (StatusCode::OK, Json(json!({ "data": data }))).into_response(),
        Mode::NullEcho => {
            let mut data = data;
            if let Some(itf) = data.get_mut("itf") {
                itf["url"] = JsonValue::Null;
                itf["description"] = JsonValue::Null;
            }
            (StatusCode::OK, Json(json!({ "data": data }))).into_response()
        }
        Mode::Reject => (
            StatusCode::OK,
            Json(json!({ "isOk": false, "errMsg": "no access to repository" })),
        )
            .into_response(),
        Mode::Crash => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
    }
}

async fn create_handler(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Json(body): Json<JsonValue>,
) -> axum::response::Response {
    record(&fake, "/interface/create", &headers, &body).await;
    let mut itf = body.clone();
    itf["id"] = json!(42);
    respond(fake.mode, json!({ "itf": itf }))
}

async fn update_handler(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Json(body): Json<JsonValue>,
) -> axum::response::Response {
    record(&fake, "/interface/update", &headers, &body).await;
    respond(fake.mode, json!({ "id": body["id"] }))
}

async fn start(mode: Mode) -> Result<(String, Fake), Box<dyn std::error::Error>> {
    let fake = Fake {
        mode,
        received: Arc::new(Mutex::new(Vec::new())),
    };
    let router = Router::new()
        .route("/", get(|| async { "rap" }))
        .route("/interface/create", post(create_handler))
        .route("/interface/update", post(update_handler))
        .with_state(fake.clone());

    // Bind to an ephemeral port to avoid conflicts between tests.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok((format!("http://127.0.0.1:{}", port), fake))
}

fn editor(initial: Option<InterfaceRecord>) -> InterfaceEditor {
    InterfaceEditor::open(
        initial,
        EditorContext::new(3, 4),
        SessionContext::new(Auth::User { id: 9 }, Location::parse("/repository/editor?id=3")),
        Box::new(|_| {}),
    )
}

#[tokio::test]
async fn create_posts_record_and_navigates() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, fake) = start(Mode::Ok).await?;
    let client = RapClient::new(&base_url)?.with_session("koa:sess", "abc123");
    let navigator = RecordingNavigator::new();

    let mut ed = editor(None);
    ed.set_name("socket feed")?;
    ed.select_interface_type(TypeChoice::Socket)?;
    let submitted = ed.submit(&client, &navigator).await?;

    assert_eq!(submitted.saved.id, Some(42));
    assert_eq!(
        navigator.last().as_deref(),
        Some("/repository/editor?id=3&itf=42")
    );

    let received = fake.received.lock().await;
    assert_eq!(received.len(), 1);
    let (path, body, cookie) = &received[0];
    assert_eq!(path, "/interface/create");
    assert_eq!(body["id"], json!(0));
    assert_eq!(body["name"], json!("socket feed"));
    assert_eq!(body["interface_type"], json!("SOCKET"));
    assert_eq!(body["url"], json!(""));
    assert_eq!(body["method"], json!(""));
    assert_eq!(body["status"], JsonValue::Null);
    assert_eq!(body["creatorId"], json!(9));
    assert_eq!(body["repositoryId"], json!(3));
    assert_eq!(body["moduleId"], json!(4));
    assert_eq!(cookie.as_deref(), Some("koa:sess=abc123"));
    Ok(())
}

#[tokio::test]
async fn update_uses_update_endpoint() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, fake) = start(Mode::Ok).await?;
    let client = RapClient::new(&base_url)?;
    let navigator = RecordingNavigator::new();

    let mut ed = editor(Some(InterfaceRecord {
        id: 5,
        name: "get user".into(),
        url: "/api/user".into(),
        ..InterfaceRecord::default()
    }));
    ed.set_status(Some(404))?;
    let submitted = ed.submit(&client, &navigator).await?;

    assert_eq!(submitted.saved.id, Some(5));
    assert_eq!(navigator.last().as_deref(), Some("/repository/editor?id=3&itf=5"));
    let received = fake.received.lock().await;
    assert_eq!(received[0].0, "/interface/update");
    assert_eq!(received[0].1["status"], json!(404));
    assert_eq!(received[0].1["url"], json!("/api/user"));
    assert_eq!(received[0].2, None);
    Ok(())
}

#[tokio::test]
async fn null_fields_in_reply_still_commit() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, fake) = start(Mode::NullEcho).await?;
    let client = RapClient::new(&base_url)?;
    let navigator = RecordingNavigator::new();

    let mut ed = editor(None);
    ed.set_name("sparse echo")?;
    let submitted = ed.submit(&client, &navigator).await?;

    assert_eq!(submitted.saved.id, Some(42));
    assert_eq!(
        navigator.last().as_deref(),
        Some("/repository/editor?id=3&itf=42")
    );
    assert!(!ed.can_submit());
    assert_eq!(fake.received.lock().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn rejection_and_server_errors_pass_through() -> Result<(), Box<dyn std::error::Error>> {
    let navigator = RecordingNavigator::new();

    let (base_url, _) = start(Mode::Reject).await?;
    let client = RapClient::new(&base_url)?;
    let mut ed = editor(None);
    ed.set_name("denied")?;
    match ed.submit(&client, &navigator).await {
        Err(SubmitError::Gateway(GatewayError::Rejected(msg))) => {
            assert_eq!(msg, "no access to repository")
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert!(ed.can_submit());

    let (base_url, _) = start(Mode::Crash).await?;
    let client = RapClient::new(&base_url)?;
    let err = client.create(&InterfaceRecord::default()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Status { status: 500, .. }));

    assert!(navigator.hrefs().is_empty());
    Ok(())
}

#[tokio::test]
async fn ping_and_unreachable_backend() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, _) = start(Mode::Ok).await?;
    assert_eq!(RapClient::new(&base_url)?.ping().await?, 200);

    // Grab a free port, then release it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);
    let client = RapClient::new(format!("http://127.0.0.1:{}", port))?;
    assert!(matches!(
        client.create(&InterfaceRecord::default()).await,
        Err(GatewayError::Transport(_))
    ));
    Ok(())
}
