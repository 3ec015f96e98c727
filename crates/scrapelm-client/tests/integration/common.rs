use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect};
use axum::routing::{get, post};
use tokio::net::TcpListener;

pub const REFERENCE_PAGE: &str = "<html><head><script>ignored()</script></head>\
<body><p>Hello  world.</p></body></html>";

/// Route hit by the slow fixtures; long enough to trip short client timeouts.
pub const SLOW_DELAY: Duration = Duration::from_secs(3);

/// Last JSON body the inference fixture received.
pub type SeenRequest = Arc<Mutex<Option<serde_json::Value>>>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("scrapelm=debug")
        .try_init();
}

/// Serve `router` on an ephemeral localhost port and return its base URL.
pub async fn spawn_server(router: Router) -> String {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Static pages exercising the fetcher.
pub fn page_router() -> Router {
    Router::new()
        .route("/page", get(|| async { html(REFERENCE_PAGE) }))
        .route(
            "/article",
            get(|| async {
                html(
                    "<html><head><title>Tower</title><style>p{}</style></head><body>\
                     <h1>The Tower</h1><p>It is 330 metres tall.</p>\
                     <noscript>Enable JavaScript</noscript></body></html>",
                )
            }),
        )
        .route("/empty", get(|| async { html("") }))
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, html("<p>not here</p>")) }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/created", get(|| async { (StatusCode::CREATED, html("<p>new</p>")) }))
        .route(
            "/pdf",
            get(|| async { ([(header::CONTENT_TYPE, "application/pdf")], "%PDF-1.7") }),
        )
        .route(
            "/feed",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
                    "<rss><channel><description>News</description>\
                     <item><description>First  post</description></item></channel></rss>",
                )
            }),
        )
        .route(
            "/octet",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "application/octet-stream")],
                    "<html><body><p>Served as bytes</p></body></html>",
                )
            }),
        )
        .route("/moved", get(|| async { Redirect::permanent("/page") }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(SLOW_DELAY).await;
                html("<p>late</p>")
            }),
        )
}

fn html(body: &'static str) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], body)
}

/// How the inference fixture should answer.
#[derive(Clone, Copy)]
pub enum GenerateBehavior {
    Answer(&'static str),
    Status(StatusCode),
    NotJson,
    MissingResponseField,
    Slow,
}

#[derive(Clone)]
struct InferenceState {
    behavior: GenerateBehavior,
    seen: SeenRequest,
}

/// Fake Ollama serving `POST /api/generate`.
pub fn inference_router(behavior: GenerateBehavior, seen: SeenRequest) -> Router {
    Router::new()
        .route("/api/generate", post(generate))
        .with_state(InferenceState { behavior, seen })
}

async fn generate(
    State(state): State<InferenceState>,
    axum::Json(body): axum::Json<serde_json::Value>,
) -> axum::response::Response {
    let model = body["model"].as_str().unwrap_or_default().to_string();
    *state.seen.lock().unwrap() = Some(body);

    match state.behavior {
        GenerateBehavior::Answer(text) => axum::Json(serde_json::json!({
            "model": model,
            "created_at": "2024-05-01T12:00:00Z",
            "response": text,
            "done": true
        }))
        .into_response(),
        GenerateBehavior::Status(code) => {
            (code, axum::Json(serde_json::json!({"error": "model not found"}))).into_response()
        }
        GenerateBehavior::NotJson => "definitely not json".into_response(),
        GenerateBehavior::MissingResponseField => {
            axum::Json(serde_json::json!({"model": model, "done": true})).into_response()
        }
        GenerateBehavior::Slow => {
            tokio::time::sleep(SLOW_DELAY).await;
            axum::Json(serde_json::json!({"response": "late"})).into_response()
        }
    }
}
