use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::Value;

pub const GIST_FILE: &str = "activity.md";

/// Canned responses and recorded writes of the mock API.
#[derive(Debug, Default)]
pub struct MockState {
    /// When set, the events endpoint answers with this status.
    pub events_status: Option<u16>,
    pub gist_content: Option<String>,
    pub patches: usize,
}

pub type SharedMock = Arc<Mutex<MockState>>;

pub struct MockGitHub {
    pub addr: SocketAddr,
    pub state: SharedMock,
    _server: tokio::task::JoinHandle<()>,
}

impl MockGitHub {
    pub async fn start(state: MockState) -> Self {
        let state: SharedMock = Arc::new(Mutex::new(state));
        let app = Router::new()
            .route("/users/{username}/events/public", get(list_events))
            .route("/gists/{gist_id}", get(get_gist).patch(patch_gist))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            _server: server,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn gist_content(&self) -> Option<String> {
        self.state.lock().unwrap().gist_content.clone()
    }

    pub fn patches(&self) -> usize {
        self.state.lock().unwrap().patches
    }
}

async fn list_events(State(state): State<SharedMock>) -> Result<Json<Value>, StatusCode> {
    if let Some(code) = state.lock().unwrap().events_status {
        return Err(StatusCode::from_u16(code).unwrap());
    }
    Ok(Json(serde_json::json!([
        {
            "type": "ReleaseEvent",
            "repo": {"name": "o/r"},
            "payload": {"action": "published", "release": {"tag_name": "v1.0", "prerelease": true}},
            "created_at": "2020-01-01T00:00:00Z"
        },
        {
            "type": "WatchEvent",
            "repo": {"name": "o/other"},
            "payload": {"action": "started"},
            "created_at": "2019-12-31T00:00:00Z"
        }
    ])))
}

async fn get_gist(State(state): State<SharedMock>) -> Json<Value> {
    let s = state.lock().unwrap();
    match &s.gist_content {
        Some(content) => Json(serde_json::json!({
            "id": "abc123",
            "files": {GIST_FILE: {"filename": GIST_FILE, "content": content}}
        })),
        None => Json(serde_json::json!({"id": "abc123", "files": {}})),
    }
}

async fn patch_gist(State(state): State<SharedMock>, Json(body): Json<Value>) -> Json<Value> {
    let mut s = state.lock().unwrap();
    s.gist_content = body["files"][GIST_FILE]["content"]
        .as_str()
        .map(String::from);
    s.patches += 1;
    Json(body)
}
