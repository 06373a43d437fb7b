use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Json, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use serde_json::Value;

/// Recorded requests and canned responses of the mock API.
#[derive(Debug, Default)]
pub struct MockState {
    pub username: String,
    pub events: Value,
    pub gist_id: String,
    pub gist_files: BTreeMap<String, String>,
    /// When set, gist endpoints answer with this status.
    pub gist_failure: Option<u16>,
    pub patches: Vec<Value>,
    pub last_per_page: Option<u32>,
    pub last_events_auth: Option<String>,
    pub last_gist_auth: Option<String>,
    pub last_user_agent: Option<String>,
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

    pub fn patches(&self) -> Vec<Value> {
        self.state.lock().unwrap().patches.clone()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

fn gist_json(id: &str, files: &BTreeMap<String, String>) -> Value {
    let files: serde_json::Map<String, Value> = files
        .iter()
        .map(|(name, content)| {
            (
                name.clone(),
                serde_json::json!({"filename": name, "content": content}),
            )
        })
        .collect();
    serde_json::json!({"id": id, "files": files})
}

async fn list_events(
    State(state): State<SharedMock>,
    Path(username): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, String)> {
    let mut s = state.lock().unwrap();
    s.last_per_page = query.get("per_page").and_then(|v| v.parse().ok());
    s.last_events_auth = header(&headers, "authorization");
    s.last_user_agent = header(&headers, "user-agent");
    if username != s.username {
        return Err((StatusCode::NOT_FOUND, "Not Found".to_string()));
    }
    Ok(Json(s.events.clone()))
}

async fn get_gist(
    State(state): State<SharedMock>,
    Path(gist_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, String)> {
    let mut s = state.lock().unwrap();
    s.last_gist_auth = header(&headers, "authorization");
    if let Some(code) = s.gist_failure {
        let status = StatusCode::from_u16(code).unwrap();
        return Err((status, "boom".to_string()));
    }
    if gist_id != s.gist_id {
        return Err((StatusCode::NOT_FOUND, "Not Found".to_string()));
    }
    Ok(Json(gist_json(&s.gist_id, &s.gist_files)))
}

async fn patch_gist(
    State(state): State<SharedMock>,
    Path(gist_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let mut s = state.lock().unwrap();
    s.last_gist_auth = header(&headers, "authorization");
    if let Some(code) = s.gist_failure {
        let status = StatusCode::from_u16(code).unwrap();
        return Err((status, "boom".to_string()));
    }
    if gist_id != s.gist_id {
        return Err((StatusCode::NOT_FOUND, "Not Found".to_string()));
    }
    if let Some(files) = body["files"].as_object() {
        for (name, file) in files {
            let content = file["content"].as_str().unwrap_or_default().to_string();
            s.gist_files.insert(name.clone(), content);
        }
    }
    s.patches.push(body);
    Ok(Json(gist_json(&s.gist_id, &s.gist_files)))
}
