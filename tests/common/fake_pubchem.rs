//! Fake PUG REST server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Tests register exact stub responses keyed by method and
//! path-with-query; anything unregistered answers 404. Every request is
//! recorded so tests can assert on methods, URLs, and POST bodies.
//!
//! The server runs on its own thread with its own single-threaded runtime,
//! because the client under test is a *blocking* reqwest client and must not
//! execute inside an async context.
//!
//! # Example
//!
//! ```rust,no_run
//! use common::fake_pubchem::FakePubChem;
//!
//! let api = FakePubChem::start();
//! api.on_get("/compound/name/glucose/cids/TXT", 200, "5793\n");
//!
//! // Point your PugClient at api.base_url()
//! let url = api.base_url();
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};

/// One canned response, keyed by `(method, path_and_query)`.
#[derive(Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// One request as the server observed it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path_and_query: String,
    pub body: String,
}

#[derive(Default)]
struct ServerState {
    stubs: HashMap<(String, String), StubResponse>,
    requests: Vec<RecordedRequest>,
}

type SharedState = Arc<Mutex<ServerState>>;

/// Handle to the running fake server.
pub struct FakePubChem {
    addr: SocketAddr,
    state: SharedState,
}

impl FakePubChem {
    /// Start the fake server on a random port. Returns once it is listening.
    pub fn start() -> Self {
        let state: SharedState = Arc::new(Mutex::new(ServerState::default()));
        let (tx, rx) = std::sync::mpsc::channel();
        let shared = state.clone();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build test runtime");
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("failed to bind test listener");
                tx.send(listener.local_addr().expect("listener has no addr"))
                    .expect("start() dropped the address receiver");

                let app = Router::new().fallback(handle).with_state(shared);
                axum::serve(listener, app).await.expect("test server died");
            });
        });

        let addr = rx.recv().expect("test server never started");
        Self { addr, state }
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Register a GET stub for an exact path (query string included).
    pub fn on_get(&self, path_and_query: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.stub("GET", path_and_query, status, body);
    }

    /// Register a POST stub for an exact path (query string included).
    pub fn on_post(&self, path_and_query: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.stub("POST", path_and_query, status, body);
    }

    fn stub(&self, method: &str, path_and_query: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.state.lock().unwrap().stubs.insert(
            (method.to_string(), path_and_query.to_string()),
            StubResponse {
                status,
                body: body.into(),
            },
        );
    }

    /// Every request observed so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

async fn handle(State(state): State<SharedState>, req: Request) -> Response {
    let method = req.method().to_string();
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let body = axum::body::to_bytes(req.into_body(), 1 << 20)
        .await
        .unwrap_or_default();

    let mut st = state.lock().unwrap();
    st.requests.push(RecordedRequest {
        method: method.clone(),
        path_and_query: path_and_query.clone(),
        body: String::from_utf8_lossy(&body).to_string(),
    });

    match st.stubs.get(&(method, path_and_query)) {
        Some(stub) => (
            StatusCode::from_u16(stub.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            stub.body.clone(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "unstubbed path").into_response(),
    }
}
