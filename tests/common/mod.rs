// Local stand-in for the SpaceTraders API used by the integration tests.
#![allow(dead_code)]

use axum::body::Bytes;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub target: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or("")
    }

    pub fn query(&self) -> &str {
        self.target.split_once('?').map(|(_, q)| q).unwrap_or("")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl StubResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self { status: StatusCode::OK, body: body.into() }
    }

    pub fn created(body: impl Into<Vec<u8>>) -> Self {
        Self { status: StatusCode::CREATED, body: body.into() }
    }

    pub fn status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        Self { status, body: body.into() }
    }
}

type Handler = dyn Fn(&CapturedRequest) -> StubResponse + Send + Sync;

/// Every request, whatever its method or path, lands in one fallback route
/// that records it and answers with whatever the test's handler returns.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubServer {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&CapturedRequest) -> StubResponse + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);

        let captured = requests.clone();
        let app = Router::new().fallback(
            move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
                let captured = captured.clone();
                let handler = handler.clone();
                async move {
                    let target = uri
                        .path_and_query()
                        .map(|pq| pq.as_str().to_string())
                        .unwrap_or_else(|| uri.path().to_string());
                    let request = CapturedRequest {
                        method: method.to_string(),
                        target,
                        headers,
                        body: body.to_vec(),
                    };
                    let response = (*handler)(&request);
                    captured.lock().expect("requests lock").push(request);
                    (
                        response.status,
                        [(header::CONTENT_TYPE, "application/json")],
                        response.body,
                    )
                }
            },
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

/// An address nothing is listening on.
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    format!("http://{}", addr)
}

pub fn nav_json(system: &str, x: i32, y: i32) -> String {
    serde_json::json!({
        "data": {
            "systemSymbol": system,
            "waypointSymbol": format!("{}-A1", system),
            "route": {
                "destination": {
                    "symbol": format!("{}-A1", system),
                    "type": "PLANET",
                    "systemSymbol": system,
                    "x": x,
                    "y": y
                },
                "origin": {
                    "symbol": format!("{}-A1", system),
                    "type": "PLANET",
                    "systemSymbol": system,
                    "x": x,
                    "y": y
                },
                "departureTime": "2026-10-15T00:00:00.000Z",
                "arrival": "2026-10-15T00:00:00.000Z"
            },
            "status": "DOCKED",
            "flightMode": "CRUISE"
        }
    })
    .to_string()
}

pub fn waypoint_page_json(system: &str, waypoints: &[(&str, i32, i32)], page: u32, limit: u32, total: u32) -> String {
    let data: Vec<serde_json::Value> = waypoints
        .iter()
        .map(|(symbol, x, y)| {
            serde_json::json!({
                "symbol": symbol,
                "type": "PLANET",
                "systemSymbol": system,
                "x": x,
                "y": y,
                "orbitals": [],
                "traits": [{"symbol": "MARKETPLACE", "name": "Marketplace", "description": "Trade"}]
            })
        })
        .collect();
    serde_json::json!({
        "data": data,
        "meta": {"total": total, "page": page, "limit": limit}
    })
    .to_string()
}
