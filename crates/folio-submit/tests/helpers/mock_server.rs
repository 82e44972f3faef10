//! In-process HTTP endpoint for exercising FormClient

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response, StatusCode, body::Incoming};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Request as seen by the mock endpoint
#[derive(Debug, Clone)]
pub struct RecordedRequest {
	pub method: String,
	pub path: String,
	pub content_type: Option<String>,
	pub accept: Option<String>,
	pub body: Bytes,
}

impl RecordedRequest {
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	pub fn json(&self) -> serde_json::Value {
		serde_json::from_slice(&self.body).unwrap()
	}
}

#[derive(Clone)]
struct Reply {
	status: StatusCode,
	body: Bytes,
}

struct MockState {
	reply: Reply,
	requests: Vec<RecordedRequest>,
}

/// Endpoint answering every request with one canned reply
pub struct MockFormServer {
	state: Arc<Mutex<MockState>>,
	local_addr: SocketAddr,
}

impl MockFormServer {
	/// Start a server that answers `200 {}`
	pub async fn new() -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let local_addr = listener.local_addr().unwrap();

		let state = Arc::new(Mutex::new(MockState {
			reply: Reply {
				status: StatusCode::OK,
				body: Bytes::from_static(b"{}"),
			},
			requests: Vec::new(),
		}));

		let state_clone = state.clone();
		tokio::spawn(async move {
			let state = state_clone;
			loop {
				if let Ok((stream, _)) = listener.accept().await {
					let io = TokioIo::new(stream);
					let state = state.clone();

					tokio::spawn(async move {
						let service = hyper::service::service_fn(move |req: Request<Incoming>| {
							let state = state.clone();
							async move { handle_request(req, state).await }
						});

						let _ = hyper::server::conn::http1::Builder::new()
							.serve_connection(io, service)
							.await;
					});
				}
			}
		});

		Self { state, local_addr }
	}

	/// Answer subsequent requests with `status` and `body`
	pub fn respond_with(&self, status: u16, body: &str) {
		let mut state = self.state.lock().unwrap();
		state.reply = Reply {
			status: StatusCode::from_u16(status).unwrap(),
			body: Bytes::from(body.to_string()),
		};
	}

	pub fn url(&self, path: &str) -> String {
		format!("http://{}{}", self.local_addr, path)
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.state.lock().unwrap().requests.clone()
	}

	pub fn last_request(&self) -> RecordedRequest {
		self.requests().pop().expect("no request received")
	}
}

async fn handle_request(
	req: Request<Incoming>,
	state: Arc<Mutex<MockState>>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
	let header = |name: hyper::header::HeaderName| {
		req.headers()
			.get(name)
			.and_then(|value| value.to_str().ok())
			.map(str::to_string)
	};
	let method = req.method().to_string();
	let path = req.uri().path().to_string();
	let content_type = header(hyper::header::CONTENT_TYPE);
	let accept = header(hyper::header::ACCEPT);
	let body = req.into_body().collect().await?.to_bytes();

	let reply = {
		let mut state = state.lock().unwrap();
		state.requests.push(RecordedRequest {
			method,
			path,
			content_type,
			accept,
			body,
		});
		state.reply.clone()
	};

	Ok(Response::builder()
		.status(reply.status)
		.header("Content-Type", "application/json")
		.body(Full::new(reply.body))
		.unwrap())
}
