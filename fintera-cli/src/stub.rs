//! In-process backend for the browse tests.
//!
//! Serves three pages of contracts, echoing the requested page, and records
//! every query string it receives.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use serde_json::json;
use tokio::net::TcpListener;

/// Time given to the browse loop to apply a reply before the next keystroke.
const SETTLE: Duration = Duration::from_millis(100);

pub struct StubServer {
    addr: SocketAddr,
    queries: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let queries = Arc::new(Mutex::new(Vec::new()));

        let recorded = queries.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let query = req.uri().query().unwrap_or_default().to_string();
                        recorded.lock().unwrap().push(query.clone());
                        async move {
                            Ok::<_, Infallible>(
                                Response::builder()
                                    .header("Content-Type", "application/json")
                                    .body(Full::new(Bytes::from(page_body(&query))))
                                    .unwrap(),
                            )
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self { addr, queries }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Requested page numbers, in arrival order.
    pub fn pages(&self) -> Vec<u32> {
        self.queries().iter().map(|query| requested_page(query)).collect()
    }

    /// Waits until `count` requests have arrived, then lets their replies
    /// settle. Panics after five seconds.
    pub async fn wait_for(&self, count: usize) {
        let seen = async {
            while self.queries.lock().unwrap().len() < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        };
        tokio::time::timeout(Duration::from_secs(5), seen)
            .await
            .unwrap_or_else(|_| panic!("expected {} requests, saw {:?}", count, self.queries()));
        tokio::time::sleep(SETTLE).await;
    }
}

fn requested_page(query: &str) -> u32 {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|page| page.parse().ok())
        .unwrap_or(1)
}

fn page_body(query: &str) -> String {
    let page = requested_page(query);
    json!({
        "contracts": [
            { "id": page * 10, "name": format!("Contract {}", page * 10) },
            { "id": page * 10 + 1, "name": format!("Contract {}", page * 10 + 1) }
        ],
        "pagination": { "page": page, "pages": 3 }
    })
    .to_string()
}
