//! Tower Service Example
//!
//! Demonstrates the conditional-get-tower layer in front of a plain Tower
//! service served by Hyper.
//!
//! Features shown:
//!   - Handler setting `ETag` and `Last-Modified`
//!   - Layer configuration loaded from YAML
//!   - TowerToHyperService adapter pattern
//!
//! Run:
//!   cargo run -p conditional-get-demos --example tower
//!
//! Endpoints:
//!   - http://localhost:3001/         - Static greeting with ETag
//!   - http://localhost:3001/started  - Server start time with Last-Modified
//!
//! Try it:
//!   curl -v http://localhost:3001/                              # 200 with ETag
//!   curl -v -H 'If-None-Match: "greeting-v1"' http://localhost:3001/   # 304
//!   curl -v -H "If-Modified-Since: $(date -u '+%a, %d %b %Y %H:%M:%S GMT')" \
//!        http://localhost:3001/started                          # 304

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use conditional_get::ConfigConditional;
use conditional_get_tower::ConditionalGet;
use http::{Request, Response, StatusCode, header};
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tower::{Service, ServiceBuilder};

/// Handler that sets validators but knows nothing about conditional requests.
#[derive(Clone)]
struct ResourceService {
    started: String,
}

impl<B> Service<Request<B>> for ResourceService
where
    B: Send + 'static,
{
    type Response = Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let path = req.uri().path().to_string();
        let started = self.started.clone();

        Box::pin(async move {
            let response = match path.as_str() {
                "/" => Response::builder()
                    .status(StatusCode::OK)
                    .header(header::ETAG, "\"greeting-v1\"")
                    .header(header::CONTENT_TYPE, "text/plain")
                    .body(Full::new(Bytes::from("Hello from Tower + conditional GET!"))),

                "/started" => Response::builder()
                    .status(StatusCode::OK)
                    .header(header::LAST_MODIFIED, started.as_str())
                    .header(header::CONTENT_TYPE, "text/plain")
                    .body(Full::new(Bytes::from(format!("Server started at {started}")))),

                _ => Response::builder()
                    .status(StatusCode::NOT_FOUND)
                    .header(header::CONTENT_TYPE, "text/plain")
                    .body(Full::new(Bytes::from("Not Found"))),
            };

            Ok(response.unwrap_or_else(|_| Response::new(Full::new(Bytes::new()))))
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let subscriber = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter("info,conditional_get=trace")
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Parsed comparison tolerates clients that reformat the date.
    let config = ConfigConditional::from_yaml(
        r#"
methods: [GET, HEAD]
date_comparison: HttpDate
"#,
    )?
    .into_config()?;

    let layer = ConditionalGet::builder().config(config).build();

    let started = chrono::Utc::now()
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string();
    let service = ServiceBuilder::new()
        .layer(layer)
        .service(ResourceService { started });

    let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let svc = service.clone();

        tokio::task::spawn(async move {
            let hyper_service = TowerToHyperService::new(svc);

            if let Err(err) = http1::Builder::new()
                .serve_connection(io, hyper_service)
                .await
            {
                tracing::error!(?err, "Error serving connection");
            }
        });
    }
}
