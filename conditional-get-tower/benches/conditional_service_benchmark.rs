use std::convert::Infallible;

use bytes::Bytes;
use conditional_get_tower::ConditionalGet;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use http::{Request, Response};
use http_body_util::{BodyExt, Full};
use tower::{ServiceBuilder, ServiceExt, service_fn};

fn request(if_none_match: &'static str) -> Request<Full<Bytes>> {
    Request::get("/resource")
        .header("if-none-match", if_none_match)
        .body(Full::new(Bytes::new()))
        .unwrap()
}

/// Benchmark the 304 path against the pass-through path for a 10KB body
fn bench_conditional_service(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("conditional_get");
    let payload = Bytes::from(vec![b'x'; 10 * 1024]);

    let service = ServiceBuilder::new()
        .layer(ConditionalGet::new())
        .service(service_fn(move |_req: Request<Full<Bytes>>| {
            let payload = payload.clone();
            async move {
                Ok::<_, Infallible>(
                    Response::builder()
                        .header("etag", "\"v1\"")
                        .header("content-type", "application/octet-stream")
                        .body(Full::new(payload))
                        .unwrap(),
                )
            }
        }));

    for (name, tag) in [("not_modified", "\"v1\""), ("passthrough", "\"v0\"")] {
        group.bench_with_input(BenchmarkId::new("oneshot", name), &tag, |b, &tag| {
            b.to_async(&runtime).iter(|| {
                let service = service.clone();
                async move {
                    let response = service.oneshot(request(tag)).await.unwrap();
                    response.into_body().collect().await.unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_conditional_service);
criterion_main!(benches);
