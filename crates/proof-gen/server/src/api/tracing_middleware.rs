use crate::metrics::record_request;
use axum::{
    extract::{
        MatchedPath,
        Request,
    },
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{
    Instrument,
    debug,
    info_span,
};
use uuid::Uuid;

/// Wraps every request in a span carrying a fresh request id.
pub async fn tracing_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "fallback".to_string(), |matched| matched.as_str().to_string());
    let request_id = Uuid::new_v4();

    let span = info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id,
    );

    let started = Instant::now();
    let response = async move { next.run(request).await }
        .instrument(span.clone())
        .await;
    let elapsed = started.elapsed();
    let status = response.status().as_u16();

    span.in_scope(|| {
        debug!(
            target = "proof_gen::api",
            status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Request completed"
        );
    });
    record_request(route, status, elapsed);

    response
}
