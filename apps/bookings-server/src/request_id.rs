use axum::body::Body;
use axum::http::{HeaderName, Request};
use tracing::field::Empty;

pub fn header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

/// Trace layer whose span carries the request id assigned by `SetRequestIdLayer`.
#[allow(clippy::type_complexity)]
pub fn create_trace_layer() -> tower_http::trace::TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    impl Fn(&Request<Body>) -> tracing::Span + Clone,
> {
    use tower_http::trace::TraceLayer;

    TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        let hdr = header();
        let rid = req
            .headers()
            .get(&hdr)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("n/a");
        tracing::info_span!(
            "http_request",
            method = %req.method(),
            uri = %req.uri().path(),
            version = ?req.version(),
            request_id = %rid,
            status = Empty,
            latency_ms = Empty
        )
    })
}
