/// Request timing middleware
///
/// Logs the start and completion of every request and stamps the response
/// with an `X-Process-Time` header carrying the elapsed milliseconds.
///
/// # Example
///
/// ```no_run
/// use axum::Router;
/// use taskdeck_api::middleware::timing::RequestTimingLayer;
///
/// let app: Router = Router::new().layer(RequestTimingLayer::new());
/// ```

use axum::{extract::Request, http::HeaderValue, response::Response};
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};

/// Request timing middleware layer
#[derive(Clone, Default)]
pub struct RequestTimingLayer;

impl RequestTimingLayer {
    /// Creates a new request timing layer
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestTimingLayer {
    type Service = RequestTimingMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestTimingMiddleware { inner }
    }
}

/// Request timing middleware service
#[derive(Clone)]
pub struct RequestTimingMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for RequestTimingMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let start = Instant::now();

        tracing::info!(%method, %path, "Request started");

        let future = self.inner.call(request);

        Box::pin(async move {
            let mut response = future.await?;

            let elapsed_ms = start.elapsed().as_millis() as u64;
            let status = response.status().as_u16();

            tracing::info!(%method, %path, status, elapsed_ms, "Request completed");

            if let Ok(value) = HeaderValue::from_str(&elapsed_ms.to_string()) {
                response.headers_mut().insert("X-Process-Time", value);
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse, routing::get, Router};
    use tower::Service as _;

    #[tokio::test]
    async fn test_process_time_header_applied() {
        async fn handler() -> impl IntoResponse {
            (StatusCode::OK, "test")
        }

        let mut app = Router::new()
            .route("/test", get(handler))
            .layer(RequestTimingLayer::new());

        let response = app
            .call(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response
            .headers()
            .get("X-Process-Time")
            .expect("X-Process-Time header should be present");

        // Elapsed milliseconds, so the value must parse as an integer
        header
            .to_str()
            .unwrap()
            .parse::<u64>()
            .expect("header should be a millisecond count");
    }

    #[tokio::test]
    async fn test_header_present_on_error_responses() {
        async fn handler() -> impl IntoResponse {
            (StatusCode::NOT_FOUND, "missing")
        }

        let mut app = Router::new()
            .route("/missing", get(handler))
            .layer(RequestTimingLayer::new());

        let response = app
            .call(
                Request::builder()
                    .uri("/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get("X-Process-Time").is_some());
    }
}
