//! Request ID middleware.
//!
//! Every response carries an `x-request-id` header so a storefront bug report
//! can be matched to its tracing span and Sentry event. An upstream value
//! (Cloudflare or another proxy in front of the API) is reused only when it
//! is a well-formed UUID; anything else is replaced with a fresh one, so
//! arbitrary client input never becomes a log correlation key.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Resolve the id for a request: the upstream header when it parses as a
/// UUID, a fresh UUID v4 otherwise.
fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .unwrap_or_else(Uuid::new_v4)
        .to_string()
}

/// Middleware that tags every request with a request id.
///
/// The id is recorded on the current tracing span, set as a Sentry scope tag
/// for error correlation, and echoed back in the response headers.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_valid_upstream_id_is_reused() {
        let id = Uuid::new_v4().to_string();
        assert_eq!(resolve_request_id(&headers_with(&id)), id);
    }

    #[test]
    fn test_junk_upstream_id_is_replaced() {
        let resolved = resolve_request_id(&headers_with("not-a-uuid"));
        assert_ne!(resolved, "not-a-uuid");
        assert!(Uuid::parse_str(&resolved).is_ok());
    }

    #[test]
    fn test_missing_header_generates_id() {
        let resolved = resolve_request_id(&HeaderMap::new());
        assert!(Uuid::parse_str(&resolved).is_ok());
    }
}
