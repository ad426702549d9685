//! Caller identity
//!
//! The platform's gateway authenticates users and forwards the identity
//! as an `X-User-Id` header. This extractor reads it when present; it
//! never rejects, because most endpoints also accept anonymous calls.

use axum::extract::FromRequestParts;
use http::request::Parts;

/// Caller id from the `X-User-Id` header, if any.
#[derive(Debug, Clone, Copy)]
pub struct CallerId(pub Option<i64>);

impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        Ok(CallerId(id))
    }
}
