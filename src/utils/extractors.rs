use std::{convert::Infallible, fmt};

use axum::extract::FromRequestParts;
use http::request::Parts;

pub const REQUEST_ID_HEADER: &str = "req-id";

/// Correlation id from the `req-id` header. Absent or non-UTF-8 values
/// never reject the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestId(pub Option<String>);

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|header| header.to_str().ok())
            .map(str::to_string);

        Ok(RequestId(id))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or("-"))
    }
}
