//! Axum extractors whose rejections are [`BizError`]s
//!
//! [`JsonBody<T>`] reads the body the way a permissive JSON body parser does:
//! - no `application/json` content type, or an empty body → `T::default()`
//! - a JSON body → deserialized `T`
//! - malformed JSON → 400 error envelope
//!
//! [`PathParam<T>`] wraps axum's `Path` so a segment that cannot be decoded
//! is answered with the error envelope instead of axum's plain-text 400.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::core::error::{BizError, RequestError};

/// JSON body extractor whose rejection is a [`BizError`]
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

/// Path parameter extractor whose rejection is a [`BizError`]
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

fn is_json_content_type(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = BizError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(&req) {
            return Ok(JsonBody(T::default()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| RequestError::InvalidBody {
                message: e.body_text(),
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(T::default()));
        }

        let payload = serde_json::from_slice(&bytes)?;
        Ok(JsonBody(payload))
    }
}

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = BizError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| RequestError::InvalidPath {
                message: e.body_text(),
            })?;
        Ok(PathParam(value))
    }
}
