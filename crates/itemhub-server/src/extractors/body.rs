//! JSON body extractor that reads a missing body as `{}`

use crate::error::ApiError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;

/// Like [`Json`], but a request without a JSON content type or with an empty
/// body yields `T::default()` instead of a rejection. Syntax and type errors
/// in a JSON body are still rejected with 400.
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|h| h.to_str().ok()) else {
        return false;
    };

    let mime = content_type.split(';').next().unwrap_or_default().trim();
    mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(Self(T::default()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use itemhub_types::ItemPatch;

    async fn extract(
        content_type: Option<&str>,
        body: &'static str,
    ) -> Result<ItemPatch, ApiError> {
        let mut builder = axum::http::Request::builder().method("PUT").uri("/api/items/1");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let req = builder.body(Body::from(body)).unwrap();

        JsonBody::<ItemPatch>::from_request(req, &())
            .await
            .map(|JsonBody(patch)| patch)
    }

    #[tokio::test]
    async fn test_missing_body_is_default() {
        assert_eq!(extract(None, "").await.unwrap(), ItemPatch::default());
        assert_eq!(
            extract(Some("application/json"), "").await.unwrap(),
            ItemPatch::default()
        );
    }

    #[tokio::test]
    async fn test_non_json_content_type_ignores_body() {
        let patch = extract(Some("text/plain"), r#"{"name": "x"}"#).await.unwrap();
        assert!(patch.is_empty());
    }

    #[tokio::test]
    async fn test_json_body_is_parsed() {
        let patch = extract(Some("application/json; charset=utf-8"), r#"{"name": "x"}"#)
            .await
            .unwrap();
        assert_eq!(patch.name.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let err = extract(Some("application/json"), "{not json").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err = extract(Some("application/json"), r#"{"name": 5}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
