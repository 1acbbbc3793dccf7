//! # JSON 요청 본문 추출기
//!
//! axum 기본 `Json<T>` 와 다른 점:
//! - `Content-Type` 헤더를 요구하지 않습니다.
//! - 본문이 비어 있거나 객체가 아닌 JSON(배열, 문자열 등)이면 `T::default()` (빈 객체 `{}` 와 같은 의미)로 읽습니다.
//! - JSON 이 아니면 `AppError::MalformedRequest` (일반 500 응답) 로 거부합니다.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::error::AppError;

#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::MalformedRequest(e.to_string()))?;

        if bytes.is_empty() {
            return Ok(JsonBody(T::default()));
        }

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::MalformedRequest(e.to_string()))?;
        if !value.is_object() {
            return Ok(JsonBody(T::default()));
        }

        T::deserialize(value)
            .map(JsonBody)
            .map_err(|e| AppError::MalformedRequest(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PasswordRequest;
    use axum::body::Body;

    async fn extract(body: &'static str) -> Result<JsonBody<PasswordRequest>, AppError> {
        let req = Request::builder().body(Body::from(body)).unwrap();
        JsonBody::<PasswordRequest>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn empty_body_reads_as_defaults() {
        let JsonBody(req) = extract("").await.unwrap();
        assert!(req.password.is_none());
    }

    #[tokio::test]
    async fn content_type_is_not_required() {
        let JsonBody(req) = extract(r#"{"password":"p1"}"#).await.unwrap();
        assert_eq!(req.password.as_deref(), Some("p1"));
    }

    #[tokio::test]
    async fn broken_json_is_a_malformed_request() {
        let err = extract("{password:").await.unwrap_err();
        assert!(matches!(err, AppError::MalformedRequest(_)));
    }

    #[tokio::test]
    async fn non_object_json_reads_as_defaults() {
        let JsonBody(req) = extract(r#"["p1"]"#).await.unwrap();
        assert!(req.password.is_none());
    }

    #[tokio::test]
    async fn wrong_field_type_is_not_a_parse_error() {
        let JsonBody(req) = extract(r#"{"password":1234}"#).await.unwrap();
        assert!(req.password.is_none());
    }
}
