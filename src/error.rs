//! # 에러 처리 모듈
//!
//! API에서 발생하는 모든 실패를 `AppError` 하나로 모읍니다.
//! 핸들러가 `Result<T, AppError>` 를 반환하면 axum 이 `IntoResponse` 를 호출해
//! `{ "success": false, "error": "..." }` 형태의 JSON 응답으로 바꿉니다.
//!
//! 내부 에러(I/O, JSON 파싱, 패닉 등)는 로그에만 자세히 남기고
//! 클라이언트에는 일반 메시지만 돌려줍니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use thiserror::Error;

/// 내부 오류 시 클라이언트에게 보여주는 일반 메시지
pub const GENERIC_ERROR_MESSAGE: &str = "서버 오류가 발생했습니다.";
/// 매칭되는 라우트가 없을 때의 메시지
pub const UNSUPPORTED_ROUTE_MESSAGE: &str = "지원하지 않는 경로입니다.";

/// API 에러 종류
///
/// 클라이언트 잘못(400/401/404)은 메시지를 그대로 내보내고,
/// 서버 쪽 문제(500)는 `GENERIC_ERROR_MESSAGE` 로 감춥니다.
/// 단, 관리자 비밀키 미설정은 운영자가 알아야 하므로 메시지를 노출합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 필수 입력 누락 (HTTP 400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 비밀번호 또는 관리자 비밀키 불일치 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 관리자 비밀키가 설정되지 않은 서버 (HTTP 500)
    #[error("Server misconfigured: {0}")]
    Misconfigured(String),

    /// 대상 레코드 없음 (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 요청 본문이 JSON 으로 해석되지 않음 (HTTP 500, 일반 메시지)
    #[error("Malformed request body: {0}")]
    MalformedRequest(String),

    /// 메서드+경로에 맞는 라우트 없음 (HTTP 404)
    #[error("Unsupported route")]
    UnsupportedRoute,

    /// 데이터 파일 입출력 실패 (HTTP 500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 레코드 직렬화 실패 (HTTP 500)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 그 밖의 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 이 에러에 대응하는 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) | AppError::UnsupportedRoute => StatusCode::NOT_FOUND,
            AppError::Misconfigured(_)
            | AppError::MalformedRequest(_)
            | AppError::Io(_)
            | AppError::Json(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 클라이언트에게 보낼 메시지
    fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::Unauthorized(msg)
            | AppError::Misconfigured(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::UnsupportedRoute => UNSUPPORTED_ROUTE_MESSAGE.to_string(),
            AppError::MalformedRequest(_)
            | AppError::Io(_)
            | AppError::Json(_)
            | AppError::Internal(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("[api] unhandled error: {}", self);
        }

        let body = Json(json!({
            "success": false,
            "error": self.public_message(),
        }));

        (status, body).into_response()
    }
}

/// 매칭되는 라우트가 없을 때의 fallback 핸들러.
/// 존재하는 경로에 다른 메서드로 요청한 경우에도 같은 응답(404)을 씁니다.
pub async fn unsupported_route() -> AppError {
    AppError::UnsupportedRoute
}

/// `CatchPanicLayer` 용 패닉 변환 함수.
/// 패닉 내용은 로그에만 남기고 일반 500 응답을 보냅니다.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_message() {
        let err = AppError::Validation("제목과 본문은 필수 입력 항목입니다.".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "제목과 본문은 필수 입력 항목입니다.");
    }

    #[test]
    fn internal_details_are_hidden() {
        let err = AppError::MalformedRequest("expected value at line 1 column 1".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), GENERIC_ERROR_MESSAGE);

        let io = AppError::from(std::io::Error::other("disk on fire"));
        assert_eq!(io.public_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn misconfiguration_is_reported_as_500_with_message() {
        let err = AppError::Misconfigured("서버에 관리자 비밀키가 설정되지 않았습니다.".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.public_message().contains("관리자 비밀키"));
    }

    #[test]
    fn panic_payloads_become_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
