//! # 인증 모듈
//!
//! 두 가지 인증 방식이 있고, 서로 관계가 없습니다.
//! - 관리자 비밀키: 사례 등록/삭제/조회수 증가. `X-KMCA-Admin` 헤더 값이
//!   설정된 비밀키와 정확히 같아야 합니다. (`AdminAuth` 추출기)
//! - 문의 글 비밀번호: 글마다 저장된 SHA-256 해시와 비교합니다.
//!
//! 비교는 모두 `subtle` 의 상수 시간 비교를 씁니다.

use axum::{extract::FromRequestParts, http::request::Parts};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::models::ContactEntry;
use crate::routes::AppState;

/// 관리자 비밀키를 담는 요청 헤더
pub const ADMIN_HEADER: &str = "x-kmca-admin";

const SECRET_MISSING_MESSAGE: &str = "서버에 관리자 비밀키가 설정되지 않았습니다.";
const ADMIN_REQUIRED_MESSAGE: &str = "관리자 인증이 필요합니다.";
const WRONG_PASSWORD_MESSAGE: &str = "비밀번호가 올바르지 않습니다.";

/// 관리자 인증을 통과한 요청
///
/// 핸들러 인자에 두면 본문을 읽기 전에 먼저 검사됩니다.
/// - 서버에 비밀키가 없으면 500 (요청을 허용하는 쪽으로 넘어가지 않음)
/// - 헤더가 없거나 다르면 401
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let secret = state
            .config
            .admin_secret
            .as_deref()
            .ok_or_else(|| AppError::Misconfigured(SECRET_MISSING_MESSAGE.to_string()))?;

        let authorized = parts
            .headers
            .get(ADMIN_HEADER)
            .is_some_and(|value| secrets_match(value.as_bytes(), secret.as_bytes()));

        if authorized {
            Ok(AdminAuth)
        } else {
            Err(AppError::Unauthorized(ADMIN_REQUIRED_MESSAGE.to_string()))
        }
    }
}

/// 비밀번호의 SHA-256 hex 해시 (소문자 64자)
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// 평문 비밀번호가 저장된 해시와 일치하는지 확인합니다.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    secrets_match(hash_password(password).as_bytes(), stored_hash.as_bytes())
}

/// 문의 글 비밀번호 확인. 틀리면 401.
pub fn check_entry_password(entry: &ContactEntry, password: &str) -> Result<(), AppError> {
    if verify_password(password, &entry.password_hash) {
        Ok(())
    } else {
        Err(AppError::Unauthorized(WRONG_PASSWORD_MESSAGE.to_string()))
    }
}

fn secrets_match(provided: &[u8], expected: &[u8]) -> bool {
    provided.ct_eq(expected).into()
}
