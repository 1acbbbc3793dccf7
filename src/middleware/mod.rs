//! # 미들웨어 / 추출기 모듈
//!
//! - `auth`: 관리자 비밀키 추출기(`AdminAuth`)와 문의 글 비밀번호 해시
//! - `json_body`: 빈 본문을 `{}` 로 읽는 관대한 JSON 본문 추출기
//! - `preflight`: OPTIONS 요청을 204 No Content 로 맞추는 미들웨어

pub mod auth;
pub mod json_body;
pub mod preflight;
