//! # 서비스 모듈
//!
//! 핸들러가 공통으로 쓰는 순수 함수 모음입니다.
//! - `records`: 입력 정리(trim/기본값), 타임스탬프와 ID 생성, 최신순 정렬

pub mod records;

pub use records::*;
