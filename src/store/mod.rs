//! # 저장소 계층 (JSON 파일)
//!
//! 리소스마다 JSON 배열 파일 하나를 두고, 요청마다 파일 전체를 읽고
//! 변경이 있으면 파일 전체를 다시 씁니다. 파일 핸들은 캐시하지 않으며
//! 읽기/쓰기 전마다 파일 존재 여부를 다시 확인합니다.
//!
//! 핸들러는 `RecordStore` 트레이트만 봅니다. 파일 대신 임베디드 DB를 쓰고 싶으면
//! 이 트레이트만 새로 구현하면 됩니다.
//!
//! 각 하위 모듈:
//! - `json_file`: `RecordStore` 의 JSON 파일 구현
//! - `cases`: 사례 조회/추가/삭제/조회수 증가
//! - `contacts`: 문의 글 조회/추가/삭제, 답변 추가

pub mod cases;
pub mod contacts;
pub mod json_file;

pub use cases::*;
pub use contacts::*;
pub use json_file::JsonFile;

use crate::error::AppError;
use std::future::Future;

/// 한 종류의 레코드 전체를 읽고 통째로 교체하는 저장소
///
/// 잠금이 없으므로 동시에 두 요청이 쓰면 나중에 쓴 쪽이 이깁니다.
pub trait RecordStore<T>: Send + Sync {
    /// 전체 레코드를 읽습니다.
    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, AppError>> + Send;

    /// 전체 레코드를 주어진 목록으로 교체합니다.
    fn replace_all(&self, records: &[T]) -> impl Future<Output = Result<(), AppError>> + Send;
}
