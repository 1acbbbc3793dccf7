//! # 데이터 모델 모듈
//!
//! JSON 파일에 저장되는 레코드와 요청/응답 구조체를 정의합니다.
//! - `case`: 사례(Case)
//! - `contact`: 문의 글(ContactEntry)과 답변(Reply), 공개용 투영(projection)
//! - `lenient`: 타입이 어긋난 필드를 읽는 deserializer 모음
//!
//! 데이터 파일은 사람이 직접 고치기도 하므로, 저장 레코드의 필드는
//! 빠져 있거나 `null` 이어도 기본값으로 읽히게 되어 있습니다.
//! 모르는 필드는 `extra` 에 그대로 보관했다가 다시 기록합니다.

pub mod case;
pub mod contact;
pub(crate) mod lenient;

pub use case::*;
pub use contact::*;
