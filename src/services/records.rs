//! # 레코드 공통 유틸리티
//!
//! 요청 본문 값 정리, 타임스탬프/ID 생성, 최신순 정렬을 담당합니다.
//! 모두 동기 함수입니다. 파일 I/O 가 없으니 async 일 필요가 없습니다.

use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Reverse;

/// 문자열 입력을 trim 한 값. 없으면 빈 문자열.
pub fn trimmed(value: Option<&str>) -> &str {
    value.map(str::trim).unwrap_or("")
}

/// 분류 값/라벨처럼 선택 입력인 문자열을 정리합니다.
/// trim 후 비어 있으면 `None` (JSON 에서는 `null`) 이 됩니다.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    let value = trimmed(value);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// trim 후 비어 있으면 `default` 를 씁니다. (작성자 이름 등)
pub fn text_or(value: Option<&str>, default: &str) -> String {
    optional_text(value).unwrap_or_else(|| default.to_string())
}

/// 호출자가 준 ID가 있으면 그대로, 없거나 빈 문자열이면 `<prefix>-<epoch millis>`.
pub fn id_or_generated(value: Option<String>, prefix: &str) -> String {
    value
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| generated_id(prefix))
}

/// `<prefix>-<epoch millis>` 형태의 ID.
///
/// 같은 밀리초에 두 건이 만들어지면 ID가 겹칠 수 있습니다.
pub fn generated_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_millis())
}

/// 현재 시각을 `2026-10-19T09:30:00.123Z` 형식으로 반환합니다.
pub fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// `createdAt` 을 epoch 밀리초로 바꿉니다. 비어 있거나 해석할 수 없으면 0.
///
/// RFC 3339 시각 외에 `2025-06-01` 같은 날짜만 있는 값도 받으며, UTC 자정으로 봅니다.
pub fn timestamp_millis(created_at: &str) -> i64 {
    if let Ok(dt) = DateTime::parse_from_rfc3339(created_at) {
        return dt.timestamp_millis();
    }
    NaiveDate::parse_from_str(created_at, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// `createdAt` 기준 최신순 정렬. 시각이 같으면 원래 순서를 유지합니다 (안정 정렬).
pub fn sort_newest_first<T>(records: &mut [T], created_at: impl Fn(&T) -> &str) {
    records.sort_by_cached_key(|record| Reverse(timestamp_millis(created_at(record))));
}
