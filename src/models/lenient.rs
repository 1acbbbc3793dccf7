//! 느슨한 필드 읽기
//!
//! 데이터 파일은 사람이 직접 고치기도 하므로 필드 타입이 어긋난 레코드가 들어올 수 있습니다.
//! (`"views": "12"`, 숫자 ID, 음수 조회수 등) 이런 값은 에러 대신 가장 가까운 값으로 읽습니다.
//! 배열이나 객체처럼 도저히 바꿀 수 없는 값만 에러로 돌려보내며,
//! 그런 레코드는 저장소가 원본 그대로 보관합니다.
//!
//! 요청 본문용 `string_only` 는 반대로 엄격합니다. 문자열이 아니면 입력하지 않은 것으로 봅니다.

use serde::{de::Error, Deserialize, Deserializer};
use serde_json::Value;

/// `null` 을 타입의 기본값으로 읽습니다. (`#[serde(default)]` 와 함께 사용)
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 문자열 필드. 숫자/불리언은 문자열로 바꾸고 `null` 은 빈 문자열.
pub(crate) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

/// 선택 문자열 필드. `null` 이면 `None`.
pub(crate) fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!("expected text, found {other}"))),
    }
}

/// 조회수 같은 0 이상의 정수. 숫자 문자열도 받고, 음수/해석 불가는 0.
pub(crate) fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole_count)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_count))
        }
        Value::Bool(b) => Some(u64::from(b)),
        _ => None,
    };
    Ok(count.unwrap_or(0))
}

fn whole_count(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.trunc() as u64)
}

/// 참/거짓 플래그. 불리언이 아니면 값이 비어 있는지로 판단합니다.
pub(crate) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// 요청 본문 필드. 문자열만 받고 나머지 타입은 모두 `None`.
pub(crate) fn string_only<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "text")]
        text: String,
        #[serde(default, deserialize_with = "count")]
        count: u64,
        #[serde(default, deserialize_with = "flag")]
        flag: bool,
        #[serde(default, deserialize_with = "string_only")]
        input: Option<String>,
    }

    fn read(value: Value) -> Fields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn counts_accept_numbers_and_numeric_strings() {
        assert_eq!(read(json!({ "count": 12 })).count, 12);
        assert_eq!(read(json!({ "count": "12" })).count, 12);
        assert_eq!(read(json!({ "count": " 7 " })).count, 7);
        assert_eq!(read(json!({ "count": 3.9 })).count, 3);
        assert_eq!(read(json!({ "count": -4 })).count, 0);
        assert_eq!(read(json!({ "count": "many" })).count, 0);
        assert_eq!(read(json!({ "count": null })).count, 0);
    }

    #[test]
    fn text_takes_scalars_and_rejects_containers() {
        assert_eq!(read(json!({ "text": 42 })).text, "42");
        assert_eq!(read(json!({ "text": null })).text, "");
        assert!(serde_json::from_value::<Fields>(json!({ "text": [1] })).is_err());
    }

    #[test]
    fn flags_follow_truthiness() {
        assert!(read(json!({ "flag": true })).flag);
        assert!(read(json!({ "flag": 1 })).flag);
        assert!(!read(json!({ "flag": 0 })).flag);
        assert!(!read(json!({ "flag": "" })).flag);
    }

    #[test]
    fn request_fields_ignore_non_strings() {
        assert_eq!(read(json!({ "input": "pw" })).input.as_deref(), Some("pw"));
        assert!(read(json!({ "input": 1234 })).input.is_none());
        assert!(read(json!({ "input": { "a": 1 } })).input.is_none());
    }
}
