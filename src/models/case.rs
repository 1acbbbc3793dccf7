use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// 사례 작성자 기본값
pub const DEFAULT_CASE_AUTHOR: &str = "관리자";

fn default_case_author() -> String {
    DEFAULT_CASE_AUTHOR.to_string()
}

fn case_author<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient::optional_text(deserializer)?.unwrap_or_else(default_case_author))
}

/// 사례: `cases.json` 배열의 원소 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub category_value: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub category_label: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub body: String,
    #[serde(default = "default_case_author", deserialize_with = "case_author")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub views: u64,
    /// ISO-8601 (`2026-10-19T09:30:00.000Z`), 생성 후 변경되지 않음
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: String,
    /// 시드 데이터 구분용. API 로 만든 사례는 항상 false
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_default: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `POST /api/cases` 요청 본문
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    #[serde(default, deserialize_with = "lenient::string_only")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_only")]
    pub category_value: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_only")]
    pub category_label: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_only")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_only")]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_only")]
    pub author: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let case: Case = serde_json::from_value(json!({ "id": "case-1", "title": "t" })).unwrap();
        assert_eq!(case.author, DEFAULT_CASE_AUTHOR);
        assert_eq!(case.views, 0);
        assert!(!case.is_default);
        assert_eq!(case.created_at, "");
        assert!(case.category_value.is_none());
    }

    #[test]
    fn unknown_fields_survive_a_rewrite() {
        let stored = json!({
            "id": "seed-1",
            "title": "마을 공동체 사례",
            "body": "본문",
            "views": 12,
            "createdAt": "2024-03-01T00:00:00.000Z",
            "isDefault": true,
            "thumbnail": "/img/seed-1.jpg"
        });
        let case: Case = serde_json::from_value(stored).unwrap();
        assert_eq!(case.extra.get("thumbnail"), Some(&json!("/img/seed-1.jpg")));

        let written = serde_json::to_value(&case).unwrap();
        assert_eq!(written["thumbnail"], "/img/seed-1.jpg");
        assert_eq!(written["isDefault"], true);
        assert_eq!(written["categoryValue"], Value::Null);
    }

    #[test]
    fn mistyped_fields_are_read_leniently() {
        let case: Case = serde_json::from_value(json!({
            "id": 42,
            "title": "t",
            "views": "12",
            "author": null,
            "isDefault": 1
        }))
        .unwrap();
        assert_eq!(case.id, "42");
        assert_eq!(case.views, 12);
        assert_eq!(case.author, DEFAULT_CASE_AUTHOR);
        assert!(case.is_default);

        let negative: Case = serde_json::from_value(json!({ "id": "c", "views": -3 })).unwrap();
        assert_eq!(negative.views, 0);
    }

    #[test]
    fn non_string_request_fields_count_as_missing() {
        let req: CreateCaseRequest =
            serde_json::from_value(json!({ "title": 5, "body": "B", "author": 7, "id": 9 })).unwrap();
        assert!(req.title.is_none());
        assert!(req.author.is_none());
        assert!(req.id.is_none());
        assert_eq!(req.body.as_deref(), Some("B"));
    }
}
