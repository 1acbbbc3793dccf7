//! # 문의 글 모델
//!
//! 저장용 `ContactEntry` 와, 응답에 쓰는 두 가지 투영(projection)을 정의합니다.
//!
//! | 투영 | 포함 | 제외 |
//! |------|------|------|
//! | `ContactSummary` (목록) | 메타데이터, `hasReplies`, `replyCount` | `body`, `replies`, `passwordHash`, `passwordHint` |
//! | `ContactDetail` (비밀번호 확인 후) | 요약 + `body`, `replies` | `passwordHash`, `passwordHint` |
//!
//! 투영은 원본을 빌려(`&'a`) 직렬화만 하므로 복사가 없습니다.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// 문의 작성자 기본값
pub const DEFAULT_CONTACT_AUTHOR: &str = "익명";
/// 답변 작성자 기본값
pub const DEFAULT_REPLY_AUTHOR: &str = "관리자";

fn default_contact_author() -> String {
    DEFAULT_CONTACT_AUTHOR.to_string()
}

fn default_reply_author() -> String {
    DEFAULT_REPLY_AUTHOR.to_string()
}

fn contact_author<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient::optional_text(deserializer)?.unwrap_or_else(default_contact_author))
}

fn reply_author<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient::optional_text(deserializer)?.unwrap_or_else(default_reply_author))
}

/// 문의 글: `contact.json` 배열의 원소 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactEntry {
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
    #[serde(default = "default_contact_author", deserialize_with = "contact_author")]
    pub author_name: String,
    /// 비밀번호의 SHA-256 hex. 평문은 어디에도 저장하지 않습니다.
    #[serde(default, deserialize_with = "lenient::text")]
    pub password_hash: String,
    /// 예전 시드 데이터에만 있는 필드. 저장은 하지만 응답에는 절대 싣지 않습니다.
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub password_hint: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: String,
    /// 추가 순서가 유지되는 답변 목록 (append-only)
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub replies: Vec<Reply>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 문의 글에 달린 답변
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default = "default_reply_author", deserialize_with = "reply_author")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub body: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 목록용 공개 투영
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary<'a> {
    pub id: &'a str,
    pub category_value: Option<&'a str>,
    pub category_label: Option<&'a str>,
    pub title: &'a str,
    pub author_name: &'a str,
    pub created_at: &'a str,
    #[serde(flatten)]
    pub extra: &'a Map<String, Value>,
    pub has_replies: bool,
    pub reply_count: usize,
}

/// 비밀번호 확인 후 돌려주는 전체 투영
#[derive(Debug, Serialize)]
pub struct ContactDetail<'a> {
    #[serde(flatten)]
    pub summary: ContactSummary<'a>,
    pub body: &'a str,
    pub replies: &'a [Reply],
}

impl ContactEntry {
    pub fn summary(&self) -> ContactSummary<'_> {
        ContactSummary {
            id: &self.id,
            category_value: self.category_value.as_deref(),
            category_label: self.category_label.as_deref(),
            title: &self.title,
            author_name: &self.author_name,
            created_at: &self.created_at,
            extra: &self.extra,
            has_replies: !self.replies.is_empty(),
            reply_count: self.replies.len(),
        }
    }

    pub fn detail(&self) -> ContactDetail<'_> {
        ContactDetail {
            summary: self.summary(),
            body: &self.body,
            replies: &self.replies,
        }
    }
}

/// `POST /api/contact/entries` 요청 본문
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
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
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_only")]
    pub password: Option<String>,
}

/// 비밀번호만 담는 요청 본문 (`/view`, `DELETE`)
#[derive(Debug, Default, Deserialize)]
pub struct PasswordRequest {
    #[serde(default, deserialize_with = "lenient::string_only")]
    pub password: Option<String>,
}

/// `POST /api/contact/entries/{id}/replies` 요청 본문
#[derive(Debug, Default, Deserialize)]
pub struct CreateReplyRequest {
    #[serde(default, deserialize_with = "lenient::string_only")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_only")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_only")]
    pub body: Option<String>,
}
