//! # 문의 게시판 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | GET | /api/contact/entries | 없음 | 목록 (본문/답변/해시 제외, `hasReplies`/`replyCount` 추가) |
//! | POST | /api/contact/entries | 없음 | 문의 등록 (201) |
//! | POST | /api/contact/entries/{id}/view | 글 비밀번호 | 본문과 답변 포함 조회 |
//! | POST | /api/contact/entries/{id}/replies | 글 비밀번호 | 답변 추가 |
//! | DELETE | /api/contact/entries/{id} | 글 비밀번호 | 문의 삭제 |
//!
//! 비밀번호가 필요한 요청은 항상 입력 확인(400) → 글 존재(404) → 비밀번호(401) 순서로 검사합니다.
//!
//! 답변 추가에는 관리자 인증이 없습니다. 글 비밀번호를 아는 사람은 누구나 답변을 달 수 있습니다.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Map, Value};

use crate::{
    error::AppError,
    middleware::{
        auth::{check_entry_password, hash_password},
        json_body::JsonBody,
    },
    models::{
        ContactEntry, CreateContactRequest, CreateReplyRequest, PasswordRequest, Reply,
        DEFAULT_CONTACT_AUTHOR, DEFAULT_REPLY_AUTHOR,
    },
    routes::AppState,
    services::{generated_id, id_or_generated, now_timestamp, optional_text, text_or, trimmed},
    store,
};

const ENTRY_NOT_FOUND: &str = "문의 글을 찾을 수 없습니다.";
const ENTRY_FIELDS_REQUIRED: &str = "제목, 본문, 비밀번호는 필수 입력 항목입니다.";
const PASSWORD_REQUIRED: &str = "비밀번호를 입력해주세요.";
const REPLY_FIELDS_REQUIRED: &str = "비밀번호와 답변 내용을 모두 입력해주세요.";

fn entry_not_found() -> AppError {
    AppError::NotFound(ENTRY_NOT_FOUND.to_string())
}

/// `GET /api/contact/entries` → `{ "success": true, "entries": [요약...] }`
pub async fn list_entries(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let entries = store::list_contact_entries(&state.contacts).await?;
    let summaries: Vec<_> = entries.iter().map(ContactEntry::summary).collect();
    Ok(Json(json!({ "success": true, "entries": summaries })))
}

/// `POST /api/contact/entries`: 문의를 등록합니다.
///
/// 비밀번호는 trim 한 뒤 해시만 저장하고, 응답에는 본문과 빈 답변 목록을 포함합니다.
pub async fn create_entry(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateContactRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let title = trimmed(req.title.as_deref()).to_string();
    let body = trimmed(req.body.as_deref()).to_string();
    let password = trimmed(req.password.as_deref());
    if title.is_empty() || body.is_empty() || password.is_empty() {
        return Err(AppError::Validation(ENTRY_FIELDS_REQUIRED.to_string()));
    }

    let entry = ContactEntry {
        id: id_or_generated(req.id.clone(), "contact"),
        category_value: optional_text(req.category_value.as_deref()),
        category_label: optional_text(req.category_label.as_deref()),
        title,
        body,
        author_name: text_or(req.author_name.as_deref(), DEFAULT_CONTACT_AUTHOR),
        password_hash: hash_password(password),
        password_hint: None,
        created_at: now_timestamp(),
        replies: Vec::new(),
        extra: Map::new(),
    };

    let entry = store::insert_contact_entry(&state.contacts, entry).await?;
    tracing::info!(entry_id = %entry.id, "contact entry created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "entry": entry.detail() })),
    ))
}

/// `POST /api/contact/entries/{id}/view`: 비밀번호가 맞으면 본문과 답변까지 돌려줍니다.
pub async fn view_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<PasswordRequest>,
) -> Result<Json<Value>, AppError> {
    let password = trimmed(req.password.as_deref());
    if password.is_empty() {
        return Err(AppError::Validation(PASSWORD_REQUIRED.to_string()));
    }

    let entry = store::get_contact_entry(&state.contacts, &id)
        .await?
        .ok_or_else(entry_not_found)?;
    check_entry_password(&entry, password)?;

    Ok(Json(json!({ "success": true, "entry": entry.detail() })))
}

/// `POST /api/contact/entries/{id}/replies`: 답변을 덧붙이고 갱신된 글 전체를 돌려줍니다.
pub async fn add_reply(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<CreateReplyRequest>,
) -> Result<Json<Value>, AppError> {
    let password = trimmed(req.password.as_deref());
    let body = trimmed(req.body.as_deref());
    if password.is_empty() || body.is_empty() {
        return Err(AppError::Validation(REPLY_FIELDS_REQUIRED.to_string()));
    }

    let reply = Reply {
        id: generated_id("reply"),
        author: text_or(req.author.as_deref(), DEFAULT_REPLY_AUTHOR),
        body: body.to_string(),
        created_at: now_timestamp(),
        extra: Map::new(),
    };
    let reply_id = reply.id.clone();

    let entry = store::append_reply(&state.contacts, &id, reply, |entry| {
        check_entry_password(entry, password)
    })
    .await?
    .ok_or_else(entry_not_found)?;
    tracing::info!(entry_id = %entry.id, reply_id = %reply_id, "reply added");

    Ok(Json(json!({ "success": true, "entry": entry.detail() })))
}

/// `DELETE /api/contact/entries/{id}`: 본문에 `{ "password": "..." }` 가 필요합니다.
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<PasswordRequest>,
) -> Result<Json<Value>, AppError> {
    let password = trimmed(req.password.as_deref());
    if password.is_empty() {
        return Err(AppError::Validation(PASSWORD_REQUIRED.to_string()));
    }

    let deleted = store::delete_contact_entry(&state.contacts, &id, |entry| {
        check_entry_password(entry, password)
    })
    .await?;
    if !deleted {
        return Err(entry_not_found());
    }
    tracing::info!(entry_id = %id, "contact entry deleted");

    Ok(Json(json!({ "success": true })))
}
