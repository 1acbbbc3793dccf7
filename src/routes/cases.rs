//! # 사례(Case) 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | GET | /api/cases | 없음 | 최신순 전체 목록 (본문 포함) |
//! | GET | /api/cases/{id} | 없음 | 단일 사례 |
//! | POST | /api/cases | 관리자 | 새 사례 등록 (201) |
//! | DELETE | /api/cases/{id} | 관리자 | 사례 삭제 |
//! | PATCH | /api/cases/{id}/views | 관리자 | 조회수 1 증가 |
//!
//! 관리자 인증은 `AdminAuth` 추출기가 본문을 읽기 전에 처리합니다.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Map, Value};

use crate::{
    error::AppError,
    middleware::{auth::AdminAuth, json_body::JsonBody},
    models::{Case, CreateCaseRequest, DEFAULT_CASE_AUTHOR},
    routes::AppState,
    services::{id_or_generated, now_timestamp, optional_text, text_or, trimmed},
    store,
};

const CASE_NOT_FOUND: &str = "사례를 찾을 수 없습니다.";
const NOTHING_TO_DELETE: &str = "삭제할 사례가 없습니다.";
const TITLE_AND_BODY_REQUIRED: &str = "제목과 본문은 필수 입력 항목입니다.";

/// `GET /api/cases` → `{ "success": true, "cases": [...] }`
pub async fn list_cases(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let cases = store::list_cases(&state.cases).await?;
    Ok(Json(json!({ "success": true, "cases": cases })))
}

/// `GET /api/cases/{id}` → `{ "success": true, "case": {...} }`
pub async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let case = store::get_case(&state.cases, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(CASE_NOT_FOUND.to_string()))?;
    Ok(Json(json!({ "success": true, "case": case })))
}

/// `POST /api/cases`: 새 사례를 등록합니다.
///
/// 제목과 본문은 trim 후 비어 있으면 안 됩니다. 분류 값/라벨은 비어 있으면 `null`,
/// 작성자는 비어 있으면 "관리자", ID를 주지 않으면 `case-<epoch millis>` 가 됩니다.
pub async fn create_case(
    State(state): State<AppState>,
    _admin: AdminAuth,
    JsonBody(req): JsonBody<CreateCaseRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let title = trimmed(req.title.as_deref()).to_string();
    let body = trimmed(req.body.as_deref()).to_string();
    if title.is_empty() || body.is_empty() {
        return Err(AppError::Validation(TITLE_AND_BODY_REQUIRED.to_string()));
    }

    let case = Case {
        id: id_or_generated(req.id, "case"),
        category_value: optional_text(req.category_value.as_deref()),
        category_label: optional_text(req.category_label.as_deref()),
        title,
        body,
        author: text_or(req.author.as_deref(), DEFAULT_CASE_AUTHOR),
        views: 0,
        created_at: now_timestamp(),
        is_default: false,
        extra: Map::new(),
    };

    let case = store::insert_case(&state.cases, case).await?;
    tracing::info!(case_id = %case.id, "case created");

    Ok((StatusCode::CREATED, Json(json!({ "success": true, "case": case }))))
}

/// `DELETE /api/cases/{id}` → `{ "success": true }`
///
/// 일치하는 사례가 없으면 404 이고 파일은 건드리지 않습니다.
pub async fn delete_case(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    if !store::delete_case(&state.cases, &id).await? {
        return Err(AppError::NotFound(NOTHING_TO_DELETE.to_string()));
    }
    tracing::info!(case_id = %id, "case deleted");
    Ok(Json(json!({ "success": true })))
}

/// `PATCH /api/cases/{id}/views` → 조회수가 1 늘어난 사례
pub async fn increment_views(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let case = store::increment_case_views(&state.cases, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(CASE_NOT_FOUND.to_string()))?;
    Ok(Json(json!({ "success": true, "case": case })))
}
