//! # 라우트 모듈
//!
//! `api_routes()` 가 `/api` 아래의 라우트 표입니다. 하위 리소스 경로
//! (`/views`, `/view`, `/replies`) 는 일반 경로보다 먼저 적어 둡니다.
//! 같은 깊이에서 경로 패턴이 겹치지 않으므로 매칭 결과는 하나로 정해집니다.
//!
//! 표에 없는 경로, 그리고 있는 경로라도 메서드가 다른 요청은 모두
//! 404 `{ "success": false, "error": "지원하지 않는 경로입니다." }` 입니다.
//!
//! 각 하위 모듈:
//! - `cases`: 사례 핸들러
//! - `contact`: 문의 게시판 핸들러

pub mod cases;
pub mod contact;

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::{
    config::Config,
    error::unsupported_route,
    models::{Case, ContactEntry},
    store::JsonFile,
};

/// 모든 핸들러가 공유하는 상태
///
/// 설정은 시작할 때 한 번 만들어 `Arc` 로 공유하고, 저장소는 경로만 들고 있어
/// clone 비용이 작습니다.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cases: JsonFile<Case>,
    pub contacts: JsonFile<ContactEntry>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let cases = JsonFile::new(config.cases_file(), "cases");
        let contacts = JsonFile::new(config.contact_file(), "contact");
        Self {
            config: Arc::new(config),
            cases,
            contacts,
        }
    }
}

/// `/api` 아래에 중첩되는 라우트 표
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contact/entries",
            get(contact::list_entries).post(contact::create_entry),
        )
        .route("/contact/entries/{id}/view", post(contact::view_entry))
        .route("/contact/entries/{id}/replies", post(contact::add_reply))
        .route("/contact/entries/{id}", delete(contact::delete_entry))
        .route("/cases", get(cases::list_cases).post(cases::create_case))
        .route("/cases/{id}/views", patch(cases::increment_views))
        .route("/cases/{id}", get(cases::get_case).delete(cases::delete_case))
        .method_not_allowed_fallback(unsupported_route)
        .fallback(unsupported_route)
}
