//! # KMCA 사이트 API 서버
//!
//! 사례(cases)와 문의(contact) 두 리소스를 JSON 파일에 저장하는 REST API 입니다.
//! `app()` 이 미들웨어까지 포함한 완성된 서비스를 만들고,
//! `main.rs` 는 설정을 읽어 이 서비스를 띄우기만 합니다.
//!
//! 요청 흐름:
//! ```text
//! 끝 슬래시 제거 → 로깅 → OPTIONS 204 → CORS → CORS 헤더 보충 → 패닉 변환 → 라우트 표 → 핸들러 → 저장소(JSON 파일)
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    Router,
};
use tower::Layer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

pub use config::Config;
pub use routes::AppState;

/// 완성된 HTTP 서비스를 만듭니다.
///
/// `STATIC_DIR` 이 설정되어 있으면 `/api` 이외의 경로는 정적 파일로,
/// 아니면 지원하지 않는 경로(404 JSON)로 처리합니다.
pub fn app(state: AppState) -> NormalizePath<Router> {
    let static_dir = state.config.static_dir.clone();
    let api = routes::api_routes().with_state(state);

    let router = match static_dir {
        Some(dir) => {
            tracing::info!("Serving static files from {}", dir.display());
            Router::new().nest("/api", api).fallback_service(ServeDir::new(dir))
        }
        None => Router::new()
            .nest("/api", api)
            .fallback(error::unsupported_route),
    };

    let router = router
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(cors_layer())
        .layer(axum::middleware::from_fn(
            middleware::preflight::preflight_no_content,
        ))
        .layer(TraceLayer::new_for_http());

    // 라우팅 전에 경로를 고쳐야 하므로 Router 바깥에 씌웁니다.
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// 일반 응답에도 싣는 CORS 허용 메서드/헤더 (프리플라이트는 `CorsLayer` 가 처리)
const ALLOWED_METHODS: &str = "GET,POST,DELETE,PATCH,OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, X-KMCA-Admin";

/// 모든 출처 허용. 메서드와 헤더는 API 가 실제로 쓰는 것만 알립니다.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(middleware::auth::ADMIN_HEADER),
        ])
}
