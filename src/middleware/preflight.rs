//! OPTIONS 요청 처리.
//!
//! `CorsLayer` 는 모든 OPTIONS 요청을 라우팅 전에 가로채 CORS 헤더와 빈 본문으로
//! 응답하지만 상태 코드는 200 입니다. 이 미들웨어를 그 바깥에 두어 204 로 바꿉니다.

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};

pub async fn preflight_no_content(req: Request, next: Next) -> Response {
    let is_preflight = req.method() == Method::OPTIONS;
    let mut response = next.run(req).await;
    if is_preflight {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
