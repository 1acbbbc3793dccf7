//! # KMCA API 서버 진입점
//!
//! 이 파일이 하는 일:
//! 1. `.env` 로딩 (이미 설정된 환경변수는 그대로 둠)
//! 2. 로깅(tracing) 초기화
//! 3. 설정 읽기
//! 4. 데이터 디렉토리 준비
//! 5. 라우터 구성 후 HTTP 서버 시작
//!
//! 라우터와 핸들러는 모두 라이브러리 쪽(`kmca_server`)에 있습니다.

use anyhow::Result;
use axum::{extract::Request, ServiceExt};
use kmca_server::{AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 가 없어도 괜찮습니다. `.ok()` 로 에러를 버립니다.
    dotenvy::dotenv().ok();

    // RUST_LOG 가 없으면 이 크레이트와 HTTP 계층을 debug 로 찍습니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kmca_server=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    if config.admin_secret.is_none() {
        // 서버는 뜨지만 사례 등록/삭제/조회수 증가는 모두 500 으로 거부됩니다.
        tracing::warn!("KMCA_API_SECRET is not set; admin case routes will respond with 500");
    }

    // 데이터 파일 자체는 첫 요청 때 만들어지지만, 디렉토리 권한 문제는 시작 시점에 드러나게 합니다.
    tokio::fs::create_dir_all(&config.data_dir).await?;
    tracing::info!("Data directory: {}", config.data_dir.display());

    let addr = format!("{}:{}", config.host, config.port);
    let app = kmca_server::app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("[kmca] API server listening on http://{}", addr);

    // NormalizePath 로 감싼 서비스는 Router 가 아니므로 make service 로 바꿔서 넘깁니다.
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
