//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 서버 시작 시 환경변수(.env 포함)에서 한 번 읽어 만든 뒤,
//! `AppState` 안에 담겨 모든 핸들러에 전달됩니다. 전역 가변 상태는 없습니다.
//!
//! 설정 항목:
//! - `HOST`: 서버 바인딩 주소 (기본값 `0.0.0.0`)
//! - `PORT`: 서버 포트 (기본값 `5174`)
//! - `DATA_DIR`: `cases.json` / `contact.json` 이 놓이는 디렉토리 (기본값 `data`)
//! - `KMCA_API_SECRET`: 사례 등록/삭제/조회수 증가에 필요한 관리자 비밀키
//! - `STATIC_DIR`: 지정하면 API 이외의 경로에 이 디렉토리의 정적 파일을 서빙

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 5174;

/// 서버 전체 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 바인딩 호스트
    pub host: String,
    /// 바인딩 포트
    pub port: u16,
    /// JSON 데이터 파일 디렉토리
    pub data_dir: PathBuf,
    /// 관리자 비밀키. `None` 이면 사례 변경 요청은 모두 500으로 거부됩니다.
    pub admin_secret: Option<String>,
    /// 사이트 정적 파일 루트 (선택)
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// 환경변수에서 설정을 읽습니다.
    ///
    /// 필수 항목이 없으므로 실패하지 않습니다. 포트 값이 숫자가 아니면
    /// 기본 포트를 사용하고, 빈 문자열인 비밀키는 "설정 안 됨"으로 취급합니다.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            admin_secret: non_empty(env::var("KMCA_API_SECRET").ok()),
            static_dir: non_empty(env::var("STATIC_DIR").ok()).map(PathBuf::from),
        }
    }

    /// 사례 데이터 파일 경로 (`<DATA_DIR>/cases.json`)
    pub fn cases_file(&self) -> PathBuf {
        self.data_dir.join("cases.json")
    }

    /// 문의 데이터 파일 경로 (`<DATA_DIR>/contact.json`)
    pub fn contact_file(&self) -> PathBuf {
        self.data_dir.join("contact.json")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
