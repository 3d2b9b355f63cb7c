//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (기본값: `sqlite:data/blog.db`)
//! - `HOST`: 서버 바인딩 주소 (기본값: `0.0.0.0`)
//! - `PORT`: 서버 포트 번호 (기본값: `8080`)
//! - `DB_MAX_CONNECTIONS`: 연결 풀 최대 연결 수 (기본값: `5`)
//! - `QUERY_TIMEOUT_SECS`: 저장소 작업 하나의 제한 시간(초) (기본값: `5`)

use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/blog.db")
    pub database_url: String,
    /// 서버가 바인딩할 호스트 주소
    pub host: String,
    /// 서버 포트 번호
    pub port: u16,
    /// 연결 풀이 유지할 최대 연결 수
    pub max_connections: u32,
    /// 저장소 작업 하나(트랜잭션 포함)에 허용되는 최대 시간
    pub query_timeout: Duration,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 모든 항목에 기본값이 있으므로 환경변수가 없어도 동작합니다.
    /// 숫자 항목에 숫자가 아닌 값이 들어 있으면 기본값 대신 에러를 반환합니다.
    /// `QUERY_TIMEOUT_SECS=0`도 에러입니다.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:data/blog.db".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 8080)?,
            max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            query_timeout: parse_timeout("QUERY_TIMEOUT_SECS", 5)?,
        })
    }
}

/// 환경변수를 `T`로 파싱합니다. 변수가 없으면 `default`를 사용합니다.
fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        Err(_) => Ok(default),
    }
}

/// 초 단위 시간 제한을 읽습니다. 0은 거부합니다.
fn parse_timeout(key: &str, default_secs: u64) -> Result<Duration> {
    let secs: u64 = parse_var(key, default_secs)?;
    if secs == 0 {
        bail!("{key} must be at least 1 second");
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_falls_back_to_default_when_unset() {
        let value: u16 = parse_var("BLOGPOST_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn parse_var_rejects_garbage() {
        env::set_var("BLOGPOST_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_var("BLOGPOST_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
        env::remove_var("BLOGPOST_TEST_BAD_PORT");
    }

    #[test]
    fn parse_var_trims_whitespace() {
        env::set_var("BLOGPOST_TEST_TIMEOUT", " 12 ");
        let value: u64 = parse_var("BLOGPOST_TEST_TIMEOUT", 5).unwrap();
        assert_eq!(value, 12);
        env::remove_var("BLOGPOST_TEST_TIMEOUT");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        env::set_var("BLOGPOST_TEST_ZERO_TIMEOUT", "0");
        let result = parse_timeout("BLOGPOST_TEST_ZERO_TIMEOUT", 5);
        env::remove_var("BLOGPOST_TEST_ZERO_TIMEOUT");
        assert!(result.is_err());

        let timeout = parse_timeout("BLOGPOST_TEST_UNSET_TIMEOUT", 5).unwrap();
        assert_eq!(timeout, Duration::from_secs(5));
    }
}
