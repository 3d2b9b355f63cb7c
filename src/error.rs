//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 저장소와 HTTP 계층이 공유하는 닫힌(closed) 에러 분류
//! - `is_title_conflict`: SQLite 제약조건 위반 중 "제목 중복"만 골라내는 판별 함수
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 저장소(`db`)의 모든 작업이 이 타입을 반환하고,
/// 라우트 핸들러는 `match`로 빠짐없이(exhaustive) 상태 코드에 대응시킵니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// id로 찾는 작업에서 해당 행이 없음 (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 게시글 제목의 유일성 제약 위반 (HTTP 400)
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// 호출자 측 입력 오류: 잘못된 JSON, 빈 필수 필드 등 (HTTP 400)
    /// 저장소는 이 variant를 만들지 않습니다.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 그 밖의 모든 실패: 연결 오류, 잘못된 SQL, 트랜잭션 실패, 시간 초과 (HTTP 500)
    /// 원인(anyhow::Error)은 로그용으로 보존하고 클라이언트에는 노출하지 않습니다.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

// sqlx 에러는 기본적으로 Internal로 분류합니다.
// 제목 중복처럼 의미 있는 제약 위반은 호출 지점에서 `is_title_conflict`로
// 먼저 걸러낸 뒤에만 AlreadyExists로 바꿉니다.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

/// `posts.title`의 UNIQUE 제약 위반인지 확인합니다.
///
/// SQLite는 제약 이름을 돌려주지 않으므로(`constraint()`가 None),
/// 에러 종류(unique violation)와 메시지의 컬럼 이름을 함께 검사합니다.
/// 메시지 형식: `UNIQUE constraint failed: posts.title`
///
/// 다른 UNIQUE 위반(예: 태그 이름)은 false를 반환하여 Internal로 남습니다.
pub fn is_title_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.message().contains("posts.title")
        }
        _ => false,
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러는 실제 원인을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::AlreadyExists(ref msg) => {
                (StatusCode::BAD_REQUEST, "already_exists", msg.clone())
            }
            AppError::InvalidInput(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_input", msg.clone())
            }
            AppError::Internal(ref err) => {
                // {:#}: anyhow의 원인 체인(cause chain)까지 한 줄로 출력
                tracing::error!(error = %format!("{err:#}"), "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        // 결과: { "error": { "code": "not_found", "message": "..." } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
