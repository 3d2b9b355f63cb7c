//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `posts`: 게시글 CRUD 및 검색 핸들러
//! - `tags`: 태그 목록 핸들러
//! - `health`: 서버 상태 확인 (헬스체크)

pub mod health;
pub mod posts;
pub mod tags;

pub use health::*;
pub use posts::*;
pub use tags::*;

use axum::{routing::get, Router};

use crate::db::PostRepository;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// Axum의 State 추출자는 요청마다 clone하므로 `Clone`이 필요합니다.
#[derive(Clone)]
pub struct AppState {
    /// 게시글 저장소 (내부의 SqlitePool은 Arc로 공유)
    pub posts: PostRepository,
}

/// 모든 API 라우트를 등록한 라우터를 만듭니다.
///
/// CORS, 요청 로깅 같은 미들웨어 레이어는 `main`에서 덧씌웁니다.
/// Axum 0.8부터 경로 파라미터는 `{id}` 문법을 사용합니다.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/tags", get(list_tags))
        .route("/health", get(health_check))
        .with_state(state)
}
