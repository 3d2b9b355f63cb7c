//! # 게시글(Post) 라우트 핸들러
//!
//! 게시글 CRUD와 검색 요청을 `PostRepository`로 넘기고,
//! 결과를 JSON 응답으로 돌려주는 얇은 계층입니다.
//!
//! ## 엔드포인트
//! - `POST   /posts`              → 새 게시글 생성 (201)
//! - `GET    /posts`              → 전체 목록
//! - `GET    /posts?term=키워드`   → 제목/본문/카테고리/태그 검색
//! - `GET    /posts/{id}`         → 단일 게시글 조회
//! - `PUT    /posts/{id}`         → 게시글 전체 수정 (태그 집합 교체)
//! - `DELETE /posts/{id}`         → 게시글 삭제 (204)
//!
//! ## 입력 오류 처리
//! Axum의 기본 거부(rejection) 응답 대신 추출 결과를 `Result`로 받아
//! 잘못된 JSON 본문, 쿼리 문자열, 정수가 아닌 id를 `AppError::InvalidInput`(400)으로 바꿉니다.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::{
    error::AppError,
    models::{Post, PostInput, SearchQuery},
    routes::AppState,
};

/// `GET /posts` — 전체 목록, 또는 `term`이 있으면 검색 결과
///
/// 빈 `term`(`?term=`)은 전체 목록과 같습니다.
pub async fn list_posts(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Post>>, AppError> {
    let Query(query) = query.map_err(invalid_query)?;
    let posts = match query.term {
        Some(term) => state.posts.search(&term).await?,
        None => state.posts.list().await?,
    };
    Ok(Json(posts))
}

/// `GET /posts/{id}` — 단일 게시글 조회
pub async fn get_post(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Post>, AppError> {
    let Path(id) = id.map_err(invalid_id)?;
    let post = state.posts.get(id).await?;
    Ok(Json(post))
}

/// `POST /posts` — 새 게시글 생성
///
/// id와 타임스탬프는 저장소가 정하므로 요청 본문에 있어도 무시됩니다.
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<PostInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let Json(input) = payload.map_err(invalid_json)?;
    input.validate()?;

    let post = state.posts.create(&input).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// `PUT /posts/{id}` — 게시글 수정
pub async fn update_post(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PostInput>, JsonRejection>,
) -> Result<Json<Post>, AppError> {
    let Path(id) = id.map_err(invalid_id)?;
    let Json(input) = payload.map_err(invalid_json)?;
    input.validate()?;

    let post = state.posts.update(id, &input).await?;
    Ok(Json(post))
}

/// `DELETE /posts/{id}` — 게시글 삭제, 성공 시 본문 없이 204
pub async fn delete_post(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id.map_err(invalid_id)?;
    state.posts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn invalid_json(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection, "Rejected request body");
    AppError::InvalidInput("invalid JSON request data".to_string())
}

fn invalid_id(rejection: PathRejection) -> AppError {
    tracing::debug!(error = %rejection, "Rejected post id");
    AppError::InvalidInput("post id must be an integer".to_string())
}

fn invalid_query(rejection: QueryRejection) -> AppError {
    tracing::debug!(error = %rejection, "Rejected query string");
    AppError::InvalidInput("invalid query string".to_string())
}
