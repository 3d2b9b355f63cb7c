//! # 태그 API 라우트 핸들러
//!
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /tags | `list_tags` | 게시글에 쓰이고 있는 태그 이름 목록 (사전순) |
//!
//! 태그는 게시글을 통해서만 생성/삭제되므로 별도의 쓰기 엔드포인트는 없습니다.

use crate::{error::AppError, routes::AppState};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// `GET /tags` → `{ "tags": ["go", "rust"] }`
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let tags = state.posts.list_tags().await?;
    Ok(Json(json!({ "tags": tags })))
}
