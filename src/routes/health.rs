//! # 헬스체크(Health Check) 핸들러
//!
//! - `GET /health` → `{ "status": "ok", "database": "ok" }`
//!
//! 데이터베이스에 `SELECT 1`을 보내 연결 풀이 살아 있는지도 함께 확인합니다.
//! DB가 응답하지 않으면 503과 `"database": "unavailable"`을 반환합니다.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::routes::AppState;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match sqlx::query("SELECT 1").execute(state.posts.pool()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok" })),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the database");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "unavailable" })),
            )
        }
    }
}
