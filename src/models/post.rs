//! # 게시글 모델 정의
//!
//! 게시글(Post)과 그 요청 본문, 검색 쿼리 파라미터를 정의합니다.
//!
//! ## 구조체 역할
//! - `Post`: 저장소가 돌려주는 완전한 게시글 (id, 타임스탬프, 태그 포함)
//! - `PostInput`: 생성/수정 요청 본문 — 제목, 본문, 카테고리, 태그 목록
//! - `SearchQuery`: `GET /posts?term=...`의 쿼리 파라미터

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 게시글 엔티티 — `posts` 테이블 한 행 + 연결된 태그 이름들
///
/// JSON 필드 이름은 camelCase입니다 (`createdAt`, `updatedAt`).
/// `tags`는 테이블 컬럼이 아니므로 `#[sqlx(skip)]`으로 FromRow 매핑에서 제외하고,
/// 저장소가 post_tags JOIN 결과로 따로 채웁니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    /// 항상 사전순 정렬, 태그가 없으면 빈 배열 (null 아님)
    #[sqlx(skip)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 게시글 생성/수정 요청 — `POST /posts`, `PUT /posts/{id}`의 요청 본문
///
/// `tags`가 빠지면 빈 목록으로 처리합니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PostInput {
    /// 필수 필드(title, content, category)가 공백뿐인지 검사합니다.
    ///
    /// HTTP 계층에서만 호출합니다. 저장소는 검증된 입력을 받는다고 가정합니다.
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("title", &self.title),
            ("content", &self.content),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::InvalidInput(format!("{field} is required")));
            }
        }
        Ok(())
    }

    /// 저장할 태그 집합을 정규화합니다.
    ///
    /// 1. 앞뒤 공백 제거
    /// 2. 빈 이름 제거
    /// 3. 중복 제거 (대소문자 구분, 정확히 같은 이름만)
    ///
    /// BTreeSet을 거치므로 결과는 사전순입니다.
    pub fn normalized_tags(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// `GET /posts?term=키워드`의 쿼리 파라미터
///
/// `term`이 없으면 전체 목록을 반환합니다.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub term: Option<String>,
}
