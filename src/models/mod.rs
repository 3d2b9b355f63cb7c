//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `post`: 게시글(Post)과 요청 본문, 검색 파라미터
//!
//! `pub use post::*;`로 `crate::models::Post`처럼 짧게 접근할 수 있습니다.

pub mod post;

pub use post::*;
