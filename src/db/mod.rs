//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 코드를 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)는 `PostRepository`를 통해서만 DB에 접근합니다.
//!
//! 각 하위 모듈:
//! - `posts`: 게시글 저장소 — 트랜잭션 단위의 CRUD와 검색
//! - `tags`: 태그 resolve-or-create 및 게시글-태그 관계 쿼리
//!
//! 이 파일에는 연결 풀 생성과 스키마 부트스트랩(마이그레이션)이 있습니다.

pub mod posts;
pub mod tags;

pub use posts::PostRepository;

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

/// SQLite 연결 풀을 만들고 마이그레이션을 적용합니다.
///
/// - 파일이 없으면 생성하고(`create_if_missing`), 상위 디렉토리도 만듭니다.
/// - WAL 저널 모드: 읽기와 쓰기가 서로를 막지 않습니다.
/// - `foreign_keys`: `post_tags`의 `ON DELETE CASCADE`가 동작하려면 연결마다 켜져 있어야 합니다.
/// - `busy_timeout`: 다른 연결이 쓰기 잠금을 잡고 있을 때 바로 실패하지 않고 기다립니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid DATABASE_URL {database_url:?}"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    // "sqlite:data/blog.db" → data/ 디렉토리가 없으면 만듭니다 (mkdir -p)
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
            tracing::info!("Created database directory: {}", parent.display());
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .context("failed to open SQLite database")?;

    migrate(&pool).await?;
    Ok(pool)
}

/// `./migrations`의 SQL 파일들을 아직 적용되지 않은 것만 순서대로 실행합니다.
///
/// `sqlx::migrate!`는 컴파일 타임에 마이그레이션 파일을 바이너리에 포함시키므로
/// 배포 시 migrations 폴더를 따로 복사할 필요가 없습니다.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("failed to apply migrations")?;
    Ok(())
}

/// 테스트용 인메모리 DB 풀
///
/// `sqlite::memory:`는 연결마다 별도의 DB가 생기므로 연결을 하나로 고정하고,
/// 유휴 타임아웃으로 연결이 닫혀 데이터가 사라지지 않게 합니다.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();

    migrate(&pool).await.unwrap();
    pool
}
