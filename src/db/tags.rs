//! # 태그 데이터베이스 쿼리 모듈
//!
//! 태그 조회/생성과 게시글-태그 관계를 관리하는 SQL 쿼리 함수들입니다.
//! 게시글 저장소(`posts`)가 열어 둔 트랜잭션 안에서 호출되도록
//! `SqlitePool` 대신 `&mut SqliteConnection`을 받습니다.
//! (`&mut *tx`로 Transaction에서 연결을 빌려올 수 있습니다)
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, name UNIQUE)
//! - `post_tags`: 게시글과 태그의 다대다(N:M) 관계 테이블, PK = (post_id, tag_id)
//!
//! ```sql
//! tags ←── post_tags ──→ posts
//!  (1)       (N:M)        (1)
//! ```

use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

/// 한 번의 IN (...) 쿼리에 바인딩할 최대 id 개수
const ID_CHUNK: usize = 500;

/// 태그 이름으로 id를 찾고, 없으면 새로 만들어 id를 반환합니다 (resolve-or-create).
///
/// `INSERT OR IGNORE`: 같은 이름이 이미 있으면 UNIQUE 충돌을 무시하고 넘어갑니다.
/// 이어지는 SELECT는 같은 트랜잭션 안에서 실행되므로
/// 같은 이름으로 여러 번 호출해도 항상 같은 행을 가리킵니다.
/// 이름 비교는 대소문자를 구분합니다 ("Rust" ≠ "rust").
pub async fn resolve_tag(conn: &mut SqliteConnection, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO tags (name) VALUES (?)")
        .bind(name)
        .execute(&mut *conn)
        .await?;

    sqlx::query_scalar("SELECT id FROM tags WHERE name = ?")
        .bind(name)
        .fetch_one(&mut *conn)
        .await
}

/// 게시글에 태그들을 연결합니다.
///
/// 호출 전에 `PostInput::normalized_tags`로 중복을 제거하지만,
/// 링크 INSERT도 `INSERT OR IGNORE`이므로 같은 (post_id, tag_id)가
/// 두 번 들어오더라도 행은 하나만 남습니다.
pub async fn link_tags(
    conn: &mut SqliteConnection,
    post_id: i64,
    names: &[String],
) -> Result<(), sqlx::Error> {
    for name in names {
        let tag_id = resolve_tag(conn, name).await?;
        sqlx::query("INSERT OR IGNORE INTO post_tags (post_id, tag_id) VALUES (?, ?)")
            .bind(post_id)
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// 게시글의 태그 연결을 모두 끊습니다. 태그 행 자체는 남겨 둡니다.
pub async fn unlink_all_tags(
    conn: &mut SqliteConnection,
    post_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM post_tags WHERE post_id = ?")
        .bind(post_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// 어떤 게시글에도 연결되지 않은 태그 행을 삭제합니다.
///
/// 게시글 수정/삭제와 같은 트랜잭션 안에서 호출하여
/// tags 테이블에 고아(orphan) 행이 남지 않게 합니다.
pub async fn prune_orphan_tags(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM tags
        WHERE NOT EXISTS (SELECT 1 FROM post_tags pt WHERE pt.tag_id = tags.id)
        "#,
    )
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// 게시글 하나의 태그 이름을 사전순으로 조회합니다.
pub async fn tags_for_post(
    conn: &mut SqliteConnection,
    post_id: i64,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT t.name
        FROM tags t
        JOIN post_tags pt ON pt.tag_id = t.id
        WHERE pt.post_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(post_id)
    .fetch_all(conn)
    .await
}

/// 여러 게시글의 태그를 한 번에 조회하여 `post_id → [태그 이름]` 맵으로 돌려줍니다.
///
/// 게시글마다 쿼리를 보내는 N+1 문제를 피하기 위해 `QueryBuilder`로
/// `WHERE pt.post_id IN (?, ?, ...)`를 동적으로 구성합니다.
/// SQLite의 바인딩 변수 개수 제한을 넘지 않도록 `ID_CHUNK` 단위로 나눠 실행합니다.
/// 태그가 없는 게시글은 맵에 키가 없습니다.
pub async fn tags_for_posts(
    conn: &mut SqliteConnection,
    post_ids: &[i64],
) -> Result<HashMap<i64, Vec<String>>, sqlx::Error> {
    let mut tags: HashMap<i64, Vec<String>> = HashMap::new();

    for chunk in post_ids.chunks(ID_CHUNK) {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT pt.post_id, t.name FROM post_tags pt JOIN tags t ON t.id = pt.tag_id WHERE pt.post_id IN (",
        );
        let mut ids = builder.separated(", ");
        for id in chunk {
            ids.push_bind(*id);
        }
        ids.push_unseparated(") ORDER BY pt.post_id, t.name");

        let rows: Vec<(i64, String)> = builder.build_query_as().fetch_all(&mut *conn).await?;
        for (post_id, name) in rows {
            tags.entry(post_id).or_default().push(name);
        }
    }

    Ok(tags)
}

/// 전체 태그 이름을 사전순으로 조회합니다.
pub async fn list_tag_names(conn: &mut SqliteConnection) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT name FROM tags ORDER BY name")
        .fetch_all(conn)
        .await
}
