//! # 게시글 저장소 (Post Repository)
//!
//! `posts`, `tags`, `post_tags` 세 테이블에 걸친 게시글 CRUD와 검색을 담당합니다.
//! 여러 테이블을 건드리는 쓰기(생성, 수정, 삭제)는 모두 하나의 트랜잭션 안에서
//! 실행되어, 중간에 실패하면 그 작업의 어떤 행도 남지 않습니다.
//!
//! ## 트랜잭션과 자원 해제
//! `pool.begin()`이 돌려주는 `Transaction`은 스코프를 벗어날 때
//! `commit()`이 호출되지 않았다면 자동으로 ROLLBACK하고 연결을 풀에 반환합니다.
//! 그래서 `?`로 조기 반환하는 모든 경로, 패닉, 시간 초과로 future가
//! drop되는 경우까지 별도의 정리 코드 없이 롤백됩니다.
//!
//! ## 시간 제한
//! 모든 공개 메서드는 `PostRepository::timeout` 안에 끝나야 합니다.
//! 시간이 넘으면 진행 중인 future를 drop하고(= 롤백) `AppError::Internal`을 반환합니다.

use std::future::Future;
use std::time::Duration;

use anyhow::anyhow;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use super::tags;
use crate::error::{is_title_conflict, AppError};
use crate::models::{Post, PostInput};

/// 게시글 저장소
///
/// 프로세스 시작 시 한 번 생성되어 `AppState`에 담겨 핸들러들과 공유됩니다.
/// `SqlitePool`은 내부적으로 Arc이므로 clone해도 같은 풀을 가리킵니다.
#[derive(Debug, Clone)]
pub struct PostRepository {
    pool: SqlitePool,
    timeout: Duration,
}

impl PostRepository {
    pub fn new(pool: SqlitePool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 새 게시글을 생성하고, 저장소가 부여한 id와 타임스탬프를 포함해 반환합니다.
    ///
    /// ## 처리 흐름 (하나의 트랜잭션)
    /// 1. `posts`에 행 삽입 (`created_at == updated_at == 지금`)
    /// 2. 정규화된 태그마다 resolve-or-create 후 `post_tags`에 연결
    /// 3. COMMIT
    ///
    /// ## 에러
    /// - 제목 중복: `AlreadyExists` (태그 행도 남지 않음)
    /// - 그 밖의 저장소 실패: `Internal`
    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: &PostInput) -> Result<Post, AppError> {
        self.bounded("create", self.create_post(input)).await
    }

    /// id로 게시글 하나를 태그와 함께 조회합니다.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Post, AppError> {
        self.bounded("get", self.get_post(id)).await
    }

    /// 게시글의 제목/본문/카테고리/태그를 덮어쓰고 갱신된 게시글을 반환합니다.
    ///
    /// `id`와 `created_at`은 바뀌지 않고, `updated_at`은 호출자가 아닌
    /// 저장소가 현재 시각으로 설정합니다.
    ///
    /// ## 처리 흐름 (하나의 트랜잭션)
    /// 1. `UPDATE posts` — 영향받은 행이 0이면 `NotFound`
    /// 2. 기존 태그 연결 전부 삭제
    /// 3. 새 태그 집합 연결
    /// 4. 더 이상 어떤 게시글에도 연결되지 않은 태그 삭제
    /// 5. 최종 상태를 다시 읽어 COMMIT
    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub async fn update(&self, id: i64, input: &PostInput) -> Result<Post, AppError> {
        self.bounded("update", self.update_post(id, input)).await
    }

    /// 게시글을 삭제합니다.
    ///
    /// `post_tags`의 `ON DELETE CASCADE`로 연결 행이 함께 지워지고,
    /// 고아가 된 태그도 같은 트랜잭션에서 정리합니다.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.bounded("delete", self.delete_post(id)).await
    }

    /// 모든 게시글을 id 오름차순으로 조회합니다. 게시글이 없으면 빈 목록입니다.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Post>, AppError> {
        self.bounded("list", self.list_posts()).await
    }

    /// 제목, 본문, 카테고리, 태그 이름 중 하나라도 `term`을 포함하는 게시글을 찾습니다.
    ///
    /// - 대소문자를 구분하지 않는 부분 문자열 비교 ("über"는 "Über Rust"와 일치)
    /// - `%`, `_`, `\` 같은 글자도 그대로 비교
    /// - 태그가 여러 개 일치해도 게시글은 한 번만, id 오름차순
    /// - 반환되는 태그는 일치한 태그만이 아니라 게시글의 전체 태그
    /// - 앞뒤 공백을 제거한 `term`이 비어 있으면 `list()`와 같은 결과
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<Post>, AppError> {
        let term = term.trim();
        if term.is_empty() {
            return self.list().await;
        }

        self.bounded("search", self.search_posts(term)).await
    }

    /// 하나 이상의 게시글에 연결된 태그 이름을 사전순으로 조회합니다.
    #[tracing::instrument(skip(self))]
    pub async fn list_tags(&self) -> Result<Vec<String>, AppError> {
        self.bounded("list_tags", self.list_tag_names()).await
    }

    async fn get_post(&self, id: i64) -> Result<Post, AppError> {
        // 읽기도 트랜잭션으로 묶어 게시글 행과 태그 목록이 같은 스냅샷에서 나오게 합니다.
        let mut tx = self.pool.begin().await?;
        let post = fetch_post(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(post)
    }

    async fn delete_post(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        let pruned = tags::prune_orphan_tags(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!(post_id = id, pruned_tags = pruned, "Deleted post");
        Ok(())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        let mut tx = self.pool.begin().await?;
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, category, created_at, updated_at
            FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let posts = attach_tags(&mut *tx, posts).await?;
        tx.commit().await?;
        Ok(posts)
    }

    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, AppError> {
        // SQLite LIKE는 ASCII만 대소문자를 접으므로 비교는 Rust의 유니코드 소문자 변환으로 합니다.
        let needle = term.to_lowercase();
        let mut posts = self.list_posts().await?;
        posts.retain(|post| matches_term(post, &needle));

        tracing::debug!(matches = posts.len(), "Search finished");
        Ok(posts)
    }

    async fn list_tag_names(&self) -> Result<Vec<String>, AppError> {
        let mut conn = self.pool.acquire().await?;
        Ok(tags::list_tag_names(&mut *conn).await?)
    }

    async fn create_post(&self, input: &PostInput) -> Result<Post, AppError> {
        let now = now();
        let tag_names = input.normalized_tags();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO posts (title, content, category, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.category)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|err| classify_title_write(err, &input.title))?;

        let id = result.last_insert_rowid();
        tags::link_tags(&mut *tx, id, &tag_names).await?;
        tx.commit().await?;

        tracing::info!(post_id = id, tags = tag_names.len(), "Created post");

        Ok(Post {
            id,
            title: input.title.clone(),
            content: input.content.clone(),
            category: input.category.clone(),
            tags: tag_names,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_post(&self, id: i64, input: &PostInput) -> Result<Post, AppError> {
        let now = now();
        let tag_names = input.normalized_tags();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = ?, content = ?, category = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.category)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|err| classify_title_write(err, &input.title))?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        tags::unlink_all_tags(&mut *tx, id).await?;
        tags::link_tags(&mut *tx, id, &tag_names).await?;
        let pruned = tags::prune_orphan_tags(&mut *tx).await?;

        let post = fetch_post(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::info!(
            post_id = id,
            tags = tag_names.len(),
            pruned_tags = pruned,
            "Updated post"
        );
        Ok(post)
    }

    /// `fut`를 저장소 시간 제한 안에서 실행합니다.
    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, timeout = ?self.timeout, "Repository call timed out");
                Err(AppError::Internal(anyhow!(
                    "{operation} timed out after {:?}",
                    self.timeout
                )))
            }
        }
    }
}

/// 게시글 행 하나와 태그를 같은 연결(트랜잭션)에서 읽습니다.
async fn fetch_post(conn: &mut SqliteConnection, id: i64) -> Result<Post, AppError> {
    let mut post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, content, category, created_at, updated_at
        FROM posts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| post_not_found(id))?;

    post.tags = tags::tags_for_post(conn, id).await?;
    Ok(post)
}

/// 조회한 게시글 목록에 태그를 한 번의 배치 쿼리로 채웁니다.
async fn attach_tags(
    conn: &mut SqliteConnection,
    mut posts: Vec<Post>,
) -> Result<Vec<Post>, AppError> {
    let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
    let mut by_post = tags::tags_for_posts(conn, &ids).await?;

    for post in &mut posts {
        post.tags = by_post.remove(&post.id).unwrap_or_default();
    }
    Ok(posts)
}

/// 제목을 쓰는 문장(INSERT/UPDATE)의 실패를 분류합니다.
fn classify_title_write(err: sqlx::Error, title: &str) -> AppError {
    if is_title_conflict(&err) {
        AppError::AlreadyExists(format!("the title '{title}' already exists"))
    } else {
        err.into()
    }
}

fn post_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("no post with id {id} found"))
}

/// 제목, 본문, 카테고리, 태그 이름 중 하나라도 `needle`(소문자)을 포함하는지 확인합니다.
fn matches_term(post: &Post, needle: &str) -> bool {
    [&post.title, &post.content, &post.category]
        .into_iter()
        .chain(post.tags.iter())
        .any(|field| field.to_lowercase().contains(needle))
}

/// 마이크로초 단위로 자른 현재 UTC 시각
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn input(title: &str, content: &str, tags: &[&str]) -> PostInput {
        PostInput {
            title: title.to_string(),
            content: content.to_string(),
            category: "general".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    async fn repo() -> PostRepository {
        PostRepository::new(test_pool().await, Duration::from_secs(5))
    }

    async fn count(repo: &PostRepository, sql: &str) -> i64 {
        sqlx::query_scalar(sql).fetch_one(repo.pool()).await.unwrap()
    }

    async fn link_count(repo: &PostRepository, post_id: i64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM post_tags WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(repo.pool())
            .await
            .unwrap()
    }

    /// 이름이 'boom'인 태그 INSERT를 거부하는 트리거 — 트랜잭션 중간 실패를 재현합니다.
    async fn reject_boom_tags(repo: &PostRepository) {
        sqlx::query(
            r#"
            CREATE TRIGGER reject_boom BEFORE INSERT ON tags
            WHEN NEW.name = 'boom'
            BEGIN
                SELECT RAISE(ABORT, 'boom rejected');
            END
            "#,
        )
        .execute(repo.pool())
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let repo = repo().await;

        let created = repo
            .create(&input("Go basics", "intro to go", &["lang", "go"]))
            .await
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.tags, vec!["go", "lang"]);

        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn post_without_tags_has_empty_tag_list() {
        let repo = repo().await;

        let created = repo.create(&input("Bare", "no tags", &[])).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap();
        assert!(fetched.tags.is_empty());
    }

    #[tokio::test]
    async fn duplicate_title_is_already_exists_and_persists_nothing() {
        let repo = repo().await;

        repo.create(&input("Same", "first", &["a"])).await.unwrap();
        let err = repo
            .create(&input("Same", "second", &["b", "c"]))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AlreadyExists(_)), "got {err:?}");
        assert_eq!(count(&repo, "SELECT COUNT(*) FROM posts").await, 1);
        assert_eq!(count(&repo, "SELECT COUNT(*) FROM tags").await, 1);
        assert_eq!(count(&repo, "SELECT COUNT(*) FROM post_tags").await, 1);
    }

    #[tokio::test]
    async fn failure_after_post_insert_rolls_back_everything() {
        let repo = repo().await;
        reject_boom_tags(&repo).await;

        let err = repo
            .create(&input("Doomed", "body", &["ok", "boom"]))
            .await
            .unwrap_err();

        // 트리거 위반은 제목 중복이 아니므로 Internal로 분류되어야 합니다.
        assert!(matches!(err, AppError::Internal(_)), "got {err:?}");
        assert_eq!(count(&repo, "SELECT COUNT(*) FROM posts").await, 0);
        assert_eq!(count(&repo, "SELECT COUNT(*) FROM tags").await, 0);
        assert_eq!(count(&repo, "SELECT COUNT(*) FROM post_tags").await, 0);
    }

    #[tokio::test]
    async fn duplicate_input_tags_create_one_link() {
        let repo = repo().await;

        let created = repo.create(&input("Dupes", "x", &["x", "x", " x "])).await.unwrap();
        assert_eq!(created.tags, vec!["x"]);
        assert_eq!(link_count(&repo, created.id).await, 1);
    }

    #[tokio::test]
    async fn tags_are_shared_between_posts() {
        let repo = repo().await;

        repo.create(&input("One", "1", &["rust"])).await.unwrap();
        repo.create(&input("Two", "2", &["rust", "Rust"])).await.unwrap();

        // "rust"는 재사용되고, 대소문자가 다른 "Rust"는 별개의 태그입니다.
        assert_eq!(count(&repo, "SELECT COUNT(*) FROM tags").await, 2);
        assert_eq!(repo.list_tags().await.unwrap(), vec!["Rust", "rust"]);
    }

    #[tokio::test]
    async fn update_replaces_tags_completely() {
        let repo = repo().await;

        let created = repo.create(&input("Tagged", "body", &["a", "b"])).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let updated = repo
            .update(created.id, &input("Tagged v2", "new body", &["b", "c"]))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Tagged v2");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.tags, vec!["b", "c"]);

        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(fetched, updated);
        assert_eq!(link_count(&repo, created.id).await, 2);

        let dangling: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM post_tags pt JOIN tags t ON t.id = pt.tag_id
            WHERE pt.post_id = ? AND t.name = 'a'
            "#,
        )
        .bind(created.id)
        .fetch_one(repo.pool())
        .await
        .unwrap();
        assert_eq!(dangling, 0);

        // 'a'는 어디에도 연결되지 않으므로 tags 테이블에서도 정리됩니다.
        assert_eq!(repo.list_tags().await.unwrap(), vec!["b", "c"]);
    }

    #[tokio::test]
    async fn update_keeps_tags_still_used_elsewhere() {
        let repo = repo().await;

        let first = repo.create(&input("First", "1", &["shared"])).await.unwrap();
        repo.create(&input("Second", "2", &["shared"])).await.unwrap();

        repo.update(first.id, &input("First", "1", &[])).await.unwrap();
        assert_eq!(repo.list_tags().await.unwrap(), vec!["shared"]);
    }

    #[tokio::test]
    async fn rename_to_existing_title_is_already_exists_and_rolls_back() {
        let repo = repo().await;

        repo.create(&input("Taken", "1", &[])).await.unwrap();
        let other = repo.create(&input("Mine", "2", &["keep"])).await.unwrap();

        let err = repo
            .update(other.id, &input("Taken", "changed", &["new"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)), "got {err:?}");

        let fetched = repo.get(other.id).await.unwrap();
        assert_eq!(fetched, other);
    }

    #[tokio::test]
    async fn failed_update_leaves_old_tags_in_place() {
        let repo = repo().await;
        let created = repo.create(&input("Stable", "body", &["a"])).await.unwrap();
        reject_boom_tags(&repo).await;

        let err = repo
            .update(created.id, &input("Stable v2", "body", &["boom"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)), "got {err:?}");

        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn delete_cascades_links() {
        let repo = repo().await;

        let created = repo.create(&input("Gone", "soon", &["x"])).await.unwrap();
        repo.delete(created.id).await.unwrap();

        assert!(matches!(repo.get(created.id).await, Err(AppError::NotFound(_))));
        assert_eq!(link_count(&repo, created.id).await, 0);
        assert_eq!(count(&repo, "SELECT COUNT(*) FROM tags").await, 0);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = repo().await;

        let first = repo.create(&input("A", "1", &[])).await.unwrap();
        repo.delete(first.id).await.unwrap();
        let second = repo.create(&input("B", "2", &[])).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn by_id_operations_report_not_found_and_mutate_nothing() {
        let repo = repo().await;
        let existing = repo.create(&input("Exists", "1", &["t"])).await.unwrap();
        let missing = existing.id + 100;

        assert!(matches!(repo.get(missing).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            repo.update(missing, &input("Other", "2", &["u"])).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(repo.delete(missing).await, Err(AppError::NotFound(_))));

        assert_eq!(repo.list().await.unwrap(), vec![existing]);
        assert_eq!(repo.list_tags().await.unwrap(), vec!["t"]);
    }

    #[tokio::test]
    async fn list_returns_posts_in_id_order() {
        let repo = repo().await;
        assert!(repo.list().await.unwrap().is_empty());

        let a = repo.create(&input("A", "1", &["z", "y"])).await.unwrap();
        let b = repo.create(&input("B", "2", &[])).await.unwrap();
        let c = repo.create(&input("C", "3", &["y"])).await.unwrap();

        let posts = repo.list().await.unwrap();
        assert_eq!(posts, vec![a, b, c]);
        assert_eq!(posts[0].tags, vec!["y", "z"]);
    }

    #[tokio::test]
    async fn search_matches_any_field_once() {
        let repo = repo().await;

        repo.create(&input("Go basics", "loops and slices", &[])).await.unwrap();
        let p2 = repo
            .create(&input("Intro", "mentions rust", &["rust"]))
            .await
            .unwrap();

        let found = repo.search("rust").await.unwrap();
        assert_eq!(found, vec![p2.clone()]);

        // 대소문자 무시
        assert_eq!(repo.search("RUST").await.unwrap(), vec![p2]);
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let repo = repo().await;

        let umlaut = repo.create(&input("Über Rust", "notes", &[])).await.unwrap();
        let cyrillic = repo
            .create(&input("Заметки", "body", &["Программирование"]))
            .await
            .unwrap();
        repo.create(&input("Plain", "ascii only", &[])).await.unwrap();

        assert_eq!(repo.search("über").await.unwrap(), vec![umlaut.clone()]);
        assert_eq!(repo.search("ÜBER").await.unwrap(), vec![umlaut]);
        assert_eq!(repo.search("программ").await.unwrap(), vec![cyrillic.clone()]);
        assert_eq!(repo.search("ЗАМЕТКИ").await.unwrap(), vec![cyrillic]);
    }

    #[tokio::test]
    async fn search_by_tag_returns_full_tag_set() {
        let repo = repo().await;

        let post = repo
            .create(&input("Weekly", "notes", &["async-rust", "rust-lang", "misc"]))
            .await
            .unwrap();

        let found = repo.search("rust").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].tags, vec!["async-rust", "misc", "rust-lang"]);
        assert_eq!(found[0], post);
    }

    #[tokio::test]
    async fn search_matches_category() {
        let repo = repo().await;

        let mut cooking = input("Pasta", "boil water", &[]);
        cooking.category = "Cooking".to_string();
        let cooking = repo.create(&cooking).await.unwrap();
        repo.create(&input("Other", "unrelated", &[])).await.unwrap();

        assert_eq!(repo.search("cook").await.unwrap(), vec![cooking]);
    }

    #[tokio::test]
    async fn blank_search_term_lists_everything() {
        let repo = repo().await;

        repo.create(&input("A", "1", &["x"])).await.unwrap();
        repo.create(&input("B", "2", &[])).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(repo.search("").await.unwrap(), all);
        assert_eq!(repo.search("   ").await.unwrap(), all);
    }

    #[tokio::test]
    async fn search_treats_wildcard_characters_literally() {
        let repo = repo().await;

        let percent = repo.create(&input("100% done", "finished", &[])).await.unwrap();
        repo.create(&input("Plain", "nothing special", &[])).await.unwrap();
        let underscore = repo.create(&input("snake", "my_var", &[])).await.unwrap();

        assert_eq!(repo.search("%").await.unwrap(), vec![percent]);
        assert_eq!(repo.search("_").await.unwrap(), vec![underscore]);
    }

    #[tokio::test]
    async fn calls_past_the_deadline_fail_as_internal() {
        let pool = test_pool().await;
        let repo = PostRepository::new(pool.clone(), Duration::from_millis(50));

        // 테스트 풀의 유일한 연결을 붙잡아 두면 저장소는 연결을 얻지 못하고 시간 초과됩니다.
        let held = pool.acquire().await.unwrap();
        let err = repo.list().await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)), "got {err:?}");
        drop(held);

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[test]
    fn matches_term_checks_every_field() {
        let post = Post {
            id: 1,
            title: "Title".to_string(),
            content: "Body".to_string(),
            category: "Σύνοψη".to_string(),
            tags: vec!["Ünicode".to_string()],
            created_at: now(),
            updated_at: now(),
        };

        assert!(matches_term(&post, "title"));
        assert!(matches_term(&post, "body"));
        assert!(matches_term(&post, "σύνοψη"));
        assert!(matches_term(&post, "ünic"));
        assert!(!matches_term(&post, "missing"));
    }
}
