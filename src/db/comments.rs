//! # 댓글 데이터베이스 쿼리 모듈
//!
//! `comments` 테이블은 평평한 레코드만 저장합니다.
//! 답글 트리는 `parent_id` 역참조로만 표현되고, 중첩 구조는
//! 서비스 계층(`services::comments`)이 메모리에서 조립합니다.

use crate::error::AppError;
use crate::models::Comment;
use sqlx::{SqliteConnection, SqliteExecutor};

pub async fn insert_comment<'e, E>(executor: E, comment: &Comment) -> Result<(), AppError>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO comments (id, version_id, parent_id, author_id, content, position, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&comment.id)
    .bind(&comment.version_id)
    .bind(&comment.parent_id)
    .bind(&comment.author_id)
    .bind(&comment.content)
    .bind(&comment.position)
    .bind(&comment.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn get_comment<'e, E>(executor: E, id: &str) -> Result<Option<Comment>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, version_id, parent_id, author_id, content, position, created_at
        FROM comments
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(comment)
}

/// 한 버전의 모든 댓글을 작성 시각 오름차순으로 조회합니다.
///
/// 같은 시각이면 삽입 순서(rowid)로 정렬합니다. ID 순서는 쓰지 않습니다.
/// 한 번의 쿼리로 읽으므로 결과는 하나의 일관된 스냅샷입니다.
pub async fn list_comments_for_version<'e, E>(
    executor: E,
    version_id: &str,
) -> Result<Vec<Comment>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, version_id, parent_id, author_id, content, position, created_at
        FROM comments
        WHERE version_id = ?
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(version_id)
    .fetch_all(executor)
    .await?;

    Ok(comments)
}

/// 댓글의 깊이 (최상위 댓글 = 1). 댓글이 없으면 `None`.
///
/// 부모 방향으로 올라가며 세므로 비용은 깊이에 비례합니다.
pub async fn comment_depth<'e, E>(executor: E, id: &str) -> Result<Option<i64>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let depth = sqlx::query_scalar::<_, Option<i64>>(
        r#"
        WITH RECURSIVE ancestors(id, parent_id, depth) AS (
            SELECT id, parent_id, 1 FROM comments WHERE id = ?
            UNION ALL
            SELECT c.id, c.parent_id, a.depth + 1
            FROM comments c JOIN ancestors a ON c.id = a.parent_id
        )
        SELECT MAX(depth) FROM ancestors
        "#,
    )
    .bind(id)
    .fetch_one(executor)
    .await?;

    Ok(depth)
}

/// 댓글과 그 하위 답글 전체를 삭제하고, 삭제된 행 수를 반환합니다 (없으면 0).
///
/// `parent_id`의 `ON DELETE CASCADE`에 맡기면 SQLite가 답글 한 단계마다
/// 트리거를 중첩 실행하므로, 1000단계보다 깊은 스레드는 지울 수 없습니다.
/// 그래서 하위 트리의 `parent_id`를 먼저 끊고 평평한 집합으로 삭제합니다.
/// 첫 문장이 쓰기이므로 트랜잭션 안에서는 처음부터 쓰기 잠금을 잡습니다.
pub async fn delete_comment_tree(conn: &mut SqliteConnection, id: &str) -> Result<u64, AppError> {
    let ids: Vec<String> = sqlx::query_scalar(
        r#"
        WITH RECURSIVE subtree(id) AS (
            SELECT id FROM comments WHERE id = ?
            UNION ALL
            SELECT c.id FROM comments c JOIN subtree s ON c.parent_id = s.id
        )
        UPDATE comments SET parent_id = NULL
        WHERE id IN (SELECT id FROM subtree)
        RETURNING id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    if ids.is_empty() {
        return Ok(0);
    }

    let ids = serde_json::to_string(&ids).map_err(|e| AppError::Internal(e.to_string()))?;
    let result = sqlx::query("DELETE FROM comments WHERE id IN (SELECT value FROM json_each(?))")
        .bind(&ids)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}
