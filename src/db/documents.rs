//! # 문서 데이터베이스 쿼리 모듈
//!
//! `documents` 테이블에 대한 쿼리 함수들입니다.
//! 버전 번호 증가(`bump_current_version`)는 반드시 버전 삽입과 같은
//! 트랜잭션 안에서 호출되어야 합니다.

use crate::error::AppError;
use crate::models::Document;
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

/// 모든 문서를 최근 수정 순으로 조회합니다.
pub async fn list_documents(pool: &SqlitePool) -> Result<Vec<Document>, AppError> {
    let docs = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, title, content, outline, word_count, current_version, created_at, updated_at
        FROM documents
        ORDER BY updated_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(docs)
}

/// ID로 단일 문서를 조회합니다.
///
/// # 반환값
/// - `Ok(Some(Document))`: 문서를 찾은 경우
/// - `Ok(None)`: 해당 ID의 문서가 없는 경우
pub async fn get_document<'e, E>(executor: E, id: &str) -> Result<Option<Document>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let doc = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, title, content, outline, word_count, current_version, created_at, updated_at
        FROM documents
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(doc)
}

pub async fn insert_document(conn: &mut SqliteConnection, doc: &Document) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO documents (id, title, content, outline, word_count, current_version, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&doc.id)
    .bind(&doc.title)
    .bind(&doc.content)
    .bind(&doc.outline)
    .bind(doc.word_count)
    .bind(doc.current_version)
    .bind(&doc.created_at)
    .bind(&doc.updated_at)
    .execute(conn)
    .await?;

    Ok(())
}

/// `current_version`을 1 올리고 새 값을 반환합니다. 문서가 없으면 None.
///
/// 트랜잭션의 첫 번째 쓰기로 실행해야 합니다. SQLite는 이 시점에 쓰기 잠금을 잡으므로
/// 같은 문서를 동시에 수정하는 요청은 여기서 직렬화됩니다.
pub async fn bump_current_version(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<i64>, AppError> {
    let next: Option<i64> = sqlx::query_scalar(
        r#"
        UPDATE documents
        SET current_version = current_version + 1
        WHERE id = ?
        RETURNING current_version
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(next)
}

/// 새 버전 스냅샷과 같은 값으로 문서 head를 덮어씁니다.
pub async fn write_document_head(
    conn: &mut SqliteConnection,
    id: &str,
    title: &str,
    content: &str,
    outline: Option<&str>,
    word_count: i64,
    updated_at: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE documents
        SET title = ?, content = ?, outline = ?, word_count = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(outline)
    .bind(word_count)
    .bind(updated_at)
    .bind(id)
    .execute(conn)
    .await?;

    Ok(())
}

/// 문서를 삭제합니다. 버전과 댓글은 `ON DELETE CASCADE`로 함께 삭제됩니다.
///
/// # 반환값
/// - `Ok(true)`: 삭제 성공
/// - `Ok(false)`: 해당 ID의 문서가 없음
pub async fn delete_document(conn: &mut SqliteConnection, id: &str) -> Result<bool, AppError> {
    // 답글 연결을 먼저 끊어 두면 연쇄 삭제가 문서 → 버전 → 댓글 두 단계로 끝납니다.
    // (댓글끼리의 CASCADE는 답글 깊이만큼 트리거가 중첩되어 1000단계에서 실패)
    sqlx::query(
        r#"
        UPDATE comments SET parent_id = NULL
        WHERE version_id IN (SELECT id FROM document_versions WHERE document_id = ?)
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;

    let result = sqlx::query("DELETE FROM documents WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
