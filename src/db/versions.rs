use crate::error::AppError;
use crate::models::{DocumentVersion, DocumentVersionSummary};
use sqlx::{SqliteConnection, SqliteExecutor};

pub async fn insert_version(
    conn: &mut SqliteConnection,
    version: &DocumentVersion,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO document_versions
            (id, document_id, version_number, title, content, outline,
             word_count, commit_message, changes_summary, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&version.id)
    .bind(&version.document_id)
    .bind(version.version_number)
    .bind(&version.title)
    .bind(&version.content)
    .bind(&version.outline)
    .bind(version.word_count)
    .bind(&version.commit_message)
    .bind(&version.changes_summary)
    .bind(&version.created_at)
    .execute(conn)
    .await?;

    Ok(())
}

/// 버전 요약 목록 — 최신 버전이 먼저 옵니다.
pub async fn list_versions<'e, E>(
    executor: E,
    document_id: &str,
) -> Result<Vec<DocumentVersionSummary>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let versions = sqlx::query_as::<_, DocumentVersionSummary>(
        r#"
        SELECT id, document_id, version_number, title, word_count,
               commit_message, changes_summary, created_at
        FROM document_versions
        WHERE document_id = ?
        ORDER BY version_number DESC
        "#,
    )
    .bind(document_id)
    .fetch_all(executor)
    .await?;

    Ok(versions)
}

pub async fn get_version<'e, E>(
    executor: E,
    version_id: &str,
) -> Result<Option<DocumentVersion>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let version = sqlx::query_as::<_, DocumentVersion>(
        r#"
        SELECT id, document_id, version_number, title, content, outline,
               word_count, commit_message, changes_summary, created_at
        FROM document_versions
        WHERE id = ?
        "#,
    )
    .bind(version_id)
    .fetch_optional(executor)
    .await?;

    Ok(version)
}

/// `(document_id, version_number)` 복합 키로 버전을 조회합니다.
pub async fn get_version_by_number<'e, E>(
    executor: E,
    document_id: &str,
    version_number: i64,
) -> Result<Option<DocumentVersion>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let version = sqlx::query_as::<_, DocumentVersion>(
        r#"
        SELECT id, document_id, version_number, title, content, outline,
               word_count, commit_message, changes_summary, created_at
        FROM document_versions
        WHERE document_id = ? AND version_number = ?
        "#,
    )
    .bind(document_id)
    .bind(version_number)
    .fetch_optional(executor)
    .await?;

    Ok(version)
}
