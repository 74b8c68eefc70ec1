//! # 버전 저장소 (Version Store)
//!
//! 문서 하나의 선형 버전 이력을 관리합니다.
//!
//! ## 불변식
//! - 버전 번호는 문서마다 1부터 빈틈없이 1씩 증가합니다.
//! - 문서의 `current_version`은 항상 가장 큰 버전 번호와 같습니다.
//! - 버전은 생성 후 수정되지 않으며, 개별 삭제되지 않습니다 (문서 삭제 시에만 함께 삭제).
//!
//! 새 버전 삽입과 `current_version` 증가는 하나의 트랜잭션으로 처리됩니다.
//! 중간에 실패하거나 요청이 취소되어 트랜잭션이 커밋 없이 drop되면
//! 둘 다 롤백되므로, 포인터만 앞서 나가거나 버전만 남는 일은 없습니다.

use crate::{
    db,
    error::AppError,
    models::*,
    services::{diff, text},
};
use sqlx::types::Json;
use sqlx::SqlitePool;

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial version";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update document";

/// 새 문서를 만들고, 같은 내용의 1번 버전을 함께 저장합니다.
pub async fn create_document(
    pool: &SqlitePool,
    req: &CreateDocumentRequest,
) -> Result<Document, AppError> {
    let now = db::now();
    let document = Document {
        id: db::new_id(),
        title: req.title.clone(),
        content: req.content.clone(),
        outline: req.outline.clone(),
        word_count: text::count_words(&req.content),
        current_version: 1,
        created_at: now.clone(),
        updated_at: now.clone(),
    };
    let initial = DocumentVersion {
        id: db::new_id(),
        document_id: document.id.clone(),
        version_number: 1,
        title: document.title.clone(),
        content: document.content.clone(),
        outline: document.outline.clone(),
        word_count: document.word_count,
        commit_message: INITIAL_COMMIT_MESSAGE.to_string(),
        changes_summary: None,
        created_at: now,
    };

    let mut tx = pool.begin().await?;
    db::insert_document(&mut tx, &document).await?;
    db::insert_version(&mut tx, &initial).await?;
    tx.commit().await?;

    tracing::info!(
        "Created document {} ({} words) with version 1",
        document.id,
        document.word_count
    );
    Ok(document)
}

pub async fn get_document(pool: &SqlitePool, id: &str) -> Result<Document, AppError> {
    db::get_document(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("document {}", id)))
}

pub async fn list_documents(pool: &SqlitePool) -> Result<Vec<Document>, AppError> {
    db::list_documents(pool).await
}

/// 문서를 부분 수정하고 새 버전을 만듭니다.
///
/// - 제목/내용/개요가 하나도 지정되지 않으면 아무것도 쓰지 않고 현재 문서를 반환합니다.
/// - 지정되지 않은 필드는 직전 버전 스냅샷에서 그대로 복사합니다.
/// - 내용이 지정되고 직전 내용이 비어 있지 않을 때만 `changes_summary`를 계산합니다.
///
/// # 에러
/// - `NotFound`: 문서가 없음 (아무것도 기록되지 않음)
pub async fn update_document(
    pool: &SqlitePool,
    id: &str,
    req: &UpdateDocumentRequest,
) -> Result<Document, AppError> {
    if !req.has_changes() {
        tracing::debug!("Update of document {} has no changes, skipping", id);
        return get_document(pool, id).await;
    }

    let mut tx = pool.begin().await?;

    // 첫 쓰기: 번호 증가. 같은 문서에 대한 동시 수정은 여기서 줄을 섭니다.
    let version_number = db::bump_current_version(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("document {}", id)))?;

    let prior = db::get_version_by_number(&mut *tx, id, version_number - 1)
        .await?
        .ok_or_else(|| {
            AppError::Internal(format!(
                "document {} has no version {} to build on",
                id,
                version_number - 1
            ))
        })?;

    let changes_summary = match &req.content {
        Some(new_content) if !prior.content.is_empty() => {
            Some(Json(diff::line_changes(&prior.content, new_content)))
        }
        _ => None,
    };
    let word_count = req
        .content
        .as_deref()
        .map(text::count_words)
        .unwrap_or(prior.word_count);

    let now = db::now();
    let version = DocumentVersion {
        id: db::new_id(),
        document_id: id.to_string(),
        version_number,
        title: req.title.clone().unwrap_or(prior.title),
        content: req.content.clone().unwrap_or(prior.content),
        outline: req.outline.clone().or(prior.outline),
        word_count,
        commit_message: req
            .commit_message
            .clone()
            .unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.to_string()),
        changes_summary,
        created_at: now.clone(),
    };

    db::insert_version(&mut tx, &version).await?;
    db::write_document_head(
        &mut tx,
        id,
        &version.title,
        &version.content,
        version.outline.as_deref(),
        version.word_count,
        &now,
    )
    .await?;
    tx.commit().await?;

    tracing::info!("Created version {} of document {}", version_number, id);
    get_document(pool, id).await
}

/// 문서를 삭제합니다. 모든 버전과 댓글이 함께 삭제됩니다.
pub async fn delete_document(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    if !db::delete_document(&mut tx, id).await? {
        return Err(AppError::not_found(format!("document {}", id)));
    }
    tx.commit().await?;
    tracing::info!("Deleted document {} with its history", id);
    Ok(())
}

/// 버전 요약 목록 (최신 버전이 먼저)
pub async fn list_versions(
    pool: &SqlitePool,
    document_id: &str,
) -> Result<Vec<DocumentVersionSummary>, AppError> {
    get_document(pool, document_id).await?;
    db::list_versions(pool, document_id).await
}

/// 버전 ID로 전체 스냅샷을 조회합니다.
///
/// 어느 문서의 버전인지는 확인하지 않습니다. 필요하면 호출자가
/// 반환된 `document_id`를 비교해야 합니다.
pub async fn get_version(pool: &SqlitePool, version_id: &str) -> Result<DocumentVersion, AppError> {
    db::get_version(pool, version_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("version {}", version_id)))
}

/// 두 버전 사이의 unified diff (context = 0)
///
/// # 에러
/// - `BadRequest`: 버전 번호가 1보다 작음
/// - `NotFound`: 해당 번호의 버전이 없음 (어느 버전인지 메시지에 포함)
pub async fn diff_versions(
    pool: &SqlitePool,
    document_id: &str,
    version1: i64,
    version2: i64,
) -> Result<VersionDiff, AppError> {
    if version1 < 1 || version2 < 1 {
        return Err(AppError::BadRequest(format!(
            "version numbers start at 1 (got {} and {})",
            version1, version2
        )));
    }

    let from = find_version(pool, document_id, version1).await?;
    let to = find_version(pool, document_id, version2).await?;

    let tagged_diff = diff::unified_diff(
        &from.content,
        &to.content,
        &format!("version {}", version1),
        &format!("version {}", version2),
        0,
    );
    let raw = tagged_diff.iter().map(|line| line.text.clone()).collect();

    tracing::debug!(
        "Diffed document {} versions {} -> {} ({} lines)",
        document_id,
        version1,
        version2,
        tagged_diff.len()
    );

    Ok(VersionDiff {
        version1: VersionRef::from(&from),
        version2: VersionRef::from(&to),
        diff: raw,
        tagged_diff,
    })
}

async fn find_version(
    pool: &SqlitePool,
    document_id: &str,
    number: i64,
) -> Result<DocumentVersion, AppError> {
    db::get_version_by_number(pool, document_id, number)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("version {} of document {}", number, document_id))
        })
}
