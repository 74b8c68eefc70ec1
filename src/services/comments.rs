//! # 댓글 스레드 인덱스 (Comment Thread Index)
//!
//! 특정 버전에 달린 댓글을 답글 트리로 관리합니다.
//!
//! DB에는 평평한 레코드(`parent_id` 역참조)만 저장하고, 응답용 중첩 트리는
//! `parent_id → 자식 목록` 인덱스를 만들어 메모리에서 조립합니다.
//! 조립은 명시적인 작업 스택으로 진행하므로 답글 깊이가 아무리 깊어도
//! 호출 스택이 늘어나지 않습니다.
//!
//! ## 깊이 제한
//! 조립된 트리는 응답 직렬화(serde)에서 재귀적으로 처리되므로, 답글 체인은
//! `MAX_THREAD_DEPTH`단계까지만 작성할 수 있습니다. 그보다 깊은 답글은
//! `add_comment`가 `BadRequest`로 거절합니다. 조회와 삭제에는 제한이 없습니다.
//!
//! ## 정렬 규칙
//! 모든 깊이에서 형제 댓글은 작성 시각 오름차순입니다 (같으면 삽입 순서).
//! ID 순서는 동시 쓰기에서 작성 시각과 어긋날 수 있으므로 쓰지 않습니다.

use std::collections::HashMap;

use crate::{db, error::AppError, models::*};
use sqlx::SqlitePool;

/// 답글 체인의 최대 깊이 (최상위 댓글이 1단계)
pub const MAX_THREAD_DEPTH: i64 = 256;

/// 버전에 댓글을 추가합니다. `parent_id`가 있으면 그 댓글의 답글이 됩니다.
///
/// 부모 댓글이 같은 버전에 속하는지는 여기서 확인하지 않습니다.
/// 그 보장이 필요한 호출자는 먼저 직접 확인해야 합니다.
///
/// # 에러
/// - `NotFound`: 버전 또는 부모 댓글이 없음 (댓글은 생성되지 않음)
/// - `BadRequest`: 부모 댓글이 이미 `MAX_THREAD_DEPTH`단계에 있음
pub async fn add_comment(
    pool: &SqlitePool,
    version_id: &str,
    req: &CreateCommentRequest,
) -> Result<CommentThread, AppError> {
    let mut tx = pool.begin().await?;

    db::get_version(&mut *tx, version_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("version {}", version_id)))?;

    if let Some(parent_id) = &req.parent_id {
        let parent_depth = db::comment_depth(&mut *tx, parent_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("comment {}", parent_id)))?;
        if parent_depth >= MAX_THREAD_DEPTH {
            return Err(AppError::BadRequest(format!(
                "comment {} is at reply depth {} (limit {})",
                parent_id, parent_depth, MAX_THREAD_DEPTH
            )));
        }
    }

    let comment = Comment {
        id: db::new_id(),
        version_id: version_id.to_string(),
        parent_id: req.parent_id.clone(),
        author_id: req.author_id.clone(),
        content: req.content.clone(),
        position: req.position.clone(),
        created_at: db::now(),
    };
    db::insert_comment(&mut *tx, &comment).await?;
    tx.commit().await?;

    tracing::info!(
        "Added comment {} to version {} (reply to {:?})",
        comment.id,
        version_id,
        comment.parent_id
    );
    Ok(CommentThread::leaf(comment))
}

pub async fn get_comment(pool: &SqlitePool, id: &str) -> Result<Comment, AppError> {
    db::get_comment(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("comment {}", id)))
}

/// 버전의 전체 댓글 트리를 반환합니다.
///
/// # 에러
/// - `NotFound`: 버전이 없음
pub async fn get_comments(
    pool: &SqlitePool,
    version_id: &str,
) -> Result<Vec<CommentThread>, AppError> {
    db::get_version(pool, version_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("version {}", version_id)))?;

    let comments = db::list_comments_for_version(pool, version_id).await?;
    tracing::debug!("Loaded {} comments for version {}", comments.len(), version_id);
    Ok(build_threads(comments))
}

/// 댓글과 그 하위 답글 전체를 삭제합니다.
pub async fn delete_comment(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    let deleted = db::delete_comment_tree(&mut tx, id).await?;
    if deleted == 0 {
        return Err(AppError::not_found(format!("comment {}", id)));
    }
    tx.commit().await?;
    tracing::info!("Deleted comment {} and {} replies", id, deleted - 1);
    Ok(())
}

/// 작성 시각 순으로 정렬된 평평한 댓글 목록을 답글 트리로 조립합니다.
///
/// 입력 순서가 곧 형제 순서가 됩니다. 부모가 목록에 없는 답글
/// (다른 버전의 댓글을 부모로 가리키는 경우)은 결과에 포함되지 않습니다.
pub fn build_threads(comments: Vec<Comment>) -> Vec<CommentThread> {
    let index: HashMap<&str, usize> = comments
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.as_str(), i))
        .collect();

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); comments.len()];
    for (i, comment) in comments.iter().enumerate() {
        match comment.parent_id.as_deref() {
            None => roots.push(i),
            Some(parent) => {
                if let Some(&p) = index.get(parent) {
                    children[p].push(i);
                }
            }
        }
    }
    drop(index);

    // 후위 순회: 노드는 모든 자식이 완성된 뒤에 만들어집니다.
    let mut slots: Vec<Option<Comment>> = comments.into_iter().map(Some).collect();
    let mut built: Vec<Option<CommentThread>> = vec![None; slots.len()];
    let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&r| (r, false)).collect();

    while let Some((node, expanded)) = stack.pop() {
        if !expanded {
            stack.push((node, true));
            stack.extend(children[node].iter().rev().map(|&c| (c, false)));
            continue;
        }
        let replies = children[node]
            .iter()
            .filter_map(|&c| built[c].take())
            .collect();
        if let Some(comment) = slots[node].take() {
            built[node] = Some(CommentThread::with_replies(comment, replies));
        }
    }

    roots.iter().filter_map(|&r| built[r].take()).collect()
}
