//! # 댓글 모델 정의
//!
//! 댓글은 문서가 아니라 **특정 버전**에 달립니다.
//! `parent_id`로 같은 버전 안의 다른 댓글을 가리키면 답글이 되고,
//! 답글 체인의 깊이는 작성 시점에 `services::comments::MAX_THREAD_DEPTH`로 제한됩니다.
//!
//! ## 구조체 역할
//! - `Comment`: DB의 `comments` 테이블 한 행 (평평한 레코드)
//! - `CommentThread`: 응답용 중첩 트리 노드 (`replies`에 하위 답글 포함)
//! - `CreateCommentRequest`: 댓글 작성 요청 본문

use serde::{Deserialize, Serialize};

/// 댓글 엔티티 — 트리 구조는 `parent_id` 역참조로만 표현합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: String,
    /// 댓글이 달린 버전의 ID
    pub version_id: String,
    /// 부모 댓글 ID — None이면 최상위(root) 댓글
    pub parent_id: Option<String>,
    pub author_id: String,
    pub content: String,
    /// 호출자가 정하는 위치 표시 (예: 문단 ID, 줄 번호)
    pub position: Option<String>,
    pub created_at: String,
}

/// 댓글 트리 노드.
///
/// `replies`는 작성 시각 오름차순으로 정렬된, 완전히 채워진 하위 트리입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentThread {
    pub id: String,
    pub version_id: String,
    pub parent_id: Option<String>,
    pub author_id: String,
    pub content: String,
    pub position: Option<String>,
    pub created_at: String,
    pub replies: Vec<CommentThread>,
}

impl CommentThread {
    /// 답글이 아직 채워지지 않은 노드를 만듭니다.
    pub fn leaf(comment: Comment) -> Self {
        Self::with_replies(comment, Vec::new())
    }

    pub fn with_replies(comment: Comment, replies: Vec<CommentThread>) -> Self {
        Self {
            id: comment.id,
            version_id: comment.version_id,
            parent_id: comment.parent_id,
            author_id: comment.author_id,
            content: comment.content,
            position: comment.position,
            created_at: comment.created_at,
            replies,
        }
    }
}

// 기본 drop은 `replies`를 따라 재귀하므로 깊은 트리에서 스택이 넘칠 수 있습니다.
// 하위 노드를 작업 목록으로 옮겨 가며 한 단계씩 해제합니다.
impl Drop for CommentThread {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.replies);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.replies);
        }
    }
}

/// 댓글 작성 요청 — `POST /api/v1/documents/{id}/versions/{version_id}/comments`
///
/// 인증 계층이 없으므로 작성자 ID는 요청 본문으로 받습니다.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub author_id: String,
    pub content: String,
    pub position: Option<String>,
    pub parent_id: Option<String>,
}
