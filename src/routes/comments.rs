//! # 댓글 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/documents/{id}/versions/{version_id}/comments | `list_version_comments` | 버전의 댓글 트리 |
//! | POST | /api/v1/documents/{id}/versions/{version_id}/comments | `create_version_comment` | 댓글/답글 작성 |
//! | DELETE | /api/v1/comments/{id} | `delete_comment` | 댓글과 하위 답글 삭제 |
//!
//! 댓글 스레드 인덱스는 부모 댓글이 같은 버전인지 확인하지 않으므로,
//! 답글 작성 시 그 확인을 이 핸들러가 맡습니다.

use crate::{error::AppError, models::*, services::comments};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{documents::AppState, versions::version_of_document};

/// 버전의 댓글을 답글 트리 형태로 조회합니다.
///
/// `GET /api/v1/documents/{id}/versions/{version_id}/comments` → `[ { ..., "replies": [...] } ]`
pub async fn list_version_comments(
    State(state): State<AppState>,
    Path((id, version_id)): Path<(String, String)>,
) -> Result<Json<Vec<CommentThread>>, AppError> {
    version_of_document(&state, &id, &version_id).await?;
    let threads = comments::get_comments(&state.pool, &version_id).await?;
    Ok(Json(threads))
}

/// 버전에 댓글(또는 답글)을 작성합니다.
///
/// `POST ...` + `{ "author_id": "u1", "content": "...", "position": "p3", "parent_id": null }`
///
/// ## 검증
/// - 버전이 경로의 문서에 속하지 않으면 404
/// - `parent_id`가 없는 댓글이면 404, 다른 버전의 댓글이면 400
pub async fn create_version_comment(
    State(state): State<AppState>,
    Path((id, version_id)): Path<(String, String)>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentThread>), AppError> {
    version_of_document(&state, &id, &version_id).await?;

    if let Some(parent_id) = &req.parent_id {
        let parent = comments::get_comment(&state.pool, parent_id).await?;
        if parent.version_id != version_id {
            return Err(AppError::BadRequest(format!(
                "comment {} belongs to another version",
                parent_id
            )));
        }
    }

    let created = comments::add_comment(&state.pool, &version_id, &req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `DELETE /api/v1/comments/{id}` — 성공 시 HTTP 204
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    comments::delete_comment(&state.pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
