//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 API 라우터 구성을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `documents`: 문서 CRUD 핸들러 (+ 공유 상태 `AppState`)
//! - `versions`: 버전 목록/스냅샷/diff 핸들러
//! - `comments`: 버전별 댓글 트리 핸들러
//! - `health`: 서버 상태 확인 (헬스체크)

pub mod comments;
pub mod documents;
pub mod health;
pub mod versions;

pub use comments::*;
pub use documents::*;
pub use health::*;
pub use versions::*;

use axum::{
    routing::{delete, get},
    Router,
};

/// `/api/v1` 아래에 붙일 API 라우터를 만듭니다.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/documents", get(list_documents).post(create_document))
        .route(
            "/documents/{id}",
            get(get_document).put(update_document).delete(delete_document),
        )
        .route("/documents/{id}/versions", get(list_document_versions))
        .route(
            "/documents/{id}/versions/{version_id}",
            get(get_document_version),
        )
        .route("/documents/{id}/diff", get(diff_document_versions))
        .route(
            "/documents/{id}/versions/{version_id}/comments",
            get(list_version_comments).post(create_version_comment),
        )
        .route("/comments/{id}", delete(delete_comment))
        .route("/health", get(health_check))
        .with_state(state)
}
