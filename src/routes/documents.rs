//! # 문서(Document) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/v1/documents`      → 문서 목록 조회
//! - `POST   /api/v1/documents`      → 새 문서 생성 (1번 버전 함께 생성)
//! - `GET    /api/v1/documents/{id}` → 단일 문서 조회
//! - `PUT    /api/v1/documents/{id}` → 문서 수정 (부분 업데이트, 새 버전 생성)
//! - `DELETE /api/v1/documents/{id}` → 문서 삭제 (버전/댓글 함께 삭제)
//!
//! ## Axum 핸들러 패턴
//! 핸들러는 **Extractor(추출기)**를 매개변수로 받습니다:
//! - `State(state)`: 앱 전역 상태 (DB 풀)
//! - `Path(id)`: URL 경로 파라미터
//! - `Json(body)`: 요청 본문을 JSON으로 파싱한 구조체
//!
//! 반환 타입이 `Result<T, AppError>`이면 `Err`는 `AppError`의
//! `IntoResponse` 구현을 통해 에러 JSON 응답이 됩니다.

use crate::{error::AppError, models::*, services::version_store};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// `GET /documents` — 전체 문서 목록 (`{ "documents": [...] }`)
pub async fn list_documents(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let documents = version_store::list_documents(&state.pool).await?;
    Ok(Json(json!({ "documents": documents })))
}

/// `GET /documents/{id}` — 단일 문서 조회
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let document = version_store::get_document(&state.pool, &id).await?;
    Ok(Json(document))
}

/// `POST /documents` — 새 문서를 생성합니다.
///
/// 성공 시 HTTP 201과 함께 생성된 문서(`current_version = 1`)를 반환합니다.
pub async fn create_document(
    State(state): State<AppState>,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let document = version_store::create_document(&state.pool, &req).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// `PUT /documents/{id}` — 문서를 수정합니다.
///
/// 요청 본문에 포함된 필드만 바뀝니다. 예: `{ "title": "새 제목" }`.
/// 바뀌는 필드가 하나도 없으면 새 버전 없이 현재 문서를 그대로 돌려줍니다.
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateDocumentRequest>,
) -> Result<Json<Document>, AppError> {
    let document = version_store::update_document(&state.pool, &id, &req).await?;
    Ok(Json(document))
}

/// `DELETE /documents/{id}` — 성공 시 HTTP 204 No Content
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    version_store::delete_document(&state.pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
