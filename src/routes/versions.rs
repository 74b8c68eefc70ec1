use crate::{error::AppError, models::*, services::version_store};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use super::documents::AppState;

/// `GET /documents/{id}/versions` — 최신 버전이 먼저 오는 요약 목록
pub async fn list_document_versions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let versions = version_store::list_versions(&state.pool, &id).await?;
    Ok(Json(json!({ "versions": versions })))
}

/// `GET /documents/{id}/versions/{version_id}` — 버전 전체 스냅샷
///
/// 버전 저장소는 문서 ID를 확인하지 않으므로 여기서 확인합니다.
/// 다른 문서의 버전이면 없는 것과 똑같이 404를 돌려줍니다.
pub async fn get_document_version(
    State(state): State<AppState>,
    Path((id, version_id)): Path<(String, String)>,
) -> Result<Json<DocumentVersion>, AppError> {
    let version = version_of_document(&state, &id, &version_id).await?;
    Ok(Json(version))
}

/// `GET /documents/{id}/diff?version1=1&version2=2`
///
/// 쿼리가 빠졌거나 정수가 아니면 axum 기본 거절(텍스트 응답) 대신
/// 공통 에러 형식의 400으로 응답합니다.
pub async fn diff_document_versions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<DiffQuery>, QueryRejection>,
) -> Result<Json<VersionDiff>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let diff =
        version_store::diff_versions(&state.pool, &id, query.version1, query.version2).await?;
    Ok(Json(diff))
}

/// 버전을 조회하고 요청한 문서에 속하는지 확인합니다.
pub(crate) async fn version_of_document(
    state: &AppState,
    document_id: &str,
    version_id: &str,
) -> Result<DocumentVersion, AppError> {
    let version = version_store::get_version(&state.pool, version_id).await?;
    if version.document_id != document_id {
        return Err(AppError::not_found(format!(
            "version {} of document {}",
            version_id, document_id
        )));
    }
    Ok(version)
}
