mod common;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use manuscript::error::AppError;
use manuscript::models::{CreateDocumentRequest, DiffQuery, UpdateDocumentRequest};
use manuscript::routes::{self, AppState};
use manuscript::services::version_store;
use pretty_assertions::assert_eq;

async fn state() -> AppState {
    AppState {
        pool: common::test_pool().await,
    }
}

#[tokio::test]
async fn create_then_update_through_handlers() {
    let state = state().await;

    let (status, Json(doc)) = routes::create_document(
        State(state.clone()),
        Json(CreateDocumentRequest {
            title: "Draft".to_string(),
            content: "hello world".to_string(),
            outline: Some("1. hello".to_string()),
        }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(doc.word_count, 2);

    let Json(updated) = routes::update_document(
        State(state.clone()),
        Path(doc.id.clone()),
        Json(UpdateDocumentRequest {
            content: Some("hello brave new world".to_string()),
            commit_message: Some("expand greeting".to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(updated.current_version, 2);
    assert_eq!(updated.outline.as_deref(), Some("1. hello"));

    let Json(diff) = routes::diff_document_versions(
        State(state.clone()),
        Path(doc.id.clone()),
        Ok(Query(DiffQuery {
            version1: 1,
            version2: 2,
        })),
    )
    .await
    .unwrap();
    assert_eq!(diff.diff[3], "-hello world");
    assert_eq!(diff.diff[4], "+hello brave new world");
}

#[tokio::test]
async fn version_of_another_document_is_not_found() {
    let state = state().await;
    let doc_a = common::create_doc(&state.pool, "A", "a").await;
    let doc_b = common::create_doc(&state.pool, "B", "b").await;
    let versions_b = version_store::list_versions(&state.pool, &doc_b.id).await.unwrap();

    let err = routes::get_document_version(
        State(state.clone()),
        Path((doc_a.id.clone(), versions_b[0].id.clone())),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let Json(version) = routes::get_document_version(
        State(state.clone()),
        Path((doc_b.id.clone(), versions_b[0].id.clone())),
    )
    .await
    .unwrap();
    assert_eq!(version.content, "b");
}

#[tokio::test]
async fn reply_to_comment_on_other_version_is_rejected() {
    let state = state().await;
    let doc = common::create_doc(&state.pool, "T", "one").await;
    version_store::update_document(&state.pool, &doc.id, &common::content_update("two"))
        .await
        .unwrap();
    let versions = version_store::list_versions(&state.pool, &doc.id).await.unwrap();
    let (v2, v1) = (versions[0].id.clone(), versions[1].id.clone());

    let (_, Json(on_v1)) = routes::create_version_comment(
        State(state.clone()),
        Path((doc.id.clone(), v1.clone())),
        Json(common::comment("first", None)),
    )
    .await
    .unwrap();

    let err = routes::create_version_comment(
        State(state.clone()),
        Path((doc.id.clone(), v2.clone())),
        Json(common::comment("cross", Some(on_v1.id.as_str()))),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(common::count_rows(&state.pool, "comments").await, 1);

    let (status, Json(reply)) = routes::create_version_comment(
        State(state.clone()),
        Path((doc.id.clone(), v1.clone())),
        Json(common::comment("reply", Some(on_v1.id.as_str()))),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let Json(threads) =
        routes::list_version_comments(State(state.clone()), Path((doc.id.clone(), v1)))
            .await
            .unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].replies[0].id, reply.id);
}

#[tokio::test]
async fn comments_on_version_of_other_document_are_not_found() {
    let state = state().await;
    let doc_a = common::create_doc(&state.pool, "A", "a").await;
    let doc_b = common::create_doc(&state.pool, "B", "b").await;
    let versions_b = version_store::list_versions(&state.pool, &doc_b.id).await.unwrap();

    let err = routes::list_version_comments(
        State(state.clone()),
        Path((doc_a.id.clone(), versions_b[0].id.clone())),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn malformed_diff_query_uses_error_envelope() {
    let state = state().await;
    let doc = common::create_doc(&state.pool, "T", "x").await;

    for uri in ["/diff?version1=abc&version2=2", "/diff?version1=1"] {
        let uri: Uri = uri.parse().unwrap();
        let err = routes::diff_document_versions(
            State(state.clone()),
            Path(doc.id.clone()),
            Query::<DiffQuery>::try_from_uri(&uri),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "bad_request");
    }
}

#[tokio::test]
async fn delete_handlers_return_no_content() {
    let state = state().await;
    let doc = common::create_doc(&state.pool, "T", "x").await;

    let status = routes::delete_document(State(state.clone()), Path(doc.id.clone()))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let err = routes::get_document(State(state.clone()), Path(doc.id.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn error_body_carries_code_and_message() {
    let response = AppError::not_found("version 7 of document 42").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(
        body["error"]["message"],
        "Not found: version 7 of document 42"
    );
}

#[tokio::test]
async fn health_reports_ok() {
    let Json(body) = routes::health_check().await;
    assert_eq!(body["status"], "ok");
}
