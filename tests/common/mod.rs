#![allow(dead_code)]

use manuscript::models::{CreateCommentRequest, CreateDocumentRequest, Document, UpdateDocumentRequest};
use manuscript::services::version_store;
use manuscript::models::Comment;
use manuscript::db;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::time::Duration;
use tempfile::TempDir;

/// 마이그레이션이 적용된 인메모리 SQLite 풀.
///
/// 인메모리 DB는 연결마다 따로 존재하므로 연결을 하나로 고정하고,
/// 테스트 도중 연결이 닫히지 않도록 유휴/수명 제한을 끕니다.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// 임시 디렉토리의 파일 DB를 여러 연결로 공유하는 풀.
///
/// 인메모리 풀과 달리 트랜잭션이 실제로 서로 다른 연결에서 겹쳐 실행됩니다.
/// `TempDir`이 drop되면 DB 파일도 지워지므로 테스트가 끝날 때까지 들고 있어야 합니다.
pub async fn file_pool(max_connections: u32) -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("manuscript.db"))
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .expect("Failed to open file-backed SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    (dir, pool)
}

pub async fn create_doc(pool: &SqlitePool, title: &str, content: &str) -> Document {
    version_store::create_document(
        pool,
        &CreateDocumentRequest {
            title: title.to_string(),
            content: content.to_string(),
            outline: None,
        },
    )
    .await
    .expect("Failed to create document")
}

pub fn content_update(content: &str) -> UpdateDocumentRequest {
    UpdateDocumentRequest {
        content: Some(content.to_string()),
        ..Default::default()
    }
}

pub fn comment(content: &str, parent_id: Option<&str>) -> CreateCommentRequest {
    CreateCommentRequest {
        author_id: "user-1".to_string(),
        content: content.to_string(),
        position: None,
        parent_id: parent_id.map(str::to_string),
    }
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}

/// 서비스의 깊이 제한을 거치지 않고 `depth`단계 답글 체인을 DB에 직접 씁니다.
/// 반환값은 루트부터 순서대로의 댓글 ID입니다.
pub async fn insert_reply_chain(pool: &SqlitePool, version_id: &str, depth: usize) -> Vec<String> {
    let mut ids: Vec<String> = Vec::with_capacity(depth);
    for i in 0..depth {
        let comment = Comment {
            id: db::new_id(),
            version_id: version_id.to_string(),
            parent_id: ids.last().cloned(),
            author_id: "user-1".to_string(),
            content: format!("level {}", i),
            position: None,
            created_at: db::now(),
        };
        db::insert_comment(pool, &comment)
            .await
            .expect("Failed to insert comment");
        ids.push(comment.id);
    }
    ids
}
