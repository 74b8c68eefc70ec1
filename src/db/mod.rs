//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! SQLite와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 버전 저장소/댓글 스레드 서비스(services/)가 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `documents`: 문서(head) 조회/생성/갱신/삭제
//! - `versions`: 버전 스냅샷 삽입과 조회 (`(document_id, version_number)` 복합 키 포함)
//! - `comments`: 댓글 삽입/조회/삭제
//!
//! 읽기 함수는 `SqliteExecutor`를 받아 풀(`&SqlitePool`)과
//! 트랜잭션(`&mut *tx`) 어느 쪽에서도 호출할 수 있습니다.
//! 쓰기 함수는 트랜잭션 안에서 함께 묶일 수 있도록 `&mut SqliteConnection`을 받습니다.

pub mod comments;
pub mod documents;
pub mod versions;

pub use comments::*;
pub use documents::*;
pub use versions::*;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// 새 레코드 ID (UUIDv7: 생성 순서대로 정렬 가능)
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// 현재 UTC 시각 — 마이크로초 정밀도의 RFC 3339 문자열.
/// 문자열 비교가 곧 시간 순서 비교가 되도록 형식을 고정합니다.
pub fn now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

/// 연결 풀을 만들고 마이그레이션을 실행합니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
