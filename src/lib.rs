//! # manuscript
//!
//! 문서 버전 관리와 버전별 댓글 스레드를 제공하는 라이브러리입니다.
//!
//! - 버전 저장소(`services::version_store`): 문서마다 선형 버전 체인을 유지하고,
//!   버전 간 unified diff와 줄 단위 변경 통계를 계산합니다.
//! - 댓글 스레드 인덱스(`services::comments`): 특정 버전에 달린 댓글을
//!   깊이 제한 없는 답글 트리로 돌려줍니다.
//!
//! `routes`는 이 연산들을 axum HTTP API로 노출하는 얇은 계층입니다.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
