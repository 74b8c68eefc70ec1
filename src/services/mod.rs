//! # 서비스(비즈니스 로직) 모듈
//!
//! - `version_store`: 문서 생성/수정과 선형 버전 이력, 버전 간 diff
//! - `comments`: 버전별 댓글과 답글 트리
//! - `diff`: 줄 단위 unified diff 엔진
//! - `text`: 단어 수 계산
//!
//! 모든 연산은 `&SqlitePool`만 받는 자유 함수입니다. 프로세스 전역의
//! 가변 상태는 없습니다.

pub mod comments;
pub mod diff;
pub mod text;
pub mod version_store;
