//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `document`: 문서(head)와 생성/수정 요청
//! - `version`: 버전 스냅샷, 버전 요약, 변경 통계, diff 결과
//! - `comment`: 버전별 댓글과 답글 트리
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Document`처럼 짧게 접근합니다.

pub mod comment;
pub mod document;
pub mod version;

pub use comment::*;
pub use document::*;
pub use version::*;
