//! # 텍스트 통계 유틸리티
//!
//! 단어 수 계산 규칙은 이 파일 하나에만 존재합니다.
//! 문서 생성, 수정, 버전 스냅샷 모두 `count_words()`를 사용합니다.

/// 텍스트의 단어 수를 계산합니다.
///
/// 공백(스페이스, 탭, 줄바꿈)으로 분리한 토큰의 개수입니다.
/// 언어별 형태소 분석이나 유니코드 단어 경계 분석은 하지 않습니다.
pub fn count_words(text: &str) -> i64 {
    text.split_whitespace().count() as i64
}
