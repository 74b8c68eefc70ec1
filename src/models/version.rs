use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use crate::services::diff::DiffLine;

/// 직전 버전 대비 줄 단위 변경량
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChangesSummary {
    pub added_lines: i64,
    pub removed_lines: i64,
}

/// 문서 버전 — 한 시점의 제목/내용/개요 전체 스냅샷 (생성 후 변경되지 않음)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentVersion {
    pub id: String,
    pub document_id: String,
    pub version_number: i64,
    pub title: String,
    pub content: String,
    pub outline: Option<String>,
    pub word_count: i64,
    pub commit_message: String,
    pub changes_summary: Option<Json<ChangesSummary>>,
    pub created_at: String,
}

/// 버전 목록용 요약 (content/outline 제외)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentVersionSummary {
    pub id: String,
    pub document_id: String,
    pub version_number: i64,
    pub title: String,
    pub word_count: i64,
    pub commit_message: String,
    pub changes_summary: Option<Json<ChangesSummary>>,
    pub created_at: String,
}

/// diff 결과에서 양쪽 버전을 가리키는 메타데이터
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionRef {
    pub number: i64,
    pub title: String,
    pub created_at: String,
}

impl From<&DocumentVersion> for VersionRef {
    fn from(version: &DocumentVersion) -> Self {
        Self {
            number: version.version_number,
            title: version.title.clone(),
            created_at: version.created_at.clone(),
        }
    }
}

/// 두 버전 사이의 차이.
///
/// `diff`(원본 unified diff 줄)와 `tagged_diff`(줄 종류 태그)는
/// 같은 diff 계산 결과에서 만들어지므로 항상 줄 단위로 일치합니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionDiff {
    pub version1: VersionRef,
    pub version2: VersionRef,
    pub diff: Vec<String>,
    pub tagged_diff: Vec<DiffLine>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DiffQuery {
    pub version1: i64,
    pub version2: i64,
}
