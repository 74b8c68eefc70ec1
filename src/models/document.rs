use serde::{Deserialize, Serialize};

/// 문서의 현재 상태(head). 편집될 때마다 새 버전 스냅샷이 함께 쌓입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    pub outline: Option<String>,
    pub word_count: i64,
    /// 가장 최근 버전 번호. 항상 이 문서 버전들의 최댓값과 같습니다.
    pub current_version: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocumentRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub outline: Option<String>,
}

/// 부분 업데이트 요청. None인 필드는 변경하지 않습니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub outline: Option<String>,
    pub commit_message: Option<String>,
}

impl UpdateDocumentRequest {
    /// 제목/내용/개요 중 하나라도 지정되었는지 확인합니다.
    /// commit_message만 있는 요청은 변경으로 보지 않습니다.
    pub fn has_changes(&self) -> bool {
        self.title.is_some() || self.content.is_some() || self.outline.is_some()
    }
}
