// region:    --- Imports
use crate::storage::StorageError;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Client Error
/// 클라이언트 전역 에러
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("인증 응답에 토큰 정보가 없습니다.")]
    InvalidTokenData,

    #[error("로그인이 필요합니다.")]
    NotAuthenticated,

    #[error("대상을 찾을 수 없습니다: {message}")]
    NotFound { message: String },

    #[error("권한이 없습니다: {message}")]
    Forbidden { message: String },

    #[error("현재 상태에서 처리할 수 없습니다: {message}")]
    InvalidState { message: String },

    #[error("요청 실패 (status={status:?}): {message}")]
    NetworkOrServer {
        status: Option<u16>,
        message: String,
    },

    #[error("응답 해석 실패: {0}")]
    Decode(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("입력값 오류: {0}")]
    Validation(String),

    #[error("설정 오류: {0}")]
    Config(String),

    #[error("요청이 취소되었습니다.")]
    Cancelled,
}

/// 화면에 전달되는 정규화된 에러 형태 `{status, message}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub status: Option<u16>,
    pub message: String,
}

impl ClientError {
    /// 상태 코드와 응답 본문으로 에러 생성
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        ClientError::NetworkOrServer {
            status: Some(status.as_u16()),
            message: extract_message(status, body),
        }
    }

    /// 삭제 요청 전용 분류 (404, 403, 400)
    pub fn for_delete(self) -> Self {
        match self {
            ClientError::NetworkOrServer {
                status: Some(404),
                message,
            } => ClientError::NotFound { message },
            ClientError::NetworkOrServer {
                status: Some(403),
                message,
            } => ClientError::Forbidden { message },
            ClientError::NetworkOrServer {
                status: Some(400),
                message,
            } => ClientError::InvalidState { message },
            other => other,
        }
    }

    /// HTTP 상태 코드 (알 수 있는 경우)
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::NotFound { .. } => Some(404),
            ClientError::Forbidden { .. } => Some(403),
            ClientError::InvalidState { .. } => Some(400),
            ClientError::NotAuthenticated => Some(401),
            ClientError::NetworkOrServer { status, .. } => *status,
            _ => None,
        }
    }

    pub fn info(&self) -> ErrorInfo {
        ErrorInfo {
            status: self.status(),
            message: self.to_string(),
        }
    }

    /// 사용자에게 보여줄 입찰 삭제 실패 메시지
    pub fn user_message(&self) -> String {
        match self {
            ClientError::NotFound { .. } => {
                "입찰을 찾을 수 없습니다. 이미 삭제되었을 수 있습니다.".to_string()
            }
            ClientError::Forbidden { .. } => "이 입찰을 삭제할 권한이 없습니다.".to_string(),
            ClientError::InvalidState { .. } => {
                "이 입찰로 상품이 판매되어 삭제할 수 없습니다.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return ClientError::Decode(e.to_string());
        }
        ClientError::NetworkOrServer {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

/// 응답 본문에서 에러 메시지 추출 (message, detail, error 순)
fn extract_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "detail", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    status
        .canonical_reason()
        .unwrap_or("알 수 없는 오류")
        .to_string()
}

// endregion: --- Client Error

// endregion: --- Tests
