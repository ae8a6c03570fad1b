/// 인증 세션 관리
/// 토큰과 사용자 정보를 주입받은 키/값 저장소에 보관한다.
// region:    --- Imports
use crate::auction::model::{AuthResponse, User};
use crate::error::ClientError;
use crate::storage::{KeyValueStore, REFRESH_TOKEN_KEY, TOKEN_KEY, USER_KEY};
use std::sync::Arc;
use tracing::{error, info, warn};

// endregion: --- Imports

// region:    --- Session
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// 세션 저장
    /// 토큰이 하나라도 없으면 실패하고, 남아있는 세션 정보도 모두 지운다.
    pub fn store_session(&self, auth: &AuthResponse) -> Result<(), ClientError> {
        let tokens = match (non_empty(&auth.access_token), non_empty(&auth.refresh_token)) {
            (Some(access), Some(refresh)) => (access, refresh),
            _ => {
                error!("{:<12} --> 토큰 데이터가 올바르지 않습니다.", "Session");
                self.clear_session();
                return Err(ClientError::InvalidTokenData);
            }
        };

        if let Err(e) = self.write(tokens.0, tokens.1, auth.user.as_ref()) {
            self.clear_session();
            return Err(e);
        }

        info!("{:<12} --> 세션 저장 완료", "Session");
        Ok(())
    }

    fn write(&self, access: &str, refresh: &str, user: Option<&User>) -> Result<(), ClientError> {
        self.store.set(TOKEN_KEY, access)?;
        self.store.set(REFRESH_TOKEN_KEY, refresh)?;
        if let Some(user) = user {
            self.store.set(USER_KEY, &serde_json::to_string(user)?)?;
        }
        Ok(())
    }

    /// 세션 삭제 (실패하지 않는다)
    pub fn clear_session(&self) {
        for key in [TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!("{:<12} --> 세션 키 삭제 실패 {}: {}", "Session", key, e);
            }
        }
    }

    /// 저장된 사용자 정보 (없거나 깨진 경우 None)
    pub fn current_user(&self) -> Option<User> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("{:<12} --> 저장된 사용자 정보 해석 실패: {}", "Session", e);
                None
            }
        }
    }

    /// 토큰 존재 여부만 확인 (만료 검사 없음)
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// 토큰 갱신 후 access 토큰만 교체
    pub fn set_access_token(&self, token: &str) -> Result<(), ClientError> {
        self.store.set(TOKEN_KEY, token)?;
        Ok(())
    }

    /// 로그인이 필요한 화면 진입 전 확인
    pub fn require_auth(&self) -> Result<String, ClientError> {
        self.access_token().ok_or(ClientError::NotAuthenticated)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// endregion: --- Session

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn session() -> (Session, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (Session::new(store.clone()), store)
    }

    fn auth(access: Option<&str>, refresh: Option<&str>) -> AuthResponse {
        AuthResponse {
            access_token: access.map(str::to_string),
            refresh_token: refresh.map(str::to_string),
            user: Some(User {
                id: 7,
                username: "kim".to_string(),
                email: None,
            }),
            message: None,
        }
    }

    #[test]
    fn store_then_clear() {
        let (session, _) = session();
        assert!(!session.is_authenticated());

        session.store_session(&auth(Some("a"), Some("r"))).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.current_user().map(|u| u.id), Some(7));
        assert_eq!(session.refresh_token().as_deref(), Some("r"));

        session.clear_session();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        session.clear_session();
    }

    #[test]
    fn missing_refresh_token_leaves_no_keys() {
        let (session, store) = session();
        store.set(TOKEN_KEY, "stale").unwrap();
        store.set(USER_KEY, "{}").unwrap();

        let result = session.store_session(&auth(Some("a"), None));

        assert!(matches!(result, Err(ClientError::InvalidTokenData)));
        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(REFRESH_TOKEN_KEY), None);
        assert_eq!(store.get(USER_KEY), None);
    }

    #[test]
    fn empty_access_token_is_invalid() {
        let (session, _) = session();
        let result = session.store_session(&auth(Some(""), Some("r")));
        assert!(matches!(result, Err(ClientError::InvalidTokenData)));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn corrupt_user_reads_as_none() {
        let (session, store) = session();
        store.set(USER_KEY, "{not json").unwrap();
        assert!(session.current_user().is_none());
    }

    #[test]
    fn require_auth_without_token() {
        let (session, _) = session();
        assert!(matches!(
            session.require_auth(),
            Err(ClientError::NotAuthenticated)
        ));
    }
}
// endregion: --- Tests
