/// 로컬 키/값 저장소
/// 브라우저 localStorage 에 해당하는 영속 저장소를 트레이트로 추상화한다.
/// 프로세스 간 잠금은 하지 않는다. (동시에 두 프로세스가 쓰면 마지막 쓰기가 남는다)
// region:    --- Imports
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info};

// endregion: --- Imports

// region:    --- Keys
pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user";
pub const DELETED_PRODUCTS_KEY: &str = "deletedProducts";
pub const DELETED_BIDS_KEY: &str = "deletedBids";

// endregion: --- Keys

// region:    --- Storage Error
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("저장소 파일 입출력 실패 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("저장소 파일 형식 오류 ({path}): {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("저장소 잠금 실패")]
    Poisoned,
}

// endregion: --- Storage Error

// region:    --- Key Value Store Trait
/// 키/값 저장소 트레이트
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// endregion: --- Key Value Store Trait

// region:    --- Memory Store
/// 메모리 저장소 (테스트 및 임시 세션용)
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

// endregion: --- Memory Store

// region:    --- File Store
/// JSON 파일 저장소
/// 열 때 한 번 읽고, 변경될 때마다 파일 전체를 다시 쓴다.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// 파일 저장소 열기 (파일이 없으면 빈 저장소)
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => HashMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| StorageError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "{:<12} --> 저장소 파일 없음, 새로 생성: {}",
                    "Storage",
                    path.display()
                );
                HashMap::new()
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 변경 후 파일 전체 기록
    fn update<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        f(&mut entries);

        let json = serde_json::to_string_pretty(&*entries).map_err(|source| {
            StorageError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            "{:<12} --> 저장소 기록 완료: {}",
            "Storage",
            self.path.display()
        );
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

// endregion: --- File Store

// endregion: --- Tests
