/// 로컬 삭제 목록 (soft delete)
/// 서버에 삭제 요청을 보내지 않고, 숨길 식별자만 로컬에 보관한다.
/// 한 번 추가된 식별자는 다시 빠지지 않는다.
// region:    --- Imports
use crate::auction::model::{Bid, Product};
use crate::error::ClientError;
use crate::storage::{KeyValueStore, DELETED_BIDS_KEY, DELETED_PRODUCTS_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Identified
pub trait Identified {
    fn id(&self) -> i64;
}

impl Identified for Product {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Bid {
    fn id(&self) -> i64 {
        self.id
    }
}

// endregion: --- Identified

// region:    --- Tombstones
/// 숨김 처리된 식별자 집합
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tombstones {
    ids: BTreeSet<i64>,
}

impl Tombstones {
    pub fn new() -> Self {
        Self::default()
    }

    /// 추가 (이미 있으면 false)
    pub fn insert(&mut self, id: i64) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }

    /// 숨김 처리된 항목 제외
    pub fn filter<T: Identified>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .filter(|item| !self.contains(item.id()))
            .collect()
    }
}

impl FromIterator<i64> for Tombstones {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

// endregion: --- Tombstones

// region:    --- Overlay Store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TombstoneKind {
    Products,
    Bids,
}

impl TombstoneKind {
    pub fn key(self) -> &'static str {
        match self {
            TombstoneKind::Products => DELETED_PRODUCTS_KEY,
            TombstoneKind::Bids => DELETED_BIDS_KEY,
        }
    }
}

/// 삭제 목록 영속화
#[derive(Clone)]
pub struct OverlayStore {
    store: Arc<dyn KeyValueStore>,
}

impl OverlayStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// 저장된 목록 읽기 (없거나 깨진 경우 빈 목록)
    pub fn load(&self, kind: TombstoneKind) -> Tombstones {
        let Some(raw) = self.store.get(kind.key()) else {
            return Tombstones::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(
                "{:<12} --> 삭제 목록 해석 실패 {}: {}",
                "Overlay",
                kind.key(),
                e
            );
            Tombstones::new()
        })
    }

    pub fn save(&self, kind: TombstoneKind, tombstones: &Tombstones) -> Result<(), ClientError> {
        let json = serde_json::to_string(tombstones)?;
        self.store.set(kind.key(), &json)?;
        Ok(())
    }

    /// 저장소를 다시 읽어 합친 뒤 기록 (다른 세션이 추가한 항목 보존)
    pub fn hide(
        &self,
        kind: TombstoneKind,
        tombstones: &mut Tombstones,
        id: i64,
    ) -> Result<(), ClientError> {
        let mut merged = self.load(kind);
        merged.ids.extend(tombstones.iter());
        let added = merged.insert(id);
        self.save(kind, &merged)?;

        if added {
            info!("{:<12} --> 로컬 삭제 처리 {}: {}", "Overlay", kind.key(), id);
        }
        *tombstones = merged;
        Ok(())
    }

    /// 화면 없이 id 하나만 숨김 (서버 요청 없음)
    pub fn hide_one(&self, kind: TombstoneKind, id: i64) -> Result<Tombstones, ClientError> {
        let mut tombstones = Tombstones::new();
        self.hide(kind, &mut tombstones, id)?;
        Ok(tombstones)
    }
}

// endregion: --- Overlay Store

// endregion: --- Tests
