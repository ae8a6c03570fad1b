// region:    --- Imports
use crate::auction::model::Product;
use crate::client::AuctionApi;
use crate::error::ClientError;
use crate::overlay::{OverlayStore, TombstoneKind, Tombstones};
use tracing::{error, info};

// endregion: --- Imports

// region:    --- My Listings
/// 내 상품 화면
pub struct MyListings {
    pub listings: Vec<Product>,
    hidden: Tombstones,
    overlay: OverlayStore,
}

impl MyListings {
    pub async fn load<A>(api: &A, overlay: OverlayStore) -> Result<Self, ClientError>
    where
        A: AuctionApi + ?Sized,
    {
        info!("{:<12} --> 내 상품 화면 로드", "View");
        let hidden = overlay.load(TombstoneKind::Products);
        let listings = Self::fetch(api, &hidden).await?;
        Ok(Self {
            listings,
            hidden,
            overlay,
        })
    }

    async fn fetch<A>(api: &A, hidden: &Tombstones) -> Result<Vec<Product>, ClientError>
    where
        A: AuctionApi + ?Sized,
    {
        let listings = api.my_listings().await.map_err(|e| {
            error!("{:<12} --> 내 상품 조회 실패: {}", "View", e);
            e
        })?;
        Ok(hidden.filter(listings))
    }

    /// 상품 숨김 (서버 삭제 요청 없음, 되돌릴 수 없음)
    pub fn soft_delete(&mut self, product_id: i64) -> Result<(), ClientError> {
        self.overlay
            .hide(TombstoneKind::Products, &mut self.hidden, product_id)?;
        self.listings.retain(|listing| listing.id != product_id);
        Ok(())
    }

    /// 낙찰 처리 후 목록 갱신
    pub async fn sell<A>(&mut self, api: &A, product_id: i64, bid_id: i64) -> Result<(), ClientError>
    where
        A: AuctionApi + ?Sized,
    {
        api.sell_product(product_id, bid_id).await?;
        info!(
            "{:<12} --> 낙찰 완료 id: {}, bid: {}",
            "View", product_id, bid_id
        );
        self.hidden = self.overlay.load(TombstoneKind::Products);
        self.listings = Self::fetch(api, &self.hidden).await?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

// endregion: --- My Listings

// endregion: --- Tests
