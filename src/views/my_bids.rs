// region:    --- Imports
use crate::client::AuctionApi;
use crate::error::ClientError;
use crate::overlay::{OverlayStore, TombstoneKind, Tombstones};
use crate::reconcile::{collect_my_bids, BidView};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

// endregion: --- Imports

// region:    --- My Bids
/// 내 입찰 화면
pub struct MyBids {
    pub bids: Vec<BidView>,
    hidden: Tombstones,
    overlay: OverlayStore,
}

impl MyBids {
    /// 모든 상품 조회 후 상품별 내 입찰 수집
    pub async fn load<A>(
        api: Arc<A>,
        overlay: OverlayStore,
        cancel: &CancellationToken,
    ) -> Result<Self, ClientError>
    where
        A: AuctionApi + ?Sized + 'static,
    {
        info!("{:<12} --> 내 입찰 화면 로드", "View");
        let products = api.list_products().await.map_err(|e| {
            error!("{:<12} --> 상품 목록 조회 실패: {}", "View", e);
            e
        })?;

        let hidden = overlay.load(TombstoneKind::Bids);
        let bids = collect_my_bids(api, &products, &hidden, cancel).await?;

        Ok(Self {
            bids,
            hidden,
            overlay,
        })
    }

    /// 입찰 숨김 (서버 요청 없음)
    pub fn hide(&mut self, bid_id: i64) -> Result<(), ClientError> {
        self.overlay
            .hide(TombstoneKind::Bids, &mut self.hidden, bid_id)?;
        self.bids.retain(|view| view.bid.id != bid_id);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }
}

// endregion: --- My Bids

// endregion: --- Tests
