// region:    --- Imports
use crate::auction::model::Bid;
use crate::client::AuctionApi;
use crate::error::ClientError;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Product Bids
/// 상품 상세의 입찰 이력 및 내 입찰
pub struct ProductBids {
    pub product_id: i64,
    pub history: Vec<Bid>,
    pub mine: Vec<Bid>,
    pub highest: Option<Bid>,
}

impl ProductBids {
    pub async fn load<A>(api: &A, product_id: i64) -> Result<Self, ClientError>
    where
        A: AuctionApi + ?Sized,
    {
        info!("{:<12} --> 상품 입찰 화면 로드 id: {}", "View", product_id);
        let history = api.list_bids(product_id).await?;

        // 최고 입찰과 내 입찰은 이력과 별개로 실패할 수 있다.
        let highest = api.highest_bid(product_id).await.unwrap_or_else(|e| {
            warn!(
                "{:<12} --> 상품 {} 최고 입찰 조회 실패: {}",
                "View", product_id, e
            );
            None
        });
        let mine = api.list_my_bids(product_id).await.unwrap_or_else(|e| {
            warn!(
                "{:<12} --> 상품 {} 내 입찰 조회 실패: {}",
                "View", product_id, e
            );
            Vec::new()
        });
        Ok(Self {
            product_id,
            history,
            mine,
            highest,
        })
    }

    /// 입찰 삭제 (서버 요청)
    /// 실패하면 분류된 에러를 그대로 돌려준다. (화면은 user_message 사용)
    pub async fn delete_my_bid<A>(&mut self, api: &A, bid_id: i64) -> Result<(), ClientError>
    where
        A: AuctionApi + ?Sized,
    {
        if let Err(e) = api.delete_bid(bid_id).await {
            warn!(
                "{:<12} --> 입찰 삭제 실패 id: {}: {}",
                "View",
                bid_id,
                e.user_message()
            );
            return Err(e);
        }
        *self = Self::load(api, self.product_id).await?;
        Ok(())
    }
}

// endregion: --- Product Bids

// endregion: --- Tests
