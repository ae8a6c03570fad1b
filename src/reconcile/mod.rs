/// 입찰 상태 계산
/// 서버가 기록한 highest_bid_id 만을 기준으로 한다. 금액 비교로 최고 입찰을 추정하지 않는다.
// region:    --- Imports
use crate::auction::model::{Bid, Product, ProductImage};
use crate::client::AuctionApi;
use crate::error::ClientError;
use crate::overlay::Tombstones;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

// endregion: --- Imports

// region:    --- Bid Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BidStatus {
    Outbid,
    #[serde(rename = "Highest Bid")]
    HighestBid,
    Accepted,
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidStatus::Outbid => f.write_str("Outbid"),
            BidStatus::HighestBid => f.write_str("Highest Bid"),
            BidStatus::Accepted => f.write_str("Accepted"),
        }
    }
}

/// 입찰 상태 판정
pub fn bid_status(product: &Product, bid: &Bid) -> BidStatus {
    if product.highest_bid_id != Some(bid.id) {
        return BidStatus::Outbid;
    }
    if product.sold {
        BidStatus::Accepted
    } else {
        BidStatus::HighestBid
    }
}

// endregion: --- Bid Status

// region:    --- Bid View
/// 화면에 표시할 입찰 (상품 정보 포함)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidView {
    pub bid: Bid,
    pub product_id: i64,
    pub product_title: String,
    pub product_description: String,
    pub product_images: Vec<ProductImage>,
    pub status: BidStatus,
}

impl BidView {
    pub fn is_accepted(&self) -> bool {
        self.status == BidStatus::Accepted
    }

    pub fn is_highest_bid(&self) -> bool {
        self.status == BidStatus::HighestBid
    }
}

/// 상품 하나에 대한 입찰 목록 상태 계산
pub fn reconcile(product: &Product, bids: Vec<Bid>) -> Vec<BidView> {
    bids.into_iter()
        .map(|bid| BidView {
            status: bid_status(product, &bid),
            product_id: product.id,
            product_title: product.title.clone(),
            product_description: product.description.clone(),
            product_images: product.images.clone(),
            bid,
        })
        .collect()
}

// endregion: --- Bid View

// region:    --- My Bids Batch
/// 모든 상품에 대한 내 입찰 수집
/// 상품별 요청을 동시에 보내고 상품 순서대로 합친다.
/// 한 상품의 조회 실패는 입찰 0건으로 처리한다.
/// 취소되면 진행 중인 결과를 버리고 Cancelled 를 돌려준다.
pub async fn collect_my_bids<A>(
    api: Arc<A>,
    products: &[Product],
    hidden: &Tombstones,
    cancel: &CancellationToken,
) -> Result<Vec<BidView>, ClientError>
where
    A: AuctionApi + ?Sized + 'static,
{
    info!(
        "{:<12} --> 내 입찰 수집 시작: 상품 {}개",
        "Reconcile",
        products.len()
    );

    let handles: Vec<_> = products
        .iter()
        .map(|product| {
            let api = Arc::clone(&api);
            let cancel = cancel.clone();
            let product_id = product.id;
            tokio::spawn(async move {
                tokio::select! {
                    _ = cancel.cancelled() => None,
                    result = api.list_my_bids(product_id) => Some(result),
                }
            })
        })
        .collect();

    let mut views = Vec::new();
    for (product, handle) in products.iter().zip(handles) {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(
                    "{:<12} --> 상품 {} 입찰 조회 작업 실패: {}",
                    "Reconcile", product.id, e
                );
                Some(Ok(Vec::new()))
            }
        };

        let bids = match outcome {
            None => continue,
            Some(Ok(bids)) => bids,
            Some(Err(e)) => {
                warn!(
                    "{:<12} --> 상품 {} 입찰 조회 실패, 건너뜀: {}",
                    "Reconcile", product.id, e
                );
                Vec::new()
            }
        };

        views.extend(reconcile(product, hidden.filter(bids)));
    }

    if cancel.is_cancelled() {
        debug!("{:<12} --> 내 입찰 수집 취소됨", "Reconcile");
        return Err(ClientError::Cancelled);
    }

    info!("{:<12} --> 내 입찰 수집 완료: {}건", "Reconcile", views.len());
    Ok(views)
}

// endregion: --- My Bids Batch

// endregion: --- Tests
