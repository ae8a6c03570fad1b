use crate::auction::model::{Bid, ImageUpload, NewProduct, Product};
use crate::error::ClientError;
use async_trait::async_trait;

/// 경매 서비스 API 트레이트
/// 화면 로직과 입찰 상태 계산은 이 트레이트에만 의존한다.
#[async_trait]
pub trait AuctionApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError>;

    async fn get_product(&self, product_id: i64) -> Result<Product, ClientError>;

    async fn my_listings(&self) -> Result<Vec<Product>, ClientError>;

    async fn list_bids(&self, product_id: i64) -> Result<Vec<Bid>, ClientError>;

    async fn list_my_bids(&self, product_id: i64) -> Result<Vec<Bid>, ClientError>;

    /// 입찰이 없으면 Ok(None)
    async fn highest_bid(&self, product_id: i64) -> Result<Option<Bid>, ClientError>;

    async fn create_product(&self, product: &NewProduct) -> Result<Product, ClientError>;

    async fn upload_product_images(
        &self,
        product_id: i64,
        images: Vec<ImageUpload>,
    ) -> Result<(), ClientError>;

    async fn place_bid(&self, product_id: i64, amount: f64) -> Result<Bid, ClientError>;

    async fn delete_bid(&self, bid_id: i64) -> Result<(), ClientError>;

    async fn delete_product(&self, product_id: i64) -> Result<(), ClientError>;

    /// 낙찰 처리
    async fn sell_product(&self, product_id: i64, bid_id: i64) -> Result<(), ClientError>;
}
