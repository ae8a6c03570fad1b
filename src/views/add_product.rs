// region:    --- Imports
use crate::auction::model::{ImageUpload, NewProduct, Product};
use crate::client::AuctionApi;
use crate::error::ClientError;
use chrono::{DateTime, Utc};
use tracing::info;

// endregion: --- Imports

// region:    --- Add Product
/// 상품 등록 화면
pub struct AddProduct;

impl AddProduct {
    /// 검증 -> 상품 등록 -> 이미지 업로드 (있는 경우)
    pub async fn submit<A>(
        api: &A,
        form: &NewProduct,
        images: Vec<ImageUpload>,
        now: DateTime<Utc>,
    ) -> Result<Product, ClientError>
    where
        A: AuctionApi + ?Sized,
    {
        form.validate(now).map_err(ClientError::Validation)?;

        let product = api.create_product(form).await?;
        info!("{:<12} --> 상품 등록 완료 id: {}", "View", product.id);

        if !images.is_empty() {
            api.upload_product_images(product.id, images).await?;
        }
        Ok(product)
    }
}

// endregion: --- Add Product

// endregion: --- Tests
