/// 화면 단위 작업 흐름
/// 각 화면이 호출하는 조회/변경 순서를 정의하고, 그리는 데 필요한 데이터만 돌려준다.
pub mod add_product;
pub mod catalog;
pub mod my_bids;
pub mod my_listings;
pub mod product_bids;

pub use add_product::AddProduct;
pub use catalog::{CatalogFilter, PriceRange};
pub use my_bids::MyBids;
pub use my_listings::MyListings;
pub use product_bids::ProductBids;
