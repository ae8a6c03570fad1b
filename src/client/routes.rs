/// 로그인
pub const LOGIN: &str = "/user/login/";

/// 회원가입
pub const REGISTER: &str = "/user/register/";

/// 로그아웃
pub const LOGOUT: &str = "/user/logout/";

/// 토큰 갱신
pub const REFRESH: &str = "/user/refresh/";

/// 모든 상품 조회 / 상품 등록
pub const PRODUCTS: &str = "/products/";

/// 내 상품 목록 조회
pub const MY_LISTINGS: &str = "/products/my-listings/";

/// 상품 조회 / 상품 삭제
pub fn product(product_id: i64) -> String {
    format!("/products/{product_id}/")
}

/// 상품 이미지 업로드
pub fn product_images(product_id: i64) -> String {
    format!("/products/{product_id}/images/")
}

/// 상품 입찰 이력 조회 / 입찰
pub fn product_bids(product_id: i64) -> String {
    format!("/products/{product_id}/bids/")
}

/// 상품에 대한 내 입찰 조회
pub fn my_bids(product_id: i64) -> String {
    format!("/products/{product_id}/my-bids/")
}

/// 최고 입찰 조회
pub fn highest_bid(product_id: i64) -> String {
    format!("/products/{product_id}/highest-bid/")
}

/// 낙찰 처리
pub fn sell(product_id: i64) -> String {
    format!("/products/{product_id}/sell/")
}

/// 입찰 삭제
pub fn bid(bid_id: i64) -> String {
    format!("/bids/{bid_id}/")
}
