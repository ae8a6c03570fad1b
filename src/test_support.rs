// region:    --- Imports
use crate::auction::model::{Bid, ImageUpload, NewProduct, Product};
use crate::client::AuctionApi;
use crate::error::ClientError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

// endregion: --- Imports

// region:    --- Fixtures
pub fn product(id: i64, sold: bool, highest_bid_id: Option<i64>) -> Product {
    Product {
        id,
        title: format!("상품 {id}"),
        description: format!("상품 {id} 설명"),
        starting_price: 100.0 * id as f64,
        category: None,
        images: vec![],
        sold,
        highest_bid_id,
        highest_bid_amount: 0.0,
        is_listed: true,
        start_date: None,
        end_date: None,
        seller: None,
    }
}

pub fn bid(id: i64, amount: f64) -> Bid {
    Bid {
        id,
        product_id: None,
        bidder: None,
        username: None,
        amount,
        bid_time: None,
        start_date: None,
        end_date: None,
    }
}

// endregion: --- Fixtures

// region:    --- Fake Api
#[derive(Default)]
struct State {
    products: Vec<Product>,
    listings: Vec<i64>,
    bids: HashMap<i64, Vec<Bid>>,
    my_bids: HashMap<i64, Vec<Bid>>,
    failing: HashSet<i64>,
    failing_highest: HashSet<i64>,
    blocking: HashSet<i64>,
    logged_out: bool,
    uploads: HashMap<i64, usize>,
}

/// 메모리 기반 가짜 API
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<State>,
}

impl FakeApi {
    pub fn new(products: Vec<Product>) -> Self {
        let listings = products.iter().map(|p| p.id).collect();
        Self {
            state: Mutex::new(State {
                products,
                listings,
                ..State::default()
            }),
        }
    }

    /// 내 입찰로 등록하고 전체 입찰 이력에도 추가
    pub fn with_my_bids(self, product_id: i64, bids: Vec<Bid>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state
                .bids
                .entry(product_id)
                .or_default()
                .extend(bids.iter().cloned());
            state.my_bids.entry(product_id).or_default().extend(bids);
        }
        self
    }

    pub fn with_bids(self, product_id: i64, bids: Vec<Bid>) -> Self {
        self.state
            .lock()
            .unwrap()
            .bids
            .entry(product_id)
            .or_default()
            .extend(bids);
        self
    }

    pub fn failing(self, product_id: i64) -> Self {
        self.state.lock().unwrap().failing.insert(product_id);
        self
    }

    /// 최고 입찰 조회만 실패
    pub fn failing_highest(self, product_id: i64) -> Self {
        self.state.lock().unwrap().failing_highest.insert(product_id);
        self
    }

    /// 내 입찰 조회가 끝나지 않는 상품
    pub fn blocking(self, product_id: i64) -> Self {
        self.state.lock().unwrap().blocking.insert(product_id);
        self
    }

    /// 세션 없음: 인증이 필요한 조회는 NotAuthenticated
    pub fn logged_out(self) -> Self {
        self.state.lock().unwrap().logged_out = true;
        self
    }

    pub fn uploads(&self, product_id: i64) -> usize {
        self.state
            .lock()
            .unwrap()
            .uploads
            .get(&product_id)
            .copied()
            .unwrap_or(0)
    }

    fn check(state: &State, product_id: i64) -> Result<(), ClientError> {
        if state.failing.contains(&product_id) {
            return Err(ClientError::NetworkOrServer {
                status: Some(500),
                message: "서버 오류".to_string(),
            });
        }
        Ok(())
    }

    fn not_found(what: &str) -> ClientError {
        ClientError::NotFound {
            message: format!("{what} 없음"),
        }
    }
}

#[async_trait]
impl AuctionApi for FakeApi {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        Ok(self.state.lock().unwrap().products.clone())
    }

    async fn get_product(&self, product_id: i64) -> Result<Product, ClientError> {
        let state = self.state.lock().unwrap();
        state
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| Self::not_found("상품"))
    }

    async fn my_listings(&self) -> Result<Vec<Product>, ClientError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|p| state.listings.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn list_bids(&self, product_id: i64) -> Result<Vec<Bid>, ClientError> {
        let state = self.state.lock().unwrap();
        Self::check(&state, product_id)?;
        Ok(state.bids.get(&product_id).cloned().unwrap_or_default())
    }

    async fn list_my_bids(&self, product_id: i64) -> Result<Vec<Bid>, ClientError> {
        let result = {
            let state = self.state.lock().unwrap();
            if state.blocking.contains(&product_id) {
                None
            } else if state.logged_out {
                Some(Err(ClientError::NotAuthenticated))
            } else {
                Some(
                    Self::check(&state, product_id)
                        .map(|_| state.my_bids.get(&product_id).cloned().unwrap_or_default()),
                )
            }
        };
        match result {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }

    async fn highest_bid(&self, product_id: i64) -> Result<Option<Bid>, ClientError> {
        let state = self.state.lock().unwrap();
        if state.failing_highest.contains(&product_id) {
            return Err(ClientError::NetworkOrServer {
                status: Some(503),
                message: "서버 오류".to_string(),
            });
        }
        let Some(highest) = state
            .products
            .iter()
            .find(|p| p.id == product_id)
            .and_then(|p| p.highest_bid_id)
        else {
            return Ok(None);
        };
        Ok(state
            .bids
            .get(&product_id)
            .and_then(|bids| bids.iter().find(|b| b.id == highest))
            .cloned())
    }

    async fn create_product(&self, new: &NewProduct) -> Result<Product, ClientError> {
        let mut state = self.state.lock().unwrap();
        let id = state.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let mut created = product(id, false, None);
        created.title = new.title.clone();
        created.description = new.description.clone();
        created.starting_price = new.starting_price;
        created.category = Some(new.category);
        state.products.push(created.clone());
        state.listings.push(id);
        Ok(created)
    }

    async fn upload_product_images(
        &self,
        product_id: i64,
        images: Vec<ImageUpload>,
    ) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        *state.uploads.entry(product_id).or_default() += images.len();
        Ok(())
    }

    async fn place_bid(&self, product_id: i64, amount: f64) -> Result<Bid, ClientError> {
        let mut state = self.state.lock().unwrap();
        let id = state
            .bids
            .values()
            .flatten()
            .map(|b| b.id)
            .max()
            .unwrap_or(100)
            + 1;
        let mut placed = bid(id, amount);
        placed.product_id = Some(product_id);
        state.bids.entry(product_id).or_default().push(placed.clone());
        state
            .my_bids
            .entry(product_id)
            .or_default()
            .push(placed.clone());
        if let Some(p) = state.products.iter_mut().find(|p| p.id == product_id) {
            p.highest_bid_id = Some(id);
        }
        Ok(placed)
    }

    async fn delete_bid(&self, bid_id: i64) -> Result<(), ClientError> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        let sold_with_bid = state
            .products
            .iter()
            .any(|p| p.sold && p.highest_bid_id == Some(bid_id));
        if sold_with_bid {
            return Err(ClientError::InvalidState {
                message: "판매 완료된 입찰".to_string(),
            });
        }

        let mut found = false;
        for bids in state.bids.values_mut().chain(state.my_bids.values_mut()) {
            let before = bids.len();
            bids.retain(|b| b.id != bid_id);
            found |= bids.len() != before;
        }
        if found {
            Ok(())
        } else {
            Err(Self::not_found("입찰"))
        }
    }

    async fn delete_product(&self, product_id: i64) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        let before = state.products.len();
        state.products.retain(|p| p.id != product_id);
        if state.products.len() == before {
            return Err(Self::not_found("상품"));
        }
        Ok(())
    }

    async fn sell_product(&self, product_id: i64, bid_id: i64) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| Self::not_found("상품"))?;
        product.sold = true;
        product.highest_bid_id = Some(bid_id);
        Ok(())
    }
}

// endregion: --- Fake Api
