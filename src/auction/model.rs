use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// region:    --- Product
/// 상품 분류 (새 상품 / 중고)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    New,
    Used,
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Category::New),
            "used" => Ok(Category::Used),
            other => Err(format!("알 수 없는 상품 분류: {other}")),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::New => f.write_str("new"),
            Category::Used => f.write_str("used"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
}

/// 상품 모델 (서버 응답을 정규화한 형태)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub starting_price: f64,
    pub category: Option<Category>,
    pub images: Vec<ProductImage>,
    pub sold: bool,
    pub highest_bid_id: Option<i64>,
    pub highest_bid_amount: f64,
    pub is_listed: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub seller: Option<i64>,
}

impl Product {
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }
}

// endregion: --- Product

// region:    --- Bid
/// 입찰 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub id: i64,
    pub product_id: Option<i64>,
    pub bidder: Option<i64>,
    pub username: Option<String>,
    pub amount: f64,
    pub bid_time: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

// endregion: --- Bid

// region:    --- User
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// 로그인 응답
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

// endregion: --- User

// region:    --- Commands
/// 상품 등록 요청
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub starting_price: f64,
    #[serde(rename = "category_new_used")]
    pub category: Category,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl NewProduct {
    /// 등록 전 입력값 검증
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("상품명을 입력해야 합니다.".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("상품 설명을 입력해야 합니다.".to_string());
        }
        if !self.starting_price.is_finite() || self.starting_price < 0.0 {
            return Err("시작 가격은 0 이상이어야 합니다.".to_string());
        }
        if self.start_date < now {
            return Err("시작 시간은 과거일 수 없습니다.".to_string());
        }
        if self.end_date <= self.start_date {
            return Err("종료 시간은 시작 시간 이후여야 합니다.".to_string());
        }
        Ok(())
    }
}

/// 업로드할 상품 이미지
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PlaceBidRequest {
    pub bid_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SellRequest {
    pub bid_id: i64,
}

// endregion: --- Commands

// endregion: --- Tests
