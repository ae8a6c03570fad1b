/// 서버 응답 정규화
/// 상품은 두 가지 형태(name/price 또는 title/starting_price)로 내려온다.
/// 이 모듈에서 한 번만 변환하고, 나머지 코드는 정규화된 모델만 사용한다.
// region:    --- Imports
use super::model::{Bid, Category, Product, ProductImage};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

// endregion: --- Imports

// region:    --- Lenient Scalars
// 식별자(id, title/name)를 제외한 필드는 어떤 값이 와도 역직렬화에 실패하지 않는다.
// 쓸 수 없는 값은 None 이 된다.

/// 숫자 또는 문자열("500.00")로 오는 금액
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite()))
}

/// RFC 3339, 타임존 없는 시각(UTC로 간주) 또는 유닉스 초
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_datetime(&s),
        Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}

/// 숫자 또는 숫자 문자열로 오는 참조 id
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

// endregion: --- Lenient Scalars

// region:    --- Images
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawImage {
    Url(String),
    Object {
        #[serde(default, deserialize_with = "lenient_text")]
        image_url: Option<String>,
        #[serde(default, deserialize_with = "lenient_text")]
        image_data: Option<String>,
        #[serde(default, deserialize_with = "lenient_text")]
        image: Option<String>,
    },
}

impl RawImage {
    fn into_image(self) -> Option<ProductImage> {
        let url = match self {
            RawImage::Url(url) => Some(url),
            RawImage::Object {
                image_url,
                image_data,
                image,
            } => image_url.or(image_data).or(image),
        }?;
        (!url.is_empty()).then_some(ProductImage { url })
    }
}

/// 이미지 목록 (형식이 맞지 않는 원소만 제외)
fn lenient_images<'de, D>(deserializer: D) -> Result<Vec<ProductImage>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<RawImage>(item).ok())
        .filter_map(RawImage::into_image)
        .collect())
}

// endregion: --- Images

// region:    --- Raw Product
/// name/price 형태
#[derive(Debug, Deserialize)]
pub struct LegacyShape {
    id: i64,
    name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    condition: Option<String>,
    #[serde(default, deserialize_with = "lenient_images")]
    images: Vec<ProductImage>,
    #[serde(default, deserialize_with = "lenient_bool")]
    sold: Option<bool>,
    #[serde(default, deserialize_with = "lenient_id")]
    highest_bid_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    highest_bid: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    is_listed: Option<bool>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_id")]
    seller: Option<i64>,
}

/// title/starting_price 형태
#[derive(Debug, Deserialize)]
pub struct ListingShape {
    id: i64,
    title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    starting_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    category_new_used: Option<String>,
    #[serde(default, deserialize_with = "lenient_images")]
    images: Vec<ProductImage>,
    #[serde(default, deserialize_with = "lenient_bool")]
    sold: Option<bool>,
    #[serde(default, deserialize_with = "lenient_id")]
    highest_bid_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    highest_bid_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    is_listed: Option<bool>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_id")]
    seller: Option<i64>,
}

/// 서버가 내려주는 상품 원본
/// name 이 있으면 Legacy 가 우선한다.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawProduct {
    Legacy(LegacyShape),
    Listing(ListingShape),
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        match raw {
            RawProduct::Legacy(p) => Product {
                id: p.id,
                title: p.name,
                description: p.description.unwrap_or_default(),
                starting_price: p.price.unwrap_or(0.0),
                category: p.condition.and_then(|c| c.parse().ok()),
                images: p.images,
                sold: p.sold.unwrap_or(false),
                highest_bid_id: p.highest_bid_id,
                highest_bid_amount: p.highest_bid.unwrap_or(0.0),
                is_listed: p.is_listed.unwrap_or(true),
                start_date: p.start_date,
                end_date: p.end_date,
                seller: p.seller,
            },
            RawProduct::Listing(p) => Product {
                id: p.id,
                title: p.title,
                description: p.description.unwrap_or_default(),
                starting_price: p.starting_price.unwrap_or(0.0),
                category: p.category_new_used.and_then(|c| c.parse::<Category>().ok()),
                images: p.images,
                sold: p.sold.unwrap_or(false),
                highest_bid_id: p.highest_bid_id,
                highest_bid_amount: p.highest_bid_amount.unwrap_or(0.0),
                is_listed: p.is_listed.unwrap_or(true),
                start_date: p.start_date,
                end_date: p.end_date,
                seller: p.seller,
            },
        }
    }
}

// endregion: --- Raw Product

// region:    --- Raw Bid
/// 서버가 내려주는 입찰 원본 (bid_id 또는 id)
#[derive(Debug, Deserialize)]
pub struct RawBid {
    #[serde(default, deserialize_with = "lenient_id")]
    bid_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    product: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    product_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    bidder: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    username: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    bid_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    bid_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    end_date: Option<DateTime<Utc>>,
}

impl RawBid {
    /// 식별자가 없으면 None
    pub fn into_bid(self) -> Option<Bid> {
        Some(Bid {
            id: self.bid_id.or(self.id)?,
            product_id: self.product_id.or(self.product),
            bidder: self.bidder,
            username: self.username,
            amount: self.bid_amount.or(self.amount).unwrap_or(0.0),
            bid_time: self.bid_time,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

// endregion: --- Raw Bid

// region:    --- List Normalization
/// 상품 목록 정규화 (형식이 맞지 않는 항목은 경고 후 제외)
pub fn products(values: Vec<Value>) -> Vec<Product> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawProduct>(value.clone()) {
            Ok(raw) => Some(Product::from(raw)),
            Err(e) => {
                warn!(
                    "{:<12} --> 잘못된 상품 데이터 제외: {} ({})",
                    "Normalize", value, e
                );
                None
            }
        })
        .collect()
}

/// 단일 상품 정규화
pub fn product(value: Value) -> Result<Product, serde_json::Error> {
    serde_json::from_value::<RawProduct>(value).map(Product::from)
}

/// 입찰 목록 정규화 (식별자가 없는 항목은 경고 후 제외)
pub fn bids(values: Vec<Value>) -> Vec<Bid> {
    values
        .into_iter()
        .filter_map(|value| {
            let bid = serde_json::from_value::<RawBid>(value.clone())
                .ok()
                .and_then(RawBid::into_bid);
            if bid.is_none() {
                warn!("{:<12} --> 잘못된 입찰 데이터 제외: {}", "Normalize", value);
            }
            bid
        })
        .collect()
}

/// 단일 입찰 정규화
pub fn bid(value: Value) -> Option<Bid> {
    serde_json::from_value::<RawBid>(value)
        .ok()
        .and_then(RawBid::into_bid)
}

// endregion: --- List Normalization

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_shape_is_canonicalized() {
        let product = product(json!({
            "id": 3,
            "name": "Lamp",
            "price": "250.50",
            "condition": "Used",
            "highest_bid": 300,
            "images": ["https://cdn/lamp.png"]
        }))
        .unwrap();

        assert_eq!(product.title, "Lamp");
        assert_eq!(product.starting_price, 250.5);
        assert_eq!(product.category, Some(Category::Used));
        assert_eq!(product.highest_bid_amount, 300.0);
        assert_eq!(product.cover_image(), Some("https://cdn/lamp.png"));
        assert!(product.is_listed);
        assert_eq!(product.description, "");
    }

    #[test]
    fn listing_shape_with_nested_images() {
        let product = product(json!({
            "id": 1,
            "title": "Bike",
            "description": "Road bike",
            "starting_price": 500,
            "category_new_used": "new",
            "sold": true,
            "highest_bid_id": 10,
            "is_listed": false,
            "images": [{"image_url": ""}, {"image_data": "data:image/png;base64,AA"}],
            "start_date": "2026-01-01T10:00",
            "end_date": "2026-01-02T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(product.title, "Bike");
        assert!(product.sold);
        assert_eq!(product.highest_bid_id, Some(10));
        assert!(!product.is_listed);
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.cover_image(), Some("data:image/png;base64,AA"));
        assert!(product.start_date.is_some());
        assert!(product.end_date.is_some());
    }

    #[test]
    fn invalid_products_are_dropped_from_lists() {
        let list = products(vec![
            json!({"id": 1, "title": "ok"}),
            json!({"title": "no id"}),
            json!({"id": 2}),
            json!("garbage"),
        ]);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, 1);
    }

    #[test]
    fn malformed_optional_fields_do_not_drop_the_product() {
        let list = products(vec![
            json!({"id": 1, "title": "ok"}),
            json!({"id": 2, "title": "null sold", "sold": null}),
            json!({"id": 3, "title": "bool price", "starting_price": true}),
            json!({"id": 4, "title": "epoch date", "start_date": 1700000000}),
            json!({"id": 5, "title": "null image", "images": [null, "https://cdn/5.png"]}),
            json!({"id": 6, "name": "legacy", "price": {"v": 1}, "condition": 7, "highest_bid_id": "12"}),
        ]);

        let ids: Vec<i64> = list.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert!(!list[1].sold);
        assert_eq!(list[2].starting_price, 0.0);
        assert_eq!(list[3].start_date.map(|d| d.timestamp()), Some(1_700_000_000));
        assert_eq!(list[4].cover_image(), Some("https://cdn/5.png"));
        assert_eq!(list[5].category, None);
        assert_eq!(list[5].highest_bid_id, Some(12));
    }

    #[test]
    fn malformed_bid_fields_keep_the_bid() {
        let list = bids(vec![json!({
            "id": 7,
            "product": null,
            "amount": [1],
            "bid_time": false,
            "username": 3
        })]);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, 7);
        assert_eq!(list[0].amount, 0.0);
        assert!(list[0].bid_time.is_none());
        assert!(list[0].username.is_none());
    }

    #[test]
    fn bid_prefers_bid_id_and_string_amounts() {
        let bid = bid(json!({
            "bid_id": 11,
            "id": 99,
            "product": 1,
            "bid_amount": "300.00",
            "bid_time": "2026-03-01T12:00:00+09:00"
        }))
        .unwrap();
        assert_eq!(bid.id, 11);
        assert_eq!(bid.product_id, Some(1));
        assert_eq!(bid.amount, 300.0);
        assert!(bid.bid_time.is_some());
    }

    #[test]
    fn bids_without_identifier_are_dropped() {
        let list = bids(vec![json!({"amount": 5}), json!({"id": 4, "amount": 5})]);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, 4);
        assert_eq!(list[0].amount, 5.0);
    }

    #[test]
    fn unparsable_dates_become_none() {
        assert!(parse_datetime("yesterday").is_none());
        assert!(parse_datetime("2026-05-01T08:30").is_some());
    }
}
// endregion: --- Tests
