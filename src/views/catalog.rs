use crate::auction::model::{Category, Product};
use std::str::FromStr;

/// 가격대 필터 ("all" 또는 "min-max", 양 끝 포함)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PriceRange {
    #[default]
    All,
    Between(f64, f64),
}

impl FromStr for PriceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(PriceRange::All);
        }
        let (min, max) = s
            .split_once('-')
            .ok_or_else(|| format!("가격대 형식이 올바르지 않습니다: {s}"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("가격대 형식이 올바르지 않습니다: {s} ({e})"))
        };
        let (min, max) = (parse(min)?, parse(max)?);
        if min > max {
            return Err(format!("최소 가격이 최대 가격보다 큽니다: {s}"));
        }
        Ok(PriceRange::Between(min, max))
    }
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        match self {
            PriceRange::All => true,
            PriceRange::Between(min, max) => price >= *min && price <= *max,
        }
    }
}

/// 상품 목록 검색 / 필터
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub query: String,
    pub category: Option<Category>,
    pub price: PriceRange,
}

impl CatalogFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let query = self.query.to_lowercase();
        let matches_search = product.title.to_lowercase().contains(&query)
            || product.description.to_lowercase().contains(&query);

        let matches_category = match self.category {
            None => true,
            Some(category) => product.category == Some(category),
        };

        matches_search && matches_category && self.price.contains(product.starting_price)
    }

    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}
