use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::currency::CURRENCY_SYMBOL;

/// Product families shown on the products page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    Cotton,
    Silk,
    Wool,
    Synthetic,
    EcoFriendly,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Cotton => "cotton",
            ProductCategory::Silk => "silk",
            ProductCategory::Wool => "wool",
            ProductCategory::Synthetic => "synthetic",
            ProductCategory::EcoFriendly => "eco-friendly",
        }
    }
}

impl FromStr for ProductCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cotton" => Ok(ProductCategory::Cotton),
            "silk" => Ok(ProductCategory::Silk),
            "wool" => Ok(ProductCategory::Wool),
            "synthetic" => Ok(ProductCategory::Synthetic),
            "eco-friendly" => Ok(ProductCategory::EcoFriendly),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Whole currency units per meter.
    pub price: i64,
    pub currency: String,
    pub category: ProductCategory,
    pub image: String,
    pub in_stock: bool,
    pub rating: f64,
    pub review_count: u32,
    pub tags: Vec<String>,
}

impl Product {
    fn matches_query(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self.description.to_lowercase().contains(query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(query))
    }
}

/// Read-only product listing.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// `None` or `"all"` lists everything; an unrecognised category lists nothing.
    pub fn by_category(&self, category: Option<&str>) -> Vec<&Product> {
        self.filter(category, None)
    }

    /// Case-insensitive match against name, description and tags. A blank query matches all.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.filter(None, Some(query))
    }

    pub fn filter(&self, category: Option<&str>, query: Option<&str>) -> Vec<&Product> {
        let category = match category.map(str::trim) {
            None | Some("") => None,
            Some(c) if c.eq_ignore_ascii_case("all") => None,
            Some(c) => match c.parse::<ProductCategory>() {
                Ok(parsed) => Some(parsed),
                Err(()) => return Vec::new(),
            },
        };
        let query = query
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        self.products
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .filter(|p| query.as_deref().map_or(true, |q| p.matches_query(q)))
            .collect()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        let product = |id: &str,
                       name: &str,
                       description: &str,
                       price: i64,
                       category: ProductCategory,
                       image: &str,
                       rating: f64,
                       review_count: u32,
                       tags: [&str; 3]| Product {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            currency: CURRENCY_SYMBOL.to_string(),
            category,
            image: format!(
                "https://images.unsplash.com/{}?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300",
                image
            ),
            in_stock: true,
            rating,
            review_count,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        };

        Self::new(vec![
            product(
                "1",
                "Premium Cotton",
                "Ultra-soft, breathable cotton perfect for luxury apparel and home textiles.",
                450,
                ProductCategory::Cotton,
                "photo-1586281380349-632531db7ed4",
                4.8,
                124,
                ["organic", "breathable", "luxury"],
            ),
            product(
                "2",
                "Mulberry Silk",
                "Finest quality mulberry silk with natural sheen and exceptional drape.",
                1200,
                ProductCategory::Silk,
                "photo-1558618666-fcd25c85cd64",
                4.9,
                89,
                ["premium", "natural", "luxury"],
            ),
            product(
                "3",
                "Merino Wool",
                "Temperature-regulating merino wool ideal for premium garments.",
                850,
                ProductCategory::Wool,
                "photo-1515886657613-9f3515b0c78f",
                4.7,
                156,
                ["sustainable", "warm", "premium"],
            ),
            product(
                "4",
                "Tech Performance",
                "Advanced moisture-wicking fabric for athletic and outdoor wear.",
                680,
                ProductCategory::Synthetic,
                "photo-1567721913486-6585f069b332",
                4.6,
                201,
                ["innovation", "performance", "technical"],
            ),
            product(
                "5",
                "Eco Blend",
                "Sustainable fabric made from recycled materials and organic fibers.",
                520,
                ProductCategory::EcoFriendly,
                "photo-1515886657613-9f3515b0c78f",
                4.5,
                78,
                ["recycled", "eco-friendly", "sustainable"],
            ),
            product(
                "6",
                "Luxury Velvet",
                "Rich, plush velvet with deep color saturation for upscale applications.",
                950,
                ProductCategory::Synthetic,
                "photo-1586281380349-632531db7ed4",
                4.8,
                95,
                ["luxury", "plush", "premium"],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: Vec<&Product>) -> Vec<&str> {
        products.into_iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_by_category() {
        let catalog = ProductCatalog::default();
        assert_eq!(catalog.by_category(None).len(), 6);
        assert_eq!(catalog.by_category(Some("all")).len(), 6);
        assert_eq!(ids(catalog.by_category(Some("synthetic"))), vec!["4", "6"]);
        assert_eq!(ids(catalog.by_category(Some("eco-friendly"))), vec!["5"]);
        assert!(catalog.by_category(Some("denim")).is_empty());
    }

    #[test]
    fn test_search_matches_name_description_and_tags() {
        let catalog = ProductCatalog::default();
        assert_eq!(ids(catalog.search("SILK")), vec!["2"]);
        assert_eq!(ids(catalog.search("moisture")), vec!["4"]);
        assert_eq!(ids(catalog.search("luxury")), vec!["1", "2", "6"]);
        assert_eq!(catalog.search("   ").len(), 6);
        assert!(catalog.search("kevlar").is_empty());
    }

    #[test]
    fn test_combined_filter() {
        let catalog = ProductCatalog::default();
        assert_eq!(ids(catalog.filter(Some("synthetic"), Some("plush"))), vec!["6"]);
        assert!(catalog.filter(Some("wool"), Some("silk")).is_empty());
    }

    #[test]
    fn test_get_and_currency() {
        let catalog = ProductCatalog::default();
        let velvet = catalog.get("6").unwrap();
        assert_eq!(velvet.name, "Luxury Velvet");
        assert_eq!(velvet.currency, "৳");
        assert!(catalog.get("99").is_none());
    }
}
