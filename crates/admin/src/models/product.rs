//! Catalog products.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storedesk_core::derive::{in_range, matches_eq, matches_text};
use storedesk_core::{
    Criteria, CurrencyCode, Price, ProductId, ProductStatus, Record, SortDirection, Toggle,
};

use super::{ValidationError, blank_as_none, blank_variant_as_none, required};

/// Stock level at or below which a product counts as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// A product in the store catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub description: String,
    pub category: String,
    pub status: ProductStatus,
    pub price: Price,
    pub stock: u32,
    /// Units sold to date.
    pub sales: u32,
    /// Revenue to date, in the price currency.
    pub revenue: Decimal,
    /// Average review score, 0.0 to 5.0.
    pub rating: f32,
    pub featured: bool,
    pub tags: Vec<String>,
}

impl Product {
    /// Whether stock has fallen to the low-stock threshold.
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock <= LOW_STOCK_THRESHOLD
    }
}

/// Shallow update of a product; `None` fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<ProductStatus>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub featured: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl ProductPatch {
    /// Reject patches that would leave the product invalid.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank name or a negative price.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            required("name", name)?;
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        Ok(())
    }
}

/// Boolean fields of a product that can be flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductFlag {
    Featured,
}

impl Record for Product {
    type Id = ProductId;
    type Patch = ProductPatch;

    fn id(&self) -> ProductId {
        self.id
    }

    fn set_id(&mut self, id: ProductId) {
        self.id = id;
    }

    fn apply(&mut self, patch: &ProductPatch) {
        if let Some(name) = &patch.name {
            name.trim().clone_into(&mut self.name);
        }
        if let Some(sku) = &patch.sku {
            self.sku.clone_from(sku);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(category) = &patch.category {
            self.category.clone_from(category);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(price) = patch.price {
            self.price.amount = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(tags) = &patch.tags {
            self.tags.clone_from(tags);
        }
    }
}

impl Toggle for Product {
    type Flag = ProductFlag;

    fn flip(&mut self, flag: ProductFlag) {
        match flag {
            ProductFlag::Featured => self.featured = !self.featured,
        }
    }
}

/// Product creation form.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub status: ProductStatus,
    pub price: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewProduct {
    /// Validate the form and build a product with no sales history.
    ///
    /// The returned product carries a placeholder id; the collection assigns
    /// the real one.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank name or category, or a negative price.
    pub fn into_product(self) -> Result<Product, ValidationError> {
        let name = required("name", &self.name)?;
        let category = required("category", &self.category)?;
        check_price(self.price)?;

        let sku = if self.sku.trim().is_empty() {
            generate_sku(&name)
        } else {
            self.sku.trim().to_uppercase()
        };

        Ok(Product {
            id: ProductId::new(0),
            name,
            sku,
            description: self.description.trim().to_string(),
            category,
            status: self.status,
            price: Price::new(self.price, self.currency),
            stock: self.stock,
            sales: 0,
            revenue: Decimal::ZERO,
            rating: 0.0,
            featured: self.featured,
            tags: self
                .tags
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        })
    }
}

fn check_price(price: Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::TooSmall {
            field: "price",
            min: "0".to_string(),
        });
    }
    Ok(())
}

/// Derive a SKU stem from the first letters of the product name's words.
fn generate_sku(name: &str) -> String {
    let stem: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().find(char::is_ascii_alphanumeric))
        .map(|c| c.to_ascii_uppercase())
        .take(4)
        .collect();
    if stem.is_empty() {
        "SKU-NEW".to_string()
    } else {
        format!("{stem}-NEW")
    }
}

/// Columns the product list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    Name,
    Price,
    Stock,
    Sales,
    Revenue,
    Rating,
}

impl ProductSort {
    /// Compare two products on this column.
    #[must_use]
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::Price => a.price.amount.cmp(&b.price.amount),
            Self::Stock => a.stock.cmp(&b.stock),
            Self::Sales => a.sales.cmp(&b.sales),
            Self::Revenue => a.revenue.cmp(&b.revenue),
            Self::Rating => a.rating.total_cmp(&b.rating),
        }
    }
}

/// Product list query: filters plus optional sorting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    /// Matches name, SKU, category and tags.
    pub search: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<ProductStatus>,
    /// Exact category, case-insensitive.
    pub category: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_price: Option<Decimal>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub featured: Option<bool>,
    /// Only products at or below the low-stock threshold.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub low_stock: Option<bool>,
    #[serde(default, deserialize_with = "blank_variant_as_none")]
    pub sort: Option<ProductSort>,
    #[serde(default, deserialize_with = "blank_variant_as_none")]
    pub dir: Option<SortDirection>,
}

impl Criteria<Product> for ProductQuery {
    fn matches(&self, p: &Product) -> bool {
        let tags = p.tags.join(" ");
        matches_text(
            self.search.as_deref(),
            &[&p.name, &p.sku, &p.category, &tags],
        ) && matches_eq(&p.status, self.status.as_ref())
            && self
                .category
                .as_deref()
                .is_none_or(|c| c.trim().is_empty() || p.category.eq_ignore_ascii_case(c.trim()))
            && in_range(
                &p.price.amount,
                self.min_price.as_ref(),
                self.max_price.as_ref(),
            )
            && matches_eq(&p.featured, self.featured.as_ref())
            && self.low_stock.is_none_or(|low| p.is_low_stock() == low)
    }
}
