use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::validation::{count, optional_text, price, required_text};
use super::{
    CatalogueValidationError, CategorySummary, DESCRIPTION_MAX, NAME_MAX, SubcategorySummary,
    URL_MAX,
};
use crate::domain::{CategoryId, Price, ProductId, SubcategoryId};

const SHORT_TEXT_MAX: usize = 100;
const TAG_MAX: usize = 50;

/// Raw product fields from an administrator.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub image: String,
    pub images: Vec<String>,
    pub category_id: CategoryId,
    pub subcategory_id: Option<SubcategoryId>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub specifications: BTreeMap<String, String>,
    pub tags: Vec<String>,
    pub in_stock: bool,
    pub stock_quantity: i64,
    pub featured: bool,
    pub rating: f64,
    pub review_count: i64,
    pub is_active: bool,
}

impl ProductDraft {
    /// Check field shapes.
    ///
    /// Whether the category exists and owns the subcategory is checked by the
    /// catalogue service, which can see the store.
    pub fn validate(self) -> Result<ProductDetails, CatalogueValidationError> {
        if !self.rating.is_finite() {
            return Err(CatalogueValidationError::NotFinite { field: "rating" });
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(CatalogueValidationError::RatingOutOfRange);
        }

        Ok(ProductDetails {
            name: required_text(&self.name, "name", NAME_MAX)?,
            description: required_text(&self.description, "description", DESCRIPTION_MAX)?,
            price: price(self.price, "price")?,
            original_price: self
                .original_price
                .map(|value| price(value, "originalPrice"))
                .transpose()?,
            image: optional_text(&self.image, "image", URL_MAX)?,
            images: clean_list(self.images, "images", URL_MAX)?,
            category_id: self.category_id,
            subcategory_id: self.subcategory_id,
            brand: optional_field(self.brand, "brand")?,
            model: optional_field(self.model, "model")?,
            specifications: self
                .specifications
                .into_iter()
                .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
                .filter(|(key, _)| !key.is_empty())
                .collect(),
            tags: clean_list(self.tags, "tags", TAG_MAX)?,
            in_stock: self.in_stock,
            stock_quantity: count(self.stock_quantity, "stockQuantity")?,
            featured: self.featured,
            rating: self.rating,
            review_count: count(self.review_count, "reviewCount")?,
            is_active: self.is_active,
        })
    }
}

fn optional_field(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<String>, CatalogueValidationError> {
    value
        .map(|raw| optional_text(&raw, field, SHORT_TEXT_MAX))
        .transpose()
        .map(|cleaned| cleaned.filter(|text| !text.is_empty()))
}

fn clean_list(
    values: Vec<String>,
    field: &'static str,
    max: usize,
) -> Result<Vec<String>, CatalogueValidationError> {
    values
        .into_iter()
        .map(|value| optional_text(&value, field, max))
        .filter(|cleaned| !matches!(cleaned, Ok(text) if text.is_empty()))
        .collect()
}

/// Editable product fields after validation. Prices are in BGN.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub original_price: Option<Price>,
    pub image: String,
    pub images: Vec<String>,
    pub category_id: CategoryId,
    pub subcategory_id: Option<SubcategoryId>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub specifications: BTreeMap<String, String>,
    pub tags: Vec<String>,
    pub in_stock: bool,
    pub stock_quantity: u32,
    pub featured: bool,
    pub rating: f64,
    pub review_count: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub details: ProductDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Euro price derived from the stored BGN price.
    pub fn price_eur(&self) -> f64 {
        self.details.price.eur()
    }

    pub fn original_price_eur(&self) -> Option<f64> {
        self.details.original_price.map(Price::eur)
    }

    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.details.name.clone(),
            price: self.details.price.bgn(),
            price_eur: self.price_eur(),
            image: self.details.image.clone(),
        }
    }
}

/// Product reference embedded in order lines.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub price_eur: f64,
    pub image: String,
}

/// A product with its category and subcategory names resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub product: Product,
    pub category: Option<CategorySummary>,
    pub subcategory: Option<SubcategorySummary>,
}
