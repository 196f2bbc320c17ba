//! Driving port for catalogue reads, public and back office alike.
use async_trait::async_trait;

use crate::domain::{
    Category, CategoryId, Error, Page, ProductId, ProductListQuery, ProductView, SubcategoryView,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    async fn list_products(&self, query: ProductListQuery) -> Result<Page<ProductView>, Error>;

    async fn product(&self, id: &ProductId) -> Result<ProductView, Error>;

    /// Featured, in-stock products, newest first.
    async fn featured_products(&self, limit: u32) -> Result<Vec<ProductView>, Error>;

    /// Categories in display order.
    async fn categories(&self, active_only: bool) -> Result<Vec<Category>, Error>;

    /// Subcategories of one category in display order, or every
    /// subcategory ordered by category name first.
    async fn subcategories(
        &self,
        category: Option<CategoryId>,
        active_only: bool,
    ) -> Result<Vec<SubcategoryView>, Error>;
}
