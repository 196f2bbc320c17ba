//! Persistence ports for categories, subcategories, and products.
//!
//! All three share one error type because adapters back them with the same
//! store and the services map failures identically.

use async_trait::async_trait;

use crate::domain::{
    Category, CategoryId, Product, ProductId, ProductListQuery, Subcategory, SubcategoryId,
};

use super::define_port_error;

define_port_error! {
    /// Failures raised by catalogue stores.
    pub enum CatalogueRepositoryError {
        Connection { message: String } => "catalogue store connection failed: {message}",
        Query { message: String } => "catalogue store query failed: {message}",
        /// A uniqueness rule rejected the write.
        Duplicate { message: String } => "{message}",
        /// The record points at a parent that does not exist.
        MissingParent { message: String } => "{message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Categories ordered by `(sort_order, name)`.
    async fn list(&self, active_only: bool) -> Result<Vec<Category>, CatalogueRepositoryError>;

    async fn find(&self, id: &CategoryId) -> Result<Option<Category>, CatalogueRepositoryError>;

    /// Insert a category; a taken name yields `Duplicate`.
    async fn insert(&self, category: &Category) -> Result<(), CatalogueRepositoryError>;

    /// Replace a category. Returns `false` when the id is unknown.
    async fn update(&self, category: &Category) -> Result<bool, CatalogueRepositoryError>;

    /// Delete a category together with its subcategories. Returns `false`
    /// when the id is unknown.
    async fn delete(&self, id: &CategoryId) -> Result<bool, CatalogueRepositoryError>;

    async fn count(&self) -> Result<u64, CatalogueRepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubcategoryRepository: Send + Sync {
    /// Subcategories ordered by `(sort_order, name)`, optionally limited to
    /// one category.
    async fn list(
        &self,
        category: Option<CategoryId>,
        active_only: bool,
    ) -> Result<Vec<Subcategory>, CatalogueRepositoryError>;

    async fn find(
        &self,
        id: &SubcategoryId,
    ) -> Result<Option<Subcategory>, CatalogueRepositoryError>;

    /// Insert a subcategory; a name already used in the same category
    /// yields `Duplicate`.
    async fn insert(&self, subcategory: &Subcategory) -> Result<(), CatalogueRepositoryError>;

    async fn update(&self, subcategory: &Subcategory) -> Result<bool, CatalogueRepositoryError>;

    async fn delete(&self, id: &SubcategoryId) -> Result<bool, CatalogueRepositoryError>;

    async fn count(&self) -> Result<u64, CatalogueRepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// One page of matching products and the total match count.
    async fn list(
        &self,
        query: &ProductListQuery,
    ) -> Result<(Vec<Product>, u64), CatalogueRepositoryError>;

    async fn find(&self, id: &ProductId) -> Result<Option<Product>, CatalogueRepositoryError>;

    /// Fetch every listed product; unknown ids are skipped.
    async fn find_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, CatalogueRepositoryError>;

    async fn insert(&self, product: &Product) -> Result<(), CatalogueRepositoryError>;

    async fn update(&self, product: &Product) -> Result<bool, CatalogueRepositoryError>;

    async fn delete(&self, id: &ProductId) -> Result<bool, CatalogueRepositoryError>;

    async fn count(&self) -> Result<u64, CatalogueRepositoryError>;

    async fn count_in_category(&self, id: &CategoryId) -> Result<u64, CatalogueRepositoryError>;

    async fn count_in_subcategory(
        &self,
        id: &SubcategoryId,
    ) -> Result<u64, CatalogueRepositoryError>;
}
