//! Driving port for back-office catalogue edits.
use async_trait::async_trait;

use crate::domain::{
    Category, CategoryDetails, CategoryId, Error, ProductDetails, ProductId, ProductView,
    SubcategoryDetails, SubcategoryId, SubcategoryView,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueCommand: Send + Sync {
    async fn create_product(&self, details: ProductDetails) -> Result<ProductView, Error>;

    /// Replace every editable field of a product.
    async fn update_product(
        &self,
        id: &ProductId,
        details: ProductDetails,
    ) -> Result<ProductView, Error>;

    async fn delete_product(&self, id: &ProductId) -> Result<(), Error>;

    async fn create_category(&self, details: CategoryDetails) -> Result<Category, Error>;

    async fn update_category(
        &self,
        id: &CategoryId,
        details: CategoryDetails,
    ) -> Result<Category, Error>;

    /// Refused while products reference the category; otherwise removes its
    /// subcategories too.
    async fn delete_category(&self, id: &CategoryId) -> Result<(), Error>;

    async fn create_subcategory(&self, details: SubcategoryDetails)
    -> Result<SubcategoryView, Error>;

    async fn update_subcategory(
        &self,
        id: &SubcategoryId,
        details: SubcategoryDetails,
    ) -> Result<SubcategoryView, Error>;

    async fn delete_subcategory(&self, id: &SubcategoryId) -> Result<(), Error>;
}
