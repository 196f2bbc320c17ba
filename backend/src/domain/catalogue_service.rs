//! Catalogue reads and back-office edits.
//!
//! Repositories store bare records; this service resolves category and
//! subcategory summaries, enforces cross-record rules (a subcategory belongs
//! to the product's category, no deleting categories still in use), and maps
//! store failures to domain errors.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::port_error_mapping::map_catalogue_error;
use super::ports::{
    CatalogueCommand, CatalogueQuery, CategoryRepository, ProductRepository, SubcategoryRepository,
};
use super::{
    Category, CategoryDetails, CategoryId, CategorySummary, Error, Page, Product, ProductDetails,
    ProductId, ProductListQuery, ProductView, Subcategory, SubcategoryDetails, SubcategoryId,
    SubcategorySummary, SubcategoryView,
};

const PRODUCT_NOT_FOUND: &str = "product not found";
const CATEGORY_NOT_FOUND: &str = "category not found";
const SUBCATEGORY_NOT_FOUND: &str = "subcategory not found";

#[derive(Clone)]
pub struct CatalogueService {
    categories: Arc<dyn CategoryRepository>,
    subcategories: Arc<dyn SubcategoryRepository>,
    products: Arc<dyn ProductRepository>,
    clock: Arc<dyn Clock>,
}

struct SummaryIndex {
    categories: HashMap<CategoryId, CategorySummary>,
    subcategories: HashMap<SubcategoryId, SubcategorySummary>,
}

impl SummaryIndex {
    fn view(&self, product: Product) -> ProductView {
        let category = self.categories.get(&product.details.category_id).cloned();
        let subcategory = product
            .details
            .subcategory_id
            .and_then(|id| self.subcategories.get(&id).cloned());
        ProductView {
            product,
            category,
            subcategory,
        }
    }
}

impl CatalogueService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        subcategories: Arc<dyn SubcategoryRepository>,
        products: Arc<dyn ProductRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            categories,
            subcategories,
            products,
            clock,
        }
    }

    async fn summary_index(&self) -> Result<SummaryIndex, Error> {
        let categories = self
            .categories
            .list(false)
            .await
            .map_err(map_catalogue_error)?;
        let subcategories = self
            .subcategories
            .list(None, false)
            .await
            .map_err(map_catalogue_error)?;
        Ok(SummaryIndex {
            categories: categories.iter().map(|c| (c.id, c.summary())).collect(),
            subcategories: subcategories.iter().map(|s| (s.id, s.summary())).collect(),
        })
    }

    async fn single_view(&self, product: Product) -> Result<ProductView, Error> {
        let category = self
            .categories
            .find(&product.details.category_id)
            .await
            .map_err(map_catalogue_error)?
            .map(|c| c.summary());
        let subcategory = match product.details.subcategory_id {
            Some(id) => self
                .subcategories
                .find(&id)
                .await
                .map_err(map_catalogue_error)?
                .map(|s| s.summary()),
            None => None,
        };
        Ok(ProductView {
            product,
            category,
            subcategory,
        })
    }

    async fn find_category(&self, id: &CategoryId) -> Result<Category, Error> {
        self.categories
            .find(id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found(CATEGORY_NOT_FOUND))
    }

    async fn find_subcategory(&self, id: &SubcategoryId) -> Result<Subcategory, Error> {
        self.subcategories
            .find(id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found(SUBCATEGORY_NOT_FOUND))
    }

    /// The product's category must exist and own its subcategory.
    async fn check_product_references(&self, details: &ProductDetails) -> Result<(), Error> {
        let category = self
            .categories
            .find(&details.category_id)
            .await
            .map_err(map_catalogue_error)?;
        if category.is_none() {
            return Err(Error::invalid_request("category does not exist")
                .with_details(json!({ "field": "category", "code": "unknown_reference" })));
        }

        if let Some(subcategory_id) = details.subcategory_id {
            let subcategory = self
                .subcategories
                .find(&subcategory_id)
                .await
                .map_err(map_catalogue_error)?;
            let belongs = subcategory
                .is_some_and(|sub| sub.details.category_id == details.category_id);
            if !belongs {
                return Err(Error::invalid_request(
                    "subcategory does not belong to the selected category",
                )
                .with_details(json!({ "field": "subcategory", "code": "unknown_reference" })));
            }
        }
        Ok(())
    }

    async fn subcategory_view(&self, subcategory: Subcategory) -> Result<SubcategoryView, Error> {
        let category = self
            .categories
            .find(&subcategory.details.category_id)
            .await
            .map_err(map_catalogue_error)?
            .map(|c| c.summary());
        Ok(SubcategoryView {
            subcategory,
            category,
        })
    }
}

#[async_trait]
impl CatalogueQuery for CatalogueService {
    async fn list_products(&self, query: ProductListQuery) -> Result<Page<ProductView>, Error> {
        let (products, total) = self
            .products
            .list(&query)
            .await
            .map_err(map_catalogue_error)?;
        let index = self.summary_index().await?;
        Ok(Page {
            items: products,
            total,
            request: query.page,
        }
        .map(|product| index.view(product)))
    }

    async fn product(&self, id: &ProductId) -> Result<ProductView, Error> {
        let product = self
            .products
            .find(id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found(PRODUCT_NOT_FOUND))?;
        self.single_view(product).await
    }

    async fn featured_products(&self, limit: u32) -> Result<Vec<ProductView>, Error> {
        let page = self.list_products(ProductListQuery::featured(limit)).await?;
        Ok(page.items)
    }

    async fn categories(&self, active_only: bool) -> Result<Vec<Category>, Error> {
        self.categories
            .list(active_only)
            .await
            .map_err(map_catalogue_error)
    }

    async fn subcategories(
        &self,
        category: Option<CategoryId>,
        active_only: bool,
    ) -> Result<Vec<SubcategoryView>, Error> {
        let subcategories = self
            .subcategories
            .list(category, active_only)
            .await
            .map_err(map_catalogue_error)?;
        let names: HashMap<CategoryId, CategorySummary> = self
            .categories
            .list(false)
            .await
            .map_err(map_catalogue_error)?
            .iter()
            .map(|c| (c.id, c.summary()))
            .collect();

        let mut views: Vec<SubcategoryView> = subcategories
            .into_iter()
            .map(|subcategory| SubcategoryView {
                category: names.get(&subcategory.details.category_id).cloned(),
                subcategory,
            })
            .collect();
        if category.is_none() {
            views.sort_by(|a, b| {
                let parent = |view: &SubcategoryView| {
                    view.category
                        .as_ref()
                        .map(|c| c.name.clone())
                        .unwrap_or_default()
                };
                parent(a)
                    .cmp(&parent(b))
                    .then_with(|| Subcategory::display_order(&a.subcategory, &b.subcategory))
            });
        }
        Ok(views)
    }
}

#[async_trait]
impl CatalogueCommand for CatalogueService {
    async fn create_product(&self, details: ProductDetails) -> Result<ProductView, Error> {
        self.check_product_references(&details).await?;
        let now = self.clock.utc();
        let product = Product {
            id: ProductId::random(),
            details,
            created_at: now,
            updated_at: now,
        };
        self.products
            .insert(&product)
            .await
            .map_err(map_catalogue_error)?;
        info!(product_id = %product.id, "product created");
        self.single_view(product).await
    }

    async fn update_product(
        &self,
        id: &ProductId,
        details: ProductDetails,
    ) -> Result<ProductView, Error> {
        let existing = self
            .products
            .find(id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found(PRODUCT_NOT_FOUND))?;
        self.check_product_references(&details).await?;

        let product = Product {
            details,
            updated_at: self.clock.utc(),
            ..existing
        };
        let updated = self
            .products
            .update(&product)
            .await
            .map_err(map_catalogue_error)?;
        if !updated {
            return Err(Error::not_found(PRODUCT_NOT_FOUND));
        }
        self.single_view(product).await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), Error> {
        let deleted = self
            .products
            .delete(id)
            .await
            .map_err(map_catalogue_error)?;
        if !deleted {
            return Err(Error::not_found(PRODUCT_NOT_FOUND));
        }
        info!(product_id = %id, "product deleted");
        Ok(())
    }

    async fn create_category(&self, details: CategoryDetails) -> Result<Category, Error> {
        let now = self.clock.utc();
        let category = Category {
            id: CategoryId::random(),
            details,
            created_at: now,
            updated_at: now,
        };
        self.categories
            .insert(&category)
            .await
            .map_err(map_catalogue_error)?;
        info!(category_id = %category.id, "category created");
        Ok(category)
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        details: CategoryDetails,
    ) -> Result<Category, Error> {
        let existing = self.find_category(id).await?;
        let category = Category {
            details,
            updated_at: self.clock.utc(),
            ..existing
        };
        let updated = self
            .categories
            .update(&category)
            .await
            .map_err(map_catalogue_error)?;
        if !updated {
            return Err(Error::not_found(CATEGORY_NOT_FOUND));
        }
        Ok(category)
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<(), Error> {
        self.find_category(id).await?;
        let in_use = self
            .products
            .count_in_category(id)
            .await
            .map_err(map_catalogue_error)?;
        if in_use > 0 {
            return Err(Error::invalid_request(format!(
                "cannot delete category: {in_use} products still use it"
            ))
            .with_details(json!({ "productCount": in_use })));
        }
        let deleted = self
            .categories
            .delete(id)
            .await
            .map_err(map_catalogue_error)?;
        if !deleted {
            return Err(Error::not_found(CATEGORY_NOT_FOUND));
        }
        info!(category_id = %id, "category and its subcategories deleted");
        Ok(())
    }

    async fn create_subcategory(
        &self,
        details: SubcategoryDetails,
    ) -> Result<SubcategoryView, Error> {
        let parent = self.find_category(&details.category_id).await?;
        let now = self.clock.utc();
        let subcategory = Subcategory {
            id: SubcategoryId::random(),
            details,
            created_at: now,
            updated_at: now,
        };
        self.subcategories
            .insert(&subcategory)
            .await
            .map_err(map_catalogue_error)?;
        info!(subcategory_id = %subcategory.id, category_id = %parent.id, "subcategory created");
        Ok(SubcategoryView {
            subcategory,
            category: Some(parent.summary()),
        })
    }

    async fn update_subcategory(
        &self,
        id: &SubcategoryId,
        details: SubcategoryDetails,
    ) -> Result<SubcategoryView, Error> {
        let existing = self.find_subcategory(id).await?;
        self.find_category(&details.category_id).await?;
        if details.category_id != existing.details.category_id {
            // Products keep their category, so a used subcategory cannot move.
            let in_use = self
                .products
                .count_in_subcategory(id)
                .await
                .map_err(map_catalogue_error)?;
            if in_use > 0 {
                return Err(Error::invalid_request(format!(
                    "cannot move subcategory: {in_use} products still use it"
                ))
                .with_details(json!({ "productCount": in_use })));
            }
        }
        let subcategory = Subcategory {
            details,
            updated_at: self.clock.utc(),
            ..existing
        };
        let updated = self
            .subcategories
            .update(&subcategory)
            .await
            .map_err(map_catalogue_error)?;
        if !updated {
            return Err(Error::not_found(SUBCATEGORY_NOT_FOUND));
        }
        self.subcategory_view(subcategory).await
    }

    async fn delete_subcategory(&self, id: &SubcategoryId) -> Result<(), Error> {
        self.find_subcategory(id).await?;
        let in_use = self
            .products
            .count_in_subcategory(id)
            .await
            .map_err(map_catalogue_error)?;
        if in_use > 0 {
            return Err(Error::invalid_request(format!(
                "cannot delete subcategory: {in_use} products still use it"
            ))
            .with_details(json!({ "productCount": in_use })));
        }
        let deleted = self
            .subcategories
            .delete(id)
            .await
            .map_err(map_catalogue_error)?;
        if !deleted {
            return Err(Error::not_found(SUBCATEGORY_NOT_FOUND));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
