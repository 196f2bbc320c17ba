//! PostgreSQL-backed catalogue repositories.
//!
//! Product listings translate [`ProductFilter`] and [`ProductSort`] into SQL
//! so paging happens in the database. Sort ties fall back to newest first,
//! then id, exactly as [`ProductSort::compare`] does in memory.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::diesel_error_mapping::{catalogue_diesel_error, catalogue_pool_error, count_from_db};
use super::models::{CategoryRow, ProductRow, SubcategoryRow};
use super::pool::DbPool;
use super::schema::{categories, products, subcategories};
use crate::domain::ports::{
    CatalogueRepositoryError, CategoryRepository, ProductRepository, SubcategoryRepository,
};
use crate::domain::{
    Category, CategoryId, Product, ProductFilter, ProductId, ProductListQuery, ProductSort,
    Subcategory, SubcategoryId,
};

diesel::define_sql_function!(fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text);

#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct DieselSubcategoryRepository {
    pool: DbPool,
}

impl DieselSubcategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list(&self, active_only: bool) -> Result<Vec<Category>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let mut query = categories::table.into_boxed::<Pg>();
        if active_only {
            query = query.filter(categories::is_active.eq(true));
        }
        let rows: Vec<CategoryRow> = query
            .order((categories::sort_order.asc(), categories::name.asc()))
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "list categories"))?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find(&self, id: &CategoryId) -> Result<Option<Category>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let row: Option<CategoryRow> = categories::table
            .find(id.as_uuid())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| catalogue_diesel_error(err, "find category"))?;
        Ok(row.map(Category::from))
    }

    async fn insert(&self, category: &Category) -> Result<(), CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        diesel::insert_into(categories::table)
            .values(CategoryRow::from(category))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| catalogue_diesel_error(err, "insert category"))
    }

    async fn update(&self, category: &Category) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let updated = diesel::update(categories::table.find(category.id.as_uuid()))
            .set(CategoryRow::from(category))
            .execute(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "update category"))?;
        Ok(updated > 0)
    }

    /// Subcategories go with the category through `ON DELETE CASCADE`.
    async fn delete(&self, id: &CategoryId) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let deleted = diesel::delete(categories::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "delete category"))?;
        Ok(deleted > 0)
    }

    async fn count(&self) -> Result<u64, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let count: i64 = categories::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "count categories"))?;
        Ok(count_from_db(count))
    }
}

#[async_trait]
impl SubcategoryRepository for DieselSubcategoryRepository {
    async fn list(
        &self,
        category: Option<CategoryId>,
        active_only: bool,
    ) -> Result<Vec<Subcategory>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let mut query = subcategories::table.into_boxed::<Pg>();
        if let Some(category) = category {
            query = query.filter(subcategories::category_id.eq(*category.as_uuid()));
        }
        if active_only {
            query = query.filter(subcategories::is_active.eq(true));
        }
        let rows: Vec<SubcategoryRow> = query
            .order((subcategories::sort_order.asc(), subcategories::name.asc()))
            .select(SubcategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "list subcategories"))?;
        Ok(rows.into_iter().map(Subcategory::from).collect())
    }

    async fn find(
        &self,
        id: &SubcategoryId,
    ) -> Result<Option<Subcategory>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let row: Option<SubcategoryRow> = subcategories::table
            .find(id.as_uuid())
            .select(SubcategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| catalogue_diesel_error(err, "find subcategory"))?;
        Ok(row.map(Subcategory::from))
    }

    async fn insert(&self, subcategory: &Subcategory) -> Result<(), CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        diesel::insert_into(subcategories::table)
            .values(SubcategoryRow::from(subcategory))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| catalogue_diesel_error(err, "insert subcategory"))
    }

    async fn update(&self, subcategory: &Subcategory) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let updated = diesel::update(subcategories::table.find(subcategory.id.as_uuid()))
            .set(SubcategoryRow::from(subcategory))
            .execute(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "update subcategory"))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &SubcategoryId) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let deleted = diesel::delete(subcategories::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "delete subcategory"))?;
        Ok(deleted > 0)
    }

    async fn count(&self) -> Result<u64, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let count: i64 = subcategories::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "count subcategories"))?;
        Ok(count_from_db(count))
    }
}

/// Escape `LIKE` metacharacters so a search term matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn filtered(filter: &ProductFilter) -> products::BoxedQuery<'static, Pg> {
    let mut query = products::table.into_boxed::<Pg>();
    if let Some(id) = filter.category_id {
        query = query.filter(products::category_id.eq(*id.as_uuid()));
    }
    if let Some(id) = filter.subcategory_id {
        query = query.filter(products::subcategory_id.eq(*id.as_uuid()));
    }
    if let Some(min) = filter.min_price {
        query = query.filter(products::price.ge(min));
    }
    if let Some(max) = filter.max_price {
        query = query.filter(products::price.le(max));
    }
    if let Some(flag) = filter.in_stock {
        query = query.filter(products::in_stock.eq(flag));
    }
    if let Some(flag) = filter.featured {
        query = query.filter(products::featured.eq(flag));
    }
    if filter.active_only {
        query = query.filter(products::is_active.eq(true));
    }
    if let Some(term) = filter.search_term() {
        let pattern = like_pattern(term);
        query = query.filter(
            products::name
                .ilike(pattern.clone())
                .or(products::description.ilike(pattern)),
        );
    }
    query
}

fn sorted(
    query: products::BoxedQuery<'static, Pg>,
    sort: ProductSort,
) -> products::BoxedQuery<'static, Pg> {
    let primary = match sort {
        ProductSort::PriceAsc => query.order_by(products::price.asc()),
        ProductSort::PriceDesc => query.order_by(products::price.desc()),
        ProductSort::NameAsc => query.order_by(lower(products::name).asc()),
        ProductSort::NameDesc => query.order_by(lower(products::name).desc()),
        ProductSort::Newest => query.order_by(products::created_at.desc()),
    };
    primary
        .then_order_by(products::created_at.desc())
        .then_order_by(products::id.asc())
}

fn into_products(rows: Vec<ProductRow>) -> Result<Vec<Product>, CatalogueRepositoryError> {
    rows.into_iter()
        .map(ProductRow::into_product)
        .collect::<Result<Vec<_>, _>>()
        .map_err(CatalogueRepositoryError::query)
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn list(
        &self,
        query: &ProductListQuery,
    ) -> Result<(Vec<Product>, u64), CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let total: i64 = filtered(&query.filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "count products"))?;
        let rows: Vec<ProductRow> = sorted(filtered(&query.filter), query.sort)
            .offset(to_i64(query.page.offset()))
            .limit(i64::from(query.page.limit()))
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "list products"))?;
        Ok((into_products(rows)?, count_from_db(total)))
    }

    async fn find(&self, id: &ProductId) -> Result<Option<Product>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let row: Option<ProductRow> = products::table
            .find(id.as_uuid())
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| catalogue_diesel_error(err, "find product"))?;
        row.map(ProductRow::into_product)
            .transpose()
            .map_err(CatalogueRepositoryError::query)
    }

    async fn find_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, CatalogueRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let rows: Vec<ProductRow> = products::table
            .filter(products::id.eq_any(uuids))
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "find products"))?;
        into_products(rows)
    }

    async fn insert(&self, product: &Product) -> Result<(), CatalogueRepositoryError> {
        let row = ProductRow::try_from_product(product).map_err(CatalogueRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        diesel::insert_into(products::table)
            .values(row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| catalogue_diesel_error(err, "insert product"))
    }

    async fn update(&self, product: &Product) -> Result<bool, CatalogueRepositoryError> {
        let row = ProductRow::try_from_product(product).map_err(CatalogueRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let updated = diesel::update(products::table.find(product.id.as_uuid()))
            .set(row)
            .execute(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "update product"))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let deleted = diesel::delete(products::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "delete product"))?;
        Ok(deleted > 0)
    }

    async fn count(&self) -> Result<u64, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let count: i64 = products::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "count products"))?;
        Ok(count_from_db(count))
    }

    async fn count_in_category(&self, id: &CategoryId) -> Result<u64, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let count: i64 = products::table
            .filter(products::category_id.eq(id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "count products in category"))?;
        Ok(count_from_db(count))
    }

    async fn count_in_subcategory(
        &self,
        id: &SubcategoryId,
    ) -> Result<u64, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(catalogue_pool_error)?;
        let count: i64 = products::table
            .filter(products::subcategory_id.eq(id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| catalogue_diesel_error(err, "count products in subcategory"))?;
        Ok(count_from_db(count))
    }
}

#[cfg(test)]
mod tests {
    use diesel::debug_query;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("лампа", "%лампа%")]
    #[case("50%_off\\", "%50\\%\\_off\\\\%")]
    fn like_patterns_escape_metacharacters(#[case] term: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(term), expected);
    }

    #[rstest]
    fn public_filters_render_as_sql_predicates() {
        let filter = ProductFilter {
            min_price: Some(100.0),
            in_stock: Some(true),
            active_only: true,
            search: Some(" кристал ".to_owned()),
            ..ProductFilter::default()
        };
        let query = filtered(&filter).select(products::id);
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains("\"products\".\"price\" >= $1"), "{sql}");
        assert!(sql.contains("\"products\".\"in_stock\" = $2"), "{sql}");
        assert!(sql.contains("\"products\".\"is_active\" = $3"), "{sql}");
        assert!(sql.contains("ILIKE"), "{sql}");
        assert!(sql.contains("%кристал%"), "{sql}");
    }

    #[rstest]
    #[case(ProductSort::NameDesc, "lower(\"products\".\"name\") DESC")]
    #[case(ProductSort::PriceAsc, "\"products\".\"price\" ASC")]
    fn sorts_fall_back_to_newest_then_id(#[case] sort: ProductSort, #[case] primary: &str) {
        let query = sorted(filtered(&ProductFilter::default()), sort).select(products::id);
        let sql = debug_query::<Pg, _>(&query).to_string();

        let expected =
            format!("ORDER BY {primary}, \"products\".\"created_at\" DESC, \"products\".\"id\" ASC");
        assert!(sql.contains(&expected), "{sql}");
    }
}
