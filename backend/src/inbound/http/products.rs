//! Public catalogue handlers.
//!
//! ```text
//! GET /api/products?page=1&limit=12&category=<uuid>&search=лампа&sort=price_asc
//! GET /api/products/{id}
//! GET /api/products/featured/list?limit=6
//! GET /api/products/categories/all
//! GET /api/products/subcategories/{categoryId}
//! ```
//!
//! Query values arrive as raw strings so that a bad number or UUID can be
//! reported against the field that carried it.

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{
    CategoryId, Error, FEATURED_LIMIT, MAX_PAGE_SIZE, PageRequest, ProductFilter,
    ProductListQuery, ProductSort, STOREFRONT_PAGE_SIZE, SubcategoryId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    CategoryResponse, ProductListResponse, ProductResponse, SubcategoryResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldCode, field_error, page_error, parse_id, parse_optional,
};

const INVALID_BOOL: FieldCode = FieldCode::Other("invalid_bool");

/// Listing query shared by the storefront and the back office.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    /// One-based page number (default 1).
    pub page: Option<String>,
    /// Page size, at most 100.
    pub limit: Option<String>,
    /// Category id.
    pub category: Option<String>,
    /// Subcategory id.
    pub subcategory: Option<String>,
    /// Case-insensitive substring of the name or description.
    pub search: Option<String>,
    /// Minimum BGN price, inclusive.
    pub min_price: Option<String>,
    /// Maximum BGN price, inclusive.
    pub max_price: Option<String>,
    pub in_stock: Option<String>,
    pub featured: Option<String>,
    /// `price_asc`, `price_desc`, `name_asc`, `name_desc`, or `newest`.
    pub sort: Option<String>,
}

impl ProductListParams {
    /// Validate into a listing query using `default_limit` when none is given.
    pub(crate) fn into_query(self, default_limit: u32) -> Result<ProductListQuery, Error> {
        let page = parse_optional::<u32>(self.page.as_deref(), "page", FieldCode::InvalidNumber)?
            .unwrap_or(1);
        let limit =
            parse_optional::<u32>(self.limit.as_deref(), "limit", FieldCode::InvalidNumber)?
                .unwrap_or(default_limit);
        let page = PageRequest::new(page, limit).map_err(page_error)?;

        let category_id = optional_id::<CategoryId>(self.category.as_deref(), "category")?;
        let subcategory_id =
            optional_id::<SubcategoryId>(self.subcategory.as_deref(), "subcategory")?;
        let filter = ProductFilter {
            category_id,
            subcategory_id,
            search: self.search,
            min_price: parse_finite(self.min_price.as_deref(), "minPrice")?,
            max_price: parse_finite(self.max_price.as_deref(), "maxPrice")?,
            in_stock: parse_optional(self.in_stock.as_deref(), "inStock", INVALID_BOOL)?,
            featured: parse_optional(self.featured.as_deref(), "featured", INVALID_BOOL)?,
            active_only: false,
        };
        Ok(ProductListQuery {
            filter,
            sort: ProductSort::parse_lenient(self.sort.as_deref()),
            page,
        })
    }
}

fn optional_id<T: std::str::FromStr>(raw: Option<&str>, field: &str) -> Result<Option<T>, Error> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| parse_id(value, field))
        .transpose()
}

fn parse_finite(raw: Option<&str>, field: &str) -> Result<Option<f64>, Error> {
    match parse_optional::<f64>(raw, field, FieldCode::InvalidNumber)? {
        Some(value) if !value.is_finite() => Err(field_error(
            field,
            FieldCode::InvalidNumber,
            format!("{field} must be a finite number"),
        )),
        other => Ok(other),
    }
}

/// Active products, filtered, sorted, and paged. `inStock` defaults to true.
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductListParams),
    responses(
        (status = 200, description = "One page of products", body = ProductListResponse),
        (status = 400, description = "Invalid query", body = Error)
    ),
    tags = ["products"],
    operation_id = "listProducts",
    security([])
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    params: web::Query<ProductListParams>,
) -> ApiResult<web::Json<ProductListResponse>> {
    let mut query = params.into_inner().into_query(STOREFRONT_PAGE_SIZE)?;
    query.filter.active_only = true;
    query.filter.in_stock.get_or_insert(true);
    let page = state.catalogue.list_products(query).await?;
    Ok(web::Json(ProductListResponse::from(page)))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeaturedParams {
    /// How many products to return (default 6).
    pub limit: Option<String>,
}

/// Featured, in-stock products, newest first.
#[utoipa::path(
    get,
    path = "/api/products/featured/list",
    params(FeaturedParams),
    responses(
        (status = 200, description = "Featured products", body = [ProductResponse]),
        (status = 400, description = "Invalid limit", body = Error)
    ),
    tags = ["products"],
    operation_id = "featuredProducts",
    security([])
)]
#[get("/products/featured/list")]
pub async fn featured_products(
    state: web::Data<HttpState>,
    params: web::Query<FeaturedParams>,
) -> ApiResult<web::Json<Vec<ProductResponse>>> {
    let limit = parse_optional::<u32>(params.limit.as_deref(), "limit", FieldCode::InvalidNumber)?
        .unwrap_or(FEATURED_LIMIT);
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(field_error(
            "limit",
            FieldCode::OutOfRange,
            format!("limit must be between 1 and {MAX_PAGE_SIZE}"),
        ));
    }
    let products = state.catalogue.featured_products(limit).await?;
    Ok(web::Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Active categories in display order.
#[utoipa::path(
    get,
    path = "/api/products/categories/all",
    responses((status = 200, description = "Active categories", body = [CategoryResponse])),
    tags = ["products"],
    operation_id = "activeCategories",
    security([])
)]
#[get("/products/categories/all")]
pub async fn active_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CategoryResponse>>> {
    let categories = state.catalogue.categories(true).await?;
    Ok(web::Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Active subcategories of one category in display order.
#[utoipa::path(
    get,
    path = "/api/products/subcategories/{category_id}",
    params(("category_id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "Active subcategories", body = [SubcategoryResponse]),
        (status = 400, description = "Invalid id", body = Error)
    ),
    tags = ["products"],
    operation_id = "activeSubcategories",
    security([])
)]
#[get("/products/subcategories/{category_id}")]
pub async fn active_subcategories(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<SubcategoryResponse>>> {
    let category_id: CategoryId = parse_id(&path, "categoryId")?;
    let subcategories = state
        .catalogue
        .subcategories(Some(category_id), true)
        .await?;
    Ok(web::Json(
        subcategories
            .into_iter()
            .map(SubcategoryResponse::from)
            .collect(),
    ))
}

/// One product by id. Inactive products are hidden from the storefront.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Unknown product", body = Error)
    ),
    tags = ["products"],
    operation_id = "getProduct",
    security([])
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProductResponse>> {
    let id = parse_id(&path, "id")?;
    let view = state.catalogue.product(&id).await?;
    if !view.product.details.is_active {
        return Err(Error::not_found("product not found"));
    }
    Ok(web::Json(ProductResponse::from(view)))
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
