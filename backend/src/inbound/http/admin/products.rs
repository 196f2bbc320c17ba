//! Back-office product management.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::{
    ADMIN_PAGE_SIZE, CategoryId, Error, ProductDetails, ProductDraft, ProductId, SubcategoryId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{MessageResponse, ProductListResponse, ProductResponse};
use crate::inbound::http::products::ProductListParams;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldCode, catalogue_error, field_error, parse_id};

fn default_true() -> bool {
    true
}

/// Editable product fields. Updates replace every field.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// BGN price.
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(alias = "category")]
    pub category_id: Option<String>,
    #[serde(alias = "subcategory")]
    pub subcategory_id: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl ProductRequest {
    fn into_details(self) -> Result<ProductDetails, Error> {
        let price = self
            .price
            .ok_or_else(|| field_error("price", FieldCode::Missing, "price is required"))?;
        let category_id: CategoryId = match self.category_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_id(raw, "category")?,
            _ => {
                return Err(field_error(
                    "category",
                    FieldCode::Missing,
                    "category is required",
                ));
            }
        };
        let subcategory_id = self
            .subcategory_id
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| parse_id::<SubcategoryId>(raw, "subcategory"))
            .transpose()?;

        ProductDraft {
            name: self.name,
            description: self.description,
            price,
            original_price: self.original_price,
            image: self.image,
            images: self.images,
            category_id,
            subcategory_id,
            brand: self.brand,
            model: self.model,
            specifications: self.specifications,
            tags: self.tags,
            in_stock: self.in_stock,
            stock_quantity: self.stock_quantity,
            featured: self.featured,
            rating: self.rating,
            review_count: self.review_count,
            is_active: self.is_active,
        }
        .validate()
        .map_err(catalogue_error)
    }
}

/// Every product, including inactive and out-of-stock ones.
#[utoipa::path(
    get,
    path = "/api/admin/products",
    params(ProductListParams),
    responses(
        (status = 200, description = "One page of products", body = ProductListResponse),
        (status = 400, description = "Invalid query", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admins only", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListProducts"
)]
#[get("/admin/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<ProductListParams>,
) -> ApiResult<web::Json<ProductListResponse>> {
    session.require_admin()?;
    let query = params.into_inner().into_query(ADMIN_PAGE_SIZE)?;
    let page = state.catalogue.list_products(query).await?;
    Ok(web::Json(ProductListResponse::from(page)))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admins only", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createProduct"
)]
#[post("/admin/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProductRequest>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let details = payload.into_inner().into_details()?;
    let view = state.catalogue_admin.create_product(details).await?;
    Ok(HttpResponse::Created().json(ProductResponse::from(view)))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid product", body = Error),
        (status = 404, description = "Unknown product", body = Error)
    ),
    tags = ["admin"],
    operation_id = "updateProduct"
)]
#[put("/admin/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ProductRequest>,
) -> ApiResult<web::Json<ProductResponse>> {
    session.require_admin()?;
    let id: ProductId = parse_id(&path, "id")?;
    let details = payload.into_inner().into_details()?;
    let view = state.catalogue_admin.update_product(&id, details).await?;
    Ok(web::Json(ProductResponse::from(view)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Unknown product", body = Error)
    ),
    tags = ["admin"],
    operation_id = "deleteProduct"
)]
#[delete("/admin/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    session.require_admin()?;
    let id: ProductId = parse_id(&path, "id")?;
    state.catalogue_admin.delete_product(&id).await?;
    Ok(web::Json(MessageResponse::new("product deleted")))
}
