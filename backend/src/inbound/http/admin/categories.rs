//! Back-office category management.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::{CategoryDetails, CategoryDraft, CategoryId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CategoryResponse, MessageResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{catalogue_error, parse_id};

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl CategoryRequest {
    fn into_details(self) -> Result<CategoryDetails, Error> {
        CategoryDraft {
            name: self.name,
            description: self.description,
            image: self.image,
            is_active: self.is_active,
            sort_order: self.sort_order,
        }
        .validate()
        .map_err(catalogue_error)
    }
}

/// All categories, inactive ones included, in display order.
#[utoipa::path(
    get,
    path = "/api/admin/categories",
    responses(
        (status = 200, description = "Categories", body = [CategoryResponse]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admins only", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListCategories"
)]
#[get("/admin/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CategoryResponse>>> {
    session.require_admin()?;
    let categories = state.catalogue.categories(false).await?;
    Ok(web::Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid category", body = Error),
        (status = 409, description = "Name already used", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createCategory"
)]
#[post("/admin/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CategoryRequest>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let details = payload.into_inner().into_details()?;
    let category = state.catalogue_admin.create_category(details).await?;
    Ok(HttpResponse::Created().json(CategoryResponse::from(category)))
}

#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 404, description = "Unknown category", body = Error),
        (status = 409, description = "Name already used", body = Error)
    ),
    tags = ["admin"],
    operation_id = "updateCategory"
)]
#[put("/admin/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CategoryRequest>,
) -> ApiResult<web::Json<CategoryResponse>> {
    session.require_admin()?;
    let id: CategoryId = parse_id(&path, "id")?;
    let details = payload.into_inner().into_details()?;
    let category = state.catalogue_admin.update_category(&id, details).await?;
    Ok(web::Json(CategoryResponse::from(category)))
}

/// Delete a category and its subcategories. Refused while products use it.
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 400, description = "Products still use the category", body = Error),
        (status = 404, description = "Unknown category", body = Error)
    ),
    tags = ["admin"],
    operation_id = "deleteCategory"
)]
#[delete("/admin/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    session.require_admin()?;
    let id: CategoryId = parse_id(&path, "id")?;
    state.catalogue_admin.delete_category(&id).await?;
    Ok(web::Json(MessageResponse::new("category deleted")))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::Utc;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::Category;
    use crate::inbound::http::test_utils::{MockPorts, init_api, login_cookie};

    fn stored(details: CategoryDetails) -> Category {
        let now = Utc::now();
        Category {
            id: CategoryId::random(),
            details,
            created_at: now,
            updated_at: now,
        }
    }

    #[actix_web::test]
    async fn create_applies_defaults() {
        let mut ports = MockPorts::default();
        ports
            .catalogue_admin
            .expect_create_category()
            .withf(|details| {
                details.name == "Аплици" && details.is_active && details.sort_order == 0
            })
            .returning(|details| Ok(stored(details)));
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, true).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/admin/categories")
                .cookie(cookie)
                .set_json(json!({"name": " Аплици "}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["name"], json!("Аплици"));
        assert_eq!(body["isActive"], json!(true));
    }

    #[actix_web::test]
    async fn duplicate_names_conflict() {
        let mut ports = MockPorts::default();
        ports
            .catalogue_admin
            .expect_create_category()
            .returning(|_| Err(Error::conflict("category name already exists")));
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, true).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/admin/categories")
                .cookie(cookie)
                .set_json(json!({"name": "Люстри"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn blocked_delete_reports_the_product_count() {
        let mut ports = MockPorts::default();
        ports.catalogue_admin.expect_delete_category().returning(|_| {
            Err(Error::invalid_request(
                "cannot delete category: 2 products still use it",
            )
            .with_details(json!({"productCount": 2})))
        });
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, true).await;

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/api/admin/categories/{}", CategoryId::random()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["productCount"], json!(2));
    }

    #[actix_web::test]
    async fn listing_includes_inactive_categories() {
        let mut ports = MockPorts::default();
        ports
            .catalogue
            .expect_categories()
            .withf(|active_only| !*active_only)
            .returning(|_| Ok(Vec::new()));
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, true).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/admin/categories")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
