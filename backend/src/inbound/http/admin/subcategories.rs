//! Back-office subcategory management.
//!
//! `GET /api/admin/subcategories/{id}` lists the subcategories of a
//! category, while `PUT`/`DELETE` on the same path address one subcategory.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::{CategoryId, Error, SubcategoryDetails, SubcategoryDraft, SubcategoryId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{MessageResponse, SubcategoryResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldCode, catalogue_error, field_error, parse_id};

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "category")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl SubcategoryRequest {
    fn into_details(self) -> Result<SubcategoryDetails, Error> {
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
        SubcategoryDraft {
            name: self.name,
            description: self.description,
            category_id,
            image: self.image,
            is_active: self.is_active,
            sort_order: self.sort_order,
        }
        .validate()
        .map_err(catalogue_error)
    }
}

fn render(views: Vec<crate::domain::SubcategoryView>) -> web::Json<Vec<SubcategoryResponse>> {
    web::Json(views.into_iter().map(SubcategoryResponse::from).collect())
}

/// Every subcategory, grouped by category name then display order.
#[utoipa::path(
    get,
    path = "/api/admin/subcategories",
    responses(
        (status = 200, description = "Subcategories", body = [SubcategoryResponse]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admins only", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListSubcategories"
)]
#[get("/admin/subcategories")]
pub async fn list_subcategories(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SubcategoryResponse>>> {
    session.require_admin()?;
    Ok(render(state.catalogue.subcategories(None, false).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/subcategories/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "Subcategories of the category", body = [SubcategoryResponse]),
        (status = 400, description = "Invalid id", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminSubcategoriesOf"
)]
#[get("/admin/subcategories/{id}")]
pub async fn subcategories_of(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<SubcategoryResponse>>> {
    session.require_admin()?;
    let category_id: CategoryId = parse_id(&path, "categoryId")?;
    Ok(render(
        state
            .catalogue
            .subcategories(Some(category_id), false)
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/subcategories",
    request_body = SubcategoryRequest,
    responses(
        (status = 201, description = "Subcategory created", body = SubcategoryResponse),
        (status = 400, description = "Invalid subcategory", body = Error),
        (status = 404, description = "Unknown category", body = Error),
        (status = 409, description = "Name already used in the category", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createSubcategory"
)]
#[post("/admin/subcategories")]
pub async fn create_subcategory(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubcategoryRequest>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let details = payload.into_inner().into_details()?;
    let view = state.catalogue_admin.create_subcategory(details).await?;
    Ok(HttpResponse::Created().json(SubcategoryResponse::from(view)))
}

#[utoipa::path(
    put,
    path = "/api/admin/subcategories/{id}",
    params(("id" = String, Path, description = "Subcategory id")),
    request_body = SubcategoryRequest,
    responses(
        (status = 200, description = "Subcategory updated", body = SubcategoryResponse),
        (status = 404, description = "Unknown subcategory or category", body = Error),
        (status = 409, description = "Name already used in the category", body = Error)
    ),
    tags = ["admin"],
    operation_id = "updateSubcategory"
)]
#[put("/admin/subcategories/{id}")]
pub async fn update_subcategory(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SubcategoryRequest>,
) -> ApiResult<web::Json<SubcategoryResponse>> {
    session.require_admin()?;
    let id: SubcategoryId = parse_id(&path, "id")?;
    let details = payload.into_inner().into_details()?;
    let view = state.catalogue_admin.update_subcategory(&id, details).await?;
    Ok(web::Json(SubcategoryResponse::from(view)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/subcategories/{id}",
    params(("id" = String, Path, description = "Subcategory id")),
    responses(
        (status = 200, description = "Subcategory deleted", body = MessageResponse),
        (status = 400, description = "Products still use the subcategory", body = Error),
        (status = 404, description = "Unknown subcategory", body = Error)
    ),
    tags = ["admin"],
    operation_id = "deleteSubcategory"
)]
#[delete("/admin/subcategories/{id}")]
pub async fn delete_subcategory(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    session.require_admin()?;
    let id: SubcategoryId = parse_id(&path, "id")?;
    state.catalogue_admin.delete_subcategory(&id).await?;
    Ok(web::Json(MessageResponse::new("subcategory deleted")))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::Utc;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{CategorySummary, Subcategory, SubcategoryView};
    use crate::inbound::http::test_utils::{MockPorts, init_api, login_cookie};

    fn view(details: SubcategoryDetails) -> SubcategoryView {
        let now = Utc::now();
        SubcategoryView {
            category: Some(CategorySummary {
                id: details.category_id,
                name: "Люстри".to_owned(),
            }),
            subcategory: Subcategory {
                id: SubcategoryId::random(),
                details,
                created_at: now,
                updated_at: now,
            },
        }
    }

    #[actix_web::test]
    async fn create_accepts_the_category_alias() {
        let category = CategoryId::random();
        let mut ports = MockPorts::default();
        ports
            .catalogue_admin
            .expect_create_subcategory()
            .withf(move |details| details.category_id == category && details.name == "Модерни")
            .returning(|details| Ok(view(details)));
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, true).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/admin/subcategories")
                .cookie(cookie)
                .set_json(json!({"name": "Модерни", "category": category}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["category"]["name"], json!("Люстри"));
        assert_eq!(body["categoryId"], json!(category));
    }

    #[actix_web::test]
    async fn missing_category_is_a_field_error() {
        let mut ports = MockPorts::default();
        ports.catalogue_admin.expect_create_subcategory().never();
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, true).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/admin/subcategories")
                .cookie(cookie)
                .set_json(json!({"name": "Модерни"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"], json!({"field": "category", "code": "missing"}));
    }

    #[actix_web::test]
    async fn same_path_serves_listing_update_and_delete() {
        let category = CategoryId::random();
        let mut ports = MockPorts::default();
        ports
            .catalogue
            .expect_subcategories()
            .withf(move |requested, active_only| *requested == Some(category) && !*active_only)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        ports
            .catalogue_admin
            .expect_update_subcategory()
            .times(1)
            .returning(|_, details| Ok(view(details)));
        ports
            .catalogue_admin
            .expect_delete_subcategory()
            .times(1)
            .returning(|_| Ok(()));
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, true).await;

        let get = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/admin/subcategories/{category}"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(get.status(), StatusCode::OK);

        let target = SubcategoryId::random();
        let put = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/api/admin/subcategories/{target}"))
                .cookie(cookie.clone())
                .set_json(json!({"name": "Класически", "categoryId": category}))
                .to_request(),
        )
        .await;
        assert_eq!(put.status(), StatusCode::OK);

        let delete = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/api/admin/subcategories/{target}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(delete.status(), StatusCode::OK);
    }
}
