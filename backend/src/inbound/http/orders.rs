//! Checkout and order history handlers.
//!
//! ```text
//! POST /api/orders    {"items":[{"productId":"<uuid>","quantity":2}]}
//! GET  /api/orders/my
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::{Error, OrderRequest, ProductId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{OrderResponse, PlacedOrderResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{order_error, parse_id};

#[derive(Debug, Deserialize, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    #[serde(alias = "product")]
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderLineRequest>,
}

impl PlaceOrderRequest {
    fn into_request(self) -> Result<OrderRequest, Error> {
        let lines = self
            .items
            .into_iter()
            .map(|line| {
                parse_id::<ProductId>(&line.product_id, "productId").map(|id| (id, line.quantity))
            })
            .collect::<Result<Vec<_>, _>>()?;
        OrderRequest::new(lines).map_err(order_error)
    }
}

/// Place an order for the logged-in customer, priced from the catalogue.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = PlacedOrderResponse),
        (status = 400, description = "Empty cart or bad quantity", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown product", body = Error)
    ),
    tags = ["orders"],
    operation_id = "placeOrder"
)]
#[post("/orders")]
pub async fn place_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PlaceOrderRequest>,
) -> ApiResult<HttpResponse> {
    let customer = session.require_user()?;
    let request = payload.into_inner().into_request()?;
    let view = state.orders.place_order(&customer.id, request).await?;
    Ok(HttpResponse::Created().json(PlacedOrderResponse {
        msg: "order placed".to_owned(),
        order: OrderResponse::from(view),
    }))
}

/// The caller's orders, newest first.
#[utoipa::path(
    get,
    path = "/api/orders/my",
    responses(
        (status = 200, description = "Order history", body = [OrderResponse]),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["orders"],
    operation_id = "myOrders"
)]
#[get("/orders/my")]
pub async fn my_orders(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<OrderResponse>>> {
    let customer = session.require_user()?;
    let orders = state.orders.orders_for(&customer.id).await?;
    Ok(web::Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{Order, OrderItem, OrderItemView, OrderView, Price};
    use crate::inbound::http::test_utils::{MockPorts, init_api, login_cookie, sample_user};

    fn placed(product_id: ProductId, quantity: u32) -> OrderView {
        let item = OrderItem {
            product_id,
            quantity,
            unit_price: Price::new(199.99).expect("price"),
        };
        OrderView {
            order: Order::place(sample_user(false).id, vec![item], Utc::now()),
            items: vec![OrderItemView {
                item,
                product: None,
            }],
            customer: None,
        }
    }

    #[actix_web::test]
    async fn checkout_requires_a_session() {
        let mut ports = MockPorts::default();
        ports.orders.expect_place_order().never();
        let app = init_api(ports.into_state()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/orders")
                .set_json(json!({"items": [{"productId": ProductId::random(), "quantity": 1}]}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn checkout_returns_created_order() {
        let product = ProductId::random();
        let mut ports = MockPorts::default();
        ports
            .orders
            .expect_place_order()
            .withf(move |user, request| {
                *user == sample_user(false).id
                    && request.lines().len() == 1
                    && request.lines()[0].product_id == product
                    && request.lines()[0].quantity == 2
            })
            .returning(move |_, _| Ok(placed(product, 2)));
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, false).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/orders")
                .cookie(cookie)
                .set_json(json!({"items": [{"productId": product, "quantity": 2}]}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["msg"], json!("order placed"));
        assert_eq!(body["order"]["total"], json!(399.98));
        assert_eq!(body["order"]["totalEur"], json!(204.51));
        assert!(body["order"].get("user").is_none());
    }

    #[rstest]
    #[case(json!({"items": []}), "items")]
    #[case(json!({}), "items")]
    #[case(json!({"items": [{"productId": "x", "quantity": 1}]}), "productId")]
    #[case(json!({"items": [{"productId": "6f1c7d3a-4b4e-4f0e-9a53-0b3c1d2e4f5a", "quantity": 0}]}), "quantity")]
    #[actix_web::test]
    async fn checkout_rejects_bad_carts(#[case] payload: Value, #[case] field: &str) {
        let mut ports = MockPorts::default();
        ports.orders.expect_place_order().never();
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, false).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/orders")
                .cookie(cookie)
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], json!(field));
    }

    #[actix_web::test]
    async fn history_lists_the_callers_orders() {
        let mut ports = MockPorts::default();
        ports
            .orders
            .expect_orders_for()
            .withf(|user| *user == sample_user(false).id)
            .returning(|_| Ok(vec![placed(ProductId::random(), 1)]));
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, false).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/orders/my")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body[0]["items"][0]["unitPrice"], json!(199.99));
        assert_eq!(body[0]["items"][0]["product"], Value::Null);
    }
}
