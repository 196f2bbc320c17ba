//! Back-office overview: every order, dashboard counters, and ad-hoc mail.

use actix_web::{get, post, web};
use serde::Deserialize;

use crate::domain::{Error, OutgoingMail};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{DashboardResponse, MessageResponse, OrderResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::contact_error;

/// Every order, newest first, with customer and product summaries.
#[utoipa::path(
    get,
    path = "/api/admin/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderResponse]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admins only", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListOrders"
)]
#[get("/admin/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<OrderResponse>>> {
    session.require_admin()?;
    let orders = state.orders.all_orders().await?;
    Ok(web::Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Dashboard counters", body = DashboardResponse),
        (status = 403, description = "Admins only", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminStats"
)]
#[get("/admin/stats")]
pub async fn stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardResponse>> {
    session.require_admin()?;
    Ok(web::Json(state.dashboard.stats().await?.into()))
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct NotifyRequest {
    pub to: String,
    pub subject: String,
    pub text: Option<String>,
    pub html: Option<String>,
}

/// Send a mail composed by an administrator.
#[utoipa::path(
    post,
    path = "/api/admin/notify",
    request_body = NotifyRequest,
    responses(
        (status = 200, description = "Mail sent", body = MessageResponse),
        (status = 400, description = "Incomplete mail", body = Error),
        (status = 503, description = "Mail delivery is not configured", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminNotify"
)]
#[post("/admin/notify")]
pub async fn notify(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NotifyRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    session.require_admin()?;
    let NotifyRequest {
        to,
        subject,
        text,
        html,
    } = payload.into_inner();
    let mail = OutgoingMail::compose(&to, &subject, text, html).map_err(contact_error)?;
    state.contact.send_mail(mail).await?;
    Ok(web::Json(MessageResponse::new("email sent")))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::DashboardStats;
    use crate::domain::{
        CustomerSummary, Order, OrderItem, OrderItemView, OrderView, Price, ProductId,
    };
    use crate::inbound::http::test_utils::{MockPorts, init_api, login_cookie, sample_user};

    fn order() -> OrderView {
        let customer = sample_user(false);
        let item = OrderItem {
            product_id: ProductId::random(),
            quantity: 1,
            unit_price: Price::new(450.0).expect("price"),
        };
        OrderView {
            order: Order::place(customer.id, vec![item], Utc::now()),
            items: vec![OrderItemView {
                item,
                product: None,
            }],
            customer: Some(CustomerSummary {
                id: customer.id,
                email: "ana@example.com".to_owned(),
                username: "ana".to_owned(),
                first_name: "Ana".to_owned(),
                last_name: "Petrova".to_owned(),
            }),
        }
    }

    #[actix_web::test]
    async fn orders_carry_customer_summaries() {
        let mut ports = MockPorts::default();
        ports
            .orders
            .expect_all_orders()
            .returning(|| Ok(vec![order()]));
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, true).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/admin/orders")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body[0]["user"]["email"], json!("ana@example.com"));
        assert_eq!(body[0]["total"], json!(450.0));
    }

    #[actix_web::test]
    async fn stats_report_counters() {
        let mut ports = MockPorts::default();
        ports.dashboard.expect_stats().returning(|| {
            Ok(DashboardStats {
                products: 8,
                categories: 5,
                subcategories: 9,
                users: 2,
                orders: 1,
                recent_orders: vec![order()],
            })
        });
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, true).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/admin/stats")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["totalProducts"], json!(8));
        assert_eq!(body["totalSubcategories"], json!(9));
        assert_eq!(
            body["recentOrders"].as_array().map(Vec::len),
            Some(1)
        );
    }

    #[actix_web::test]
    async fn stats_are_admin_only() {
        let mut ports = MockPorts::default();
        ports.dashboard.expect_stats().never();
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, false).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/admin/stats")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[case(json!({"to": "", "subject": "Hi", "text": "body"}))]
    #[case(json!({"to": "ana@example.com", "subject": "", "text": "body"}))]
    #[case(json!({"to": "ana@example.com", "subject": "Hi"}))]
    #[case(json!({"to": "ana@example.com", "subject": "Hi", "text": "  ", "html": ""}))]
    #[actix_web::test]
    async fn incomplete_mail_is_rejected(#[case] payload: Value) {
        let mut ports = MockPorts::default();
        ports.contact.expect_send_mail().never();
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, true).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/admin/notify")
                .cookie(cookie)
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn notify_sends_html_mail() {
        let mut ports = MockPorts::default();
        ports
            .contact
            .expect_send_mail()
            .withf(|mail| mail.to == "ana@example.com" && mail.html.is_some() && mail.text.is_none())
            .times(1)
            .returning(|_| Ok(()));
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, true).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/admin/notify")
                .cookie(cookie)
                .set_json(json!({
                    "to": "ana@example.com",
                    "subject": "Поръчката ви",
                    "html": "<p>Изпратена</p>"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"msg": "email sent"}));
    }

    #[actix_web::test]
    async fn unconfigured_mail_is_unavailable() {
        let mut ports = MockPorts::default();
        ports
            .contact
            .expect_send_mail()
            .returning(|_| Err(Error::service_unavailable("email service is not configured")));
        let app = init_api(ports.into_state()).await;
        let cookie = login_cookie(&app, true).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/admin/notify")
                .cookie(cookie)
                .set_json(json!({"to": "ana@example.com", "subject": "Hi", "text": "body"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
