use crate::{
    model::{Order, OrderLineWithProduct, User},
    pricing::{self, Totals},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UserSummary {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(value: User) -> Self {
        UserSummary {
            id: value.id,
            firstname: value.firstname,
            lastname: value.lastname,
            email: value.email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderLineResponse {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl From<OrderLineWithProduct> for OrderLineResponse {
    fn from(value: OrderLineWithProduct) -> Self {
        let line_total = pricing::line_total(value.unit_price, value.quantity);

        OrderLineResponse {
            id: value.id,
            order_id: value.order_id,
            product_id: value.product_id,
            product_name: value.product_name,
            quantity: value.quantity,
            unit_price: value.unit_price,
            line_total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: i32,
    pub status: String,
    pub visit_date: DateTime<Utc>,
    pub order_date: DateTime<Utc>,
    pub vat: Decimal,
    pub payment_method: Option<String>,
    pub ticket_code: String,
    pub qr_code: String,
    pub user_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    pub order_lines: Vec<OrderLineResponse>,
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
}

impl OrderResponse {
    /// Build the outward order shape, deriving amounts from the persisted
    /// line snapshots.
    pub fn assemble(order: Order, user: Option<UserSummary>, lines: Vec<OrderLineResponse>) -> Self {
        let Totals {
            subtotal,
            vat_amount,
            total,
        } = pricing::compute_totals(
            lines.iter().map(|line| (line.unit_price, line.quantity)),
            order.vat,
        );

        OrderResponse {
            id: order.id,
            status: order.status,
            visit_date: order.visit_date,
            order_date: order.order_date,
            vat: order.vat,
            payment_method: order.payment_method,
            ticket_code: order.ticket_code,
            qr_code: order.qr_code,
            user_id: order.user_id,
            user,
            order_lines: lines,
            subtotal,
            vat_amount,
            total,
        }
    }
}
