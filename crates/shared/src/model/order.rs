use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i32,
    pub status: String,
    pub visit_date: DateTime<Utc>,
    pub order_date: DateTime<Utc>,
    pub vat: Decimal,
    pub payment_method: Option<String>,
    pub ticket_code: String,
    pub qr_code: String,
    pub user_id: i32,
}

/// Order row joined with its owner, as returned by the admin listing query.
/// `total_count` carries the window-function count for pagination.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderWithUser {
    pub id: i32,
    pub status: String,
    pub visit_date: DateTime<Utc>,
    pub order_date: DateTime<Utc>,
    pub vat: Decimal,
    pub payment_method: Option<String>,
    pub ticket_code: String,
    pub qr_code: String,
    pub user_id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub total_count: i64,
}

impl OrderWithUser {
    pub fn into_order(self) -> Order {
        Order {
            id: self.id,
            status: self.status,
            visit_date: self.visit_date,
            order_date: self.order_date,
            vat: self.vat,
            payment_method: self.payment_method,
            ticket_code: self.ticket_code,
            qr_code: self.qr_code,
            user_id: self.user_id,
        }
    }
}
