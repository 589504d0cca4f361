use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderLine {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    /// Product price frozen when the line was added. Never re-read from the
    /// live product afterwards.
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderLineWithProduct {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub product_name: String,
}

/// Line joined with the fields of its parent order needed for authorization
/// and mutability checks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderLineWithOrder {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub product_name: String,
    pub order_user_id: i32,
    pub order_status: String,
}
