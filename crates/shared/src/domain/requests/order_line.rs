use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct CreateOrderLineRequest {
    #[validate(range(min = 1))]
    pub product_id: i32,

    #[validate(range(min = 1, max = 20, message = "Quantity cannot exceed 20 tickets per line"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct UpdateOrderLineRequest {
    #[validate(range(min = 1, max = 20, message = "Quantity cannot exceed 20 tickets per line"))]
    pub quantity: i32,
}
