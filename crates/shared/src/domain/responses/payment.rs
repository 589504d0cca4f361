use crate::domain::responses::order::OrderResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CheckoutSessionResponse {
    pub url: String,
}

/// Acknowledgement body for payment provider notifications. Non-relevant
/// events still return `received: true` so the provider stops retrying.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct WebhookAck {
    pub received: bool,
    pub handled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderResponse>,
}

impl WebhookAck {
    pub fn ignored() -> Self {
        Self {
            received: true,
            handled: false,
            order: None,
        }
    }

    pub fn processed(order: OrderResponse) -> Self {
        Self {
            received: true,
            handled: true,
            order: Some(order),
        }
    }
}
