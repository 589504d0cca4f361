use async_trait::async_trait;
use shared::{
    domain::{
        Actor,
        responses::{CheckoutSessionResponse, WebhookAck},
    },
    errors::ServiceError,
};
use std::sync::Arc;

/// One checkout line shipped to the provider, amount already converted to
/// the provider's minor unit (cents).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLineItem {
    pub name: String,
    pub unit_amount: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionParams {
    pub order_id: i32,
    pub user_id: i32,
    pub line_items: Vec<CheckoutLineItem>,
    pub success_url: String,
    pub cancel_url: String,
}

pub type DynPaymentProvider = Arc<dyn PaymentProviderTrait + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentProviderTrait {
    /// Create a hosted checkout session and return its redirect URL.
    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<String, ServiceError>;

    /// Best-effort human label for the payment method behind a payment
    /// intent, e.g. `card:visa`.
    async fn payment_method_label(
        &self,
        payment_intent_id: &str,
    ) -> Result<Option<String>, ServiceError>;
}

pub type DynPaymentService = Arc<dyn PaymentServiceTrait + Send + Sync>;

#[async_trait]
pub trait PaymentServiceTrait {
    async fn create_checkout_session(
        &self,
        actor: Actor,
        order_id: i32,
    ) -> Result<CheckoutSessionResponse, ServiceError>;

    /// Verify-then-interpret handling of a provider notification. The raw
    /// body must reach this untouched for signature verification.
    async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookAck, ServiceError>;
}
