use crate::{
    abstract_trait::{
        CheckoutLineItem, CheckoutSessionParams, DynOrderCommandRepository,
        DynOrderLineQueryRepository, DynOrderQueryRepository, DynPaymentProvider,
        PaymentServiceTrait,
    },
    payment::verify_webhook_signature,
    service::access,
};
use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use shared::{
    config::StripeConfig,
    domain::{
        Actor,
        responses::{CheckoutSessionResponse, OrderLineResponse, OrderResponse, WebhookAck},
    },
    errors::ServiceError,
    model::{Order, OrderStatus},
};
use tracing::{info, warn};

#[derive(Clone)]
pub struct PaymentService {
    order_query: DynOrderQueryRepository,
    line_query: DynOrderLineQueryRepository,
    order_command: DynOrderCommandRepository,
    provider: DynPaymentProvider,
    stripe: StripeConfig,
}

impl PaymentService {
    pub fn new(
        order_query: DynOrderQueryRepository,
        line_query: DynOrderLineQueryRepository,
        order_command: DynOrderCommandRepository,
        provider: DynPaymentProvider,
        stripe: StripeConfig,
    ) -> Self {
        Self {
            order_query,
            line_query,
            order_command,
            provider,
            stripe,
        }
    }

    async fn respond_with_order(&self, order: Order) -> Result<OrderResponse, ServiceError> {
        let lines: Vec<OrderLineResponse> = self
            .line_query
            .find_by_order(order.id)
            .await?
            .into_iter()
            .map(OrderLineResponse::from)
            .collect();

        Ok(OrderResponse::assemble(order, None, lines))
    }
}

/// Decimal euros to integer cents, half-up.
fn to_minor_units(amount: Decimal) -> Result<i64, ServiceError> {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| ServiceError::Internal(format!("Amount out of range: {amount}")))
}

#[async_trait]
impl PaymentServiceTrait for PaymentService {
    async fn create_checkout_session(
        &self,
        actor: Actor,
        order_id: i32,
    ) -> Result<CheckoutSessionResponse, ServiceError> {
        let order = self
            .order_query
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".into()))?;

        access::ensure_owner_or_admin(
            actor,
            order.user_id,
            "Unauthorized - You can only pay for your own orders",
        )?;

        if order.status != OrderStatus::Pending.as_str() {
            return Err(ServiceError::BadRequest(
                "Order must be pending to start payment".into(),
            ));
        }

        let lines = self.line_query.find_by_order(order_id).await?;
        if lines.is_empty() {
            return Err(ServiceError::BadRequest(
                "Order has no lines to pay".into(),
            ));
        }

        let mut line_items = Vec::with_capacity(lines.len());
        for line in &lines {
            line_items.push(CheckoutLineItem {
                name: line.product_name.clone(),
                unit_amount: to_minor_units(line.unit_price)?,
                quantity: line.quantity,
            });
        }

        let params = CheckoutSessionParams {
            order_id: order.id,
            user_id: order.user_id,
            line_items,
            success_url: self.stripe.success_url.clone(),
            cancel_url: self.stripe.cancel_url.clone(),
        };

        let url = self.provider.create_checkout_session(&params).await?;

        info!("💳 Checkout session created for order {order_id}");

        Ok(CheckoutSessionResponse { url })
    }

    async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookAck, ServiceError> {
        // Phase one: authenticate the payload. Nothing is parsed before this.
        let sig_header = signature.ok_or_else(|| {
            ServiceError::BadRequest("Missing Stripe-Signature header".into())
        })?;

        verify_webhook_signature(payload, sig_header, &self.stripe.webhook_secret)
            .map_err(|e| ServiceError::BadRequest(e.into()))?;

        // Phase two: interpret the verified event.
        let event: serde_json::Value = serde_json::from_slice(payload)
            .map_err(|_| ServiceError::BadRequest("Invalid webhook payload".into()))?;

        let event_type = event["type"].as_str().unwrap_or("");
        if event_type != "checkout.session.completed" {
            info!("📨 Ignoring webhook event type {event_type}");
            return Ok(WebhookAck::ignored());
        }

        let session = &event["data"]["object"];

        if session["payment_status"].as_str() != Some("paid") {
            info!("📨 Checkout session completed but not paid, ignoring");
            return Ok(WebhookAck::ignored());
        }

        let order_id: i32 = session["metadata"]["order_id"]
            .as_str()
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| {
                ServiceError::BadRequest("Webhook metadata missing order_id".into())
            })?;

        // A missing order is acknowledged, not errored: failing here would
        // only trigger provider retry storms.
        let Some(order) = self.order_query.find_by_id(order_id).await? else {
            warn!("📨 Webhook for unknown order {order_id}, acknowledging");
            return Ok(WebhookAck::ignored());
        };

        if order.status == OrderStatus::Confirmed.as_str() {
            info!("📨 Order {order_id} already confirmed, duplicate delivery ignored");
            return Ok(WebhookAck::ignored());
        }

        if order.status != OrderStatus::Pending.as_str() {
            info!(
                "📨 Order {order_id} is {}, not resurrecting it",
                order.status
            );
            return Ok(WebhookAck::ignored());
        }

        // Best effort only; a failed lookup must not block confirmation.
        let label = match session["payment_intent"].as_str() {
            Some(intent_id) => match self.provider.payment_method_label(intent_id).await {
                Ok(label) => label,
                Err(e) => {
                    warn!("⚠️ Could not resolve payment method label: {e}");
                    None
                }
            },
            None => None,
        };

        // CAS against 'pending': the duplicate-delivery race resolves here.
        let Some(confirmed) = self
            .order_command
            .confirm_payment(order_id, label)
            .await?
        else {
            info!("📨 Order {order_id} was confirmed concurrently, acknowledging");
            return Ok(WebhookAck::ignored());
        };

        info!("✅ Order {order_id} confirmed via payment webhook");

        let response = self.respond_with_order(confirmed).await?;

        Ok(WebhookAck::processed(response))
    }
}
