//! Stripe integration via REST API (no SDK dependency).

use crate::abstract_trait::{CheckoutSessionParams, PaymentProviderTrait};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use shared::errors::ServiceError;
use tracing::debug;

/// Events older than this are rejected to prevent replays.
const SIGNATURE_TOLERANCE_SECS: i64 = 300;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key: secret_key.to_string(),
        }
    }
}

#[async_trait]
impl PaymentProviderTrait for StripeClient {
    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<String, ServiceError> {
        let mut form: Vec<(String, String)> = vec![
            ("mode".into(), "payment".into()),
            ("success_url".into(), params.success_url.clone()),
            ("cancel_url".into(), params.cancel_url.clone()),
            ("metadata[order_id]".into(), params.order_id.to_string()),
            ("metadata[user_id]".into(), params.user_id.to_string()),
        ];

        for (i, item) in params.line_items.iter().enumerate() {
            form.push((format!("line_items[{i}][price_data][currency]"), "eur".into()));
            form.push((
                format!("line_items[{i}][price_data][product_data][name]"),
                item.name.clone(),
            ));
            form.push((
                format!("line_items[{i}][price_data][unit_amount]"),
                item.unit_amount.to_string(),
            ));
            form.push((format!("line_items[{i}][quantity]"), item.quantity.to_string()));
        }

        let resp: serde_json::Value = self
            .http
            .post(format!("{STRIPE_API_BASE}/checkout/sessions"))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await
            .map_err(|e| ServiceError::Payment(e.to_string()))?
            .json()
            .await
            .map_err(|e| ServiceError::Payment(e.to_string()))?;

        resp["url"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| ServiceError::Payment(format!("Stripe create_checkout failed: {resp}")))
    }

    async fn payment_method_label(
        &self,
        payment_intent_id: &str,
    ) -> Result<Option<String>, ServiceError> {
        let resp: serde_json::Value = self
            .http
            .get(format!("{STRIPE_API_BASE}/payment_intents/{payment_intent_id}"))
            .query(&[("expand[]", "payment_method")])
            .basic_auth(&self.secret_key, None::<&str>)
            .send()
            .await
            .map_err(|e| ServiceError::Payment(e.to_string()))?
            .json()
            .await
            .map_err(|e| ServiceError::Payment(e.to_string()))?;

        let method = &resp["payment_method"];

        let label = match method["type"].as_str() {
            Some("card") => match method["card"]["brand"].as_str() {
                Some(brand) => Some(format!("card:{brand}")),
                None => Some("card".to_string()),
            },
            Some(other) => Some(other.to_string()),
            None => {
                debug!("Payment intent {payment_intent_id} carries no payment method details");
                None
            }
        };

        Ok(label)
    }
}

/// Verify a Stripe webhook signature (HMAC-SHA256 over `t.payload`).
///
/// Must run before the payload is parsed at all.
pub fn verify_webhook_signature(
    payload: &[u8],
    sig_header: &str,
    secret: &str,
) -> Result<(), &'static str> {
    let mut timestamp = "";
    let mut signature = "";
    for part in sig_header.split(',') {
        if let Some(t) = part.strip_prefix("t=") {
            timestamp = t;
        } else if let Some(v) = part.strip_prefix("v1=") {
            signature = v;
        }
    }

    if timestamp.is_empty() || signature.is_empty() {
        return Err("Invalid Stripe-Signature header");
    }

    let signed_payload = format!("{timestamp}.{}", std::str::from_utf8(payload).unwrap_or(""));
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| "HMAC key error")?;
    mac.update(signed_payload.as_bytes());

    // Constant-time comparison via hmac::verify_slice.
    let sig_bytes = hex::decode(signature).map_err(|_| "Invalid signature hex")?;
    mac.verify_slice(&sig_bytes)
        .map_err(|_| "Webhook signature mismatch")?;

    let ts: i64 = timestamp.parse().map_err(|_| "Invalid timestamp")?;
    let now = chrono::Utc::now().timestamp();
    if (now - ts).abs() > SIGNATURE_TOLERANCE_SECS {
        return Err("Webhook timestamp too old");
    }

    Ok(())
}
