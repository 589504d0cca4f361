use crate::{abstract_trait::DynPaymentService, middleware::auth_middleware, state::AppState};
use axum::{
    Json,
    body::Bytes,
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::post,
};
use shared::{
    domain::{
        Actor,
        responses::{CheckoutSessionResponse, WebhookAck},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/orders/{id}/checkout",
    tag = "Payment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Hosted checkout redirect URL", body = CheckoutSessionResponse),
        (status = 400, description = "Order is not pending or has no lines"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn create_checkout_session(
    Extension(service): Extension<DynPaymentService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_checkout_session(actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/payments/webhook",
    tag = "Payment",
    request_body(content = Vec<u8>, description = "Raw webhook payload", content_type = "application/json"),
    responses(
        (status = 200, description = "Event acknowledged", body = WebhookAck),
        (status = 400, description = "Signature or payload rejected")
    )
)]
pub async fn stripe_webhook(
    Extension(service): Extension<DynPaymentService>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|value| value.to_str().ok());

    // Any processing failure on a verified event maps to a 400 so the
    // provider retries the delivery.
    let ack = service
        .handle_webhook(&body, signature)
        .await
        .map_err(|err| HttpError::BadRequest(err.to_string()))?;

    Ok((StatusCode::OK, Json(ack)))
}

pub fn checkout_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/orders/{id}/checkout", post(create_checkout_session))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.payment.clone()))
        .layer(Extension(app_state.jwt_service.clone()))
}

/// The provider calls this unauthenticated; the HMAC signature is the
/// authentication.
pub fn webhook_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/payments/webhook", post(stripe_webhook))
        .layer(Extension(app_state.di_container.payment.clone()))
}
