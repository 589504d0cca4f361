use crate::{
    abstract_trait::DynOrderLineService,
    middleware::{ValidatedJson, auth_middleware},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, patch, post},
};
use shared::{
    domain::{
        Actor,
        requests::{CreateOrderLineRequest, UpdateOrderLineRequest},
        responses::{ApiResponse, OrderLineResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/orders/{id}/lines",
    tag = "Order line",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = CreateOrderLineRequest,
    responses(
        (status = 201, description = "Line added with snapshotted price", body = ApiResponse<OrderLineResponse>),
        (status = 400, description = "Order is not pending"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order or product not found")
    )
)]
pub async fn add_order_line(
    Extension(service): Extension<DynOrderLineService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    ValidatedJson(body): ValidatedJson<CreateOrderLineRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add_line(actor, id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/orders/lines/{line_id}",
    tag = "Order line",
    security(("bearer_auth" = [])),
    params(("line_id" = i32, Path, description = "Order line ID")),
    request_body = UpdateOrderLineRequest,
    responses(
        (status = 200, description = "Line with updated quantity", body = ApiResponse<OrderLineResponse>),
        (status = 400, description = "Order is not pending"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Line not found")
    )
)]
pub async fn update_order_line(
    Extension(service): Extension<DynOrderLineService>,
    Extension(actor): Extension<Actor>,
    Path(line_id): Path<i32>,
    ValidatedJson(body): ValidatedJson<UpdateOrderLineRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_line(actor, line_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/orders/lines/{line_id}",
    tag = "Order line",
    security(("bearer_auth" = [])),
    params(("line_id" = i32, Path, description = "Order line ID")),
    responses(
        (status = 204, description = "Line deleted"),
        (status = 400, description = "Order is not pending"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Line not found")
    )
)]
pub async fn delete_order_line(
    Extension(service): Extension<DynOrderLineService>,
    Extension(actor): Extension<Actor>,
    Path(line_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    service.delete_line(actor, line_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn order_line_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/orders/{id}/lines", post(add_order_line))
        .route("/api/orders/lines/{line_id}", patch(update_order_line))
        .route("/api/orders/lines/{line_id}", delete(delete_order_line))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.order_line.clone()))
        .layer(Extension(app_state.jwt_service.clone()))
}
