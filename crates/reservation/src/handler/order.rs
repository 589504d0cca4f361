use crate::{
    abstract_trait::{DynOrderCommandService, DynOrderQueryService},
    middleware::{ValidatedJson, auth_middleware},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
};
use shared::{
    domain::{
        Actor,
        requests::{CreateOrderRequest, FindAllOrders, FindUserOrders, UpdateOrderStatusRequest},
        responses::{ApiResponse, ApiResponsePagination, OrderResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Validation error or past visit date"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User or product not found")
    )
)]
pub async fn create_order(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(actor): Extension<Actor>,
    ValidatedJson(body): ValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_order(actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "Page of orders with pricing", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 401, description = "Admin only")
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/user/{user_id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(
        ("user_id" = i32, Path, description = "Owner of the orders"),
        FindUserOrders
    ),
    responses(
        (status = 200, description = "Page of the user's orders", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 401, description = "Only the owner or an admin may look")
    )
)]
pub async fn get_user_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(actor): Extension<Actor>,
    Path(user_id): Path<i32>,
    Query(params): Query<FindUserOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_user(actor, user_id, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with lines and pricing", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order after transition", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Illegal transition"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order_status(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    ValidatedJson(body): ValidatedJson<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_status(actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/orders", post(create_order))
        .route("/api/orders", get(get_orders))
        .route("/api/orders/user/{user_id}", get(get_user_orders))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/orders/{id}/status", patch(update_order_status))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.order_query.clone()))
        .layer(Extension(app_state.di_container.order_command.clone()))
        .layer(Extension(app_state.jwt_service.clone()))
}
