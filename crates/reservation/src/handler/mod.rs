mod order;
mod order_line;
mod payment;

use crate::state::AppState;
use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::order::order_routes;
pub use self::order_line::order_line_routes;
pub use self::payment::{checkout_routes, webhook_routes};

#[derive(OpenApi)]
#[openapi(
    paths(
        order::create_order,
        order::get_orders,
        order::get_user_orders,
        order::get_order,
        order::update_order_status,

        order_line::add_order_line,
        order_line::update_order_line,
        order_line::delete_order_line,

        payment::create_checkout_session,
        payment::stripe_webhook,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Order", description = "Reservation endpoints"),
        (name = "Order line", description = "Line item endpoints"),
        (name = "Payment", description = "Checkout and payment notifications"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub struct AppRouter;

impl AppRouter {
    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .merge(order_routes(shared_state.clone()))
            .merge(order_line_routes(shared_state.clone()))
            .merge(checkout_routes(shared_state.clone()))
            .merge(webhook_routes(shared_state.clone()));

        let router_with_layers = api_router
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024));

        let (app_router, api) = router_with_layers.split_for_parts();

        let app = app_router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api));

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI available at http://localhost:{port}/docs");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
