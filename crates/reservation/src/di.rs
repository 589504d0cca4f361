use crate::{
    abstract_trait::{
        DynOrderCommandService, DynOrderLineService, DynOrderQueryService, DynPaymentProvider,
        DynPaymentService,
    },
    repository::{
        OrderCommandRepository, OrderLineCommandRepository, OrderLineQueryRepository,
        OrderQueryRepository, ProductQueryRepository, UserQueryRepository,
    },
    service::{
        OrderCommandService, OrderLineService, OrderQueryService, PaymentService,
        order::OrderCommandServiceDeps,
    },
};
use shared::config::{Config, ConnectionPool};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub order_query: DynOrderQueryService,
    pub order_command: DynOrderCommandService,
    pub order_line: DynOrderLineService,
    pub payment: DynPaymentService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("order_query", &"DynOrderQueryService")
            .field("order_command", &"DynOrderCommandService")
            .field("order_line", &"DynOrderLineService")
            .field("payment", &"DynPaymentService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(pool: ConnectionPool, provider: DynPaymentProvider, config: &Config) -> Self {
        let order_query_repo = Arc::new(OrderQueryRepository::new(pool.clone()));
        let order_command_repo = Arc::new(OrderCommandRepository::new(pool.clone()));
        let line_query_repo = Arc::new(OrderLineQueryRepository::new(pool.clone()));
        let line_command_repo = Arc::new(OrderLineCommandRepository::new(pool.clone()));
        let product_repo = Arc::new(ProductQueryRepository::new(pool.clone()));
        let user_repo = Arc::new(UserQueryRepository::new(pool));

        let order_query: DynOrderQueryService = Arc::new(OrderQueryService::new(
            order_query_repo.clone(),
            line_query_repo.clone(),
            user_repo.clone(),
        ));

        let order_command: DynOrderCommandService =
            Arc::new(OrderCommandService::new(OrderCommandServiceDeps {
                command: order_command_repo.clone(),
                query: order_query_repo.clone(),
                line_query: line_query_repo.clone(),
                product_query: product_repo.clone(),
                user_query: user_repo,
                vat_default: config.vat_default,
            }));

        let order_line: DynOrderLineService = Arc::new(OrderLineService::new(
            line_query_repo.clone(),
            line_command_repo,
            order_query_repo.clone(),
            product_repo,
        ));

        let payment: DynPaymentService = Arc::new(PaymentService::new(
            order_query_repo,
            line_query_repo,
            order_command_repo,
            provider,
            config.stripe.clone(),
        ));

        Self {
            order_query,
            order_command,
            order_line,
            payment,
        }
    }
}
