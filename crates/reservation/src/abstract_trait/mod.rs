pub mod order;
pub mod order_line;
pub mod payment;
pub mod product;
pub mod user;

pub use self::order::{
    DynOrderCommandRepository, DynOrderCommandService, DynOrderQueryRepository,
    DynOrderQueryService, OrderCommandRepositoryTrait, OrderCommandServiceTrait,
    OrderQueryRepositoryTrait, OrderQueryServiceTrait,
};
pub use self::order_line::{
    DynOrderLineCommandRepository, DynOrderLineQueryRepository, DynOrderLineService,
    OrderLineCommandRepositoryTrait, OrderLineQueryRepositoryTrait, OrderLineServiceTrait,
};
pub use self::payment::{
    CheckoutLineItem, CheckoutSessionParams, DynPaymentProvider, DynPaymentService,
    PaymentProviderTrait, PaymentServiceTrait,
};
pub use self::product::{DynProductQueryRepository, ProductQueryRepositoryTrait};
pub use self::user::{DynUserQueryRepository, UserQueryRepositoryTrait};
