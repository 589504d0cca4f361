pub mod access;
pub mod order;
pub mod order_line;
pub mod payment;

pub use self::order::{OrderCommandService, OrderQueryService};
pub use self::order_line::OrderLineService;
pub use self::payment::PaymentService;
