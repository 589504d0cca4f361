pub mod order;
pub mod order_line;
pub mod product;
pub mod user;

pub use self::order::{OrderCommandRepository, OrderQueryRepository};
pub use self::order_line::{OrderLineCommandRepository, OrderLineQueryRepository};
pub use self::product::ProductQueryRepository;
pub use self::user::UserQueryRepository;
