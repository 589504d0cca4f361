mod order;
mod order_line;
mod product;
mod status;
mod user;

pub use self::order::{Order, OrderWithUser};
pub use self::order_line::{OrderLine, OrderLineWithOrder, OrderLineWithProduct};
pub use self::product::Product;
pub use self::status::OrderStatus;
pub use self::user::User;
