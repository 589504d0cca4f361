mod order;
mod order_line;

pub use self::order::{
    CreateOrderLineItem, CreateOrderRecord, CreateOrderRequest, FindAllOrders, FindUserOrders,
    NewOrderLine, OrderSort, UpdateOrderStatusRequest,
};
pub use self::order_line::{CreateOrderLineRequest, UpdateOrderLineRequest};
