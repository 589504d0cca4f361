mod codes;
mod gracefullshutdown;
mod logs;
mod random_string;

pub use self::codes::{generate_qr_token, generate_ticket_code};
pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::random_string::generate_random_string;
