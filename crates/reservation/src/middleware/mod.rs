mod jwt;
mod validate;

pub use self::jwt::auth_middleware;
pub use self::validate::ValidatedJson;
