use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::DynJwtService,
    domain::{Actor, Role},
    errors::ErrorResponse,
};
use std::str::FromStr;

fn unauthorized(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            status: "fail".to_string(),
            message: message.to_string(),
        }),
    )
}

/// Resolves the caller into an `Actor` extension from a bearer token or the
/// `token` cookie.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        });

    let token = match token {
        Some(token) => token,
        None => {
            return Err(unauthorized(
                "You are not logged in, please provide token",
            ));
        }
    };

    let claims = match jwt.verify_token(&token, "access") {
        Ok(claims) => claims,
        Err(_) => return Err(unauthorized("Invalid token")),
    };

    let role = match Role::from_str(&claims.role) {
        Ok(role) => role,
        Err(_) => return Err(unauthorized("Invalid token")),
    };

    req.extensions_mut()
        .insert(Actor::new(claims.user_id, role));

    Ok(next.run(req).await)
}
