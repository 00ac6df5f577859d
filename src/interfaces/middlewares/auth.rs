use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse, ResponseError,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{
    entities::token::Claims,
    errors::{AppError, AuthError},
    repositories::token::TokenServiceRepository,
    AppState,
};

const PROTECTED_PREFIX: &str = "/admin";

/// Guards the `/admin` scope: a valid bearer token with the admin flag is
/// required there. Every other path passes through untouched.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if is_public_route(req.path(), req.method().as_str()) {
                return service.call(req).await;
            }

            let claims = match get_valid_claims(&req) {
                Ok(claims) => claims,
                Err(AuthError::MissingJwtService) => {
                    tracing::error!("AppState missing in middleware");
                    return Ok(req.into_response(HttpResponse::InternalServerError().json(
                        serde_json::json!({ "error": "Internal server error" }),
                    )));
                }
                Err(AuthError::TokenExpired) => {
                    return Ok(req.into_response(AuthError::TokenExpired.error_response()));
                }
                Err(e) => {
                    tracing::warn!(path = %req.path(), "Rejected admin request: {}", e);
                    return Ok(req.into_response(AppError::UnauthorizedAccess.error_response()));
                }
            };

            if !claims.admin {
                tracing::warn!(path = %req.path(), user = %claims.sub, "Admin access required");
                return Ok(req.into_response(AppError::ForbiddenAccess.error_response()));
            }

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }
    path != PROTECTED_PREFIX && !path.starts_with("/admin/")
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn get_valid_claims(req: &ServiceRequest) -> Result<Claims, AuthError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(AuthError::MissingJwtService)?;

    let token = extract_token(req).ok_or(AuthError::MissingCredentials)?;
    let decoded = state.auth_handler.token_service.decode_jwt(&token)?;
    Ok(decoded.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_admin_scope_is_protected() {
        assert!(is_public_route("/", "GET"));
        assert!(is_public_route("/project/suncore", "GET"));
        assert!(is_public_route("/api/projects", "GET"));
        assert!(is_public_route("/administrator", "GET"));
        assert!(!is_public_route("/admin", "GET"));
        assert!(!is_public_route("/admin/projects", "POST"));
        assert!(is_public_route("/admin/projects", "OPTIONS"));
    }
}
