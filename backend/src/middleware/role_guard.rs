//! Role-gated scope middleware.
//!
//! Wrapping a scope in [`RequireRole`] resolves the caller's bearer
//! credential through the authorization gate before any handler runs, checks
//! role membership against the allowed set, and parks the resolved [`User`]
//! in the request extensions for the `CurrentUser` extractor to pick up.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::domain::user::Role;
use crate::domain::{Error, User};
use crate::inbound::http::auth::bearer_token;
use crate::inbound::http::state::HttpState;

/// Transform factory holding the allowed-role set.
#[derive(Debug, Clone, Copy)]
pub struct RequireRole {
    allowed: &'static [Role],
}

impl RequireRole {
    /// Restrict a scope to the given roles.
    #[must_use]
    pub const fn any_of(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    /// Restrict a scope to admins.
    #[must_use]
    pub const fn admin() -> Self {
        Self::any_of(&[Role::Admin])
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Transform = RequireRoleMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: self.allowed,
        }))
    }
}

/// Middleware enforcing the allowed-role set on every request in the scope.
pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: &'static [Role],
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let allowed = self.allowed;
        Box::pin(async move {
            let state = req
                .app_data::<web::Data<HttpState>>()
                .cloned()
                .ok_or_else(|| Error::internal("application state missing"))?;
            let token = bearer_token(req.request())?;
            let user = state.auth.resolve_bearer(&token).await?;
            crate::domain::AuthGate::require_role(&user, allowed)?;
            req.extensions_mut().insert::<User>(user);
            service.call(req).await
        })
    }
}

#[cfg(test)]
mod tests;
