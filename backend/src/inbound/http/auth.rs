//! Bearer-credential extraction for HTTP handlers.
//!
//! [`CurrentUser`] keeps handlers free of header parsing: it reuses the user
//! a [`crate::middleware::RequireRole`] guard already resolved, or resolves
//! the `Authorization` header itself on unguarded routes.

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, User};
use crate::inbound::http::state::HttpState;

/// Extract the raw token from an `Authorization: Bearer` header.
pub fn bearer_token(req: &HttpRequest) -> Result<String, Error> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("Not authenticated"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("Not authenticated"))?;
    value
        .strip_prefix("Bearer ")
        .map(str::to_owned)
        .ok_or_else(|| Error::unauthorized("Not authenticated"))
}

/// The authenticated caller, resolved from the bearer credential.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// The resolved user.
    #[must_use]
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            if let Some(user) = req.extensions().get::<User>().cloned() {
                return Ok(Self(user));
            }
            let state = req
                .app_data::<web::Data<HttpState>>()
                .cloned()
                .ok_or_else(|| Error::internal("application state missing"))?;
            let token = bearer_token(&req)?;
            let user = state.auth.resolve_bearer(&token).await?;
            Ok(Self(user))
        })
    }
}
