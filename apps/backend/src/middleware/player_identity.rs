//! Stable opaque player identity carried in a cookie.
//!
//! The id is read from the `playerId` cookie, falling back to the
//! `x-player-id` header for non-browser clients. Anything that is not a UUID
//! is replaced by a freshly issued v4 id. The id is stored in request
//! extensions as [`PlayerId`] and written back as a cookie whenever the
//! request did not already carry it that way.

use std::future::{ready, Ready};

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};
use uuid::Uuid;

pub const PLAYER_COOKIE: &str = "playerId";
pub const PLAYER_HEADER: &str = "x-player-id";

/// Identity of the calling player for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Cookie,
    Header,
    Issued,
}

fn parse_id(raw: &str) -> Option<String> {
    Uuid::parse_str(raw.trim()).ok().map(|id| id.to_string())
}

fn resolve(req: &ServiceRequest) -> (String, Source) {
    if let Some(id) = req.cookie(PLAYER_COOKIE).and_then(|c| parse_id(c.value())) {
        return (id, Source::Cookie);
    }
    if let Some(id) = req
        .headers()
        .get(PLAYER_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_id)
    {
        return (id, Source::Header);
    }
    (Uuid::new_v4().to_string(), Source::Issued)
}

fn identity_cookie(id: String) -> Cookie<'static> {
    Cookie::build(PLAYER_COOKIE, id)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::days(365))
        .finish()
}

pub struct PlayerIdentity;

impl<S, B> Transform<S, ServiceRequest> for PlayerIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = PlayerIdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PlayerIdentityMiddleware { service }))
    }
}

pub struct PlayerIdentityMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for PlayerIdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let (player_id, source) = resolve(&req);
        if source == Source::Issued {
            debug!(player_id = %player_id, "Issued new player identity");
        }
        req.extensions_mut().insert(PlayerId(player_id.clone()));

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            if source != Source::Cookie {
                if let Err(err) = res.response_mut().add_cookie(&identity_cookie(player_id)) {
                    warn!(error = %err, "Failed to set player identity cookie");
                }
            }
            Ok(res)
        })
    }
}
