/// Request identity plumbing.
///
/// Credential validation happens upstream at the gateway; this service
/// only receives the resolved user id in the `X-User-Id` header and
/// treats its absence as an unauthenticated request.
use actix_web::dev::Payload;
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// Extracted user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .map(UserId)
            .ok_or_else(|| ErrorUnauthorized("missing or invalid X-User-Id header"));

        ready(user_id)
    }
}
