use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use subtle::ConstantTimeEq;

use crate::{errors::AppError, AppState};

/// Extractor guarding the admin inbox.
/// When an admin token is configured the request must carry
/// `Authorization: Bearer <token>`; otherwise 401.
/// Without a configured token the inbox is open (development setups).
#[derive(Debug)]
pub struct AdminAccess;

impl FromRequest for AdminAccess {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState missing in admin extractor");
            return ready(Err(AppError::Internal("application state missing".into()).into()));
        };

        let Some(expected) = state.admin_token.as_deref() else {
            return ready(Ok(AdminAccess));
        };

        match extract_bearer(req) {
            Some(token) if token_matches(token, expected) => ready(Ok(AdminAccess)),
            Some(_) => {
                tracing::warn!(path = req.path(), "Rejected admin request with wrong token");
                ready(Err(AppError::Unauthorized.into()))
            }
            None => {
                tracing::warn!(path = req.path(), "Missing or malformed Authorization header");
                ready(Err(AppError::Unauthorized.into()))
            }
        }
    }
}

fn token_matches(token: &str, expected: &str) -> bool {
    token.as_bytes().ct_eq(expected.as_bytes()).into()
}

fn extract_bearer(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let (scheme, token) = header.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
        })
}
