use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use subtle::ConstantTimeEq;

use crate::error::ShelterError;
use crate::router::ShelterState;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Constant-time comparison of a presented secret against the expected one.
pub fn secret_matches(given: &str, expected: &str) -> bool {
    bool::from(given.as_bytes().ct_eq(expected.as_bytes()))
}

/// Ensure the inbound admin request carries the configured key.
/// Accepts either:
/// - Header: `x-admin-key: ...`
/// - Header: `Authorization: Bearer ...`
pub fn ensure_admin(headers: &HeaderMap, expected: Option<&str>) -> Result<(), ShelterError> {
    let Some(expected) = expected else {
        return Err(ShelterError::Unauthorized);
    };

    // 1) header: x-admin-key
    if let Some(hv) = headers.get(ADMIN_KEY_HEADER).and_then(|v| v.to_str().ok())
        && secret_matches(hv, expected)
    {
        return Ok(());
    }

    // 2) header: Authorization: Bearer <key>
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        let auth = auth.trim();
        if let Some(token) = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            && secret_matches(token, expected)
        {
            return Ok(());
        }
    }

    Err(ShelterError::Unauthorized)
}

#[derive(Debug, Clone, Copy)]
pub struct RequireAdminKey;

impl FromRequestParts<ShelterState> for RequireAdminKey {
    type Rejection = ShelterError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ShelterState,
    ) -> Result<Self, Self::Rejection> {
        ensure_admin(&parts.headers, state.admin_key.as_deref())?;
        Ok(Self)
    }
}
