//! Identity extraction. Authentication itself happens upstream: the identity
//! provider's proxy forwards the signed-in user in `x-user-*` headers.
//!
//! The service must only be reachable through that proxy. When
//! `IDENTITY_SHARED_SECRET` is configured, the proxy must also send it in
//! `x-identity-secret`; requests without it are treated as anonymous.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts, http::HeaderMap};
use tracing::warn;

use crate::errors::AppError;
use crate::models::user::{Identity, Role};
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const IDENTITY_SECRET_HEADER: &str = "x-identity-secret";

/// Compares without stopping at the first differing byte.
fn secrets_match(presented: &[u8], expected: &[u8]) -> bool {
    if presented.len() != expected.len() {
        return false;
    }
    presented
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

impl Identity {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let user_id = header(USER_ID_HEADER).ok_or(AppError::Unauthorized)?;
        let role = match header(USER_ROLE_HEADER) {
            Some(raw) => Role::parse(&raw).ok_or_else(|| {
                warn!("Rejecting request with unknown role '{raw}' for user {user_id}");
                AppError::Forbidden
            })?,
            None => Role::Candidate,
        };

        Ok(Identity {
            user_id,
            email: header(USER_EMAIL_HEADER),
            display_name: header(USER_NAME_HEADER),
            role,
        })
    }

    /// Like `from_headers`, but only trusts the `x-user-*` headers when the
    /// proxy's shared secret (if one is configured) is presented.
    pub fn from_trusted_headers(
        headers: &HeaderMap,
        shared_secret: Option<&str>,
    ) -> Result<Self, AppError> {
        if let Some(expected) = shared_secret {
            let presented = headers
                .get(IDENTITY_SECRET_HEADER)
                .map(|v| v.as_bytes())
                .unwrap_or_default();
            if !secrets_match(presented, expected.as_bytes()) {
                if headers.contains_key(USER_ID_HEADER) {
                    warn!("Ignoring identity headers without a valid proxy secret");
                }
                return Err(AppError::Unauthorized);
            }
        }
        Self::from_headers(headers)
    }

    /// Fails with `Forbidden` unless the user holds one of `roles`.
    pub fn require_role(&self, roles: &[Role]) -> Result<(), AppError> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Identity::from_trusted_headers(&parts.headers, state.config.identity_secret.as_deref())
    }
}
