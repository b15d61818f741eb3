//! Axum extractors resolving the calling account

use crate::{AccountId, ApiError};

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

pub const ACCOUNT_ID_HEADER: &str = "X-Account-Id";

/// The authenticated caller, read from the `X-Account-Id` header.
///
/// Rejects with 401 when the header is missing or not a positive integer.
pub struct CurrentAccount(pub AccountId);

/// The caller if one identified itself; anonymous requests yield `None`.
///
/// A header that is present but malformed is still rejected.
pub struct MaybeAccount(pub Option<AccountId>);

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            match read_account(parts)? {
                Some(account_id) => Ok(CurrentAccount(account_id)),
                None => {
                    log::debug!("Request without {} header rejected", ACCOUNT_ID_HEADER);
                    Err(ApiError::unauthorized(format!(
                        "Missing {} header",
                        ACCOUNT_ID_HEADER
                    )))
                }
            }
        }
    }
}

impl<S> FromRequestParts<S> for MaybeAccount
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move { read_account(parts).map(MaybeAccount) }
    }
}

fn read_account(parts: &Parts) -> Result<Option<AccountId>, ApiError> {
    let Some(header_value) = parts.headers.get(ACCOUNT_ID_HEADER) else {
        return Ok(None);
    };

    let raw = header_value.to_str().map_err(|_| {
        log::warn!("Non-ASCII {} header", ACCOUNT_ID_HEADER);
        ApiError::unauthorized(format!("Invalid {} header", ACCOUNT_ID_HEADER))
    })?;

    raw.parse::<AccountId>().map(Some).map_err(|e| {
        log::warn!("Invalid {} header: {}", ACCOUNT_ID_HEADER, e);
        ApiError::unauthorized(format!("Invalid {} header: {}", ACCOUNT_ID_HEADER, e))
    })
}
