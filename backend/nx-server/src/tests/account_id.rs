use crate::{AccountId, CurrentAccount, MaybeAccount};

use axum::{body::Body, extract::FromRequestParts, http::Request};

async fn current(header: Option<&str>) -> Result<CurrentAccount, crate::ApiError> {
    let mut builder = Request::builder();
    if let Some(value) = header {
        builder = builder.header("X-Account-Id", value);
    }
    let (mut parts, _body) = builder.body(Body::empty()).unwrap().into_parts();
    CurrentAccount::from_request_parts(&mut parts, &()).await
}

#[test]
fn given_positive_number_when_parsed_then_account_id() {
    let id: AccountId = " 42 ".parse().unwrap();

    assert_eq!(id.value(), 42);
    assert_eq!(id.to_string(), "42");
}

#[test]
fn given_zero_or_negative_when_parsed_then_rejected() {
    assert!("0".parse::<AccountId>().is_err());
    assert!("-7".parse::<AccountId>().is_err());
    assert!("abc".parse::<AccountId>().is_err());
}

#[tokio::test]
async fn given_valid_header_when_extracted_then_account() {
    let result = current(Some("17")).await;

    assert_eq!(result.ok().map(|c| c.0.value()), Some(17));
}

#[tokio::test]
async fn given_missing_header_when_extracted_then_unauthorized() {
    let result = current(None).await;

    assert!(matches!(result, Err(crate::ApiError::Unauthorized { .. })));
}

#[tokio::test]
async fn given_invalid_header_when_extracted_then_unauthorized() {
    let result = current(Some("not-a-number")).await;

    assert!(matches!(result, Err(crate::ApiError::Unauthorized { .. })));
}

#[tokio::test]
async fn given_no_header_when_optional_extracted_then_anonymous() {
    let (mut parts, _body) = Request::builder()
        .body(Body::empty())
        .unwrap()
        .into_parts();

    let result = MaybeAccount::from_request_parts(&mut parts, &()).await;

    assert!(matches!(result, Ok(MaybeAccount(None))));
}

#[tokio::test]
async fn given_malformed_header_when_optional_extracted_then_still_rejected() {
    let (mut parts, _body) = Request::builder()
        .header("X-Account-Id", "-1")
        .body(Body::empty())
        .unwrap()
        .into_parts();

    let result = MaybeAccount::from_request_parts(&mut parts, &()).await;

    assert!(result.is_err());
}
