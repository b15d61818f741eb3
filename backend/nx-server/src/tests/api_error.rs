use crate::ApiError;
use crate::store::error::StoreError;
use crate::tests::account;

use axum::response::IntoResponse;
use http::StatusCode;
use http_body_util::BodyExt;
use nx_broker::BrokerError;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_validation_error_when_rendered_then_400_with_field() {
    let (status, json) = body_json(ApiError::validation("too long", "status")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "status");
}

#[tokio::test]
async fn given_not_found_when_rendered_then_404_without_field() {
    let (status, json) = body_json(ApiError::not_found("Status 9 not found")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn given_resource_exhausted_when_converted_then_503() {
    let error = ApiError::from(BrokerError::resource_exhausted(10, 10));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn given_invalid_broker_config_when_converted_then_500_without_details() {
    let error = ApiError::from(BrokerError::invalid_config("queue_capacity must be at least 1"));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        !json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("queue_capacity")
    );
}

#[test]
fn given_store_errors_when_converted_then_not_found_and_forbidden() {
    let id = crate::StatusId::new(3);

    assert_eq!(
        ApiError::from(StoreError::not_found(id)).status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        ApiError::from(StoreError::forbidden(id, account(1))).status_code(),
        StatusCode::FORBIDDEN
    );
}
