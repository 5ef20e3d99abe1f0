use serde_json::json;

use super::search::search_offset;
use super::*;

fn test_client(base_url: &str) -> PartnersClient {
    let creds = Credentials::new("test-access", "test-secret").unwrap();
    PartnersClient::with_base_url(creds, 5, "affpages-test/0.1", base_url).unwrap()
}

#[test]
fn request_url_without_query() {
    let client = test_client("https://api-gateway.coupang.com");
    assert_eq!(
        client.request_url(DEEPLINK_PATH, &[]),
        "https://api-gateway.coupang.com/v2/providers/affiliate_open_api/apis/openapi/v1/deeplink"
    );
}

#[test]
fn request_url_encodes_query_in_order() {
    let client = test_client("https://api-gateway.coupang.com/");
    assert_eq!(
        client.request_url(
            SEARCH_PATH,
            &[("keyword", "무선 이어폰"), ("limit", "10"), ("offset", "20")]
        ),
        "https://api-gateway.coupang.com/v2/providers/affiliate_open_api/apis/openapi/products/search\
         ?keyword=%EB%AC%B4%EC%84%A0+%EC%9D%B4%EC%96%B4%ED%8F%B0&limit=10&offset=20"
    );
}

#[test]
fn with_base_url_rejects_relative_url() {
    let creds = Credentials::new("a", "b").unwrap();
    let result = PartnersClient::with_base_url(creds, 5, "ua", "not-a-url");
    assert!(
        matches!(result, Err(ClientError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}

#[test]
fn with_base_url_rejects_non_http_scheme() {
    let creds = Credentials::new("a", "b").unwrap();
    let result = PartnersClient::with_base_url(creds, 5, "ua", "ftp://api.example.com");
    assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
}

#[test]
fn check_api_error_accepts_zero_code() {
    assert!(PartnersClient::check_api_error(&json!({"rCode": "0", "data": []})).is_ok());
    assert!(PartnersClient::check_api_error(&json!({"rCode": 0})).is_ok());
}

#[test]
fn check_api_error_accepts_missing_code() {
    assert!(PartnersClient::check_api_error(&json!({"data": []})).is_ok());
}

#[test]
fn check_api_error_rejects_non_zero_code() {
    let err = PartnersClient::check_api_error(
        &json!({"rCode": "400", "rMessage": "keyword is required"}),
    )
    .unwrap_err();
    assert!(
        matches!(err, ClientError::Api { ref code, ref message } if code == "400" && message == "keyword is required"),
        "got: {err:?}"
    );
}

#[test]
fn offsets_are_zero_based() {
    assert_eq!(search_offset(1, 10), 0);
    assert_eq!(search_offset(2, 10), 10);
    assert_eq!(search_offset(3, 50), 100);
}

#[test]
fn page_zero_is_treated_as_first_page() {
    assert_eq!(search_offset(0, 10), 0);
}
