//! HTTP 서버를 상대로 한 디스패처 통합 테스트.

use huobi_core::{ClientConfig, HuobiError};
use huobi_rest::{
    CancelOrderRequest, DepthRequest, HuobiRestClient, OrderType, PlaceOrderRequest, QueryParams,
    Request,
};
use mockito::{Matcher, Server};
use rust_decimal_macros::dec;
use serde_json::json;

fn signed_client(server: &Server) -> HuobiRestClient {
    let config = ClientConfig::new(server.url()).with_credentials("access", "secret");
    HuobiRestClient::new(config).expect("valid config")
}

fn public_client(server: &Server) -> HuobiRestClient {
    HuobiRestClient::public(server.url()).expect("valid config")
}

/// 인증 필드 다섯 개가 순서대로 붙은 쿼리.
fn auth_query_regex() -> Matcher {
    Matcher::Regex(
        r"^AccessKeyId=access&SignatureMethod=HmacSHA256&SignatureVersion=2&Timestamp=\d{4}-\d{2}-\d{2}T\d{2}%3A\d{2}%3A\d{2}&Signature=[^&]+$"
            .to_string(),
    )
}

#[tokio::test]
async fn test_depth_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/market/depth")
        .match_query(Matcher::Exact("symbol=btcusdt&type=step0".to_string()))
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_header("user-agent", Matcher::Any)
        .match_body(Matcher::Exact(String::new()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"ok","ch":"market.btcusdt.depth.step0","tick":{"bids":[[30000.0,1.5]],"asks":[[30001.0,0.2]]}}"#)
        .create_async()
        .await;

    let client = public_client(&server);
    let envelope = client
        .get_orderbook(&DepthRequest::new("btcusdt"))
        .await
        .expect("depth request");

    mock.assert_async().await;
    assert!(envelope.is_ok());
    assert_eq!(envelope.data().unwrap()["bids"][0][1], json!(1.5));
}

#[tokio::test]
async fn test_raw_get_through_dispatcher() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/market/depth")
        .match_query(Matcher::Exact("symbol=btcusdt&type=step0".to_string()))
        .with_status(200)
        .with_body(r#"{"status":"ok","tick":{}}"#)
        .create_async()
        .await;

    let client = public_client(&server);
    let query = QueryParams::new()
        .with("symbol", "btcusdt")
        .with("type", "step0");
    client
        .get("/market/depth", query, false)
        .await
        .expect("raw request");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_authenticated_place_order() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/order/orders/place")
        .match_query(auth_query_regex())
        .match_header("content-type", "application/json")
        .match_header("accept", "application/json")
        .match_body(Matcher::Json(json!({
            "account-id": "spot",
            "symbol": "btcusdt",
            "type": "buy-market",
            "amount": "1",
            "source": "spot-api"
        })))
        .with_status(200)
        .with_body(r#"{"status":"ok","data":"59378"}"#)
        .create_async()
        .await;

    let client = signed_client(&server);
    let request = PlaceOrderRequest::market("spot", "btcusdt", OrderType::BuyMarket, dec!(1));
    let envelope = client.place_order(&request).await.expect("order placed");

    mock.assert_async().await;
    assert_eq!(envelope.data_as::<String>().unwrap(), "59378");
}

#[tokio::test]
async fn test_raw_body_sent_unmodified() {
    let mut server = Server::new_async().await;
    let body = json!({"account-id": "spot", "symbol": "btcusdt", "type": "buy-market", "amount": "1"});
    let mock = server
        .mock("POST", "/v1/order/orders/place")
        .match_query(auth_query_regex())
        .match_body(Matcher::Json(body.clone()))
        .with_status(200)
        .with_body(r#"{"status":"ok","data":"1"}"#)
        .create_async()
        .await;

    let client = signed_client(&server);
    client
        .execute(
            Request::post("/v1/order/orders/place")
                .with_body(body)
                .authenticated(),
        )
        .await
        .expect("order placed");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_rejection_surfaces_envelope() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/order/orders/59378/submitcancel")
        .match_query(auth_query_regex())
        .with_status(200)
        .with_body(r#"{"status":"error","err-code":"order-orderstate-error","err-msg":"order state error","data":null}"#)
        .create_async()
        .await;

    let client = signed_client(&server);
    let err = client
        .cancel_order(&CancelOrderRequest::new("59378"))
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(err.is_rejection());
    assert_eq!(err.err_code().as_deref(), Some("order-orderstate-error"));

    let envelope = err.envelope().expect("envelope");
    assert_eq!(envelope.status(), Some("error"));
    assert_eq!(envelope.err_msg(), Some("order state error"));
}

#[tokio::test]
async fn test_http_error_status() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/market/depth")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = public_client(&server);
    let err = client
        .get_orderbook(&DepthRequest::new("btcusdt"))
        .await
        .unwrap_err();

    mock.assert_async().await;
    match err {
        HuobiError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/market/depth")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = public_client(&server);
    let err = client
        .get_orderbook(&DepthRequest::new("btcusdt"))
        .await
        .unwrap_err();

    assert!(matches!(err, HuobiError::Parse(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_missing_credentials_never_reaches_server() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = public_client(&server);
    let request = PlaceOrderRequest::market("spot", "btcusdt", OrderType::BuyMarket, dec!(1));
    let err = client.place_order(&request).await.unwrap_err();

    assert!(matches!(err, HuobiError::MissingCredentials));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // 바인딩된 적 없는 포트
    let client = HuobiRestClient::public("http://127.0.0.1:9").expect("valid config");
    let err = client
        .get_orderbook(&DepthRequest::new("btcusdt"))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(!err.to_string().contains("Signature"));
}
