use mockito::{Matcher, Server};
use payu::{PayuClient, PayuError, RetryPolicy};
use serde_json::json;

async fn authorized_client(server: &mut Server, token: &str) -> PayuClient {
    server
        .mock("POST", "/pl/standard/user/oauth/authorize")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()),
            Matcher::UrlEncoded("client_id".into(), "secret-login".into()),
            Matcher::UrlEncoded("client_secret".into(), "secret-password".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"access_token": "{token}"}}"#))
        .create_async()
        .await;

    PayuClient::connect(
        "secret-login",
        "secret-password",
        &server.url(),
        RetryPolicy::default(),
    )
    .await
    .expect("authorization should succeed")
}

#[tokio::test]
async fn test_authentication_attaches_bearer_token() {
    let mut server = Server::new_async().await;
    let client = authorized_client(&mut server, "secret-access-token").await;

    let paymethods = server
        .mock("GET", "/api/v2_1/paymethods")
        .match_header("authorization", "Bearer secret-access-token")
        .with_status(200)
        .with_body(r#"{}"#)
        .create_async()
        .await;

    client.pay_methods().await.unwrap();
    paymethods.assert_async().await;
}

#[tokio::test]
async fn test_authentication_wrong_credentials() {
    let mut server = Server::new_async().await;
    let auth = server
        .mock("POST", "/pl/standard/user/oauth/authorize")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"error": "invalid_client", "error_description": "Bad client credentials"}"#)
        .create_async()
        .await;

    let result = PayuClient::connect("wrong", "wrong", &server.url(), RetryPolicy::default()).await;

    auth.assert_async().await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Bad client credentials"));
    assert!(err.downcast_ref::<PayuError>().is_some());
}

#[tokio::test]
async fn test_each_client_uses_its_own_environment_token() {
    // Two mock servers stand in for the sandbox and production environments;
    // each client must attach only the token issued by its own environment.
    let mut sandbox = Server::new_async().await;
    let mut production = Server::new_async().await;

    let sandbox_client = authorized_client(&mut sandbox, "sandbox_token").await;
    let production_client = authorized_client(&mut production, "production_token").await;

    let sandbox_methods = sandbox
        .mock("GET", "/api/v2_1/paymethods")
        .match_header("authorization", "Bearer sandbox_token")
        .with_status(200)
        .with_body(r#"{}"#)
        .create_async()
        .await;
    let production_methods = production
        .mock("GET", "/api/v2_1/paymethods")
        .match_header("authorization", "Bearer production_token")
        .with_status(200)
        .with_body(r#"{}"#)
        .create_async()
        .await;

    sandbox_client.pay_methods().await.unwrap();
    production_client.pay_methods().await.unwrap();

    sandbox_methods.assert_async().await;
    production_methods.assert_async().await;
}

#[tokio::test]
async fn test_success_response_returned_unchanged() {
    let mut server = Server::new_async().await;
    let client = authorized_client(&mut server, "token").await;

    let body = json!({
        "payByLinks": [{
            "value": "c",
            "name": "Płatność online kartą płatniczą",
            "status": "ENABLED",
            "minAmount": 50,
            "maxAmount": 100000
        }]
    });
    server
        .mock("GET", "/api/v2_1/paymethods")
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let methods = client.pay_methods().await.unwrap();
    assert_eq!(methods, body);
    assert_eq!(
        methods["payByLinks"][0]["name"],
        "Płatność online kartą płatniczą"
    );
}

#[tokio::test]
async fn test_error_normalization_with_raw_body() {
    let mut server = Server::new_async().await;
    let client = authorized_client(&mut server, "token").await;

    let error_body = json!({
        "status": {"statusCode": "ERROR_ORDER_NOT_UNIQUE", "statusDesc": "desc"}
    });
    let order = server
        .mock("GET", "/api/v2_1/orders/123456")
        .with_status(400)
        .with_body(error_body.to_string())
        .create_async()
        .await;

    let err = client.order_status("123456").await.unwrap_err();
    order.assert_async().await;

    assert!(err.to_string().contains("ERROR_ORDER_NOT_UNIQUE"));
    let payu_err = err.downcast_ref::<PayuError>().unwrap();
    assert_eq!(payu_err.raw_error(), Some(&error_body));
}

#[tokio::test]
async fn test_error_normalization_unparseable_body() {
    let mut server = Server::new_async().await;
    let client = authorized_client(&mut server, "token").await;

    server
        .mock("GET", "/api/v2_1/orders/123456")
        .with_status(500)
        .create_async()
        .await;

    let err = client.order_status("123456").await.unwrap_err();
    assert!(err.to_string().contains("RESPONSE FORMAT"));
    assert!(
        err.downcast_ref::<PayuError>()
            .unwrap()
            .raw_error()
            .is_none()
    );
}

#[tokio::test]
async fn test_order_confirm_sends_default_body() {
    let mut server = Server::new_async().await;
    let client = authorized_client(&mut server, "token").await;

    let confirm = server
        .mock("PUT", "/api/v2_1/orders/123456/status")
        .match_body(Matcher::Json(json!({"orderStatus": "COMPLETED"})))
        .with_status(200)
        .with_body(r#"{"status": {"statusCode": "SUCCESS", "statusDesc": "Status was updated"}}"#)
        .create_async()
        .await;

    client.order_confirm("123456", None).await.unwrap();
    confirm.assert_async().await;
}

#[tokio::test]
async fn test_order_confirm_explicit_body_overrides_default() {
    let mut server = Server::new_async().await;
    let client = authorized_client(&mut server, "token").await;

    let confirm = server
        .mock("PUT", "/api/v2_1/orders/123456/status")
        .match_body(Matcher::Json(json!({"orderStatus": "CANCELED"})))
        .with_status(200)
        .with_body(r#"{"status": {"statusCode": "SUCCESS", "statusDesc": "Status was updated"}}"#)
        .create_async()
        .await;

    client
        .order_confirm("123456", Some(json!({"orderStatus": "CANCELED"})))
        .await
        .unwrap();
    confirm.assert_async().await;
}

#[tokio::test]
async fn test_full_refund_sends_default_body() {
    let mut server = Server::new_async().await;
    let client = authorized_client(&mut server, "token").await;

    let refund = server
        .mock("POST", "/api/v2_1/orders/123456/refunds")
        .match_body(Matcher::Json(json!({"refund": {"description": "Refund"}})))
        .with_status(200)
        .with_body(r#"{"status": {"statusCode": "SUCCESS", "statusDesc": "Status was updated"}}"#)
        .create_async()
        .await;

    client.order_full_refund("123456", None).await.unwrap();
    refund.assert_async().await;
}

#[tokio::test]
async fn test_partial_refund() {
    let mut server = Server::new_async().await;
    let client = authorized_client(&mut server, "token").await;

    let refund = server
        .mock("POST", "/api/v2_1/orders/123456/refunds")
        .match_body(Matcher::Json(json!({
            "refund": {"description": "Refund", "amount": 900}
        })))
        .with_status(200)
        .with_body(r#"{"status": {"statusCode": "SUCCESS", "statusDesc": "Status was updated"}}"#)
        .create_async()
        .await;

    client
        .order_refund(
            "123456",
            json!({"refund": {"description": "Refund", "amount": 900}}),
        )
        .await
        .unwrap();
    refund.assert_async().await;
}

#[tokio::test]
async fn test_create_order_returns_first_response_of_redirect_chain() {
    let mut server = Server::new_async().await;
    let url = server.url();
    let client = authorized_client(&mut server, "token").await;

    let gateway_body = json!({
        "status": {"statusCode": "SUCCESS"},
        "redirectUri": format!("{url}/payment-page"),
        "orderId": "WZHF5FFDRJ140731GUEST000P01"
    });
    let create = server
        .mock("POST", "/api/v2_1/orders")
        .match_body(Matcher::Json(json!({"description": "Order", "totalAmount": "1000"})))
        .with_status(302)
        .with_header("location", &format!("{url}/payment-page"))
        .with_body(gateway_body.to_string())
        .create_async()
        .await;
    let payment_page = server
        .mock("GET", "/payment-page")
        .expect(0)
        .create_async()
        .await;

    let response = client
        .create_order(json!({"description": "Order", "totalAmount": "1000"}))
        .await
        .unwrap();

    create.assert_async().await;
    payment_page.assert_async().await;
    assert_eq!(response, gateway_body);
}

#[tokio::test]
async fn test_order_cancel_and_transactions_paths() {
    let mut server = Server::new_async().await;
    let client = authorized_client(&mut server, "token").await;

    let cancel = server
        .mock("DELETE", "/api/v2_1/orders/123456")
        .with_status(200)
        .with_body(r#"{"status": {"statusCode": "SUCCESS"}}"#)
        .create_async()
        .await;
    let transactions = server
        .mock("GET", "/api/v2_1/orders/123456/transactions")
        .with_status(200)
        .with_body(r#"{"transactions": []}"#)
        .create_async()
        .await;

    client.order_cancel("123456").await.unwrap();
    let listed = client.get_transactions("123456").await.unwrap();

    cancel.assert_async().await;
    transactions.assert_async().await;
    assert_eq!(listed, json!({"transactions": []}));
}

#[tokio::test]
async fn test_connection_failure_propagates_transport_error() {
    // Nothing listens on this port, so every attempt (including retries)
    // fails to connect and the reqwest error reaches the caller unwrapped.
    let result = PayuClient::connect(
        "secret-login",
        "secret-password",
        "http://127.0.0.1:9",
        RetryPolicy::new(3),
    )
    .await;

    let err = result.unwrap_err();
    assert!(err.downcast_ref::<PayuError>().is_none());
    assert!(
        err.downcast_ref::<reqwest::Error>()
            .is_some_and(|e| e.is_connect() || e.is_timeout())
    );
}
