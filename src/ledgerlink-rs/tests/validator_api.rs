use serde::Deserialize;
use sha2::{Digest, Sha256};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ledgerlink_rs::ledgerlink_core::CHUNK_SIZE;
use ledgerlink_rs::{ClientError, DecodedBody, HttpTransport, Payload, ValidatorClient};

const SIGNATURE: &str = "G+2mCGzzhAXmWVyKfHqFoy8iDCPCPFUhvPrS5hDzA1aOo1Wy8jbmJN+BgZ1jnX3E9=";

fn client_for(server: &MockServer) -> ValidatorClient {
    let addr = server.address();
    ValidatorClient::new(addr.ip().to_string(), addr.port()).unwrap()
}

fn expected_id(signature: &[u8]) -> String {
    hex::encode(Sha256::digest(signature))[..16].to_string()
}

fn cbor(value: &ciborium::Value) -> Vec<u8> {
    let mut out = Vec::new();
    ciborium::ser::into_writer(value, &mut out).unwrap();
    out
}

#[tokio::test]
async fn test_submit_json_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/IntegerKeyTransaction"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Transaction": { "Signature": SIGNATURE }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let id = client
        .send_transaction("/IntegerKeyTransaction", serde_json::json!({"x": 1}))
        .await
        .unwrap();

    assert_eq!(id.as_str(), expected_id(SIGNATURE.as_bytes()));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body, br#"{"x":1}"#.to_vec());
    assert_eq!(
        requests[0].headers.get("content-length").unwrap().to_str().unwrap(),
        "7"
    );
}

#[tokio::test]
async fn test_submit_cbor_payload_with_cbor_response() {
    let server = MockServer::start().await;

    let envelope = ciborium::Value::Map(vec![(
        ciborium::Value::Text("Transaction".into()),
        ciborium::Value::Map(vec![(
            ciborium::Value::Text("Signature".into()),
            ciborium::Value::Text(SIGNATURE.into()),
        )]),
    )]);

    Mock::given(method("POST"))
        .and(path("/txn"))
        .and(header("content-type", "application/cbor"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(cbor(&envelope), "application/cbor"))
        .mount(&server)
        .await;

    let payload = cbor(&ciborium::Value::Text("payload".into()));
    let id = client_for(&server)
        .send_transaction("/txn", payload.clone())
        .await
        .unwrap();
    assert_eq!(id.as_str(), expected_id(SIGNATURE.as_bytes()));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].body, payload);
}

#[tokio::test]
async fn test_large_body_arrives_intact() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/txn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Transaction": { "Signature": SIGNATURE }
        })))
        .mount(&server)
        .await;

    let payload: Vec<u8> = (0..3 * CHUNK_SIZE + 123).map(|i| (i % 256) as u8).collect();
    client_for(&server)
        .send_transaction("/txn", Payload::Binary(payload.clone()))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].body, payload);
    assert_eq!(
        requests[0].headers.get("content-length").unwrap().to_str().unwrap(),
        payload.len().to_string()
    );
}

#[tokio::test]
async fn test_small_chunk_size_still_frames_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Transaction": { "Signature": SIGNATURE }
        })))
        .mount(&server)
        .await;

    let addr = server.address();
    let transport = HttpTransport::new().unwrap().with_chunk_size(3).unwrap();
    let client =
        ValidatorClient::with_transport(addr.ip().to_string(), addr.port(), transport).unwrap();

    client.send_transaction("/txn", "{\"a\":\"bcdefg\"}").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].body, b"{\"a\":\"bcdefg\"}".to_vec());
}

#[tokio::test]
async fn test_submit_structured_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("InvalidTransactionError: duplicate"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_transaction("/txn", "{}")
        .await
        .unwrap_err();

    match err {
        ClientError::Application {
            status_code,
            error_type_message,
            error_message,
        } => {
            assert_eq!(status_code, 400);
            assert_eq!(error_type_message.as_deref(), Some("InvalidTransactionError"));
            assert_eq!(error_message.as_deref(), Some("duplicate"));
        }
        other => panic!("expected application error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_undecodable_error_body_is_read_as_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_raw(b"TypeA: something broke".to_vec(), "application/json"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_transaction("/txn", "{}")
        .await
        .unwrap_err();

    match err {
        ClientError::Application {
            status_code,
            error_type_message,
            error_message,
        } => {
            assert_eq!(status_code, 400);
            assert_eq!(error_type_message.as_deref(), Some("TypeA"));
            assert_eq!(error_message.as_deref(), Some("something broke"));
        }
        other => panic!("expected application error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_decode_failure_sentinel_is_generic_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("unable to decode incoming request: bad cbor"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_transaction("/txn", vec![0xffu8])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Status(400)), "got {:?}", err);
}

#[tokio::test]
async fn test_missing_signature_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"Transaction": {}})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_transaction("/txn", "{}")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_list_stores() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([
                "/IntegerKeyTransaction",
                "/MarketPlaceTransaction"
            ])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let names = client_for(&server).get_store_names().await.unwrap().unwrap();
    assert_eq!(names, vec!["/IntegerKeyTransaction", "/MarketPlaceTransaction"]);
}

#[tokio::test]
async fn test_store_keys_and_objects_paths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/IntegerKeyTransaction"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["a", "b"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/store/IntegerKeyTransaction/*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"a": 1, "b": 2})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let keys = client.get_store("IntegerKeyTransaction").await.unwrap();
    assert_eq!(keys, Some(DecodedBody::Json(serde_json::json!(["a", "b"]))));

    let objects = client.get_store_objects("IntegerKeyTransaction").await.unwrap();
    assert_eq!(objects, Some(DecodedBody::Json(serde_json::json!({"a": 1, "b": 2}))));
}

#[derive(Debug, Deserialize, PartialEq)]
struct Participant {
    name: String,
    balance: u64,
}

#[tokio::test]
async fn test_get_store_object_typed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/MarketPlaceTransaction/alice"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"name": "alice", "balance": 10})),
        )
        .mount(&server)
        .await;

    let participant: Participant = client_for(&server)
        .get_store_object_as("MarketPlaceTransaction", "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        participant,
        Participant {
            name: "alice".to_string(),
            balance: 10
        }
    );
}

#[tokio::test]
async fn test_missing_object_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/MarketPlaceTransaction/nobody"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let body = client_for(&server)
        .get_store_object("MarketPlaceTransaction", "nobody")
        .await
        .unwrap();
    assert!(body.is_none());
}

#[tokio::test]
async fn test_empty_json_body_is_null() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/empty"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "application/json"))
        .mount(&server)
        .await;

    let body = client_for(&server).get_store("empty").await.unwrap().unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn test_wildcard_key_never_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_store_object("MarketPlaceTransaction", "*")
        .await
        .unwrap_err();
    assert!(err.is_precondition());
}

#[tokio::test]
async fn test_slashed_wildcard_key_never_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_store_object("MarketPlaceTransaction", "/*")
        .await
        .unwrap_err();
    assert!(err.is_precondition());
}

#[tokio::test]
async fn test_server_error_is_generic_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_stores().await.unwrap_err();
    assert!(matches!(err, ClientError::Status(500)));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // bind then release a port so nothing is listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ValidatorClient::new(addr.ip().to_string(), addr.port()).unwrap();
    let err = client.get_stores().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "got {:?}", err);
}
