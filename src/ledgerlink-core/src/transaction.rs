//! Transaction submission and transaction id derivation.

use sha2::{Digest, Sha256};

use crate::codec::{CBOR_CONTENT_TYPE, JSON_CONTENT_TYPE};
use crate::error::{ClientError, Result};
use crate::models::{validate_endpoint, DecodedBody, RequestDescriptor, TransactionId};
use crate::response::unwrap_response;
use crate::transport::Transport;

/// Hex characters kept from the signature digest
pub const TRANSACTION_ID_LEN: usize = 16;

/// Transaction payload as handed to the submitter
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Already CBOR encoded, sent as `application/cbor`
    Binary(Vec<u8>),
    /// JSON text, sent verbatim
    Text(String),
    /// Serialized to JSON text before sending
    Structured(serde_json::Value),
}

impl Payload {
    pub fn content_type(&self) -> &'static str {
        match self {
            Payload::Binary(_) => CBOR_CONTENT_TYPE,
            Payload::Text(_) | Payload::Structured(_) => JSON_CONTENT_TYPE,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Binary(b) => b.is_empty(),
            Payload::Text(s) => s.is_empty(),
            Payload::Structured(v) => v.is_null(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Payload::Binary(b) => Ok(b.clone()),
            Payload::Text(s) => Ok(s.as_bytes().to_vec()),
            Payload::Structured(v) => Ok(serde_json::to_vec(v)?),
        }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Binary(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Binary(bytes.to_vec())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Structured(value)
    }
}

/// Build the POST for a transaction family. The family string is used as the
/// request path as given.
pub fn build_submit_request(
    host: &str,
    port: u16,
    family: &str,
    payload: &Payload,
) -> Result<RequestDescriptor> {
    validate_endpoint(host, port)?;
    if family.is_empty() {
        return Err(ClientError::precondition("'family' must be provided."));
    }
    if payload.is_empty() {
        return Err(ClientError::precondition("'payload' must be provided."));
    }

    let body = payload.to_bytes()?;
    let content_length = body.len();

    Ok(RequestDescriptor::post(host, port, family, body)
        .with_header("Content-Type", payload.content_type())
        .with_header("Content-Length", content_length.to_string()))
}

/// First 16 hex characters of SHA-256 over the signature bytes
pub fn transaction_id_for(signature: &[u8]) -> TransactionId {
    let digest = Sha256::digest(signature);
    let mut hex = hex::encode(digest);
    hex.truncate(TRANSACTION_ID_LEN);
    TransactionId::new(hex)
}

/// Derive the transaction id from the `Transaction.Signature` field of a
/// submission response.
pub fn derive_transaction_id(envelope: &DecodedBody) -> Result<TransactionId> {
    let signature = match envelope {
        DecodedBody::Cbor(value) => cbor_signature(value),
        DecodedBody::Json(value) => value
            .get("Transaction")
            .and_then(|txn| txn.get("Signature"))
            .and_then(|sig| sig.as_str())
            .map(|s| s.as_bytes().to_vec()),
        DecodedBody::Text(_) => None,
    };

    signature
        .map(|sig| transaction_id_for(&sig))
        .ok_or_else(|| {
            ClientError::MalformedResponse(
                "response is missing Transaction.Signature".to_string(),
            )
        })
}

fn cbor_field<'a>(value: &'a ciborium::Value, name: &str) -> Option<&'a ciborium::Value> {
    value
        .as_map()?
        .iter()
        .find(|(k, _)| k.as_text() == Some(name))
        .map(|(_, v)| v)
}

fn cbor_signature(envelope: &ciborium::Value) -> Option<Vec<u8>> {
    let txn = cbor_field(envelope, "Transaction")?;
    match cbor_field(txn, "Signature")? {
        ciborium::Value::Bytes(b) => Some(b.clone()),
        ciborium::Value::Text(s) => Some(s.as_bytes().to_vec()),
        _ => None,
    }
}

/// Submit a payload to a transaction family and return its transaction id.
pub async fn submit_transaction<T>(
    transport: &T,
    host: &str,
    port: u16,
    family: &str,
    payload: impl Into<Payload>,
) -> Result<TransactionId>
where
    T: Transport + ?Sized,
{
    let payload = payload.into();
    let request = build_submit_request(host, port, family, &payload)?;
    tracing::debug!(
        family = %family,
        content_type = payload.content_type(),
        len = request.body.as_ref().map(Vec::len).unwrap_or_default(),
        "Submitting transaction"
    );

    let result = transport.execute(&request).await?;
    let envelope = unwrap_response(result)?.ok_or_else(|| {
        ClientError::MalformedResponse(format!("no transaction envelope returned for {}", family))
    })?;

    let id = derive_transaction_id(&envelope)?;
    tracing::info!(family = %family, txn_id = %id, "Transaction submitted");
    Ok(id)
}
