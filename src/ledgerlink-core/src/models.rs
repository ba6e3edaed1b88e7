use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ClientError, Result};

pub type Headers = BTreeMap<String, String>;

/// HTTP methods the validator API uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RequestDescriptor is one outbound call to the validator, built fresh per call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub method: Method,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    pub fn get(host: impl Into<String>, port: u16, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            path: path.into(),
            method: Method::Get,
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn post(
        host: impl Into<String>,
        port: u16,
        path: impl Into<String>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            path: path.into(),
            method: Method::Post,
            headers: Headers::new(),
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Header lookup, ignoring ASCII case of the name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.path)
    }
}

/// Validator address check shared by every operation
pub(crate) fn validate_endpoint(host: &str, port: u16) -> Result<()> {
    if host.is_empty() {
        return Err(ClientError::precondition("'host' must be provided."));
    }
    if port == 0 {
        return Err(ClientError::precondition("'port' must be provided."));
    }
    Ok(())
}

/// Response body after content-type decoding
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBody {
    Cbor(ciborium::Value),
    Json(serde_json::Value), // empty JSON bodies decode to Null
    Text(String),
}

impl DecodedBody {
    pub fn is_null(&self) -> bool {
        match self {
            DecodedBody::Cbor(v) => v.is_null(),
            DecodedBody::Json(v) => v.is_null(),
            DecodedBody::Text(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DecodedBody::Text(s) => Some(s),
            DecodedBody::Json(serde_json::Value::String(s)) => Some(s),
            DecodedBody::Cbor(ciborium::Value::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Convert into a JSON value. CBOR byte strings become arrays of numbers;
    /// maps with non-string keys cannot be represented and fail.
    pub fn into_json(self) -> Result<serde_json::Value> {
        match self {
            DecodedBody::Json(v) => Ok(v),
            DecodedBody::Text(s) => Ok(serde_json::Value::String(s)),
            DecodedBody::Cbor(v) => {
                serde_json::to_value(&v).map_err(|e| ClientError::Decode(e.to_string()))
            }
        }
    }
}

/// RawResult is what a transport hands back for one request
#[derive(Debug, Clone, PartialEq)]
pub struct RawResult {
    pub body: DecodedBody,
    pub headers: Headers,
    pub status_code: u16,
}

impl RawResult {
    pub fn new(status_code: u16, body: DecodedBody) -> Self {
        Self {
            body,
            headers: Headers::new(),
            status_code,
        }
    }
}

/// TransactionId is the 16 hex character fingerprint of a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TransactionId(String);

impl TransactionId {
    pub(crate) fn new(hex: String) -> Self {
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TransactionId> for String {
    fn from(id: TransactionId) -> Self {
        id.0
    }
}
