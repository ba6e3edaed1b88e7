//! Response body decoding keyed on the declared content type.

use crate::error::{ClientError, Result};
use crate::models::DecodedBody;

pub const CBOR_CONTENT_TYPE: &str = "application/cbor";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// How a response body is framed, resolved once from its `content-type` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Cbor,
    Json,
    Text,
}

impl ContentKind {
    /// Media type parameters such as `; charset=utf-8` are ignored.
    pub fn from_header(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return ContentKind::Text;
        };
        let media_type = value.split(';').next().unwrap_or_default().trim();

        if media_type.eq_ignore_ascii_case(CBOR_CONTENT_TYPE) {
            ContentKind::Cbor
        } else if media_type.eq_ignore_ascii_case(JSON_CONTENT_TYPE) {
            ContentKind::Json
        } else {
            ContentKind::Text
        }
    }
}

/// Decode a fully received body.
pub fn decode(kind: ContentKind, bytes: &[u8]) -> Result<DecodedBody> {
    match kind {
        // only the first value is read, anything after it is left alone
        ContentKind::Cbor => ciborium::de::from_reader::<ciborium::Value, _>(bytes)
            .map(DecodedBody::Cbor)
            .map_err(|e| ClientError::Decode(format!("invalid CBOR: {}", e))),
        ContentKind::Json => {
            if bytes.is_empty() {
                return Ok(DecodedBody::Json(serde_json::Value::Null));
            }
            serde_json::from_slice(bytes)
                .map(DecodedBody::Json)
                .map_err(|e| ClientError::Decode(format!("invalid JSON: {}", e)))
        }
        ContentKind::Text => Ok(DecodedBody::Text(String::from_utf8_lossy(bytes).into_owned())),
    }
}
