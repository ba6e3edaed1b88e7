use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ClientError, Result};
use crate::models::{DecodedBody, RawResult};

lazy_static! {
    /// Body the validator sends when it could not parse the request at all
    static ref DECODE_FAILURE: Regex =
        Regex::new(r"(?i)^unabled? to decode incoming request").unwrap();
}

/// Classify a raw result by status code.
///
/// `Ok(Some(body))` for 200, `Ok(None)` for 404, an error for everything
/// else. Headers are never consulted.
pub fn unwrap_response(result: RawResult) -> Result<Option<DecodedBody>> {
    match result.status_code {
        200 => Ok(Some(result.body)),
        404 => Ok(None),
        400 => {
            let text = body_text(&result.body);
            if DECODE_FAILURE.is_match(&text) {
                tracing::warn!("Validator could not decode request: {}", text);
                return Err(ClientError::Status(400));
            }
            Err(application_error(&text))
        }
        status => {
            tracing::warn!(status, "Validator returned unexpected status");
            Err(ClientError::Status(status))
        }
    }
}

/// Split a `type: message` body on its first colon
fn application_error(text: &str) -> ClientError {
    let (head, rest) = match text.split_once(':') {
        Some((head, rest)) => (head, Some(rest)),
        None => (text, None),
    };

    ClientError::Application {
        status_code: 400,
        error_type_message: (!head.is_empty()).then(|| head.trim().to_string()),
        error_message: rest.map(|r| r.trim().to_string()),
    }
}

fn body_text(body: &DecodedBody) -> String {
    if let Some(text) = body.as_text() {
        return text.to_string();
    }
    if body.is_null() {
        return String::new();
    }
    match body {
        DecodedBody::Json(v) => v.to_string(),
        other => other
            .clone()
            .into_json()
            .map(|v| v.to_string())
            .unwrap_or_default(),
    }
}
