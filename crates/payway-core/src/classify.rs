use serde::{Deserialize, Deserializer};

use crate::error::PaywayError;

/// Status codes the gateway documents as terminal client errors
const CLIENT_ERROR_STATUSES: &[u16] = &[400, 401, 403, 405, 406, 407, 409, 410, 415, 429, 501, 503];

/// Snapshot of one completed HTTP exchange
///
/// The transport has already read the body by the time this exists;
/// classification is a pure function of the snapshot.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase for the status
    pub reason: String,
    /// Request URL, for error messages
    pub url: String,
    /// Raw body text (possibly empty)
    pub body: String,
}

/// One field-level problem from a documented 404/422 error body
///
/// Values are kept verbatim as the gateway sent them, for display.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub field_value: Option<String>,
}

impl FieldError {
    /// Readable single-line form
    pub fn to_message(&self) -> String {
        format!(
            "Field: {} Message: {} Field Value: {}",
            self.field_name.as_deref().unwrap_or_default(),
            self.message.as_deref().unwrap_or_default(),
            self.field_value.as_deref().unwrap_or_default(),
        )
    }
}

/// Join a validation error list into one readable string
pub fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_message)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Opaque gateway-side failure reported with a 500 body
///
/// The identifiers are not interpreted; they exist to be quoted back to
/// PayWay support.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerFault {
    #[serde(default, deserialize_with = "opaque_id")]
    pub error_number: Option<String>,
    #[serde(default, deserialize_with = "opaque_id")]
    pub trace_code: Option<String>,
}

impl ServerFault {
    /// Message embedded in the resulting transport failure
    pub fn to_message(&self) -> String {
        format!(
            "Error number: {} Trace code: {}",
            self.error_number.as_deref().unwrap_or("unknown"),
            self.trace_code.as_deref().unwrap_or("unknown"),
        )
    }
}

// The gateway emits these identifiers as either JSON strings or numbers.
fn opaque_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Deserialize)]
struct ValidationBody {
    #[serde(default)]
    data: Vec<FieldError>,
}

/// Non-exceptional meaning of one exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The caller parses the payload next; a 204 carries none
    Success,
    /// Documented field-level problems, order preserved from the body
    Validation(Vec<FieldError>),
}

/// Classify one completed exchange
///
/// Guards run in order on the status code before any body parsing:
///
/// 1. A status from the documented client-error list is a terminal failure
///    whose message has the shape
///    `"{status} Client Error: {reason} for url: {url}"`.
/// 2. 404 and 422 carry a documented JSON error body; its `data` list comes
///    back as [`Classification::Validation`] — data, not an error.
/// 3. 500 is always terminal: with a parseable body the [`ServerFault`]
///    identifiers are quoted, otherwise the message is
///    `"Internal server error"`.
/// 4. Anything else (200, 204, ...) is [`Classification::Success`].
pub fn classify(response: &RawResponse) -> Result<Classification, PaywayError> {
    if CLIENT_ERROR_STATUSES.contains(&response.status) {
        return Err(PaywayError::new(
            response.status.to_string(),
            format!(
                "{} Client Error: {} for url: {}",
                response.status, response.reason, response.url
            ),
        ));
    }

    if matches!(response.status, 404 | 422) {
        let body: ValidationBody = serde_json::from_str(&response.body)
            .map_err(|_| PaywayError::from_catalog("S9901"))?;
        return Ok(Classification::Validation(body.data));
    }

    if response.status == 500 {
        let Ok(fault) = serde_json::from_str::<ServerFault>(&response.body) else {
            return Err(PaywayError::new("500", "Internal server error"));
        };
        return Err(PaywayError::new("500", fault.to_message()));
    }

    Ok(Classification::Success)
}
