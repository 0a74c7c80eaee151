use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{ResultCode, Tel};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has no numeric `result` field")]
    MissingResult,
}

/// Fields every response carries, plus the endpoint-specific remainder.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default, deserialize_with = "lenient")]
    result: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    errmsg: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    msg: Option<String>,
    #[serde(flatten)]
    payload: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    pub result: ResultCode,
    pub message: String,
    pub payload: T,
}

/// Decode a response body. Payload fields that are absent, `null` or of an unexpected type
/// fall back to their defaults; only a non-JSON body or a missing `result` is an error.
pub fn decode_envelope<T: DeserializeOwned>(json: &str) -> Result<Decoded<T>, TransportError> {
    let envelope: Envelope<T> = serde_json::from_str(json)?;
    let result = envelope.result.ok_or(TransportError::MissingResult)?;
    Ok(Decoded {
        result: ResultCode::new(result),
        message: non_empty(envelope.errmsg)
            .or(envelope.msg)
            .unwrap_or_default(),
        payload: envelope.payload,
    })
}

/// Deserialize a field, replacing `null` or mistyped values with `T::default()`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Deserialize a list element by element. Entries that don't decode are dropped with a
/// warning instead of discarding the whole list; a non-array value yields an empty list.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Null => return Ok(Vec::new()),
        other => {
            tracing::warn!(value = %other, "expected a list in response, ignoring");
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(&item) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(index, entry = %item, error = %err, "skipping malformed list entry");
                None
            }
        })
        .collect())
}

/// Empty strings mean "absent" on the wire.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|it| !it.is_empty())
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TelBody<'a> {
    nationcode: &'a str,
    mobile: &'a str,
}

impl<'a> From<&'a Tel> for TelBody<'a> {
    fn from(tel: &'a Tel) -> Self {
        Self {
            nationcode: tel.nationcode().as_str(),
            mobile: tel.mobile().as_str(),
        }
    }
}
