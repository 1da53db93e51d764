//! JSON encoding of request payloads and decoding of response bodies.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialize `value` to compact JSON text.
pub fn serialize<T>(value: &T) -> Result<String, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value)
}

/// Deserialize JSON text into `T`.
///
/// Empty or whitespace-only input is not an error: it yields `T::default()`,
/// so a `200 OK` with no content decodes to `None`, `()` or an empty value.
pub fn deserialize<T>(text: &str) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(text)
}
