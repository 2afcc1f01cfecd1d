use serde::Serialize;

/// Base trait for every record this crate serializes
pub trait JsonObject {
    /// Convert to JSON string
    fn to_json_string(&self) -> Result<String, serde_json::Error>
    where
        Self: Serialize,
    {
        serde_json::to_string(self)
    }

    /// Convert to JSON value
    fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error>
    where
        Self: Serialize,
    {
        serde_json::to_value(self)
    }
}

/// Serializer helper that skips empty vectors
#[inline]
pub fn skip_if_empty_vec<T>(value: &Vec<T>) -> bool {
    value.is_empty()
}

/// Serializer helper that skips empty strings
#[inline]
pub fn skip_if_empty_string(value: &str) -> bool {
    value.is_empty()
}

/// Deserializer helper for fields the source sends as explicit `null`
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    let value: Option<T> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
