//! Serde helpers for the server wire format.

use serde::{Deserialize, Deserializer};

/// Decodes an array field the server may send as `null` into an empty `Vec`.
pub(crate) fn null_to_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
