//! Null tolerance for upstream collections
//!
//! The payroll API sends `null` for lists it has nothing for as often as it
//! omits them. `#[serde(default)]` only covers the missing key, so every
//! collection field routes through these.

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` as an empty list.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Like [`null_as_empty`], and also drops `null` entries inside the list.
pub(crate) fn skip_null_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries.into_iter().flatten().collect())
}
