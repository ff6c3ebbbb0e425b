//! Deserializers for request shapes serde does not cover directly.

use serde::{Deserialize, Deserializer};

/// Tell an explicit `null` apart from an absent field.
///
/// Use with `#[serde(default, deserialize_with = "nullable")]` on an
/// `Option<Option<T>>`: absent is `None`, `null` is `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Parse a comma-separated id list such as `3,7,9` from a query string.
///
/// Empty segments are skipped, so `""` and `"3,"` are accepted.
pub fn comma_separated_ids<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let mut ids = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| serde::de::Error::custom(format!("invalid id '{}'", s)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}
