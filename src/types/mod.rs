pub mod activity;
pub mod error;
pub mod expense;
pub mod invitation;
pub mod response;
pub mod task;
pub mod token;
pub mod user;

use serde::{Deserialize, Deserializer};

/// For `Option<Option<T>>` patch fields with `#[serde(default)]`: a missing key stays `None`,
/// an explicit `null` becomes `Some(None)`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
