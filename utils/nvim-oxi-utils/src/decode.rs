use nvim_oxi::serde::Deserializer;
use nvim_oxi::{Dictionary, Object};
use serde::Deserialize;

use crate::{Error, Result};

/// Deserializes a lua options table into `T`.
pub fn deserialize<T>(dict: &Dictionary) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(Deserializer::new(Object::from(dict.clone())))
        .map_err(|err| Error::unexpected(err.to_string()))
}

/// A missing value stays `None`; an empty string is an error.
pub fn non_empty(value: Option<String>, key: &str) -> Result<Option<String>> {
    match value {
        Some(value) if value.is_empty() => Err(Error::empty_value(key)),
        other => Ok(other),
    }
}

pub fn require_non_empty(value: Option<String>, key: &str) -> Result<String> {
    non_empty(value, key)?.ok_or_else(|| Error::missing_key(key))
}
