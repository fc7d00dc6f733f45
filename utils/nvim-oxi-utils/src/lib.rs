//! nvim-oxi helpers shared by plugin crates.

pub mod decode;
pub mod notify;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing key `{key}`")]
    MissingKey { key: String },
    #[error("`{key}` must not be empty")]
    EmptyValue { key: String },
    #[error("{message}")]
    Unexpected { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn missing_key(key: &str) -> Self {
        Self::MissingKey {
            key: key.to_string(),
        }
    }

    pub fn empty_value(key: &str) -> Self {
        Self::EmptyValue {
            key: key.to_string(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }
}
