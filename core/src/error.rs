//! Error type shared by the core and the libemoji crate.

use thiserror::Error;

/// Failures reported by table, flag and tone operations.
///
/// Every variant is returned to the caller; nothing in the core panics on
/// bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A country code that is not exactly two characters long.
    #[error("not valid country code: {0:?}")]
    InvalidCountryCode(String),

    /// A string that is not one of the five skin-tone modifiers.
    #[error("tone is not a known or valid skin tone: {0:?}")]
    InvalidTone(String),

    #[error("emoji already exist: {alias:?} => {sequence:?}")]
    AliasAlreadyRegistered { alias: String, sequence: String },

    #[error("emoji alias is not valid: {0:?}")]
    AliasContainsWhitespace(String),

    /// Templates have at most two slots.
    #[error("at most two tones can be applied, got {0}")]
    TooManyTones(usize),

    /// No tone template is registered under this alias.
    #[error("no skin tone template for alias {0:?}")]
    UnknownAlias(String),

    /// The alias/sequence data asset could not be decoded.
    #[error("malformed emoji data: {0}")]
    Data(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Data(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Data(err.to_string())
    }
}
