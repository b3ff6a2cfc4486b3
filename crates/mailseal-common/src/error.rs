//! Error types for mailseal

use thiserror::Error;

/// Main error type for mailseal
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A public key could not be read. Callers drop the key and continue.
    #[error("Key parse error: {0}")]
    KeyParse(String),

    /// The signing key could not be read or unlocked. Callers downgrade to
    /// "no signing capability" for the current message.
    #[error("Signing key error: {0}")]
    SigningKey(String),

    /// A sign or encrypt primitive rejected its input. Aborts the send.
    #[error("Crypto operation failed: {0}")]
    CryptoOperation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for mailseal
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "CONFIG_ERROR",
            Error::KeyParse(_) => "KEY_PARSE_ERROR",
            Error::SigningKey(_) => "SIGNING_KEY_ERROR",
            Error::CryptoOperation(_) => "CRYPTO_OPERATION_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error aborts the transform.
    ///
    /// Key loading failures are absorbed by the transform; everything else
    /// terminates it without output.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::KeyParse(_) | Error::SigningKey(_))
    }
}
