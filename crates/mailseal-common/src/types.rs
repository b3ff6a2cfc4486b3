//! Common types for mailseal

use serde::{Deserialize, Serialize};

/// Per-message protection options handed to the transform
#[derive(Clone, Serialize, Deserialize)]
pub struct ProtectionOptions {
    /// Armored private key used for signing
    pub signing_key: Option<String>,

    /// Passphrase protecting the signing key
    pub passphrase: Option<String>,

    /// Armored public keys of the recipients
    #[serde(default)]
    pub encryption_keys: Vec<String>,

    /// Sign when a usable signing key exists
    #[serde(default = "default_sign")]
    pub sign: bool,
}

impl Default for ProtectionOptions {
    fn default() -> Self {
        Self {
            signing_key: None,
            passphrase: None,
            encryption_keys: Vec::new(),
            sign: default_sign(),
        }
    }
}

impl ProtectionOptions {
    /// Options that only encrypt to the given keys
    pub fn encrypt_to(encryption_keys: Vec<String>) -> Self {
        Self {
            encryption_keys,
            ..Default::default()
        }
    }

    /// Set the signing key and its passphrase
    pub fn with_signing_key(
        mut self,
        signing_key: impl Into<String>,
        passphrase: Option<String>,
    ) -> Self {
        self.signing_key = Some(signing_key.into());
        self.passphrase = passphrase;
        self
    }

    /// Enable or disable signing
    pub fn with_sign(mut self, sign: bool) -> Self {
        self.sign = sign;
        self
    }

    /// Whether a signature is requested and a signing key was supplied
    pub fn wants_signature(&self) -> bool {
        self.sign && self.signing_key.is_some()
    }
}

impl std::fmt::Debug for ProtectionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtectionOptions")
            .field("signing_key", &self.signing_key.as_ref().map(|_| "<redacted>"))
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .field("encryption_keys", &self.encryption_keys.len())
            .field("sign", &self.sign)
            .finish()
    }
}

/// Per-mail data relevant to OpenPGP protection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutgoingMail {
    /// Armored public keys of the recipients
    #[serde(default)]
    pub encryption_keys: Vec<String>,

    /// Overrides the configured signing default for this mail
    pub sign: Option<bool>,
}

impl OutgoingMail {
    /// Create mail data for the given recipient keys
    pub fn new(encryption_keys: Vec<String>) -> Self {
        Self {
            encryption_keys,
            sign: None,
        }
    }

    /// Override signing for this mail
    pub fn with_sign(mut self, sign: bool) -> Self {
        self.sign = Some(sign);
        self
    }
}

fn default_sign() -> bool {
    true
}
