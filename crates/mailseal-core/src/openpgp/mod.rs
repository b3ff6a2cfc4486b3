//! OpenPGP Module
//!
//! The cryptographic boundary of the transform. [`CryptoEngine`] is what the
//! transform needs from an OpenPGP implementation; [`SequoiaEngine`] is the
//! production implementation.
//!
//! Key loading is lenient: a public key that cannot be read is dropped and a
//! signing key that cannot be read or unlocked means the message is not
//! signed. Only the sign and encrypt operations fail the transform.

mod sequoia;

pub use self::sequoia::{SequoiaEngine, DEFAULT_MIN_RSA_BITS};

use mailseal_common::Result;
use tracing::warn;

/// Key loading, signing and encryption used by the transform
pub trait CryptoEngine: Send + Sync + 'static {
    /// A recipient key
    type PublicKey: Send;
    /// An unlocked private key able to sign
    type SigningKey: Send;

    /// Parse one armored public key. Fails with `Error::KeyParse`.
    fn load_public_key(&self, armored: &str) -> Result<Self::PublicKey>;

    /// Parse and unlock an armored private key. Fails with `Error::SigningKey`.
    fn load_signing_key(&self, armored: &str, passphrase: Option<&str>) -> Result<Self::SigningKey>;

    /// Create an armored detached signature over `content`
    fn sign(&self, content: &[u8], key: &Self::SigningKey) -> Result<String>;

    /// Encrypt `content` to every key, signing inside the ciphertext when a key is given
    fn encrypt(
        &self,
        content: &[u8],
        recipients: &[Self::PublicKey],
        signer: Option<&Self::SigningKey>,
    ) -> Result<String>;

    /// Parse every armored public key, dropping the ones that fail
    fn load_public_keys(&self, armored: &[String]) -> Vec<Self::PublicKey> {
        armored
            .iter()
            .enumerate()
            .filter_map(|(index, key)| match self.load_public_key(key) {
                Ok(key) => Some(key),
                Err(e) => {
                    warn!("Dropping encryption key #{}: {}", index, e);
                    None
                }
            })
            .collect()
    }

    /// Load the signing key, or `None` when it cannot be used for this message
    fn load_private_key(
        &self,
        armored: &str,
        passphrase: Option<&str>,
    ) -> Option<Self::SigningKey> {
        match self.load_signing_key(armored, passphrase) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!("Signing key unavailable, message will not be signed: {}", e);
                None
            }
        }
    }
}
