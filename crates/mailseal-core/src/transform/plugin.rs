//! OpenPGP plugin
//!
//! Decides per outgoing mail whether the encrypter joins its pipeline and
//! with which options.

use super::Encrypter;
use crate::openpgp::{CryptoEngine, SequoiaEngine};
use mailseal_common::{OpenPgpConfig, OutgoingMail, ProtectionOptions, Result};
use std::sync::Arc;
use tracing::debug;

/// Creates an [`Encrypter`] for every mail that needs protection
pub struct OpenPgpPlugin<E: CryptoEngine> {
    engine: Arc<E>,
    signing_key: Option<String>,
    passphrase: Option<String>,
    sign: bool,
}

impl OpenPgpPlugin<SequoiaEngine> {
    /// Create the plugin with the sequoia engine
    pub fn from_config(config: &OpenPgpConfig) -> Result<Self> {
        Self::new(Arc::new(SequoiaEngine::from_config(config)), config)
    }
}

impl<E: CryptoEngine> OpenPgpPlugin<E> {
    /// Create the plugin, reading the signing key if it is configured by path
    pub fn new(engine: Arc<E>, config: &OpenPgpConfig) -> Result<Self> {
        let signing_key = config.resolve_signing_key()?;
        debug!(
            "OpenPGP plugin ready (signing key: {}, sign by default: {})",
            signing_key.is_some(),
            config.sign
        );

        Ok(Self {
            engine,
            signing_key,
            passphrase: config.passphrase.clone(),
            sign: config.sign,
        })
    }

    /// Protection options for one mail
    pub fn options_for(&self, mail: &OutgoingMail) -> ProtectionOptions {
        ProtectionOptions {
            signing_key: self.signing_key.clone(),
            passphrase: self.passphrase.clone(),
            encryption_keys: mail.encryption_keys.clone(),
            sign: mail.sign.unwrap_or(self.sign),
        }
    }

    /// The transform for this mail, or `None` when nothing would be done to it
    pub fn transform_for(&self, mail: &OutgoingMail) -> Option<Encrypter<E>> {
        let options = self.options_for(mail);
        if options.encryption_keys.is_empty() && !options.wants_signature() {
            debug!("No encryption keys and no signature requested, skipping OpenPGP");
            return None;
        }

        Some(Encrypter::new(self.engine.clone(), options))
    }
}
