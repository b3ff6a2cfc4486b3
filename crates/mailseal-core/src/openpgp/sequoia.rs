//! OpenPGP engine backed by sequoia-openpgp

use super::CryptoEngine;
use mailseal_common::{Error, OpenPgpConfig, Result};
use sequoia_openpgp as openpgp;

use openpgp::armor;
use openpgp::cert::prelude::*;
use openpgp::crypto::{mpi, Password};
use openpgp::packet::key::{KeyParts, KeyRole, SecretParts, UnspecifiedRole};
use openpgp::packet::Key;
use openpgp::parse::Parse;
use openpgp::policy::{AsymmetricAlgorithm, StandardPolicy};
use openpgp::serialize::stream::{Armorer, Encryptor, LiteralWriter, Message, Signer};
use openpgp::types::HashAlgorithm;
use openpgp::Cert;
use std::io::Write;
use tracing::debug;

/// Smallest RSA modulus accepted for signing and encryption
pub const DEFAULT_MIN_RSA_BITS: usize = 2047;

/// Hash for all signatures; advertised as `micalg=pgp-sha512`
const SIGNATURE_HASH: HashAlgorithm = HashAlgorithm::SHA512;

/// Engine using a standard policy evaluated at the current time
pub struct SequoiaEngine {
    policy: StandardPolicy<'static>,
    min_rsa_bits: usize,
}

/// A private signing key with its secret material unlocked
#[derive(Clone)]
pub struct UnlockedKey {
    cert: Cert,
    key: Key<SecretParts, UnspecifiedRole>,
}

impl UnlockedKey {
    /// The certificate the key belongs to
    pub fn cert(&self) -> &Cert {
        &self.cert
    }
}

impl SequoiaEngine {
    /// Create an engine rejecting RSA keys below `min_rsa_bits`
    pub fn new(min_rsa_bits: usize) -> Self {
        let mut policy = StandardPolicy::new();
        // Short RSA keys must reach the strength check instead of being
        // filtered out during key selection.
        policy.accept_asymmetric_algo(AsymmetricAlgorithm::RSA1024);

        Self {
            policy,
            min_rsa_bits,
        }
    }

    /// Create an engine from the plugin configuration
    pub fn from_config(config: &OpenPgpConfig) -> Self {
        Self::new(config.min_rsa_bits)
    }

    fn check_strength<P: KeyParts, R: KeyRole>(&self, key: &Key<P, R>) -> Result<()> {
        if let mpi::PublicKey::RSA { n, .. } = key.mpis() {
            let bits = n.bits();
            if bits < self.min_rsa_bits {
                return Err(Error::CryptoOperation(format!(
                    "key {} has {} bits: RSA keys shorter than {} bits are considered too weak",
                    key.fingerprint(),
                    bits,
                    self.min_rsa_bits
                )));
            }
        }
        Ok(())
    }
}

impl Default for SequoiaEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RSA_BITS)
    }
}

impl CryptoEngine for SequoiaEngine {
    type PublicKey = Cert;
    type SigningKey = UnlockedKey;

    fn load_public_key(&self, armored: &str) -> Result<Cert> {
        let cert = Cert::from_bytes(armored.as_bytes())
            .map_err(|e| Error::KeyParse(format!("{:#}", e)))?;
        debug!("Loaded encryption key {}", cert.fingerprint());
        Ok(cert)
    }

    fn load_signing_key(&self, armored: &str, passphrase: Option<&str>) -> Result<UnlockedKey> {
        let cert = Cert::from_bytes(armored.as_bytes())
            .map_err(|e| Error::SigningKey(format!("{:#}", e)))?;

        let key = cert
            .keys()
            .secret()
            .with_policy(&self.policy, None)
            .supported()
            .alive()
            .revoked(false)
            .for_signing()
            .next()
            .map(|ka| ka.key().clone())
            .ok_or_else(|| {
                Error::SigningKey(format!(
                    "{} has no usable secret signing key",
                    cert.fingerprint()
                ))
            })?;

        let key = if key.has_unencrypted_secret() {
            key
        } else {
            let passphrase = passphrase.ok_or_else(|| {
                Error::SigningKey(format!(
                    "{} is passphrase protected and no passphrase was given",
                    cert.fingerprint()
                ))
            })?;
            key.decrypt_secret(&Password::from(passphrase)).map_err(|e| {
                Error::SigningKey(format!("failed to unlock {}: {:#}", cert.fingerprint(), e))
            })?
        };

        debug!("Loaded signing key {}", key.fingerprint());
        Ok(UnlockedKey { cert, key })
    }

    fn sign(&self, content: &[u8], key: &UnlockedKey) -> Result<String> {
        self.check_strength(&key.key)?;
        let keypair = key.key.clone().into_keypair().map_err(crypto_error)?;

        let mut sink = Vec::new();
        {
            let message = Message::new(&mut sink);
            let message = Armorer::new(message)
                .kind(armor::Kind::Signature)
                .build()
                .map_err(crypto_error)?;
            let mut signer = Signer::new(message, keypair)
                .detached()
                .hash_algo(SIGNATURE_HASH)
                .map_err(crypto_error)?
                .build()
                .map_err(crypto_error)?;
            signer.write_all(content).map_err(io_error)?;
            signer.finalize().map_err(crypto_error)?;
        }

        into_armored_string(sink)
    }

    fn encrypt(
        &self,
        content: &[u8],
        recipients: &[Cert],
        signer: Option<&UnlockedKey>,
    ) -> Result<String> {
        let mut encryption_keys = Vec::new();
        for cert in recipients {
            let keys: Vec<_> = cert
                .keys()
                .with_policy(&self.policy, None)
                .supported()
                .alive()
                .revoked(false)
                .for_transport_encryption()
                .collect();
            if keys.is_empty() {
                return Err(Error::CryptoOperation(format!(
                    "{} has no usable encryption key",
                    cert.fingerprint()
                )));
            }
            for ka in &keys {
                self.check_strength(ka.key())?;
            }
            encryption_keys.extend(keys);
        }

        let signing_keypair = match signer {
            Some(signer) => {
                self.check_strength(&signer.key)?;
                Some(signer.key.clone().into_keypair().map_err(crypto_error)?)
            }
            None => None,
        };

        let mut sink = Vec::new();
        {
            let message = Message::new(&mut sink);
            let message = Armorer::new(message).build().map_err(crypto_error)?;
            #[allow(deprecated)]
            let mut message = Encryptor::for_recipients(message, encryption_keys)
                .build()
                .map_err(crypto_error)?;
            if let Some(keypair) = signing_keypair {
                let mut builder = Signer::new(message, keypair)
                    .hash_algo(SIGNATURE_HASH)
                    .map_err(crypto_error)?;
                for cert in recipients {
                    builder = builder.add_intended_recipient(cert);
                }
                message = builder.build().map_err(crypto_error)?;
            }
            let mut literal = LiteralWriter::new(message).build().map_err(crypto_error)?;
            literal.write_all(content).map_err(io_error)?;
            literal.finalize().map_err(crypto_error)?;
        }

        into_armored_string(sink)
    }
}

fn crypto_error(e: anyhow::Error) -> Error {
    Error::CryptoOperation(format!("{:#}", e))
}

fn io_error(e: std::io::Error) -> Error {
    Error::CryptoOperation(e.to_string())
}

fn into_armored_string(sink: Vec<u8>) -> Result<String> {
    String::from_utf8(sink)
        .map_err(|e| Error::Internal(format!("armored output is not UTF-8: {}", e)))
}
