//! OpenPGP/MIME encrypter
//!
//! Buffers the whole message, then signs and/or encrypts it in one step.

use super::MessageTransform;
use crate::message::{split, MessageBuffer};
use crate::mime::{Boundary, MultipartAssembler};
use crate::openpgp::CryptoEngine;
use crate::policy::ProtectionMode;
use async_trait::async_trait;
use mailseal_common::{Error, ProtectionOptions, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Transform that protects one outgoing message with OpenPGP/MIME
pub struct Encrypter<E: CryptoEngine> {
    buffer: MessageBuffer,
    options: ProtectionOptions,
    engine: Arc<E>,
    rng: Box<dyn RngCore + Send>,
}

impl<E: CryptoEngine> Encrypter<E> {
    /// Create an encrypter drawing boundaries from the OS random source
    pub fn new(engine: Arc<E>, options: ProtectionOptions) -> Self {
        Self {
            buffer: MessageBuffer::new(),
            options,
            engine,
            rng: Box::new(OsRng),
        }
    }

    /// Replace the random source used for the multipart boundary
    pub fn with_rng<R: RngCore + Send + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Options this encrypter was created with
    pub fn options(&self) -> &ProtectionOptions {
        &self.options
    }
}

#[async_trait]
impl<E: CryptoEngine> MessageTransform for Encrypter<E> {
    fn consume<C: AsRef<[u8]>>(&mut self, chunk: C) {
        self.buffer.append(chunk);
    }

    async fn finish(self) -> Result<Vec<u8>> {
        let Encrypter {
            buffer,
            options,
            engine,
            mut rng,
        } = self;
        let message = buffer.finalize();

        tokio::task::spawn_blocking(move || {
            protect(engine.as_ref(), &options, message, rng.as_mut())
        })
        .await
        .map_err(|e| Error::Internal(format!("Protection task failed: {}", e)))?
    }
}

/// Protect a complete message, or return it unchanged when no protection applies
pub fn protect<E, R>(
    engine: &E,
    options: &ProtectionOptions,
    message: Vec<u8>,
    rng: &mut R,
) -> Result<Vec<u8>>
where
    E: CryptoEngine,
    R: RngCore + ?Sized,
{
    let parsed = split(&message);

    let public_keys = engine.load_public_keys(&options.encryption_keys);
    let signing_key = match &options.signing_key {
        Some(armored) if options.sign => {
            engine.load_private_key(armored, options.passphrase.as_deref())
        }
        _ => None,
    };

    let mode = ProtectionMode::decide(!public_keys.is_empty(), signing_key.is_some());
    debug!(
        "Message of {} bytes: {} of {} encryption keys usable, mode {} (encrypt: {}, sign: {})",
        message.len(),
        public_keys.len(),
        options.encryption_keys.len(),
        mode,
        mode.encrypts(),
        mode.signs()
    );
    if mode.encrypts() && !parsed.has_separator {
        warn!(
            "Message has no CRLF CRLF header separator; everything is treated as envelope \
             headers and stays outside the ciphertext"
        );
    }

    let content_part = parsed.content_part();
    let output = match mode {
        ProtectionMode::PassThrough => return Ok(message),
        ProtectionMode::SignOnly => {
            let key = signing_key.as_ref().ok_or_else(|| {
                Error::Internal("Sign-only mode without a signing key".to_string())
            })?;
            let signature = engine.sign(&content_part, key)?;
            let boundary = Boundary::generate(rng);
            MultipartAssembler::new(&parsed.envelope, &boundary).signed(&content_part, &signature)
        }
        ProtectionMode::EncryptOnly | ProtectionMode::EncryptAndSign => {
            let ciphertext = engine.encrypt(&content_part, &public_keys, signing_key.as_ref())?;
            let boundary = Boundary::generate(rng);
            MultipartAssembler::new(&parsed.envelope, &boundary).encrypted(&ciphertext)
        }
    };

    info!(
        "Protected message as {} ({} -> {} bytes)",
        mode,
        message.len(),
        output.len()
    );
    Ok(output)
}
