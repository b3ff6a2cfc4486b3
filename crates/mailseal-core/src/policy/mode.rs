//! Protection mode decision

/// How an outgoing message is protected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtectionMode {
    /// Emit the original message unchanged
    PassThrough,
    /// `multipart/signed` with a detached signature
    SignOnly,
    /// `multipart/encrypted` without a signature
    EncryptOnly,
    /// `multipart/encrypted` with a signature inside the ciphertext
    EncryptAndSign,
}

impl ProtectionMode {
    /// Pick the mode from the loaded keys.
    ///
    /// `can_sign` must already account for signing being disabled.
    pub fn decide(has_public_keys: bool, can_sign: bool) -> Self {
        match (has_public_keys, can_sign) {
            (false, false) => ProtectionMode::PassThrough,
            (false, true) => ProtectionMode::SignOnly,
            (true, false) => ProtectionMode::EncryptOnly,
            (true, true) => ProtectionMode::EncryptAndSign,
        }
    }

    /// Whether the message body gets encrypted
    pub fn encrypts(self) -> bool {
        matches!(self, ProtectionMode::EncryptOnly | ProtectionMode::EncryptAndSign)
    }

    /// Whether a signature is produced
    pub fn signs(self) -> bool {
        matches!(self, ProtectionMode::SignOnly | ProtectionMode::EncryptAndSign)
    }

    /// Name used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            ProtectionMode::PassThrough => "pass_through",
            ProtectionMode::SignOnly => "sign_only",
            ProtectionMode::EncryptOnly => "encrypt_only",
            ProtectionMode::EncryptAndSign => "encrypt_and_sign",
        }
    }
}

impl std::fmt::Display for ProtectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
