//! Mailseal Core - OpenPGP/MIME protection for outgoing mail
//!
//! This crate signs and/or encrypts a complete outgoing message into an
//! RFC 3156 `multipart/signed` or `multipart/encrypted` message, keeping the
//! envelope headers readable by the transport.

pub mod logging;
pub mod message;
pub mod mime;
pub mod openpgp;
pub mod policy;
pub mod transform;

pub use logging::init_logging;
pub use message::{split, HeaderLine, MessageBuffer, ParsedMessage};
pub use mime::{Boundary, MultipartAssembler};
pub use openpgp::{CryptoEngine, SequoiaEngine};
pub use policy::ProtectionMode;
pub use transform::{protect, Encrypter, MessageTransform, OpenPgpPlugin};
