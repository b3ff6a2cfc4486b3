//! Protection Policy Module
//!
//! Decides how an outgoing message is protected from the keys that could
//! be loaded for it.

mod mode;

pub use mode::ProtectionMode;
