//! Message Transform Module
//!
//! Stages that rewrite an outgoing message between composition and
//! delivery. A transform consumes the message in chunks and produces the
//! rewritten message once, when the input is complete.

mod encrypter;
mod plugin;

pub use encrypter::{protect, Encrypter};
pub use plugin::OpenPgpPlugin;

use async_trait::async_trait;
use mailseal_common::Result;

/// A single-use pipeline stage over one message
#[async_trait]
pub trait MessageTransform: Send {
    /// Feed the next chunk of the message, in arrival order
    fn consume<C: AsRef<[u8]>>(&mut self, chunk: C);

    /// Finish the input and produce the output message.
    ///
    /// Consumes the transform: one message in, exactly one result out.
    async fn finish(self) -> Result<Vec<u8>>;
}
