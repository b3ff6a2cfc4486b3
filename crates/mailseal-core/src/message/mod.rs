//! Raw message handling
//!
//! Accumulates the outgoing message as it is streamed in and splits the
//! finished message into envelope headers, content headers and body.

mod headers;

pub use headers::{split, HeaderLine, ParsedMessage};

use std::io;

/// Accumulates message chunks in arrival order
#[derive(Debug, Default)]
pub struct MessageBuffer {
    chunks: Vec<Vec<u8>>,
    len: usize,
}

impl MessageBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk. Text chunks are stored as their UTF-8 bytes.
    pub fn append<C: AsRef<[u8]>>(&mut self, chunk: C) {
        let chunk = chunk.as_ref();
        if chunk.is_empty() {
            return;
        }
        self.len += chunk.len();
        self.chunks.push(chunk.to_vec());
    }

    /// Total number of bytes received so far
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no bytes were received
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Concatenate all chunks into the finished message
    pub fn finalize(self) -> Vec<u8> {
        let mut message = Vec::with_capacity(self.len);
        for chunk in self.chunks {
            message.extend_from_slice(&chunk);
        }
        message
    }
}

impl io::Write for MessageBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
