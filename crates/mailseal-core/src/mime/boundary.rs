//! Multipart boundary tokens

use rand::RngCore;

const BOUNDARY_PREFIX: &str = "nm_";
const BOUNDARY_RANDOM_BYTES: usize = 14;

/// A multipart boundary: `nm_` followed by 28 hex characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary(String);

impl Boundary {
    /// Draw a fresh boundary from the given random source
    pub fn generate<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; BOUNDARY_RANDOM_BYTES];
        rng.fill_bytes(&mut bytes);
        Boundary(format!("{}{}", BOUNDARY_PREFIX, hex::encode(bytes)))
    }

    /// The boundary token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Delimiter line opening a part: `--boundary`
    pub fn delimiter(&self) -> String {
        format!("--{}", self.0)
    }

    /// Delimiter line closing the multipart body: `--boundary--`
    pub fn close_delimiter(&self) -> String {
        format!("--{}--", self.0)
    }
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
