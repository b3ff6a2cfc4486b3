//! MIME Module
//!
//! Boundary generation and the `multipart/signed` / `multipart/encrypted`
//! structures that wrap protected content.

pub mod boundary;
pub mod multipart;

pub use boundary::Boundary;
pub use multipart::{MultipartAssembler, SIGNED_MICALG};
