//! OpenPGP/MIME multipart assembly (RFC 3156)
//!
//! Builds the complete protected message: the original envelope headers,
//! the appended protection headers, a blank line and the multipart body.
//! Every line ends in CRLF; nothing is folded or re-encoded.

use super::Boundary;
use crate::message::HeaderLine;

const CRLF: &str = "\r\n";

/// `micalg` parameter matching the SHA-512 detached signatures
pub const SIGNED_MICALG: &str = "pgp-sha512";

const SIGNED_PREAMBLE: &str = "This is an OpenPGP/MIME signed message (RFC 4880 and 3156)";
const ENCRYPTED_PREAMBLE: &str = "This is an OpenPGP/MIME encrypted message";

/// Assembles protected messages around one set of envelope headers
pub struct MultipartAssembler<'a> {
    envelope: &'a [HeaderLine],
    boundary: &'a Boundary,
}

impl<'a> MultipartAssembler<'a> {
    /// Create an assembler for the given envelope headers and boundary
    pub fn new(envelope: &'a [HeaderLine], boundary: &'a Boundary) -> Self {
        Self { envelope, boundary }
    }

    /// Build a `multipart/signed` message.
    ///
    /// `content_part` is embedded unchanged as the first part so the
    /// detached signature verifies against exactly these octets.
    pub fn signed(&self, content_part: &[u8], signature: &str) -> Vec<u8> {
        let headers = [
            HeaderLine::from_text(format!(
                "Content-Type: multipart/signed; protocol=\"application/pgp-signature\"; micalg={}; boundary=\"{}\"",
                SIGNED_MICALG, self.boundary
            )),
            HeaderLine::from_text("Content-Description: OpenPGP signed message"),
        ];

        let mut out = self.envelope_with(&headers);
        push_line(&mut out, SIGNED_PREAMBLE);
        push_line(&mut out, &self.boundary.delimiter());
        out.extend_from_slice(content_part);
        out.extend_from_slice(CRLF.as_bytes());
        push_line(&mut out, &self.boundary.delimiter());
        push_line(
            &mut out,
            "Content-Type: application/pgp-signature; name=\"signature.asc\"",
        );
        push_line(&mut out, "Content-Description: OpenPGP digital signature");
        push_line(
            &mut out,
            "Content-Disposition: attachment; filename=\"signature.asc\"",
        );
        push_line(&mut out, "");
        push_line(&mut out, &normalize_armor(signature));
        push_line(&mut out, &self.boundary.close_delimiter());
        out
    }

    /// Build a `multipart/encrypted` message around armored ciphertext
    pub fn encrypted(&self, ciphertext: &str) -> Vec<u8> {
        let headers = [
            HeaderLine::from_text(format!(
                "Content-Type: multipart/encrypted; protocol=\"application/pgp-encrypted\"; boundary=\"{}\"",
                self.boundary
            )),
            HeaderLine::from_text("Content-Description: OpenPGP encrypted message"),
            HeaderLine::from_text("Content-Transfer-Encoding: 7bit"),
        ];

        let mut out = self.envelope_with(&headers);
        push_line(&mut out, ENCRYPTED_PREAMBLE);
        push_line(&mut out, "");
        push_line(&mut out, &self.boundary.delimiter());
        push_line(&mut out, "Content-Type: application/pgp-encrypted");
        push_line(&mut out, "Content-Transfer-Encoding: 7bit");
        push_line(&mut out, "");
        push_line(&mut out, "Version: 1");
        push_line(&mut out, "");
        push_line(&mut out, &self.boundary.delimiter());
        push_line(
            &mut out,
            "Content-Type: application/octet-stream; name=encrypted.asc",
        );
        push_line(
            &mut out,
            "Content-Disposition: inline; filename=encrypted.asc",
        );
        push_line(&mut out, "Content-Transfer-Encoding: 7bit");
        push_line(&mut out, "");
        push_line(&mut out, &normalize_armor(ciphertext));
        push_line(&mut out, &self.boundary.close_delimiter());
        out
    }

    /// Original envelope headers, the protection headers and the blank line
    fn envelope_with(&self, protection_headers: &[HeaderLine]) -> Vec<u8> {
        let mut out = Vec::new();
        for header in self.envelope.iter().chain(protection_headers) {
            header.write_to(&mut out);
        }
        out.extend_from_slice(CRLF.as_bytes());
        out
    }
}

fn push_line(out: &mut Vec<u8>, line: &str) {
    out.extend_from_slice(line.as_bytes());
    out.extend_from_slice(CRLF.as_bytes());
}

/// Rewrite armor to CRLF line endings without a trailing line break
fn normalize_armor(armored: &str) -> String {
    armored
        .trim_end_matches(|c: char| c == '\r' || c == '\n')
        .lines()
        .collect::<Vec<_>>()
        .join(CRLF)
}
