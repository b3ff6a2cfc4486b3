//! Header block parsing
//!
//! Splits a finished message at the first blank line and sorts the logical
//! headers into those that stay on the outer message and those that describe
//! the content being protected.

const CRLF: &[u8] = b"\r\n";
const SEPARATOR: &[u8] = b"\r\n\r\n";

/// Headers that move into the protected part
const CONTENT_HEADERS: [&str; 2] = ["content-type:", "content-transfer-encoding:"];

/// One logical header, kept as its original physical lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    lines: Vec<Vec<u8>>,
}

impl HeaderLine {
    fn new(first: &[u8]) -> Self {
        Self {
            lines: vec![first.to_vec()],
        }
    }

    /// Create a single-line header from text
    pub fn from_text(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into().into_bytes()],
        }
    }

    fn push_continuation(&mut self, line: &[u8]) {
        self.lines.push(line.to_vec());
    }

    /// Header name as written, without the colon
    pub fn name(&self) -> String {
        let first = &self.lines[0];
        let end = first.iter().position(|&b| b == b':').unwrap_or(first.len());
        String::from_utf8_lossy(&first[..end]).trim().to_string()
    }

    /// Number of physical lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether this header belongs in the protected part
    pub fn is_content_header(&self) -> bool {
        let first = &self.lines[0];
        CONTENT_HEADERS.iter().any(|prefix| {
            first.len() >= prefix.len()
                && first[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
        })
    }

    /// Append the header with its physical lines joined by CRLF, plus a final CRLF
    pub fn write_to(&self, out: &mut Vec<u8>) {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.extend_from_slice(CRLF);
            }
            out.extend_from_slice(line);
        }
        out.extend_from_slice(CRLF);
    }
}

/// Immutable result of splitting a finished message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    /// Headers that stay on the outer message, in original order
    pub envelope: Vec<HeaderLine>,
    /// Content-Type and Content-Transfer-Encoding, in original order
    pub content: Vec<HeaderLine>,
    /// Everything after the first blank line
    pub body: Vec<u8>,
    /// Whether the header block was terminated by a blank line
    pub has_separator: bool,
}

impl ParsedMessage {
    /// Content headers, a blank line and the body: the octets that get signed or encrypted
    pub fn content_part(&self) -> Vec<u8> {
        let mut part = Vec::with_capacity(self.body.len() + 128);
        for header in &self.content {
            header.write_to(&mut part);
        }
        part.extend_from_slice(CRLF);
        part.extend_from_slice(&self.body);
        part
    }
}

/// Split a message into envelope headers, content headers and body
pub fn split(message: &[u8]) -> ParsedMessage {
    let separator = find(message, SEPARATOR);
    let (header_block, body) = match separator {
        Some(pos) => (&message[..pos], &message[pos + SEPARATOR.len()..]),
        None => (message, &[][..]),
    };

    let mut headers: Vec<HeaderLine> = Vec::new();
    if !header_block.is_empty() {
        for line in split_lines(header_block) {
            let is_continuation = line.first().map_or(false, |b| *b == b' ' || *b == b'\t');
            match headers.last_mut() {
                Some(last) if is_continuation => last.push_continuation(line),
                _ => headers.push(HeaderLine::new(line)),
            }
        }
    }

    let (content, envelope): (Vec<_>, Vec<_>) =
        headers.into_iter().partition(HeaderLine::is_content_header);

    ParsedMessage {
        envelope,
        content,
        body: body.to_vec(),
        has_separator: separator.is_some(),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn split_lines(block: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut rest = block;
    while let Some(pos) = find(rest, CRLF) {
        lines.push(&rest[..pos]);
        rest = &rest[pos + CRLF.len()..];
    }
    lines.push(rest);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(headers: &[HeaderLine]) -> Vec<String> {
        headers.iter().map(HeaderLine::name).collect()
    }

    #[test]
    fn test_split_message() {
        let parsed = split(
            b"From: a@x\r\nTo: b@x\r\nSubject: hi\r\nContent-Type: text/plain\r\n\r\nHello",
        );

        assert_eq!(names(&parsed.envelope), vec!["From", "To", "Subject"]);
        assert_eq!(names(&parsed.content), vec!["Content-Type"]);
        assert_eq!(parsed.body, b"Hello".to_vec());
        assert!(parsed.has_separator);
        assert_eq!(parsed.content_part(), b"Content-Type: text/plain\r\n\r\nHello".to_vec());
    }

    #[test]
    fn test_folded_header_stays_single() {
        let parsed = split(
            b"From: andris@node.ee\r\nTo:andris@kreata.ee\r\nSubject:\r\n Hello!\r\nContent-Type: text/plain\r\n\r\nHello world!",
        );

        assert_eq!(names(&parsed.envelope), vec!["From", "To", "Subject"]);
        let subject = &parsed.envelope[2];
        assert_eq!(subject.line_count(), 2);

        let mut out = Vec::new();
        subject.write_to(&mut out);
        assert_eq!(out, b"Subject:\r\n Hello!\r\n".to_vec());
    }

    #[test]
    fn test_folded_content_type_moves_whole() {
        let parsed = split(
            b"Content-Type: multipart/alternative;\r\n\tboundary=\"abc\"\r\nMIME-Version: 1.0\r\n\r\nbody",
        );

        assert_eq!(names(&parsed.envelope), vec!["MIME-Version"]);
        assert_eq!(
            parsed.content_part(),
            b"Content-Type: multipart/alternative;\r\n\tboundary=\"abc\"\r\n\r\nbody".to_vec()
        );
    }

    #[test]
    fn test_content_headers_case_insensitive() {
        let parsed = split(
            b"content-type: text/html\r\nCONTENT-TRANSFER-ENCODING: quoted-printable\r\nContent-Description: note\r\n\r\n<p>",
        );

        assert_eq!(
            names(&parsed.content),
            vec!["content-type", "CONTENT-TRANSFER-ENCODING"]
        );
        assert_eq!(names(&parsed.envelope), vec!["Content-Description"]);
    }

    #[test]
    fn test_no_content_headers() {
        let parsed = split(b"Subject: plain\r\n\r\nbody");
        assert!(parsed.content.is_empty());
        assert_eq!(parsed.content_part(), b"\r\nbody".to_vec());
    }

    #[test]
    fn test_body_keeps_later_blank_lines() {
        let parsed = split(b"Subject: x\r\n\r\nfirst\r\n\r\nsecond\r\n");
        assert_eq!(parsed.body, b"first\r\n\r\nsecond\r\n".to_vec());
    }

    #[test]
    fn test_missing_separator() {
        let parsed = split(b"Subject: only headers\r\nContent-Type: text/plain");
        assert_eq!(names(&parsed.envelope), vec!["Subject"]);
        assert_eq!(names(&parsed.content), vec!["Content-Type"]);
        assert!(parsed.body.is_empty());
        assert!(!parsed.has_separator);
    }

    #[test]
    fn test_lf_only_message_has_no_separator() {
        let parsed = split(b"Subject: x\nContent-Type: text/plain\n\nsecret body");
        assert!(!parsed.has_separator);
        assert!(parsed.body.is_empty());
        assert!(parsed.content.is_empty());
    }

    #[test]
    fn test_empty_header_block() {
        let parsed = split(b"\r\n\r\nbody only");
        assert!(parsed.envelope.is_empty());
        assert!(parsed.content.is_empty());
        assert_eq!(parsed.body, b"body only".to_vec());
    }

    #[test]
    fn test_leading_whitespace_line_starts_header() {
        let parsed = split(b" odd: first\r\nSubject: x\r\n\r\n");
        assert_eq!(parsed.envelope.len(), 2);
    }
}
