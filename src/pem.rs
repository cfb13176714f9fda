//! Structural checks for PEM encoded credentials.
//!
//! Only the framing is inspected here: the `BEGIN`/`END` markers, the label
//! they carry and whether the body looks like base64. Nothing is parsed as
//! X.509 or PKCS#1, that is left to the TLS stack consuming the DER bytes.
//!
//! This file is also compiled into the build script, so it must only depend
//! on `core` and `base64`.

use base64::Engine;

/// Largest base64 body (line breaks stripped) accepted for decoding
pub const PEM_BODY_MAX: usize = 8192;

const BEGIN_PREFIX: &str = "-----BEGIN ";
const END_PREFIX: &str = "-----END ";
const DASHES: &str = "-----";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PemKind {
    Certificate,
    RsaPrivateKey,
}

impl PemKind {
    pub const fn label(self) -> &'static str {
        match self {
            PemKind::Certificate => "CERTIFICATE",
            PemKind::RsaPrivateKey => "RSA PRIVATE KEY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Empty,
    MissingBegin,
    MissingEnd,
    MismatchedLabel,
    MultipleBlocks,
    EmptyBody,
    BodyTooLarge,
    InvalidBase64,
    OutputTooSmall,
}

/// What a well formed block carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Placeholder,
    Encoded,
}

/// A PEM block whose markers matched the expected kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PemBlock<'a> {
    pub kind: PemKind,
    pub body: &'a str,
}

/// Checks that `text` is a single PEM block of the given kind.
///
/// Leading and trailing whitespace is ignored, so values pasted between
/// blank lines are accepted as-is.
pub fn parse(text: &str, kind: PemKind) -> Result<PemBlock<'_>, Error> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Empty);
    }

    let (first, rest) = text.split_once('\n').ok_or(Error::MissingEnd)?;
    let begin_label = marker_label(first.trim_end(), BEGIN_PREFIX).ok_or(Error::MissingBegin)?;

    let (body, last) = rest.rsplit_once('\n').unwrap_or(("", rest));
    let end_label = marker_label(last.trim(), END_PREFIX).ok_or(Error::MissingEnd)?;

    if begin_label != kind.label() || end_label != kind.label() {
        return Err(Error::MismatchedLabel);
    }

    if body.lines().map(str::trim_start).any(is_marker) {
        return Err(Error::MultipleBlocks);
    }

    let body = body.trim();
    if body.is_empty() {
        return Err(Error::EmptyBody);
    }

    Ok(PemBlock { kind, body })
}

/// Parses `text` and tells template text apart from real material.
pub fn classify(text: &str, kind: PemKind) -> Result<Material, Error> {
    let block = parse(text, kind)?;
    if block.is_placeholder() {
        Ok(Material::Placeholder)
    } else {
        Ok(Material::Encoded)
    }
}

fn is_marker(line: &str) -> bool {
    line.starts_with(BEGIN_PREFIX) || line.starts_with(END_PREFIX)
}

fn marker_label<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix)?.strip_suffix(DASHES)
}

fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=')
}

impl<'a> PemBlock<'a> {
    fn lines(&self) -> impl Iterator<Item = &'a str> {
        self.body.lines().map(str::trim).filter(|l| !l.is_empty())
    }

    /// True when the body is template text rather than base64 material.
    pub fn is_placeholder(&self) -> bool {
        self.lines().any(|l| !l.chars().all(is_base64_char))
    }

    /// Upper bound of the DER size, used to size decode buffers.
    pub fn decoded_len_estimate(&self) -> usize {
        let chars: usize = self.lines().map(str::len).sum();
        chars.div_ceil(4) * 3
    }

    /// Decodes the base64 body into `out` and returns the DER length.
    ///
    /// Works one 4 character group at a time, so no scratch copy of the body
    /// is needed.
    pub fn decode_into(&self, out: &mut [u8]) -> Result<usize, Error> {
        if self.lines().map(str::len).sum::<usize>() > PEM_BODY_MAX {
            return Err(Error::BodyTooLarge);
        }

        let mut group = [0u8; 4];
        let mut filled = 0;
        let mut written = 0;
        let mut padded = false;

        for b in self.lines().flat_map(str::bytes) {
            // padding only ever closes the last group
            if padded {
                return Err(Error::InvalidBase64);
            }
            group[filled] = b;
            filled += 1;
            if filled < group.len() {
                continue;
            }
            filled = 0;
            padded = group.contains(&b'=');

            let mut chunk = [0u8; 3];
            let n = base64::engine::general_purpose::STANDARD
                .decode_slice(group, &mut chunk)
                .map_err(|_| Error::InvalidBase64)?;
            let end = written + n;
            if end > out.len() {
                return Err(Error::OutputTooSmall);
            }
            out[written..end].copy_from_slice(&chunk[..n]);
            written = end;
        }

        if filled != 0 {
            return Err(Error::InvalidBase64);
        }
        Ok(written)
    }
}
