use core::ffi::CStr;
use heapless::Vec;

use crate::constants::TLS_BUFFER_MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    BufferOverflow,
    InteriorNul,
}

// C TLS stacks take PEM input as a null-terminated string. Values from the
// config are wrapped in blank lines, which are dropped here.
pub fn write_c_str<'buf>(s: &str, buffer: &'buf mut [u8]) -> Result<&'buf CStr, Error> {
    let bytes = s.trim().as_bytes();
    if bytes.contains(&0) {
        return Err(Error::InteriorNul);
    }

    let len = bytes.len();
    let dest = buffer.get_mut(..=len).ok_or(Error::BufferOverflow)?;
    dest[..len].copy_from_slice(bytes);
    dest[len] = 0;

    CStr::from_bytes_with_nul(dest).map_err(|_| Error::InteriorNul)
}

// Owned variant of `write_c_str`, sized for a single TLS record.
pub fn c_str_vec(s: &str) -> Result<Vec<u8, TLS_BUFFER_MAX>, Error> {
    let trimmed = s.trim();
    if trimmed.as_bytes().contains(&0) {
        return Err(Error::InteriorNul);
    }

    let mut buf: Vec<u8, TLS_BUFFER_MAX> = Vec::new();
    buf.extend_from_slice(trimmed.as_bytes()).map_err(|_| Error::BufferOverflow)?;
    buf.push(0).map_err(|_| Error::BufferOverflow)?;

    Ok(buf)
}
