//! `core::result::Result`-shaped convenience wrappers around the span-in/
//! span-out core API, for callers who don't need partial-success offsets.
//! Kept separate from `dispatcher` because it's a different kind of API
//! (success-or-failure, not a filled-in [`crate::TranscodeResult`]), the same
//! way `from_utf8` sits next to `Utf8Validator` rather than inside it.

use core::mem;

use crate::dispatcher;
use crate::encoding::{Encoding, Endian};
use crate::error::{ErrorKind, TranscodeError};
use crate::policy::ProcessPolicy;
use crate::simd;

/// Converts a slice of bytes to a string slice, validating it as UTF-8.
pub fn from_utf8(v: &[u8]) -> Result<&str, TranscodeError> {
    let r = simd::utf8::validate(v);
    if r.is_ok() {
        Ok(unsafe { from_utf8_unchecked(v) })
    } else {
        Err(TranscodeError(r.error))
    }
}

/// Converts a slice of bytes to a string slice without checking that the
/// bytes are valid UTF-8.
///
/// # Safety
/// `v` must be valid UTF-8.
pub const unsafe fn from_utf8_unchecked(v: &[u8]) -> &str {
    #[allow(clippy::transmute_bytes_to_str)]
    unsafe {
        mem::transmute(v)
    }
}

/// Full-buffer `validate`, collapsed to success-or-failure.
pub fn is_well_formed(encoding: Encoding, src: &[u8], endian: Endian) -> bool {
    dispatcher::validate(encoding, src, endian).is_ok()
}

#[cfg(feature = "alloc")]
mod owned {
    use super::*;
    extern crate alloc;
    use alloc::string::String;
    use alloc::vec::Vec;

    /// Converts `src` from `src_encoding` to `dst_encoding`, allocating the
    /// destination buffer with [`crate::dispatcher::length`] and running
    /// [`crate::dispatcher::convert`] under [`ProcessPolicy::DEFAULT`].
    pub fn transcode(
        src_encoding: Encoding,
        dst_encoding: Encoding,
        src: &[u8],
        src_endian: Endian,
        dst_endian: Endian,
    ) -> Result<Vec<u8>, TranscodeError> {
        let validated = dispatcher::validate(src_encoding, src, src_endian);
        if !validated.is_ok() {
            return Err(TranscodeError(validated.error));
        }

        let units = dispatcher::length(src_encoding, dst_encoding, src, src_endian);
        let mut dst = alloc::vec![0u8; units as usize * dst_encoding.code_unit_width()];
        let r = dispatcher::convert(
            src_encoding,
            dst_encoding,
            ProcessPolicy::ASSUME_VALID,
            src,
            &mut dst,
            src_endian,
            dst_endian,
        );
        debug_assert!(r.is_ok());
        Ok(dst)
    }

    /// Decodes `src` as `src_encoding` into an owned `String` (UTF-8).
    pub fn to_string(src_encoding: Encoding, src: &[u8], src_endian: Endian) -> Result<String, TranscodeError> {
        let bytes = transcode(src_encoding, Encoding::Utf8, src, src_endian, Endian::Little)?;
        // `transcode`'s destination was validated UTF-8 by construction.
        Ok(unsafe { String::from_utf8_unchecked(bytes) })
    }

}

#[cfg(feature = "alloc")]
pub use owned::{to_string, transcode};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_utf8() {
        let bytes = b"Hello, world!";
        let s = from_utf8(bytes).unwrap();
        assert_eq!(bytes, s.as_bytes());
    }

    #[test]
    fn valid_utf8_empty() {
        let bytes = b"";
        let s = from_utf8(bytes).unwrap();
        assert_eq!(bytes, s.as_bytes());
    }

    #[test]
    fn invalid_utf8() {
        let bytes = b"\x1F\x8Babcdefg";
        let err = from_utf8(bytes).unwrap_err();
        assert_eq!(err.0, ErrorKind::TooLong);
    }

    #[test]
    fn is_well_formed_reports_surrogate() {
        assert!(!is_well_formed(Encoding::Utf8, &[0xED, 0xA0, 0x80], Endian::Little));
    }
}
