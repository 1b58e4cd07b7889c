//! Scalar LATIN1 engine. Every byte is its own code point in [0, 0xFF];
//! there is no such thing as a malformed LATIN1 byte, only a destination
//! that cannot hold the value.
//!
//! Grounded on `examples/original_source/src/chars/scalar.latin.hpp`.

use crate::block::{not_ascii_mask_u64, pure_ascii_u64, read_u64};
use crate::encoding::{Encoding, Endian, Latin1Mode};
use crate::error::ErrorKind;
use crate::policy::ProcessPolicy;
use crate::result::TranscodeResult;
use crate::scalar::sink::{units_written, write_code_point};

/// `validate(LATIN1, src, mode)`. With `Latin1Mode::Any` every byte is
/// valid; with `AsciiOnly` any byte >= 0x80 is `TooLarge` at its offset.
pub fn validate(src: &[u8], mode: Latin1Mode) -> TranscodeResult {
    if matches!(mode, Latin1Mode::Any) {
        return TranscodeResult::ok(src.len() as u64, src.len() as u64);
    }

    let len = src.len();
    let mut i = 0;
    while i + 8 <= len {
        let lane = unsafe { read_u64(src.as_ptr().add(i)) };
        if pure_ascii_u64(lane) {
            i += 8;
            continue;
        }
        let mask = not_ascii_mask_u64(lane);
        let offset = mask.trailing_zeros() as usize;
        return TranscodeResult::err(ErrorKind::TooLarge, (i + offset) as u64, 0);
    }
    while i < len {
        if src[i] >= 0x80 {
            return TranscodeResult::err(ErrorKind::TooLarge, i as u64, 0);
        }
        i += 1;
    }
    TranscodeResult::ok(len as u64, len as u64)
}

/// `length<dst>(LATIN1, src)`.
pub fn length(src: &[u8], dst: Encoding) -> u64 {
    match dst {
        Encoding::Latin1 | Encoding::Utf16 | Encoding::Utf16Le | Encoding::Utf16Be | Encoding::Utf32 => {
            src.len() as u64
        }
        Encoding::Utf8 => {
            let extra = src.iter().filter(|&&b| b >= 0x80).count() as u64;
            src.len() as u64 + extra
        }
    }
}

/// `convert<LATIN1, dst>(src, dst_ptr)`. Every LATIN1 byte is already a
/// valid code point, so this only fails if `dst` can't hold it (never, in
/// practice: only `Latin1->Latin1` shares the destination's ceiling, and
/// that's always satisfied since the source is itself LATIN1-shaped).
pub fn convert(src: &[u8], dst: Encoding, dst_endian: Endian, policy: ProcessPolicy, out: &mut [u8]) -> TranscodeResult {
    let len = src.len();
    let mut out_pos = 0usize;

    for (i, &b) in src.iter().enumerate() {
        match write_code_point(dst, dst_endian, b as u32, out, out_pos) {
            Ok(written) => out_pos += written,
            Err(kind) => {
                if policy.write_all_correct {
                    return TranscodeResult::err(kind, i as u64, units_written(dst, out_pos));
                }
                return TranscodeResult::err(kind, i as u64, 0);
            }
        }
    }

    TranscodeResult::ok(len as u64, units_written(dst, out_pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_into_utf8_is_identity_for_ascii() {
        let src = b"Hello, world!";
        let mut out = [0u8; 32];
        let r = convert(src, Encoding::Utf8, Endian::Little, ProcessPolicy::DEFAULT, &mut out);
        assert_eq!(&out[..src.len()], src);
        assert_eq!(r.output, src.len() as u64);
    }

    #[test]
    fn high_byte_expands_to_two_utf8_bytes() {
        let src = [0xE9u8]; // 'é' in LATIN1
        let mut out = [0u8; 2];
        let r = convert(&src, Encoding::Utf8, Endian::Little, ProcessPolicy::DEFAULT, &mut out);
        assert_eq!(r.output, 2);
        assert_eq!(out, [0xC3, 0xA9]);
        assert_eq!(length(&src, Encoding::Utf8), 2);
    }

    #[test]
    fn ascii_only_validation_flags_high_byte() {
        let src = [b'A', b'B', 0xFF];
        let r = validate(&src, Latin1Mode::AsciiOnly);
        assert_eq!(r.error, ErrorKind::TooLarge);
        assert_eq!(r.input, 2);
    }
}
