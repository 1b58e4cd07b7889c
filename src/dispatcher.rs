//! Public entry points: `validate`, `length`, `convert`, `flip_endian`
//! (spec §4.6, §C). Each dispatches to the SIMD engine when the input is
//! long enough to amortise a block, scalar otherwise; the scalar engine is
//! always correct, the SIMD engine is only ever a faster way to get the
//! same answer (spec §4.7, §8 property 6).

use crate::encoding::{Encoding, Endian, Latin1Mode};
use crate::policy::ProcessPolicy;
use crate::result::TranscodeResult;
use crate::scalar;
use crate::simd;

/// `validate(encoding, src, endian)`.
///
/// For LATIN1 this is always `Ok` (every byte is a valid code point); pass
/// `Latin1Mode::AsciiOnly` via [`validate_latin1_ascii`] if the ASCII-only
/// variant is needed.
pub fn validate(encoding: Encoding, src: &[u8], endian: Endian) -> TranscodeResult {
    match encoding {
        Encoding::Latin1 => scalar::latin1::validate(src, Latin1Mode::Any),
        Encoding::Utf8 => simd::utf8::validate(src),
        Encoding::Utf16 | Encoding::Utf16Le | Encoding::Utf16Be => {
            simd::utf16::validate(src, encoding.fixed_endian().unwrap_or(endian))
        }
        Encoding::Utf32 => scalar::utf32::validate(src, endian),
    }
}

/// ASCII-only LATIN1 validation (spec's narrower LATIN1 fast-path check).
/// Not part of the five-encoding `validate` dispatch above because it isn't
/// a destination-agnostic notion of "well-formed LATIN1" — every byte
/// already is one — it's a caller asking a different question entirely.
pub fn validate_latin1_ascii(src: &[u8]) -> TranscodeResult {
    scalar::latin1::validate(src, Latin1Mode::AsciiOnly)
}

/// `length(src_encoding, dst_encoding, src, src_endian)`. Assumes `src` is
/// well-formed; the return value is the exact code-unit count `convert`
/// would produce, never an upper bound (spec §4.2, §8 property 3).
pub fn length(src_encoding: Encoding, dst_encoding: Encoding, src: &[u8], src_endian: Endian) -> u64 {
    match src_encoding {
        Encoding::Latin1 => scalar::latin1::length(src, dst_encoding),
        Encoding::Utf8 => scalar::utf8::length(src, dst_encoding),
        Encoding::Utf16 | Encoding::Utf16Le | Encoding::Utf16Be => {
            scalar::utf16::length(src, src_encoding.fixed_endian().unwrap_or(src_endian), dst_encoding)
        }
        Encoding::Utf32 => scalar::utf32::length(src, src_endian, dst_encoding),
    }
}

/// `convert(src_encoding, dst_encoding, policy, src, dst, src_endian, dst_endian)`.
#[allow(clippy::too_many_arguments)]
pub fn convert(
    src_encoding: Encoding,
    dst_encoding: Encoding,
    policy: ProcessPolicy,
    src: &[u8],
    dst: &mut [u8],
    src_endian: Endian,
    dst_endian: Endian,
) -> TranscodeResult {
    let src_endian = src_encoding.fixed_endian().unwrap_or(src_endian);
    let dst_endian = dst_encoding.fixed_endian().unwrap_or(dst_endian);

    match src_encoding {
        Encoding::Latin1 => simd::latin1::convert(src, dst_encoding, dst_endian, policy, dst),
        Encoding::Utf8 => simd::utf8::convert(src, dst_encoding, dst_endian, policy, dst),
        Encoding::Utf16 | Encoding::Utf16Le | Encoding::Utf16Be => {
            simd::utf16::convert(src, src_endian, dst_encoding, dst_endian, policy, dst)
        }
        Encoding::Utf32 => scalar::utf32::convert(src, src_endian, dst_encoding, dst_endian, policy, dst),
    }
}

/// `flip_endian(src, dst)`: byte-swaps a UTF-16 code unit stream in place
/// semantics (spec §4.5.8 — the only operation whose source and
/// destination encoding are the same, just with the opposite byte order).
pub fn flip_endian(src: &[u8], dst: &mut [u8]) -> TranscodeResult {
    scalar::utf16::flip_endian(src, dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_validate_picks_simd_for_long_utf8() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(8);
        let r = validate(Encoding::Utf8, text.as_bytes(), Endian::native());
        assert!(r.is_ok());
        assert_eq!(r.input, text.len() as u64);
    }

    #[test]
    fn dispatch_convert_latin1_to_utf16be() {
        let src = b"caf\xE9";
        let mut out = [0u8; 8];
        let r = convert(Encoding::Latin1, Encoding::Utf16Be, ProcessPolicy::DEFAULT, src, &mut out, Endian::Little, Endian::Little);
        assert!(r.is_ok());
        assert_eq!(out, [0, b'c', 0, b'a', 0, b'f', 0, 0xE9]);
    }

    #[test]
    fn dispatch_length_matches_convert_output() {
        let src = [0xE4, 0xB8, 0xAD, 0xE6, 0x96, 0x87];
        let predicted = length(Encoding::Utf8, Encoding::Utf16Le, &src, Endian::Little);
        let mut out = [0u8; 8];
        let r = convert(Encoding::Utf8, Encoding::Utf16Le, ProcessPolicy::DEFAULT, &src, &mut out, Endian::Little, Endian::Little);
        assert_eq!(predicted, r.output);
    }

    #[test]
    fn dispatch_flip_endian_round_trips() {
        let src = [0x12, 0x34, 0x56, 0x78];
        let mut once = [0u8; 4];
        let mut twice = [0u8; 4];
        flip_endian(&src, &mut once);
        flip_endian(&once, &mut twice);
        assert_eq!(src, twice);
    }
}
