//! Scalar UTF-16 engine (LE/BE/native): validate, predict length, convert,
//! and flip the byte order of a UTF-16 code unit stream.
//!
//! Grounded on `examples/original_source/src/chars/scalar.utf16.hpp`
//! (`to_native_word`'s endian-aware load, the surrogate-pair combine rule).

use crate::block::pure_ascii_u64_utf16;
use crate::encoding::{Encoding, Endian};
use crate::error::ErrorKind;
use crate::policy::ProcessPolicy;
use crate::result::TranscodeResult;
use crate::scalar::sink::{units_written, write_code_point};

#[inline]
fn read_unit(src: &[u8], unit_index: usize, endian: Endian) -> u16 {
    let pos = unit_index * 2;
    let bytes = [src[pos], src[pos + 1]];
    if endian == Endian::Little {
        u16::from_le_bytes(bytes)
    } else {
        u16::from_be_bytes(bytes)
    }
}

/// Decodes one UTF-16 code point starting at unit index `j`. Returns
/// `(code_point, units_consumed)`; `units_consumed` is 1 for a BMP unit, 2
/// for a surrogate pair. Errors are pinned to `j`.
#[inline]
pub fn decode_one(src: &[u8], units: usize, j: usize, endian: Endian) -> Result<(u32, usize), ErrorKind> {
    let w = read_unit(src, j, endian);

    if w & 0xFC00 == 0xD800 {
        // high surrogate
        if j + 1 >= units {
            return Err(ErrorKind::TooShort);
        }
        let low = read_unit(src, j + 1, endian);
        if low & 0xFC00 != 0xDC00 {
            return Err(ErrorKind::Surrogate);
        }
        let cp = (((w - 0xD800) as u32) << 10) + ((low - 0xDC00) as u32) + 0x10000;
        Ok((cp, 2))
    } else if w & 0xFC00 == 0xDC00 {
        // lone low surrogate
        Err(ErrorKind::Surrogate)
    } else {
        Ok((w as u32, 1))
    }
}

/// `validate(UTF16*, src)`.
pub fn validate(src: &[u8], endian: Endian) -> TranscodeResult {
    let units = src.len() / 2;
    let mut j = 0usize;

    if endian == Endian::native() {
        while j + 4 <= units {
            let lane = u64::from_ne_bytes(src[j * 2..j * 2 + 8].try_into().unwrap());
            if pure_ascii_u64_utf16(lane) {
                j += 4;
                continue;
            }
            break;
        }
    }

    while j < units {
        match decode_one(src, units, j, endian) {
            Ok((_, n)) => j += n,
            Err(kind) => return TranscodeResult::err(kind, j as u64, 0),
        }
    }

    if src.len() % 2 != 0 {
        return TranscodeResult::err(ErrorKind::TooShort, units as u64, 0);
    }

    TranscodeResult::ok(units as u64, units as u64)
}

/// `length<dst>(UTF16*, src)`. Assumes well-formed input.
pub fn length(src: &[u8], endian: Endian, dst: Encoding) -> u64 {
    let units = src.len() / 2;

    match dst {
        Encoding::Latin1 => units as u64,
        Encoding::Utf16 | Encoding::Utf16Le | Encoding::Utf16Be => units as u64,
        Encoding::Utf32 => (0..units)
            .filter(|&j| read_unit(src, j, endian) & 0xFC00 != 0xDC00)
            .count() as u64,
        Encoding::Utf8 => (0..units)
            .map(|j| {
                let w = read_unit(src, j, endian) as u32;
                1 + (w > 0x7F) as u64
                    + ((w > 0x7FF && w <= 0xD7FF) as u64)
                    + ((w >= 0xE000) as u64)
            })
            .sum(),
    }
}

/// `convert<UTF16*, dst>(src, dst_ptr)`.
pub fn convert(
    src: &[u8],
    src_endian: Endian,
    dst: Encoding,
    dst_endian: Endian,
    policy: ProcessPolicy,
    out: &mut [u8],
) -> TranscodeResult {
    let units = src.len() / 2;
    let mut j = 0usize;
    let mut out_pos = 0usize;

    while j < units {
        let decoded = if policy.assume_correct {
            decode_one(src, units, j, src_endian).unwrap_or((0xFFFD, 1))
        } else {
            match decode_one(src, units, j, src_endian) {
                Ok(d) => d,
                Err(kind) => return finish_error(kind, j as u64, units_written(dst, out_pos), policy),
            }
        };
        let (cp, n) = decoded;

        match write_code_point(dst, dst_endian, cp, out, out_pos) {
            Ok(written) => {
                j += n;
                out_pos += written;
            }
            Err(kind) => {
                if policy.assume_correct {
                    j += n;
                } else {
                    return finish_error(kind, j as u64, units_written(dst, out_pos), policy);
                }
            }
        }
    }

    TranscodeResult::ok(units as u64, units_written(dst, out_pos))
}

/// `flip_endian(utf16_span, out_ptr)`: byte-swaps every 16-bit unit.
pub fn flip_endian(src: &[u8], out: &mut [u8]) -> TranscodeResult {
    let units = src.len() / 2;
    for j in 0..units {
        out[j * 2] = src[j * 2 + 1];
        out[j * 2 + 1] = src[j * 2];
    }
    TranscodeResult::ok(units as u64, units as u64)
}

#[inline]
fn finish_error(kind: ErrorKind, input: u64, output: u64, policy: ProcessPolicy) -> TranscodeResult {
    if policy.write_all_correct {
        TranscodeResult::err(kind, input, output)
    } else {
        TranscodeResult::err(kind, input, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s8_lone_high_surrogate() {
        // Bytes `3D D8 00 00` little-endian is unit `0xD83D` (high
        // surrogate) followed by unit `0x0000` (not a low surrogate).
        let r = validate(&[0x3D, 0xD8, 0x00, 0x00], Endian::Little);
        assert_eq!(r.error, ErrorKind::Surrogate);
        assert_eq!(r.input, 0);
    }

    #[test]
    fn surrogate_pair_round_trips_to_utf8() {
        // U+1F600, LE surrogate pair.
        let src = [0x3D, 0xD8, 0x00, 0xDE];
        let mut out = [0u8; 4];
        let r = convert(&src, Endian::Little, Encoding::Utf8, Endian::Little, ProcessPolicy::DEFAULT, &mut out);
        assert_eq!(r, TranscodeResult::ok(2, 4));
        assert_eq!(out, [0xF0, 0x9F, 0x98, 0x80]);
    }

    #[test]
    fn flip_is_involutive() {
        let src = [0x12, 0x34, 0x56, 0x78];
        let mut once = [0u8; 4];
        flip_endian(&src, &mut once);
        let mut twice = [0u8; 4];
        flip_endian(&once, &mut twice);
        assert_eq!(src, twice);
        assert_eq!(once, [0x34, 0x12, 0x78, 0x56]);
    }

    #[test]
    fn length_to_utf8_counts_surrogate_pair_as_four_bytes() {
        let src = [0x3D, 0xD8, 0x00, 0xDE];
        assert_eq!(length(&src, Endian::Little, Encoding::Utf8), 4);
    }
}
