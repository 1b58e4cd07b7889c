//! Scalar UTF-8 engine: validate, predict length, and convert a UTF-8 byte
//! stream to any other destination encoding.
//!
//! Grounded on `examples/original_source/src/chars/scalar.utf8.hpp` (error
//! taxonomy, leading-byte table, `rewind_and_validate`) and on the ASCII
//! fast-lane idea `Utf8Validator::next` uses at chunk granularity, applied
//! here at 8-byte granularity for the scalar path.

use crate::block::{pure_ascii_u64, read_u64};
use crate::encoding::{Encoding, Endian};
use crate::error::ErrorKind;
use crate::policy::ProcessPolicy;
use crate::result::TranscodeResult;
use crate::scalar::sink::{units_written, write_code_point};

/// Decodes one UTF-8 sequence starting at `src[i]`.
///
/// Returns `(code_point, sequence_len)` on success. On failure returns the
/// `ErrorKind`; the caller already knows the offset is `i` (every error
/// this engine reports is pinned to the leading byte of the offending
/// sequence, never a continuation byte further in).
#[inline]
pub fn decode_one(src: &[u8], i: usize) -> Result<(u32, usize), ErrorKind> {
    let b0 = src[i];

    if b0 < 0x80 {
        return Ok((b0 as u32, 1));
    }

    if b0 & 0xE0 == 0xC0 {
        let Some(&b1) = src.get(i + 1) else { return Err(ErrorKind::TooShort) };
        if b1 & 0xC0 != 0x80 {
            return Err(ErrorKind::TooShort);
        }
        let cp = (((b0 & 0x1F) as u32) << 6) | ((b1 & 0x3F) as u32);
        if cp < 0x80 {
            return Err(ErrorKind::Overlong);
        }
        return Ok((cp, 2));
    }

    if b0 & 0xF0 == 0xE0 {
        let (Some(&b1), Some(&b2)) = (src.get(i + 1), src.get(i + 2)) else {
            return Err(ErrorKind::TooShort);
        };
        if b1 & 0xC0 != 0x80 || b2 & 0xC0 != 0x80 {
            return Err(ErrorKind::TooShort);
        }
        let cp = (((b0 & 0x0F) as u32) << 12) | (((b1 & 0x3F) as u32) << 6) | ((b2 & 0x3F) as u32);
        if cp < 0x800 {
            return Err(ErrorKind::Overlong);
        }
        if (0xD800..=0xDFFF).contains(&cp) {
            return Err(ErrorKind::Surrogate);
        }
        return Ok((cp, 3));
    }

    if b0 & 0xF8 == 0xF0 {
        let (Some(&b1), Some(&b2), Some(&b3)) = (src.get(i + 1), src.get(i + 2), src.get(i + 3))
        else {
            return Err(ErrorKind::TooShort);
        };
        if b1 & 0xC0 != 0x80 || b2 & 0xC0 != 0x80 || b3 & 0xC0 != 0x80 {
            return Err(ErrorKind::TooShort);
        }
        let cp = (((b0 & 0x07) as u32) << 18)
            | (((b1 & 0x3F) as u32) << 12)
            | (((b2 & 0x3F) as u32) << 6)
            | ((b3 & 0x3F) as u32);
        if cp < 0x10000 {
            return Err(ErrorKind::Overlong);
        }
        if cp > 0x10FFFF {
            return Err(ErrorKind::TooLarge);
        }
        return Ok((cp, 4));
    }

    // b0 & 0xC0 == 0x80: a continuation byte in leading position.
    // Anything else (0xF8..=0xFF) has header bits we don't recognise.
    if b0 & 0xC0 == 0x80 {
        Err(ErrorKind::TooLong)
    } else {
        Err(ErrorKind::HeaderBits)
    }
}

/// Walks backward from `pos` (exclusive) at most 4 bytes to find the
/// leading byte that `pos` is a continuation of, so a SIMD backend that
/// only knows "this 64-byte block is bad" can recover the exact offset the
/// scalar engine would have reported.
///
/// Mirrors `scalar.utf8.hpp::rewind_and_validate`'s backward walk.
#[inline]
pub fn rewind_leading_byte(src: &[u8], pos: usize) -> usize {
    let mut i = pos;
    let floor = pos.saturating_sub(4);
    while i > floor {
        if src[i] & 0xC0 != 0x80 {
            return i;
        }
        i -= 1;
    }
    i
}

/// `validate(UTF8, src)`.
pub fn validate(src: &[u8]) -> TranscodeResult {
    let len = src.len();
    let mut i = 0;

    while i + 8 <= len {
        let lane = unsafe { read_u64(src.as_ptr().add(i)) };
        if pure_ascii_u64(lane) {
            i += 8;
            continue;
        }
        break;
    }

    while i < len {
        match decode_one(src, i) {
            Ok((_, n)) => i += n,
            Err(kind) => return TranscodeResult::err(kind, i as u64, 0),
        }
    }

    TranscodeResult::ok(len as u64, len as u64)
}

/// `length<dst>(UTF8, src)`. Assumes `src` is well-formed UTF-8; the return
/// value is finite but unspecified otherwise.
pub fn length(src: &[u8], dst: Encoding) -> u64 {
    match dst {
        Encoding::Utf8 => src.len() as u64,
        Encoding::Latin1 | Encoding::Utf32 => {
            src.iter().filter(|&&b| (b as i8) > -65).count() as u64
        }
        Encoding::Utf16 | Encoding::Utf16Le | Encoding::Utf16Be => {
            let code_points = src.iter().filter(|&&b| (b as i8) > -65).count() as u64;
            let surrogate_pairs = src.iter().filter(|&&b| b >= 0xF0).count() as u64;
            code_points + surrogate_pairs
        }
    }
}

/// `convert<UTF8, dst>(src, dst_ptr)`.
pub fn convert(
    src: &[u8],
    dst: Encoding,
    dst_endian: Endian,
    policy: ProcessPolicy,
    out: &mut [u8],
) -> TranscodeResult {
    let len = src.len();
    let mut i = 0usize;
    let mut out_pos = 0usize;

    while i < len {
        if !policy.assume_correct {
            match decode_one(src, i) {
                Ok((cp, n)) => match write_code_point(dst, dst_endian, cp, out, out_pos) {
                    Ok(written) => {
                        i += n;
                        out_pos += written;
                    }
                    Err(kind) => {
                        return finish_error(kind, i as u64, units_written(dst, out_pos), policy);
                    }
                },
                Err(kind) => return finish_error(kind, i as u64, units_written(dst, out_pos), policy),
            }
        } else {
            // Caller guarantees well-formed input; decode still runs (it's
            // the only way to know the sequence length) but errors cannot
            // occur on well-formed input by construction.
            let (cp, n) = decode_one(src, i).unwrap_or((0xFFFD, 1));
            let written = write_code_point(dst, dst_endian, cp, out, out_pos).unwrap_or(0);
            i += n;
            out_pos += written;
        }
    }

    TranscodeResult::ok(len as u64, units_written(dst, out_pos))
}

#[inline]
fn finish_error(kind: ErrorKind, input: u64, output: u64, policy: ProcessPolicy) -> TranscodeResult {
    if policy.write_all_correct {
        TranscodeResult::err(kind, input, output)
    } else {
        TranscodeResult::err(kind, input, 0)
    }
}
