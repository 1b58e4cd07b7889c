//! SIMD LATIN1 engine: pure-ASCII fast path (memcpy-equivalent) plus
//! LATIN1 -> UTF-8 two-byte expansion, and zero-extension widening for
//! LATIN1 -> UTF-16/UTF-32.
//!
//! Grounded on `examples/original_source/src/chars/icelake.latin.hpp` for
//! the expand/compress shape of LATIN1 -> UTF-8 (spec §4.5.1) and the plain
//! widen of §4.5.2.

use crate::encoding::{Encoding, Endian};
use crate::error::ErrorKind;
use crate::policy::ProcessPolicy;
use crate::result::TranscodeResult;
use crate::scalar;
use crate::simd::{Block64, STRIDE};

/// Bulk `convert<LATIN1, dst>(src, dst_ptr)`.
pub fn convert(src: &[u8], dst: Encoding, dst_endian: Endian, policy: ProcessPolicy, out: &mut [u8]) -> TranscodeResult {
    let len = src.len();
    if len < STRIDE {
        return scalar::latin1::convert(src, dst, dst_endian, policy, out);
    }

    match dst {
        Encoding::Latin1 => {
            out[..len].copy_from_slice(src);
            TranscodeResult::ok(len as u64, len as u64)
        }
        Encoding::Utf8 => convert_to_utf8(src, policy, out),
        Encoding::Utf16 | Encoding::Utf16Le | Encoding::Utf16Be => {
            let endian = dst.fixed_endian().unwrap_or(dst_endian);
            widen(src, out, endian, 2, |w, e, o, p| write_u16(w as u16, e, o, p))
        }
        Encoding::Utf32 => widen(src, out, dst_endian, 4, |w, e, o, p| write_u32(w, e, o, p)),
    }
}

fn write_u16(v: u16, endian: Endian, out: &mut [u8], pos: usize) {
    let bytes = if endian == Endian::Little { v.to_le_bytes() } else { v.to_be_bytes() };
    out[pos..pos + 2].copy_from_slice(&bytes);
}

fn write_u32(v: u32, endian: Endian, out: &mut [u8], pos: usize) {
    let bytes = if endian == Endian::Little { v.to_le_bytes() } else { v.to_be_bytes() };
    out[pos..pos + 4].copy_from_slice(&bytes);
}

/// Zero-extends every source byte, `unit_width` bytes per output unit. The
/// native-endian case stores `Block64::widen_to_u16`/`widen_to_u32` straight
/// out with `to_ne_bytes`; a non-native target endian still needs the
/// per-byte `write` closure to place each byte in swapped order.
fn widen(
    src: &[u8],
    out: &mut [u8],
    endian: Endian,
    unit_width: usize,
    write: impl Fn(u32, Endian, &mut [u8], usize),
) -> TranscodeResult {
    let len = src.len();
    let mut i = 0usize;
    let mut out_pos = 0usize;

    while i + STRIDE <= len {
        let block = unsafe { Block64::load(src.as_ptr().add(i)) };
        match (endian.is_native(), unit_width) {
            (true, 2) => {
                for u in block.widen_to_u16() {
                    out[out_pos..out_pos + 2].copy_from_slice(&u.to_ne_bytes());
                    out_pos += 2;
                }
            }
            (true, 4) => {
                for u in block.widen_to_u32() {
                    out[out_pos..out_pos + 4].copy_from_slice(&u.to_ne_bytes());
                    out_pos += 4;
                }
            }
            _ => {
                for &b in block.as_array().iter() {
                    write(b as u32, endian, out, out_pos);
                    out_pos += unit_width;
                }
            }
        }
        i += STRIDE;
    }
    for &b in &src[i..] {
        write(b as u32, endian, out, out_pos);
        out_pos += unit_width;
    }

    TranscodeResult::ok(len as u64, (out_pos / unit_width) as u64)
}

/// LATIN1 -> UTF-8: ASCII bytes pass through 1:1, bytes >= 0x80 expand to
/// two bytes (`0xC0 | b>>6`, `0x80 | b&0x3F`). The portable realisation of
/// spec §4.5.1's expand pipeline: `nonascii_byte_mask` stands in for the
/// `movemask` step, its trailing-zero count locates the ASCII run worth a
/// straight `memcpy` before the remainder falls into the per-byte expansion.
fn convert_to_utf8(src: &[u8], policy: ProcessPolicy, out: &mut [u8]) -> TranscodeResult {
    let len = src.len();
    let mut i = 0usize;
    let mut out_pos = 0usize;

    while i + STRIDE <= len {
        let block = unsafe { Block64::load(src.as_ptr().add(i)) };
        let mask = block.nonascii_byte_mask();

        if mask == 0 {
            out[out_pos..out_pos + STRIDE].copy_from_slice(block.as_array());
            out_pos += STRIDE;
            i += STRIDE;
            continue;
        }

        let array = block.as_array();
        let prefix = mask.trailing_zeros() as usize;
        out[out_pos..out_pos + prefix].copy_from_slice(&array[..prefix]);
        out_pos += prefix;

        for &b in &array[prefix..] {
            if b < 0x80 {
                out[out_pos] = b;
                out_pos += 1;
            } else {
                out[out_pos] = 0xC0 | (b >> 6);
                out[out_pos + 1] = 0x80 | (b & 0x3F);
                out_pos += 2;
            }
        }
        i += STRIDE;
    }

    let tail = scalar::latin1::convert(&src[i..], Encoding::Utf8, Endian::Little, policy, &mut out[out_pos..]);
    TranscodeResult {
        error: tail.error,
        input: i as u64 + tail.input,
        output: if policy.write_all_correct { out_pos as u64 + tail.output } else { tail.output },
    }
}

#[inline]
#[allow(dead_code)]
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
    fn latin1_to_utf8_embedding_stays_ascii() {
        let src = "The quick brown fox jumps over the lazy dog, 1234567.".repeat(2);
        let mut out = std::vec![0u8; src.len() * 2];
        let r = convert(src.as_bytes(), Encoding::Utf8, Endian::Little, ProcessPolicy::DEFAULT, &mut out);
        assert_eq!(&out[..src.len()], src.as_bytes());
        assert_eq!(r.output, src.len() as u64);
    }

    #[test]
    fn latin1_to_utf8_expands_high_bytes_in_bulk_block() {
        let mut src = std::vec![b'A'; 70];
        src[65] = 0xE9;
        let mut out = std::vec![0u8; 140];
        let r = convert(&src, Encoding::Utf8, Endian::Little, ProcessPolicy::DEFAULT, &mut out);
        assert_eq!(r.output, 71);
        assert_eq!(&out[65..67], &[0xC3, 0xA9]);
    }

    #[test]
    fn latin1_to_utf32_widens() {
        let src = std::vec![0xE9u8; 70];
        let mut out = std::vec![0u8; 70 * 4];
        let r = convert(&src, Encoding::Utf32, Endian::Little, ProcessPolicy::DEFAULT, &mut out);
        assert_eq!(r.output, 70);
        assert_eq!(&out[..4], &[0xE9, 0, 0, 0]);
    }
}
