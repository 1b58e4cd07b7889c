//! SIMD UTF-16 engine: bulk surrogate-pair validation over 32-unit blocks,
//! plus accelerated UTF-16 -> UTF-8/UTF-32 conversion with a pure-BMP fast
//! lane.
//!
//! Grounded on `examples/original_source/src/chars/icelake.utf16.hpp` for
//! the `diff`/`highs`/`lows` surrogate classification (spec §4.5.5) and the
//! BMP/surrogate-pair split of the conversion (spec §4.5.6, §4.5.7).

use crate::encoding::{Encoding, Endian};
use crate::error::ErrorKind;
use crate::policy::ProcessPolicy;
use crate::result::TranscodeResult;
use crate::scalar;
use crate::simd::Block32x16;

/// Units processed by one [`Block32x16`] stride.
pub const STRIDE: usize = 32;

/// Bulk `validate(UTF16*, src)`.
pub fn validate(src: &[u8], endian: Endian) -> TranscodeResult {
    let total_units = src.len() / 2;
    if total_units < STRIDE || endian != Endian::native() {
        return scalar::utf16::validate(src, endian);
    }

    let mut j = 0usize;
    let mut high_carry = false;

    while j + STRIDE <= total_units {
        let units: [u16; 32] = core::array::from_fn(|k| {
            u16::from_ne_bytes([src[(j + k) * 2], src[(j + k) * 2 + 1]])
        });
        let block = Block32x16::from_units(&units);

        if block.is_ascii() {
            high_carry = false;
            j += STRIDE;
            continue;
        }

        let (_, highs, lows) = block.surrogate_masks();
        let shifted_highs = (highs << 1) | (high_carry as u32);
        let mismatch = lows ^ shifted_highs;

        if mismatch != 0 {
            // Recover the exact offset/kind with the scalar engine; a
            // mismatch in this block means a lone surrogate starts
            // somewhere at or after `j` (accounting for a carried-in high
            // surrogate at position `j`, one unit before this block if the
            // previous block ended mid-pair).
            let recover_from = if high_carry { j.saturating_sub(1) } else { j };
            let mut tail = scalar::utf16::validate(&src[recover_from * 2..], endian);
            tail.input += recover_from as u64;
            return tail;
        }

        high_carry = (highs >> 31) != 0;
        j += STRIDE;
    }

    // A high surrogate carried out of the loop with no partner yet seen
    // must be resolved by the scalar tail (it owns the pairing unit).
    let recover_from = if high_carry { j - 1 } else { j };
    let mut tail = scalar::utf16::validate(&src[recover_from * 2..], endian);
    tail.input += recover_from as u64;
    if tail.error.is_ok() {
        TranscodeResult::ok(total_units as u64, total_units as u64)
    } else {
        tail
    }
}

/// Bulk `convert<UTF16*, dst>`: a pure-ASCII/BMP block takes the
/// widen-and-store fast path (no surrogate pairs to combine); a block
/// containing any surrogate defers to the scalar engine so that output is
/// identical to the pure-scalar path (spec §8 property 6).
pub fn convert(
    src: &[u8],
    src_endian: Endian,
    dst: Encoding,
    dst_endian: Endian,
    policy: ProcessPolicy,
    out: &mut [u8],
) -> TranscodeResult {
    let total_units = src.len() / 2;
    if total_units < STRIDE || src_endian != Endian::native() {
        return scalar::utf16::convert(src, src_endian, dst, dst_endian, policy, out);
    }

    let mut j = 0usize;
    let mut out_pos = 0usize;

    while j + STRIDE <= total_units {
        let units: [u16; 32] = core::array::from_fn(|k| {
            u16::from_ne_bytes([src[(j + k) * 2], src[(j + k) * 2 + 1]])
        });
        let block = Block32x16::from_units(&units);

        if block.is_ascii() {
            for &u in units.iter() {
                match crate::scalar::sink::write_code_point(dst, dst_endian, u as u32, out, out_pos) {
                    Ok(written) => out_pos += written,
                    Err(kind) => return finish_error(kind, j as u64, crate::scalar::sink::units_written(dst, out_pos), policy),
                }
            }
            j += STRIDE;
            continue;
        }

        // `decode_one` reads `src` directly (not just this block's 32
        // units), so a surrogate pair that straddles the block boundary is
        // still decoded correctly here.
        let mut k = 0usize;
        while k < STRIDE {
            match scalar::utf16::decode_one(src, total_units, j + k, src_endian) {
                Ok((cp, n)) => {
                    match crate::scalar::sink::write_code_point(dst, dst_endian, cp, out, out_pos) {
                        Ok(written) => {
                            out_pos += written;
                            k += n;
                        }
                        Err(kind) => return finish_error(kind, (j + k) as u64, crate::scalar::sink::units_written(dst, out_pos), policy),
                    }
                }
                Err(kind) => return finish_error(kind, (j + k) as u64, crate::scalar::sink::units_written(dst, out_pos), policy),
            }
        }
        j += STRIDE;
    }

    let mut tail = scalar::utf16::convert(&src[j * 2..], src_endian, dst, dst_endian, policy, &mut out[out_pos..]);
    tail.input += j as u64;
    tail.output += crate::scalar::sink::units_written(dst, out_pos);
    tail
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
    use std::vec::Vec;

    fn utf16le_bytes(units: &[u16]) -> Vec<u8> {
        let mut out = Vec::new();
        for &u in units {
            out.extend_from_slice(&u.to_le_bytes());
        }
        out
    }

    #[test]
    fn bulk_validate_pure_bmp_block() {
        let units: Vec<u16> = (0u16..40).map(|i| 0x41 + (i % 26)).collect();
        let bytes = utf16le_bytes(&units);
        let r = validate(&bytes, Endian::Little);
        assert!(r.is_ok());
        assert_eq!(r.input, units.len() as u64);
    }

    #[test]
    fn bulk_validate_surrogate_pair_inside_long_block() {
        let mut units: Vec<u16> = (0u16..40).map(|i| 0x41 + (i % 26)).collect();
        units.push(0xD83D); // high surrogate
        units.push(0xDE00); // low surrogate
        let bytes = utf16le_bytes(&units);
        let r = validate(&bytes, Endian::Little);
        assert!(r.is_ok());
    }

    #[test]
    fn bulk_validate_lone_surrogate_inside_long_block() {
        let mut units: Vec<u16> = (0u16..40).map(|i| 0x41 + (i % 26)).collect();
        units.push(0xD83D); // high surrogate with no partner
        let bytes = utf16le_bytes(&units);
        let r = validate(&bytes, Endian::Little);
        assert_eq!(r.error, ErrorKind::Surrogate);
    }
}
