//! Shared "write one decoded code point to some destination encoding"
//! helper, used by every scalar source engine's converter so the 4-source ×
//! 5-destination matrix does not need to be hand-written 20 times over.
//!
//! This is the Rust answer to the original C++ `Scalar<Source>::write<Dest,
//! Policy>` template: instead of monomorphising per `(Source, Dest)` pair at
//! compile time, each source engine decodes to a `u32` code point and hands
//! it to this single encoder.

use crate::encoding::{Encoding, Endian};
use crate::error::ErrorKind;

/// Writes `cp` to `out[byte_pos..]` in `dst` encoding/`dst_endian`.
///
/// Returns the number of bytes written, or `ErrorKind::TooLarge` if `dst`
/// cannot represent `cp` (only possible for `Encoding::Latin1` when
/// `cp >= 0x100`; every other destination can hold any valid scalar value).
#[inline]
pub fn write_code_point(
    dst: Encoding,
    dst_endian: Endian,
    cp: u32,
    out: &mut [u8],
    byte_pos: usize,
) -> Result<usize, ErrorKind> {
    match dst {
        Encoding::Latin1 => {
            if cp >= 0x100 {
                return Err(ErrorKind::TooLarge);
            }
            out[byte_pos] = cp as u8;
            Ok(1)
        }
        Encoding::Utf8 => Ok(write_utf8(cp, out, byte_pos)),
        Encoding::Utf16 | Encoding::Utf16Le | Encoding::Utf16Be => {
            let endian = dst.fixed_endian().unwrap_or(dst_endian);
            Ok(write_utf16(cp, endian, out, byte_pos))
        }
        Encoding::Utf32 => {
            let bytes = if dst_endian.is_native() {
                cp.to_ne_bytes()
            } else if dst_endian == Endian::Little {
                cp.to_le_bytes()
            } else {
                cp.to_be_bytes()
            };
            out[byte_pos..byte_pos + 4].copy_from_slice(&bytes);
            Ok(4)
        }
    }
}

/// Number of destination code units `cp` needs in `dst`, without writing
/// anything. `Err` under the same condition as [`write_code_point`].
#[inline]
pub fn code_point_units(dst: Encoding, cp: u32) -> Result<u64, ErrorKind> {
    match dst {
        Encoding::Latin1 => {
            if cp >= 0x100 {
                Err(ErrorKind::TooLarge)
            } else {
                Ok(1)
            }
        }
        Encoding::Utf8 => Ok(utf8_len(cp) as u64),
        Encoding::Utf16 | Encoding::Utf16Le | Encoding::Utf16Be => {
            Ok(if cp > 0xFFFF { 2 } else { 1 })
        }
        Encoding::Utf32 => Ok(1),
    }
}

/// Converts a byte offset into `dst`'s destination buffer (as tracked by a
/// converter's running `out_pos`) into the code-unit count
/// [`crate::TranscodeResult::output`] reports (spec §3: `output` is a count
/// of destination code units, not bytes).
#[inline]
pub const fn units_written(dst: Encoding, out_pos_bytes: usize) -> u64 {
    (out_pos_bytes / dst.code_unit_width()) as u64
}

#[inline]
const fn utf8_len(cp: u32) -> usize {
    if cp < 0x80 {
        1
    } else if cp < 0x800 {
        2
    } else if cp < 0x10000 {
        3
    } else {
        4
    }
}

fn write_utf8(cp: u32, out: &mut [u8], pos: usize) -> usize {
    if cp < 0x80 {
        out[pos] = cp as u8;
        1
    } else if cp < 0x800 {
        out[pos] = 0xC0 | (cp >> 6) as u8;
        out[pos + 1] = 0x80 | (cp & 0x3F) as u8;
        2
    } else if cp < 0x10000 {
        out[pos] = 0xE0 | (cp >> 12) as u8;
        out[pos + 1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
        out[pos + 2] = 0x80 | (cp & 0x3F) as u8;
        3
    } else {
        out[pos] = 0xF0 | (cp >> 18) as u8;
        out[pos + 1] = 0x80 | ((cp >> 12) & 0x3F) as u8;
        out[pos + 2] = 0x80 | ((cp >> 6) & 0x3F) as u8;
        out[pos + 3] = 0x80 | (cp & 0x3F) as u8;
        4
    }
}

fn write_u16(value: u16, endian: Endian, out: &mut [u8], pos: usize) {
    let bytes = if endian.is_native() {
        value.to_ne_bytes()
    } else if endian == Endian::Little {
        value.to_le_bytes()
    } else {
        value.to_be_bytes()
    };
    out[pos..pos + 2].copy_from_slice(&bytes);
}

fn write_utf16(cp: u32, endian: Endian, out: &mut [u8], pos: usize) -> usize {
    if cp <= 0xFFFF {
        write_u16(cp as u16, endian, out, pos);
        2
    } else {
        let v = cp - 0x10000;
        let high = 0xD800 + (v >> 10);
        let low = 0xDC00 + (v & 0x3FF);
        write_u16(high as u16, endian, out, pos);
        write_u16(low as u16, endian, out, pos + 2);
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_encoding_widths() {
        let mut buf = [0u8; 4];
        assert_eq!(write_code_point(Encoding::Utf8, Endian::Little, 'A' as u32, &mut buf, 0), Ok(1));
        assert_eq!(write_code_point(Encoding::Utf8, Endian::Little, 0x1F600, &mut buf, 0), Ok(4));
        assert_eq!(&buf, &[0xF0, 0x9F, 0x98, 0x80]);
    }

    #[test]
    fn utf16_surrogate_pair_little_endian() {
        let mut buf = [0u8; 4];
        let n = write_code_point(Encoding::Utf16Le, Endian::Little, 0x1F600, &mut buf, 0).unwrap();
        assert_eq!(n, 4);
        assert_eq!(&buf, &[0x3D, 0xD8, 0x00, 0xDE]);
    }

    #[test]
    fn latin1_rejects_wide_code_point() {
        let mut buf = [0u8; 1];
        assert_eq!(
            write_code_point(Encoding::Latin1, Endian::Little, 0x100, &mut buf, 0),
            Err(ErrorKind::TooLarge)
        );
    }
}
