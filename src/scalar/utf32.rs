//! Scalar UTF-32 source engine. Not enumerated as its own component in the
//! component table (the table only promises UTF-8/UTF-16/LATIN1 "engines"),
//! but UTF-32 is a destination everywhere and the full-round-trip property
//! (`convert<UTF32->X>(convert<X->UTF32>(s)) == s`) requires it as a source
//! too, so it gets the same validate/length/convert surface as the others.

use crate::encoding::{Encoding, Endian};
use crate::error::ErrorKind;
use crate::policy::ProcessPolicy;
use crate::result::TranscodeResult;
use crate::scalar::sink::{units_written, write_code_point};

#[inline]
fn read_unit(src: &[u8], unit_index: usize, endian: Endian) -> u32 {
    let pos = unit_index * 4;
    let bytes: [u8; 4] = src[pos..pos + 4].try_into().unwrap();
    if endian == Endian::Little {
        u32::from_le_bytes(bytes)
    } else {
        u32::from_be_bytes(bytes)
    }
}

#[inline]
fn validate_code_point(cp: u32) -> Result<(), ErrorKind> {
    if cp > 0x10FFFF {
        Err(ErrorKind::TooLarge)
    } else if (0xD800..=0xDFFF).contains(&cp) {
        Err(ErrorKind::Surrogate)
    } else {
        Ok(())
    }
}

/// `validate(UTF32, src)`.
pub fn validate(src: &[u8], endian: Endian) -> TranscodeResult {
    let units = src.len() / 4;
    for j in 0..units {
        if let Err(kind) = validate_code_point(read_unit(src, j, endian)) {
            return TranscodeResult::err(kind, j as u64, 0);
        }
    }
    if src.len() % 4 != 0 {
        return TranscodeResult::err(ErrorKind::TooShort, units as u64, 0);
    }
    TranscodeResult::ok(units as u64, units as u64)
}

/// `length<dst>(UTF32, src)`. Assumes well-formed input.
pub fn length(src: &[u8], endian: Endian, dst: Encoding) -> u64 {
    let units = src.len() / 4;
    match dst {
        Encoding::Latin1 | Encoding::Utf32 => units as u64,
        Encoding::Utf8 => (0..units)
            .map(|j| crate::scalar::sink::code_point_units(Encoding::Utf8, read_unit(src, j, endian)).unwrap_or(1))
            .sum(),
        Encoding::Utf16 | Encoding::Utf16Le | Encoding::Utf16Be => (0..units)
            .map(|j| if read_unit(src, j, endian) > 0xFFFF { 2 } else { 1 })
            .sum(),
    }
}

/// `convert<UTF32, dst>(src, dst_ptr)`.
pub fn convert(
    src: &[u8],
    src_endian: Endian,
    dst: Encoding,
    dst_endian: Endian,
    policy: ProcessPolicy,
    out: &mut [u8],
) -> TranscodeResult {
    let units = src.len() / 4;
    let mut out_pos = 0usize;

    for j in 0..units {
        let cp = read_unit(src, j, src_endian);
        if !policy.assume_correct {
            if let Err(kind) = validate_code_point(cp) {
                return finish_error(kind, j as u64, units_written(dst, out_pos), policy);
            }
        }
        match write_code_point(dst, dst_endian, cp, out, out_pos) {
            Ok(written) => out_pos += written,
            Err(kind) => return finish_error(kind, j as u64, units_written(dst, out_pos), policy),
        }
    }

    TranscodeResult::ok(units as u64, units_written(dst, out_pos))
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
    fn full_round_trip_through_utf32() {
        let src = [0xE4, 0xB8, 0xAD, 0xE6, 0x96, 0x87];
        let mut utf32 = [0u8; 8];
        let r1 = crate::scalar::utf8::convert(&src, Encoding::Utf32, Endian::Little, ProcessPolicy::DEFAULT, &mut utf32);
        assert!(r1.is_ok());

        let mut back = [0u8; 6];
        let r2 = convert(&utf32, Endian::Little, Encoding::Utf8, Endian::Little, ProcessPolicy::DEFAULT, &mut back);
        assert!(r2.is_ok());
        assert_eq!(back, src);
    }

    #[test]
    fn rejects_surrogate_code_point() {
        let src = 0xD800u32.to_le_bytes();
        let r = validate(&src, Endian::Little);
        assert_eq!(r.error, ErrorKind::Surrogate);
    }
}
