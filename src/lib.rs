//! # transcode8
//!
//! A SIMD-accelerated transcoding engine between LATIN1, UTF-8, UTF-16
//! (LE/BE/native) and UTF-32. Every source encoding gets a scalar engine
//! (ground truth, spec §4.7) and, where it pays off, a SIMD engine that
//! processes the input in fixed-size blocks and falls back to the scalar
//! engine to recover exact error offsets.
//!
//! The five encodings are connected by one decode-to-code-point /
//! encode-from-code-point bridge (`scalar::sink`) rather than an
//! `N`-by-`M` matrix of hand-written pairwise converters.

#![no_std]
#![feature(portable_simd)]
#![feature(core_intrinsics)]
#![feature(generic_const_exprs)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod block;
mod convenience;
mod dispatcher;
mod encoding;
mod error;
mod policy;
mod result;
mod scalar;
mod simd;

pub use convenience::{from_utf8, from_utf8_unchecked, is_well_formed};
#[cfg(feature = "alloc")]
pub use convenience::{to_string, transcode};
pub use dispatcher::{convert, flip_endian, length, validate, validate_latin1_ascii};
pub use encoding::{Encoding, Endian, Latin1Mode};
pub use error::{ErrorKind, TranscodeError};
pub use policy::{ProcessPolicy, ReportError};
pub use result::TranscodeResult;
pub use simd::utf8::Utf8Validator;
