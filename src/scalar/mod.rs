//! The scalar engines: one module per source encoding, each exposing
//! `validate`/`length`/`convert` (and, for UTF-16, `flip_endian`). These are
//! the ground truth (spec §4.7): the SIMD backends in `crate::simd` only
//! exist to go faster, and on any disagreement the scalar result wins.

pub mod latin1;
pub mod sink;
pub mod utf16;
pub mod utf32;
pub mod utf8;
