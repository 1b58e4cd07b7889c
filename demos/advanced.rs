#![feature(portable_simd)]

use core::simd::Simd;

use transcode8::Utf8Validator;

fn main() -> Result<(), transcode8::ErrorKind> {
    let data = Simd::load_or_default(b"hello world!");

    let mut validator = Utf8Validator::default();
    validator.next(&data)?;

    // remember to check the end for incomplete bytes!
    validator.finish()
}
