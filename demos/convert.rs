use transcode8::{convert, length, Encoding, Endian, ProcessPolicy};

fn main() {
    let src = "caf\u{e9}, \u{4e2d}\u{6587}, \u{1f600}";
    let units = length(Encoding::Utf8, Encoding::Utf16Le, src.as_bytes(), Endian::Little);
    let mut out = vec![0u8; units as usize * 2];

    let result = convert(
        Encoding::Utf8,
        Encoding::Utf16Le,
        ProcessPolicy::DEFAULT,
        src.as_bytes(),
        &mut out,
        Endian::Little,
        Endian::Little,
    );

    assert!(result.is_ok());
    println!("{} UTF-8 bytes -> {} UTF-16LE units", src.len(), result.output);
}
