use transcode8::from_utf8;

fn main() -> Result<(), transcode8::TranscodeError> {
    let data = b"hello world!";

    let str = from_utf8(data)?;
    println!("{str}");

    Ok(())
}
