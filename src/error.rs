/// The reason a code unit sequence was rejected.
///
/// `None` is the success sentinel carried by [`crate::TranscodeResult`]; every
/// other variant names the first way the input failed to be well-formed in
/// its source encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No error; the input was fully consumed and well-formed.
    None,
    /// Input ended in the middle of a multi-unit sequence (a UTF-8
    /// continuation byte was expected, or a high surrogate had no low
    /// surrogate following it).
    TooShort,
    /// A UTF-8 continuation byte appeared where a leading byte was expected.
    TooLong,
    /// The decoded code point does not fit the destination: greater than
    /// U+10FFFF, or a LATIN1 destination byte needed a code point >= 0x100,
    /// or a UTF-16 source unit was > 0xFF when converting to LATIN1.
    TooLarge,
    /// A UTF-8 sequence used more bytes than minimally necessary to encode
    /// its code point.
    Overlong,
    /// A lone UTF-16 surrogate (high without low, low without high), or a
    /// code point in [U+D800, U+DFFF] reached via UTF-8.
    Surrogate,
    /// A UTF-8 leading byte whose prefix bits are not one of
    /// `0xxxxxxx` / `110xxxxx` / `1110xxxx` / `11110xxx`.
    HeaderBits,
}

impl ErrorKind {
    /// Whether this is the success sentinel.
    #[inline]
    pub const fn is_ok(self) -> bool {
        matches!(self, ErrorKind::None)
    }
}

impl Default for ErrorKind {
    fn default() -> Self {
        ErrorKind::None
    }
}

/// An error from one of the `core::result::Result`-returning convenience
/// entry points (`from_utf8`, `transcode`).
///
/// The span-taking core API (`validate`/`length`/`convert`) never returns
/// this; it returns a [`crate::TranscodeResult`] instead, which carries the
/// offsets needed to recover from partial input. This type exists for
/// callers who just want success-or-failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeError(pub ErrorKind);

impl core::fmt::Display for TranscodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let reason = match self.0 {
            ErrorKind::None => "no error",
            ErrorKind::TooShort => "truncated code unit sequence",
            ErrorKind::TooLong => "continuation byte in leading position",
            ErrorKind::TooLarge => "code point does not fit destination encoding",
            ErrorKind::Overlong => "overlong code unit sequence",
            ErrorKind::Surrogate => "lone or out-of-range surrogate",
            ErrorKind::HeaderBits => "invalid leading byte header bits",
        };
        write!(f, "{reason}")
    }
}
