use crate::error::ErrorKind;

/// The uniform outcome of `validate`/`convert`.
///
/// `input` is the number of source code units consumed before the operation
/// stopped (the offset of the first offending sequence on error, or the
/// source length on success). `output` is the number of destination code
/// units written before stopping; it is only meaningful when the governing
/// [`crate::ProcessPolicy`] asked for it (`write_all_correct`), and is `0`
/// otherwise.
///
/// Invariant: `error == ErrorKind::None` iff `input` equals the source
/// length and `output` equals the predicted destination length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranscodeResult {
    pub error: ErrorKind,
    pub input: u64,
    pub output: u64,
}

impl TranscodeResult {
    #[inline]
    pub const fn ok(input: u64, output: u64) -> Self {
        Self { error: ErrorKind::None, input, output }
    }

    #[inline]
    pub const fn err(error: ErrorKind, input: u64, output: u64) -> Self {
        Self { error, input, output }
    }

    #[inline]
    pub const fn is_ok(&self) -> bool {
        self.error.is_ok()
    }
}
