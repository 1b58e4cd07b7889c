/// How much of [`crate::TranscodeResult`] a `convert` call bothers to fill
/// in, and whether the converter may skip validation altogether.
///
/// This mirrors the `ErrorCode`/writer split in the original C++ `chars`
/// module (`scalar.utf8.hpp`'s `write<..., policy>` overloads): validation
/// and writing are the same walk over the input, and a policy just decides
/// how defensive that walk needs to be and how much of its internal state it
/// reports back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessPolicy {
    /// Skip validation; the converter behaves as if the input is
    /// well-formed. Malformed input under this policy yields unspecified
    /// but memory-safe output — no out-of-bounds write, no UB.
    pub assume_correct: bool,
    /// On error, still flush the well-formed prefix already decoded into
    /// the destination buffer before returning.
    pub write_all_correct: bool,
    /// How much of the result record to populate.
    pub report_error: ReportError,
}

/// How much of a [`crate::TranscodeResult`] to populate on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    /// Don't bother distinguishing error kind or offset; only whether the
    /// input was well-formed (`error` is either `None` or some non-`None`
    /// placeholder, `input`/`output` are `0`).
    None,
    /// Report only that the operation failed or succeeded, no offsets.
    PassFail,
    /// Report the precise `ErrorKind`, the input offset of the first
    /// offending sequence, and (if `write_all_correct`) the output length.
    Full,
}

impl ProcessPolicy {
    /// Validate then convert; stop on first error; do not emit any output
    /// past the error. The safe default.
    pub const DEFAULT: Self = Self {
        assume_correct: false,
        write_all_correct: false,
        report_error: ReportError::Full,
    };

    /// Emit the well-formed prefix on error, report only the output length.
    pub const WRITE_ALL_CORRECT_1: Self = Self {
        assume_correct: false,
        write_all_correct: true,
        report_error: ReportError::PassFail,
    };

    /// Emit the well-formed prefix on error, report both input and output
    /// offsets.
    pub const WRITE_ALL_CORRECT_2: Self = Self {
        assume_correct: false,
        write_all_correct: true,
        report_error: ReportError::Full,
    };

    /// Skip validation entirely; caller guarantees well-formed input.
    pub const ASSUME_VALID: Self = Self {
        assume_correct: true,
        write_all_correct: false,
        report_error: ReportError::None,
    };

    /// Validate only; never write to the destination even on success (used
    /// for a `validate`-shaped call dispatched through `convert`).
    pub const RESULT_ONLY: Self = Self {
        assume_correct: false,
        write_all_correct: false,
        report_error: ReportError::PassFail,
    };
}

impl Default for ProcessPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}
