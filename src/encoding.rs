/// One of the five supported text encodings.
///
/// `Utf16` means "native byte order, supply it via the matching
/// [`Endian`] argument"; `Utf16Le`/`Utf16Be` bake their endianness in and
/// ignore the caller's `Endian` argument for that side of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Latin1,
    Utf8,
    Utf16,
    Utf16Le,
    Utf16Be,
    Utf32,
}

impl Encoding {
    /// Width, in bytes, of one code unit of this encoding.
    #[inline]
    pub const fn code_unit_width(self) -> usize {
        match self {
            Encoding::Latin1 | Encoding::Utf8 => 1,
            Encoding::Utf16 | Encoding::Utf16Le | Encoding::Utf16Be => 2,
            Encoding::Utf32 => 4,
        }
    }

    /// `Some(endian)` when the encoding bakes in a fixed byte order,
    /// `None` when the caller must supply one (LATIN1/UTF-8 have no
    /// endianness at all; `Utf16`/`Utf32` mean "native, tell us which").
    #[inline]
    pub const fn fixed_endian(self) -> Option<Endian> {
        match self {
            Encoding::Utf16Le => Some(Endian::Little),
            Encoding::Utf16Be => Some(Endian::Big),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_utf16_family(self) -> bool {
        matches!(self, Encoding::Utf16 | Encoding::Utf16Le | Encoding::Utf16Be)
    }
}

/// Byte order for a code unit wider than one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    #[inline]
    pub const fn native() -> Self {
        #[cfg(target_endian = "little")]
        {
            Endian::Little
        }
        #[cfg(target_endian = "big")]
        {
            Endian::Big
        }
    }

    #[inline]
    pub const fn is_native(self) -> bool {
        matches!(
            (self, Self::native()),
            (Endian::Little, Endian::Little) | (Endian::Big, Endian::Big)
        )
    }
}

/// Whether a LATIN1 `validate` call requires pure ASCII or accepts the full
/// [0, 0xFF] byte range (every byte is trivially a valid LATIN1 code point;
/// this only narrows what counts as "valid" for callers that want an ASCII
/// short-circuit, per spec's note on the pure-ASCII fast lane).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latin1Mode {
    Any,
    AsciiOnly,
}
