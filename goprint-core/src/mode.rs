//! Generation flags.

use std::{fmt, ops::BitOr, str::FromStr};

use thiserror::Error;

/// Set of generation flags passed down to the body generator.
///
/// Only [`Mode::TEST`] changes what the printer itself does; the other flags
/// are forwarded untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mode(u8);

impl Mode {
    pub const DECODE: Self = Self(1 << 0);
    pub const ENCODE: Self = Self(1 << 1);
    pub const MARSHAL: Self = Self(1 << 2);
    pub const UNMARSHAL: Self = Self(1 << 3);
    pub const SIZE: Self = Self(1 << 4);
    /// Emit a companion `_test.go` file.
    pub const TEST: Self = Self(1 << 5);

    const NAMED: [(&'static str, Mode); 6] = [
        ("decode", Self::DECODE),
        ("encode", Self::ENCODE),
        ("marshal", Self::MARSHAL),
        ("unmarshal", Self::UNMARSHAL),
        ("size", Self::SIZE),
        ("test", Self::TEST),
    ];

    /// The empty flag set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every method flag except [`Mode::TEST`].
    pub const fn all_methods() -> Self {
        Self(
            Self::DECODE.0 | Self::ENCODE.0 | Self::MARSHAL.0 | Self::UNMARSHAL.0 | Self::SIZE.0,
        )
    }

    /// Whether every flag in `other` is also set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether a companion test file was requested.
    pub const fn wants_tests(self) -> bool {
        self.contains(Self::TEST)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Flags set in either `self` or `other`.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Same flags with `other` removed.
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for Mode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect();
        write!(f, "{}", names.join(","))
    }
}

/// Error returned when a mode string names an unknown flag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown generation flag '{0}' (expected one of: decode, encode, marshal, unmarshal, size, test, all)")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    /// Parse a comma-separated list such as `encode,decode,test`.
    ///
    /// `all` expands to every method flag, without `test`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mode = Self::empty();
        for name in s.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let flag = match name.to_ascii_lowercase().as_str() {
                "all" => Self::all_methods(),
                lower => Self::NAMED
                    .iter()
                    .find(|(n, _)| *n == lower)
                    .map(|(_, flag)| *flag)
                    .ok_or_else(|| ParseModeError(name.to_string()))?,
            };
            mode = mode | flag;
        }
        Ok(mode)
    }
}
