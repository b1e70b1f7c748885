//! Cell values.

use std::fmt;

/// Placeholder written to positions that a mask deselects.
pub const PLACEHOLDER: Cell = Cell::Symbol('_');

/// Value held by one position of a [`crate::BitContainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Bit 0.
    #[default]
    Bit0,

    /// Bit 1.
    Bit1,

    /// Opaque payload, used when permuting non-boolean values.
    Symbol(char),
}

impl Cell {
    /// Parses one character. `'0'` and `'1'` become bits, anything else a symbol.
    pub fn from_char(ch: char) -> Self {
        match ch {
            '0' => Self::Bit0,
            '1' => Self::Bit1,
            _ => Self::Symbol(ch),
        }
    }

    /// Returns the character this cell renders as.
    pub fn to_char(self) -> char {
        match self {
            Self::Bit0 => '0',
            Self::Bit1 => '1',
            Self::Symbol(ch) => ch,
        }
    }

    /// Returns the boolean value, or `None` for a symbol.
    pub fn bit(self) -> Option<bool> {
        match self {
            Self::Bit0 => Some(false),
            Self::Bit1 => Some(true),
            Self::Symbol(_) => None,
        }
    }

    /// Whether the cell selects its position when used as a mask.
    ///
    /// A symbol is a present payload and counts as selecting.
    pub fn is_truthy(self) -> bool { !matches!(self, Self::Bit0) }

    /// Reads `Symbol('0')` and `Symbol('1')` as the bits they render as.
    pub fn normalized(self) -> Self { Self::from_char(self.to_char()) }

    /// Returns whether the cell is a bit.
    pub fn is_bit(self) -> bool { self.bit().is_some() }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        if value {
            Self::Bit1
        } else {
            Self::Bit0
        }
    }
}

impl From<char> for Cell {
    fn from(ch: char) -> Self { Self::from_char(ch) }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.to_char()) }
}
