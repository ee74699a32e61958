//!16-bit group of IPv6 address

use core::{fmt, str};

use crate::validator::{self, Error};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
///One of eight colon separated groups of IPv6 address
pub struct Hexadecatet(u16);

impl Hexadecatet {
    ///Zero group
    pub const ZERO: Self = Self(0);
    ///All bits set
    pub const MAX: Self = Self(u16::MAX);

    #[inline(always)]
    ///Creates new group from 16-bit `value`
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    #[inline]
    ///Creates new group from arbitrary integer `value`
    ///
    ///Returns `Err` if `value` is negative or greater than 65535
    pub const fn of(value: i64) -> Result<Self, Error> {
        if validator::is_valid_hexadecatet(value) {
            Ok(Self(value as u16))
        } else {
            Err(Error::InvalidHexadecatet)
        }
    }

    #[inline]
    ///Parses group from its textual form within address, i.e. 1 to 4 hex digits
    pub fn from_hex(text: &str) -> Result<Self, Error> {
        if text.is_empty() || text.len() > 4 {
            return Err(Error::InvalidHexadecatet);
        }
        //from_str_radix accepts leading sign
        if !text.bytes().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(Error::InvalidHexadecatet);
        }

        match u16::from_str_radix(text, 16) {
            Ok(value) => Ok(Self(value)),
            Err(_) => Err(Error::InvalidHexadecatet),
        }
    }

    #[inline(always)]
    ///Returns numeric value
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl From<u16> for Hexadecatet {
    #[inline(always)]
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Hexadecatet> for u16 {
    #[inline(always)]
    fn from(value: Hexadecatet) -> Self {
        value.0
    }
}

impl str::FromStr for Hexadecatet {
    type Err = Error;

    ///Parses decimal value, or hexadecimal one if it is prefixed with `0x`
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            return Self::from_hex(hex);
        }

        match text.parse::<i64>() {
            Ok(value) => Self::of(value),
            Err(_) => Err(Error::InvalidHexadecatet),
        }
    }
}

impl fmt::Display for Hexadecatet {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, fmt)
    }
}

impl fmt::LowerHex for Hexadecatet {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, fmt)
    }
}

impl fmt::UpperHex for Hexadecatet {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, fmt)
    }
}
