//!IPv6 address

use alloc::format;
use alloc::string::String;
use core::fmt::{self, Write};
use core::{net, str};

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::hexadecatet::Hexadecatet;
use crate::parser;
use crate::validator::Error;

const GROUPS_LEN: usize = 8;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
///128-bit IPv6 address, ordered by its numeric value
pub struct IPv6(u128);

impl IPv6 {
    ///`::`
    pub const UNSPECIFIED: Self = Self(0);
    ///`ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff`
    pub const MAX: Self = Self(u128::MAX);

    ///Creates address out of eight groups, most significant first
    pub const fn new(groups: [Hexadecatet; GROUPS_LEN]) -> Self {
        let mut bits = 0u128;
        let mut idx = 0;
        while idx < GROUPS_LEN {
            bits = (bits << 16) | groups[idx].value() as u128;
            idx += 1;
        }
        Self(bits)
    }

    #[inline(always)]
    ///Creates address from its numeric value
    pub const fn from_bits(bits: u128) -> Self {
        Self(bits)
    }

    #[inline(always)]
    ///Returns numeric value of the address
    pub const fn to_bits(&self) -> u128 {
        self.0
    }

    ///Returns eight groups of the address, most significant first
    pub const fn hexadecatets(&self) -> [Hexadecatet; GROUPS_LEN] {
        let mut groups = [Hexadecatet::ZERO; GROUPS_LEN];
        let mut idx = 0;
        while idx < GROUPS_LEN {
            let shift = (GROUPS_LEN - 1 - idx) * 16;
            groups[idx] = Hexadecatet::new((self.0 >> shift) as u16);
            idx += 1;
        }
        groups
    }

    #[inline]
    ///Returns numeric value as arbitrary precision integer
    pub fn value(&self) -> BigUint {
        BigUint::from(self.0)
    }

    #[inline]
    ///Creates address from arbitrary precision `value`
    ///
    ///Returns `None` if `value` does not fit 128 bits
    pub fn from_value(value: &BigUint) -> Option<Self> {
        value.to_u128().map(Self)
    }

    #[inline]
    ///Parses full or `::` compressed colon-hex notation
    pub fn parse(text: &str) -> Result<Self, Error> {
        match parser::parse_ipv6(text) {
            Ok(bits) => Ok(Self(bits)),
            Err(error) => Err(Error::InvalidIPv6String(error)),
        }
    }

    #[inline]
    ///Parses string of 128 binary digits
    pub fn from_binary_string(text: &str) -> Result<Self, Error> {
        match parser::parse_binary(text) {
            Ok(bits) => Ok(Self(bits)),
            Err(error) => Err(Error::InvalidIPv6String(error)),
        }
    }

    #[inline]
    ///Formats address as 128 binary digits
    pub fn to_binary_string(&self) -> String {
        format!("{:0128b}", self.0)
    }

    ///Formats address with the longest run of zero groups replaced by `::`
    ///
    ///Single zero group is never compressed and leftmost run wins ties.
    pub fn to_compressed_string(&self) -> String {
        let groups = self.hexadecatets();

        let mut longest = (0, 0);
        let mut run_start = 0;
        for (idx, group) in groups.iter().enumerate() {
            if group.value() != 0 {
                run_start = idx + 1;
            } else if idx + 1 - run_start > longest.1 {
                longest = (run_start, idx + 1 - run_start);
            }
        }

        let mut out = String::new();
        let (zero_start, zero_len) = longest;
        if zero_len < 2 {
            let _ = write!(out, "{self}");
            return out;
        }

        for (idx, group) in groups[..zero_start].iter().enumerate() {
            if idx > 0 {
                out.push(':');
            }
            let _ = write!(out, "{group}");
        }
        out.push_str("::");
        for (idx, group) in groups[zero_start + zero_len..].iter().enumerate() {
            if idx > 0 {
                out.push(':');
            }
            let _ = write!(out, "{group}");
        }
        out
    }

    #[inline(always)]
    ///Returns numerically following address
    ///
    ///Returns `None` for `ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff` as address space does not wrap.
    pub const fn next(&self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(bits) => Some(Self(bits)),
            None => None,
        }
    }

    #[inline(always)]
    ///Returns numerically preceding address
    ///
    ///Returns `None` for `::` as address space does not wrap.
    pub const fn previous(&self) -> Option<Self> {
        match self.0.checked_sub(1) {
            Some(bits) => Some(Self(bits)),
            None => None,
        }
    }
}

impl str::FromStr for IPv6 {
    type Err = Error;

    #[inline(always)]
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl From<[Hexadecatet; GROUPS_LEN]> for IPv6 {
    #[inline(always)]
    fn from(groups: [Hexadecatet; GROUPS_LEN]) -> Self {
        Self::new(groups)
    }
}

impl From<u128> for IPv6 {
    #[inline(always)]
    fn from(bits: u128) -> Self {
        Self(bits)
    }
}

impl From<IPv6> for u128 {
    #[inline(always)]
    fn from(addr: IPv6) -> Self {
        addr.0
    }
}

impl From<net::Ipv6Addr> for IPv6 {
    #[inline(always)]
    fn from(addr: net::Ipv6Addr) -> Self {
        Self(addr.to_bits())
    }
}

impl From<IPv6> for net::Ipv6Addr {
    #[inline(always)]
    fn from(addr: IPv6) -> Self {
        net::Ipv6Addr::from_bits(addr.0)
    }
}

impl fmt::Display for IPv6 {
    ///Writes canonical form: all eight groups, lower-case, without compression
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, f, g, h] = self.hexadecatets();
        fmt.write_fmt(format_args!("{a}:{b}:{c}:{d}:{e}:{f}:{g}:{h}"))
    }
}
