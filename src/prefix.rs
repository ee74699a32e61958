//!CIDR prefix length and the bit masks derived from it

use core::fmt;

use num_bigint::BigUint;
use num_traits::One;

use crate::ipv6::IPv6;
use crate::validator::{self, Error};

///Number of bits within IPv6 address
pub const BITS_LEN: u8 = 128;

#[inline]
///Computes network mask for provided `prefix`, assuming `prefix` is valid prefix
pub const fn mask(prefix: u8) -> IPv6 {
    match prefix {
        0 => IPv6::UNSPECIFIED,
        prefix => IPv6::from_bits(u128::MAX << (BITS_LEN.saturating_sub(prefix))),
    }
}

#[inline]
///Computes network address from provided `addr` and `prefix`, which is lowest possible address within CIDR block
pub const fn network_addr(addr: IPv6, prefix: u8) -> IPv6 {
    IPv6::from_bits(addr.to_bits() & mask(prefix).to_bits())
}

#[inline]
///Computes broadcast address from provided `addr` and `prefix`, which is highest possible address within CIDR block
pub const fn broadcast_addr(addr: IPv6, prefix: u8) -> IPv6 {
    IPv6::from_bits(addr.to_bits() | !mask(prefix).to_bits())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
///Length of CIDR prefix, i.e. number of leading network bits
pub struct Prefix(u8);

impl Prefix {
    ///Prefix covering whole address space
    pub const ZERO: Self = Self(0);
    ///Prefix of single address
    pub const MAX: Self = Self(BITS_LEN);

    #[inline]
    ///Creates new prefix
    ///
    ///Returns `Err` if `length` is greater than 128
    pub const fn new(length: u8) -> Result<Self, Error> {
        if validator::is_valid_prefix_length(length as u32) {
            Ok(Self(length))
        } else {
            Err(Error::InvalidPrefixValue(length as u32))
        }
    }

    ///Derives prefix from contiguous network `mask`
    ///
    ///Returns `None` if `mask` has host bit set before a network bit.
    pub const fn from_mask(mask: IPv6) -> Option<Self> {
        let length = mask.to_bits().leading_ones() as u8;
        if self::mask(length).to_bits() == mask.to_bits() {
            Some(Self(length))
        } else {
            None
        }
    }

    #[inline(always)]
    ///Returns number of network bits
    pub const fn length(&self) -> u8 {
        self.0
    }

    #[inline(always)]
    ///Returns number of host bits
    pub const fn host_bits(&self) -> u8 {
        BITS_LEN - self.0
    }

    #[inline(always)]
    ///Returns network mask with top `length` bits set
    pub const fn mask(&self) -> IPv6 {
        mask(self.0)
    }

    #[inline]
    ///Returns number of addresses within block of this prefix, `2^(128 - length)`
    ///
    ///Size of `/0` does not fit into `u128`, hence arbitrary precision.
    pub fn size(&self) -> BigUint {
        BigUint::one() << self.host_bits() as usize
    }
}

impl TryFrom<u32> for Prefix {
    type Error = Error;

    #[inline]
    fn try_from(length: u32) -> Result<Self, Self::Error> {
        if validator::is_valid_prefix_length(length) {
            Ok(Self(length as u8))
        } else {
            Err(Error::InvalidPrefixValue(length))
        }
    }
}

impl From<Prefix> for u8 {
    #[inline(always)]
    fn from(prefix: Prefix) -> Self {
        prefix.0
    }
}

impl fmt::Display for Prefix {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, fmt)
    }
}
