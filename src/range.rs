//!CIDR block of IPv6 addresses and algebra over such blocks

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::iter::FusedIterator;
use core::{fmt, str};

use num_bigint::BigUint;

use crate::ipv6::IPv6;
use crate::parser;
use crate::prefix::{self, Prefix, BITS_LEN};
use crate::validator::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
///CIDR block, i.e. network address together with its prefix
///
///Host bits of the address are always cleared, so two blocks are equal when
///they cover the same addresses with the same prefix.
pub struct IPv6Range {
    addr: IPv6,
    prefix: Prefix,
}

impl IPv6Range {
    #[inline]
    ///Constructs block of `prefix` around `addr`
    ///
    ///`addr` does not need to be aligned, host bits are cleared.
    pub const fn new(addr: IPv6, prefix: Prefix) -> Self {
        Self {
            addr: prefix::network_addr(addr, prefix.length()),
            prefix,
        }
    }

    #[inline]
    ///Constructs block containing single `addr`
    pub const fn new_single(addr: IPv6) -> Self {
        Self::new(addr, Prefix::MAX)
    }

    ///Parses `<address>/<prefix>` notation
    ///
    ///Address may be compressed; prefix must not be greater than 128.
    pub fn from_cidr(text: &str) -> Result<Self, Error> {
        match parser::parse_cidr(text) {
            Ok((bits, length)) => match Prefix::new(length) {
                Ok(prefix) => Ok(Self::new(IPv6::from_bits(bits), prefix)),
                Err(error) => Err(error),
            },
            Err(error) => {
                log::debug!("rejected CIDR '{text}': {error}");
                Err(Error::InvalidIPv6CidrNotationString(error))
            }
        }
    }

    #[inline(always)]
    ///Returns prefix
    pub const fn prefix(&self) -> Prefix {
        self.prefix
    }

    #[inline(always)]
    ///Returns network address, which is lowest address within the block
    pub const fn first(&self) -> IPv6 {
        self.addr
    }

    #[inline(always)]
    ///Returns highest address within the block
    pub const fn last(&self) -> IPv6 {
        prefix::broadcast_addr(self.addr, self.prefix.length())
    }

    #[inline(always)]
    ///Returns number of addresses within the block
    pub fn size(&self) -> BigUint {
        self.prefix.size()
    }

    #[inline]
    ///Formats as `<network-address>/<prefix>`
    pub fn to_cidr_string(&self) -> String {
        format!("{self}")
    }

    #[inline]
    ///Formats as `<first>-<last>`
    pub fn to_range_string(&self) -> String {
        format!("{}-{}", self.first(), self.last())
    }

    #[inline(always)]
    ///Checks if a given `addr` is contained within `self`
    pub const fn contains_address(&self, addr: IPv6) -> bool {
        prefix::network_addr(addr, self.prefix.length()).to_bits() == self.addr.to_bits()
    }

    #[inline]
    ///Checks if whole `other` lies within `self`
    ///
    ///Every block contains itself.
    pub const fn contains(&self, other: &Self) -> bool {
        self.first().to_bits() <= other.first().to_bits() && self.last().to_bits() >= other.last().to_bits()
    }

    #[inline(always)]
    ///Checks if whole `self` lies within `other`
    pub const fn inside(&self, other: &Self) -> bool {
        other.contains(self)
    }

    #[inline]
    ///Checks if blocks share some, but not all, addresses of either one
    ///
    ///Nested and equal blocks are not overlapping.
    pub const fn is_overlapping(&self, other: &Self) -> bool {
        let intersects = self.first().to_bits() <= other.last().to_bits() && other.first().to_bits() <= self.last().to_bits();
        intersects && !self.contains(other) && !other.contains(self)
    }

    ///Checks if blocks of the same size follow each other without gap, in either order
    pub fn is_consecutive(&self, other: &Self) -> bool {
        if self.prefix != other.prefix {
            return false;
        }

        self.last().next() == Some(other.first()) || other.last().next() == Some(self.first())
    }

    #[inline]
    ///Checks if `self` and `other` are two halves of the same parent block
    pub fn is_cidr_mergeable(&self, other: &Self) -> bool {
        self.merge(other).is_some()
    }

    ///Merges two halves of the same parent block into the parent
    ///
    ///Returns `None` if blocks are not consecutive or would not form aligned block.
    pub fn merge(&self, other: &Self) -> Option<Self> {
        let length = self.prefix.length();
        if length == 0 || !self.is_consecutive(other) {
            return None;
        }

        let parent = match Prefix::new(length - 1) {
            Ok(prefix) => Self::new(self.addr, prefix),
            Err(_) => return None,
        };
        if parent.contains(other) {
            Some(parent)
        } else {
            None
        }
    }

    ///Returns following block of the same size
    ///
    ///Returns `None` if `self` is the last block of address space.
    pub fn next_range(&self) -> Option<Self> {
        self.last().next().map(|addr| Self::new(addr, self.prefix))
    }

    ///Returns preceding block of the same size
    ///
    ///Returns `None` if `self` is the first block of address space.
    pub fn previous_range(&self) -> Option<Self> {
        self.first().previous().map(|addr| Self::new(addr, self.prefix))
    }

    #[inline(always)]
    ///Returns address corresponding `idx` without checking size according to the prefix
    ///
    ///This only wraps math operation, so it should be only used when `idx` is known to be within
    ///block size
    pub const fn get_unchecked(&self, idx: u128) -> IPv6 {
        IPv6::from_bits(self.addr.to_bits().wrapping_add(idx))
    }

    #[inline]
    ///Attempts to fetch address by `idx` within the block `self`
    pub const fn get(&self, idx: u128) -> Option<IPv6> {
        //`last - first` avoids size of /0 which does not fit into u128
        if idx > self.last().to_bits() - self.first().to_bits() {
            return None;
        }

        Some(self.get_unchecked(idx))
    }

    ///Returns first `count` addresses of the block in ascending order
    ///
    ///Returns `Err` if `count` is greater than block size.
    pub fn take(&self, count: u128) -> Result<Vec<IPv6>, Error> {
        let size = self.size();
        if BigUint::from(count) > size {
            return Err(Error::TakeOutOfRangeSize {
                size,
                count,
            });
        }

        log::trace!("take {count} addresses of {self}");
        let mut result = Vec::new();
        let mut idx = 0;
        while idx < count {
            result.push(self.get_unchecked(idx));
            idx += 1;
        }
        Ok(result)
    }

    ///Splits block into two halves with prefix one bit longer
    ///
    ///Returns `Err` for block of single address.
    pub fn split(&self) -> Result<(Self, Self), Error> {
        let length = self.prefix.length();
        if length >= BITS_LEN {
            return Err(Error::CannotSplitSingleRange);
        }

        let prefix = Prefix::new(length + 1)?;
        let half = 1u128 << (BITS_LEN - length - 1);
        let lower = Self::new(self.first(), prefix);
        let upper = Self::new(self.get_unchecked(half), prefix);
        log::trace!("split {self} into {lower} and {upper}");
        Ok((lower, upper))
    }

    #[inline(always)]
    ///Returns iterator over every address of the block, starting from the network address
    pub const fn iter(&self) -> Iter {
        Iter {
            front: Some(self.first()),
            back: self.last(),
        }
    }
}

impl str::FromStr for IPv6Range {
    type Err = Error;

    #[inline(always)]
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_cidr(text)
    }
}

impl fmt::Display for IPv6Range {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { addr, prefix } = self;
        fmt.write_fmt(format_args!("{addr}/{prefix}"))
    }
}

impl<'a> IntoIterator for &'a IPv6Range {
    type Item = IPv6;
    type IntoIter = Iter;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone, Debug)]
///Iterator over addresses of [IPv6Range](struct.IPv6Range.html)
///
///Each call to [IPv6Range::iter](struct.IPv6Range.html#method.iter) creates independent cursor.
pub struct Iter {
    //`None` once exhausted
    front: Option<IPv6>,
    back: IPv6,
}

impl Iter {
    #[inline(always)]
    fn remaining(&self) -> Option<u128> {
        self.front.map(|front| self.back.to_bits() - front.to_bits())
    }
}

impl Iterator for Iter {
    type Item = IPv6;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.front?;
        self.front = if current == self.back {
            None
        } else {
            current.next()
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining() {
            //remaining is one less than number of items, which can be 2^128
            Some(remaining) => match usize::try_from(remaining).ok().and_then(|remaining| remaining.checked_add(1)) {
                Some(len) => (len, Some(len)),
                None => (usize::MAX, None),
            },
            None => (0, Some(0)),
        }
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let remaining = self.remaining()?;
        if n as u128 > remaining {
            self.front = None;
            return None;
        }

        self.front = Some(IPv6::from_bits(self.front?.to_bits() + n as u128));
        self.next()
    }
}

impl DoubleEndedIterator for Iter {
    fn next_back(&mut self) -> Option<Self::Item> {
        let front = self.front?;
        let current = self.back;
        if current == front {
            self.front = None;
        } else {
            //back > front, so there is always preceding address
            self.back = current.previous()?;
        }
        Some(current)
    }
}

impl FusedIterator for Iter {}
