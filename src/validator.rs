//!Validation predicates and error catalogue shared by all value types
//!
//!Every failure raised by this crate is an [Error](enum.Error.html) whose `Display` is one of the
//!message templates below. Parameterized templates are rendered only when the error is displayed.

use alloc::string::{String, ToString};

use num_bigint::BigUint;
use thiserror::Error;

use crate::parser::{self, ParseError};
use crate::prefix::BITS_LEN;

///Message of [Error::InvalidHexadecatet](enum.Error.html#variant.InvalidHexadecatet)
pub const INVALID_HEXADECATET_MESSAGE: &str = "The value given is less than zero or is greater than 16bits";
///Message of [Error::InvalidIPv6String](enum.Error.html#variant.InvalidIPv6String)
pub const INVALID_IPV6_PATTERN_MESSAGE: &str = "Given IPv6 is not confirm to a valid IPv6 pattern";
///Message of [Error::InvalidPrefixValue](enum.Error.html#variant.InvalidPrefixValue)
pub const INVALID_PREFIX_VALUE_MESSAGE: &str = "A Prefix value cannot be less than 0 or greater than 128";
///Message of [Error::InvalidIPv6CidrNotationString](enum.Error.html#variant.InvalidIPv6CidrNotationString)
pub const INVALID_IPV6_CIDR_NOTATION_MESSAGE: &str = "A Cidr notation string should contain an IPv6 number and prefix";
///Template of [Error::TakeOutOfRangeSize](enum.Error.html#variant.TakeOutOfRangeSize)
///
///`$count` and `$size` are substituted with requested count and size of the range.
pub const TAKE_OUT_OF_RANGE_SIZE_MESSAGE: &str = "$count is greater than $size, the size of the range";
///Message of [Error::CannotSplitSingleRange](enum.Error.html#variant.CannotSplitSingleRange)
pub const CANNOT_SPLIT_SINGLE_RANGE_MESSAGE: &str = "Cannot split an IP range with a single IP number";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
///Possible failures of constructing or operating on IPv6 values
pub enum Error {
    ///Numeric value is outside of `0..=65535`
    #[error("{}", INVALID_HEXADECATET_MESSAGE)]
    InvalidHexadecatet,
    ///Malformed address literal
    #[error("{}", INVALID_IPV6_PATTERN_MESSAGE)]
    InvalidIPv6String(#[source] ParseError),
    ///Prefix length is outside of `0..=128`
    #[error("{}", INVALID_PREFIX_VALUE_MESSAGE)]
    InvalidPrefixValue(u32),
    ///Malformed `<address>/<prefix>` literal
    #[error("{}", INVALID_IPV6_CIDR_NOTATION_MESSAGE)]
    InvalidIPv6CidrNotationString(#[source] ParseError),
    ///Requested more addresses than range holds
    #[error("{}", render_take_out_of_range(.size, .count))]
    TakeOutOfRangeSize {
        ///Number of addresses within range
        size: BigUint,
        ///Requested number of addresses
        count: u128,
    },
    ///Range of a single address cannot be halved
    #[error("{}", CANNOT_SPLIT_SINGLE_RANGE_MESSAGE)]
    CannotSplitSingleRange,
}

///Renders [TAKE_OUT_OF_RANGE_SIZE_MESSAGE](constant.TAKE_OUT_OF_RANGE_SIZE_MESSAGE.html) for `size` and `count`
pub fn take_out_of_range_size_message(size: &BigUint, count: u128) -> String {
    TAKE_OUT_OF_RANGE_SIZE_MESSAGE
        .replace("$size", &size.to_string())
        .replace("$count", &count.to_string())
}

#[inline(always)]
fn render_take_out_of_range(size: &BigUint, count: &u128) -> String {
    take_out_of_range_size_message(size, *count)
}

#[inline(always)]
///Checks that `value` fits 16 bits
pub const fn is_valid_hexadecatet(value: i64) -> bool {
    value >= 0 && value <= u16::MAX as i64
}

#[inline(always)]
///Checks that `value` is valid IPv6 prefix length
pub const fn is_valid_prefix_length(value: u32) -> bool {
    value <= BITS_LEN as u32
}

#[inline]
///Checks that `text` is full or compressed colon-hex IPv6 address
pub fn is_valid_ipv6_string(text: &str) -> bool {
    parser::parse_ipv6(text).is_ok()
}

#[inline]
///Checks that `text` is `<address>/<prefix>` with prefix not greater than 128
pub fn is_valid_ipv6_cidr_notation(text: &str) -> bool {
    parser::parse_cidr(text).is_ok()
}
