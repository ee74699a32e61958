//! IPv6 address, prefix and CIDR range algebra
//!
//! ```
//! use ipv6_range::{IPv6, IPv6Range, Prefix};
//!
//! let range = IPv6Range::new("2001:db8::".parse::<IPv6>().unwrap(), Prefix::new(47).unwrap());
//! let (lower, upper) = range.split().unwrap();
//! assert_eq!(lower.to_cidr_string(), "2001:db8:0:0:0:0:0:0/48");
//! assert_eq!(upper.to_cidr_string(), "2001:db8:1:0:0:0:0:0/48");
//! assert!(lower.is_consecutive(&upper));
//! ```

#![no_std]
#![warn(missing_docs)]
#![allow(clippy::style)]

extern crate alloc;

mod parser;
pub use parser::ParseError;
pub mod validator;
pub use validator::Error;
mod hexadecatet;
pub use hexadecatet::Hexadecatet;
mod ipv6;
pub use ipv6::IPv6;
pub mod prefix;
pub use prefix::Prefix;
mod range;
pub use range::{IPv6Range, Iter};
