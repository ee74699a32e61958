use num_bigint::BigUint;
use num_traits::ToPrimitive;

use ipv6_range::{validator, Error, IPv6, IPv6Range, ParseError, Prefix};

fn range(addr: &str, prefix: u8) -> IPv6Range {
    IPv6Range::new(IPv6::parse(addr).expect("to parse"), Prefix::new(prefix).expect("to create"))
}

#[test]
fn should_create_range() {
    assert_eq!(range("::", 0).to_cidr_string(), "0:0:0:0:0:0:0:0/0");

    let cidr = IPv6Range::from_cidr("2001:db8::/33").expect("to parse");
    assert_eq!(cidr.to_cidr_string(), "2001:db8:0:0:0:0:0:0/33");
    assert_eq!(cidr.to_string(), "2001:db8:0:0:0:0:0:0/33");
    assert_eq!("2001:db8::/33".parse::<IPv6Range>().expect("to parse"), cidr);

    //host bits are cleared
    let unaligned = range("2001:db8::1", 48);
    assert_eq!(unaligned, range("2001:db8::", 48));
    assert_eq!(unaligned.first().to_string(), "2001:db8:0:0:0:0:0:0");
    assert_eq!(IPv6Range::new_single(IPv6::MAX).size(), BigUint::from(1u8));
}

#[test]
fn should_not_create_range_from_invalid_cidr() {
    let inputs = [
        ("2001:db8:0:0:0:0/300", ParseError::InvalidGroupCount(6)),
        ("2001:db8::/300", ParseError::PrefixOverflow(300)),
        ("2001:db8::/129", ParseError::PrefixOverflow(129)),
        ("2001:db8::", ParseError::MissingPrefix),
        ("2001:db8::/", ParseError::MissingPrefix),
        ("2001:db8::/4a", ParseError::InvalidPrefix(12)),
        ("2001:db8::/-1", ParseError::InvalidPrefix(11)),
        ("/48", ParseError::MissingIp),
        ("2001:db8::1::/48", ParseError::MultipleZeroAbbrv),
    ];

    for (text, expected_error) in inputs {
        println!("Parse '{text}'");
        let error = IPv6Range::from_cidr(text).expect_err("should fail");
        assert_eq!(error, Error::InvalidIPv6CidrNotationString(expected_error));
        assert_eq!(error.to_string(), validator::INVALID_IPV6_CIDR_NOTATION_MESSAGE);
        assert!(!validator::is_valid_ipv6_cidr_notation(text));
    }
    assert!(validator::is_valid_ipv6_cidr_notation("::/0"));
}

#[test]
fn should_return_boundaries() {
    let cidr = range("2001:db8::", 48);
    assert_eq!(cidr.first().to_string(), "2001:db8:0:0:0:0:0:0");
    assert_eq!(cidr.last().to_string(), "2001:db8:0:ffff:ffff:ffff:ffff:ffff");
    assert_eq!(cidr.to_range_string(), "2001:db8:0:0:0:0:0:0-2001:db8:0:ffff:ffff:ffff:ffff:ffff");
    assert_eq!(cidr.size(), BigUint::from(1u128 << 80));
    assert_eq!(cidr.prefix(), Prefix::new(48).expect("to create"));

    let all = range("::", 0);
    assert_eq!(all.first(), IPv6::UNSPECIFIED);
    assert_eq!(all.last(), IPv6::MAX);
    assert_eq!(all.size(), BigUint::from(u128::MAX) + 1u8);
}

#[test]
fn should_take_addresses() {
    let cidr = range("2001:db8::", 48);
    let taken: Vec<String> = cidr.take(3).expect("to take").iter().map(ToString::to_string).collect();
    assert_eq!(taken, ["2001:db8:0:0:0:0:0:0", "2001:db8:0:0:0:0:0:1", "2001:db8:0:0:0:0:0:2"]);
    assert!(cidr.take(0).expect("to take").is_empty());

    let small = range("2001:db8::", 120);
    let taken = small.take(256).expect("to take");
    assert_eq!(taken.len(), 256);
    assert_eq!(taken.last(), Some(&small.last()));
}

#[test]
fn should_not_take_more_than_size() {
    let cidr = range("2001:db8::", 46);
    let size = cidr.size();
    let count = size.to_u128().expect("to fit") + 1;
    let expected_message = validator::TAKE_OUT_OF_RANGE_SIZE_MESSAGE
        .replace("$size", &size.to_string())
        .replace("$count", &count.to_string());

    let error = cidr.take(count).expect_err("should fail");
    assert_eq!(error.to_string(), expected_message);
    assert_eq!(error, Error::TakeOutOfRangeSize { size: size.clone(), count });
    assert_eq!(validator::take_out_of_range_size_message(&size, count), expected_message);

    let single = range("2001:db8::", 128);
    assert!(single.take(2).is_err());
    assert_eq!(single.take(1).expect("to take"), [single.first()]);
}

#[test]
fn should_split_range() {
    let (lower, upper) = range("2001:db8::", 47).split().expect("to split");
    assert_eq!(lower.to_cidr_string(), "2001:db8:0:0:0:0:0:0/48");
    assert_eq!(upper.to_cidr_string(), "2001:db8:1:0:0:0:0:0/48");

    let (lower, upper) = range("::", 0).split().expect("to split");
    assert_eq!(lower.to_cidr_string(), "0:0:0:0:0:0:0:0/1");
    assert_eq!(upper.to_cidr_string(), "8000:0:0:0:0:0:0:0/1");

    let (lower, upper) = range("::", 127).split().expect("to split");
    assert_eq!(lower, range("::", 128));
    assert_eq!(upper, range("::1", 128));
}

#[test]
fn should_not_split_single_address() {
    let error = range("2001:db8::", 128).split().expect_err("should fail");
    assert_eq!(error, Error::CannotSplitSingleRange);
    assert_eq!(error.to_string(), validator::CANNOT_SPLIT_SINGLE_RANGE_MESSAGE);
}

#[test]
fn should_tell_if_ranges_are_consecutive() {
    let first = range("2001:db8::", 48);
    let second = range("2001:db8:1::", 48);
    let another_second = range("2001:db8::", 105);

    assert!(first.is_consecutive(&second));
    assert!(second.is_consecutive(&first));
    assert!(!first.is_consecutive(&another_second));
    assert!(!another_second.is_consecutive(&first));
    assert!(!first.is_consecutive(&first));

    //address space does not wrap around
    assert!(!range("::", 128).is_consecutive(&IPv6Range::new_single(IPv6::MAX)));
    assert!(!range("::", 1).is_consecutive(&range("::", 1)));
    assert!(range("::", 1).is_consecutive(&range("8000::", 1)));
}

#[test]
fn should_tell_if_range_contains_another() {
    let container = range("2001:db8::", 47);
    let first = range("2001:db8::", 48);
    let second = range("2001:db8:1::", 48);

    assert!(container.contains(&first));
    assert!(container.contains(&second));
    assert!(!first.contains(&container));
    assert!(!second.contains(&container));
    assert!(container.contains(&container));

    assert!(!container.inside(&first));
    assert!(!container.inside(&second));
    assert!(first.inside(&container));
    assert!(second.inside(&container));

    assert!(container.contains_address(IPv6::parse("2001:db8:1:ffff::").expect("to parse")));
    assert!(!container.contains_address(IPv6::parse("2001:db8:2::").expect("to parse")));
}

#[test]
fn should_tell_that_nested_and_consecutive_ranges_are_not_overlapping() {
    let container = range("2001:db8::", 47);
    let first = range("2001:db8::", 48);
    let second = range("2001:db8:1::", 48);

    assert!(!first.is_overlapping(&second));
    assert!(!second.is_overlapping(&first));
    assert!(!container.is_overlapping(&first));
    assert!(!first.is_overlapping(&container));
    assert!(!first.is_overlapping(&first));
    assert!(!first.is_overlapping(&range("2001:db9::", 48)));
}

#[test]
fn should_iterate_over_range() {
    let cidr = range("2001:db8::", 127);
    let expected = cidr.take(2).expect("to take");
    let mut expected_index = 0;
    for addr in &cidr {
        assert_eq!(addr, expected[expected_index]);
        expected_index += 1;
    }
    assert_eq!(expected_index, 2);

    //every pass gets its own cursor
    let mut left = cidr.iter();
    let mut right = cidr.iter();
    assert_eq!(left.next(), Some(expected[0]));
    assert_eq!(right.next(), Some(expected[0]));
    assert_eq!(left.next(), Some(expected[1]));
    assert_eq!(left.next(), None);
    assert_eq!(left.next(), None);
    assert_eq!(right.next(), Some(expected[1]));

    let reversed: Vec<IPv6> = range("::", 126).iter().rev().collect();
    assert_eq!(reversed, (0..4u128).rev().map(IPv6::from_bits).collect::<Vec<_>>());

    let single = IPv6Range::new_single(IPv6::MAX);
    assert_eq!(single.iter().collect::<Vec<_>>(), [IPv6::MAX]);
    assert_eq!(single.iter().size_hint(), (1, Some(1)));

    let mut all = range("::", 0).iter();
    assert_eq!(all.size_hint(), (usize::MAX, None));
    assert_eq!(all.next_back(), Some(IPv6::MAX));
    assert_eq!(all.nth(5), Some(IPv6::from_bits(5)));
    assert_eq!(all.next(), Some(IPv6::from_bits(6)));

    let mut small = range("::", 126).iter();
    assert_eq!(small.nth(4), None);
    assert_eq!(small.next(), None);
}

#[test]
fn should_navigate_between_ranges() {
    let cidr = range("2001:db8::", 48);
    assert_eq!(cidr.next_range(), Some(range("2001:db8:1::", 48)));
    assert_eq!(cidr.previous_range(), Some(range("2001:db7:ffff::", 48)));

    assert_eq!(range("::", 0).next_range(), None);
    assert_eq!(range("::", 0).previous_range(), None);
    assert_eq!(range("8000::", 1).next_range(), None);
    assert_eq!(range("8000::", 1).previous_range(), Some(range("::", 1)));

    assert_eq!(cidr.get(0), Some(cidr.first()));
    assert_eq!(cidr.get(1), IPv6::parse("2001:db8::1").ok());
    assert_eq!(cidr.get((1u128 << 80) - 1), Some(cidr.last()));
    assert_eq!(cidr.get(1u128 << 80), None);
    assert_eq!(range("::", 0).get(u128::MAX), Some(IPv6::MAX));
}

#[test]
fn should_merge_sibling_ranges() {
    let first = range("2001:db8::", 48);
    let second = range("2001:db8:1::", 48);
    assert!(first.is_cidr_mergeable(&second));
    assert_eq!(first.merge(&second), Some(range("2001:db8::", 47)));
    assert_eq!(second.merge(&first), Some(range("2001:db8::", 47)));

    //consecutive but belong to different parents
    let third = range("2001:db8:2::", 48);
    assert!(second.is_consecutive(&third));
    assert!(!second.is_cidr_mergeable(&third));
    assert_eq!(second.merge(&third), None);

    assert_eq!(range("::", 0).merge(&range("::", 0)), None);
    assert_eq!(range("::", 1).merge(&range("8000::", 1)), Some(range("::", 0)));
}
