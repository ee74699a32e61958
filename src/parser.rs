//!Byte level parser of IPv6 literals

use thiserror::Error;

use crate::prefix::BITS_LEN;

const GROUPS_LEN: u8 = 8;
//Longest textual hexadecatet
const GROUP_DIGITS_MAX: usize = 4;

#[derive(Debug, Clone, Copy)]
enum ParserState {
    Initial,
    Digit,
    Sep,
    //Right after `::`
    ZeroSkip,
}

mod flag {
    pub const IS_ZERO_SKIP: u8 = 0b01;
    pub const IS_SEP_INITIAL: u8 = 0b10;
}

struct Parser<'a> {
    state: ParserState,
    flags: u8,
    //Number of groups read so far, excluding zeros implied by `::`
    groups_size: u8,
    groups: [u16; GROUPS_LEN as usize],
    zero_group_start: u8,
    start_digit_position: usize,
    text: &'a [u8],
}

impl<'a> Parser<'a> {
    #[inline]
    const fn new(text: &'a str) -> Self {
        Self {
            state: ParserState::Initial,
            flags: 0,
            groups_size: 0,
            groups: [0; GROUPS_LEN as usize],
            zero_group_start: 0,
            start_digit_position: 0,
            text: text.as_bytes(),
        }
    }

    #[inline(always)]
    const fn has_flag(&self, flag: u8) -> bool {
        self.flags & flag == flag
    }

    fn extract_group(&mut self, group_sep_pos: usize) -> Result<(), ParseError> {
        if self.groups_size >= GROUPS_LEN {
            return Err(ParseError::InvalidGroupCount(self.groups_size.saturating_add(1)));
        }

        let digits = &self.text[self.start_digit_position..group_sep_pos];
        if digits.len() > GROUP_DIGITS_MAX {
            return Err(ParseError::GroupOverflow(self.start_digit_position));
        }

        let mut group = 0u16;
        for ch in digits {
            //Only hex digits ever reach this point
            let digit = match (*ch as char).to_digit(16) {
                Some(digit) => digit as u16,
                None => return Err(ParseError::UnexpectedCharacter(*ch as char, self.start_digit_position)),
            };
            group = (group << 4) | digit;
        }

        self.groups[self.groups_size as usize] = group;
        self.groups_size = self.groups_size.saturating_add(1);
        Ok(())
    }

    fn read_ip(&mut self) -> Result<u128, ParseError> {
        if self.has_flag(flag::IS_ZERO_SKIP) {
            //`::` must stand for at least one group
            if self.groups_size >= GROUPS_LEN {
                return Err(ParseError::InvalidIpv6);
            }

            let start = self.zero_group_start as usize;
            let size = self.groups_size as usize;
            let zero_len = GROUPS_LEN as usize - size;
            self.groups.copy_within(start..size, start + zero_len);
            self.groups[start..start + zero_len].fill(0);
        } else if self.groups_size != GROUPS_LEN {
            return Err(ParseError::InvalidGroupCount(self.groups_size));
        }

        Ok(self.groups.iter().fold(0u128, |bits, group| (bits << 16) | *group as u128))
    }

    #[inline(always)]
    fn on_digit(&mut self, pos: usize) -> Result<(), ParseError> {
        match self.state {
            ParserState::Digit => Ok(()),
            //Single leading `:`
            ParserState::Sep if self.has_flag(flag::IS_SEP_INITIAL) => Err(ParseError::InvalidIpv6),
            _ => {
                self.state = ParserState::Digit;
                self.start_digit_position = pos;
                Ok(())
            }
        }
    }

    #[inline(always)]
    fn on_sep(&mut self, pos: usize) -> Result<(), ParseError> {
        match self.state {
            ParserState::Digit => {
                self.extract_group(pos)?;
                self.state = ParserState::Sep;
                Ok(())
            }
            ParserState::Sep => {
                //Only 1 zero skip is allowed
                if self.has_flag(flag::IS_ZERO_SKIP) {
                    return Err(ParseError::MultipleZeroAbbrv);
                }
                self.flags = (self.flags & !flag::IS_SEP_INITIAL) | flag::IS_ZERO_SKIP;
                self.zero_group_start = self.groups_size;
                self.state = ParserState::ZeroSkip;
                Ok(())
            }
            ParserState::ZeroSkip => Err(ParseError::MultipleZeroAbbrv),
            //You can start with double ::
            ParserState::Initial => {
                self.flags |= flag::IS_SEP_INITIAL;
                self.state = ParserState::Sep;
                Ok(())
            }
        }
    }

    //Handles last group if any
    fn on_ip_end(&mut self, pos: usize) -> Result<u128, ParseError> {
        match self.state {
            ParserState::Digit => {
                self.extract_group(pos)?;
                self.read_ip()
            }
            ParserState::ZeroSkip => self.read_ip(),
            ParserState::Sep => Err(ParseError::InvalidIpv6),
            ParserState::Initial => Err(ParseError::MissingIp),
        }
    }

    //Extracts prefix after `pos`
    fn on_prefix_sep(&self, pos: usize) -> Result<u8, ParseError> {
        let digit_pos = pos.saturating_add(1);
        if digit_pos >= self.text.len() {
            return Err(ParseError::MissingPrefix);
        }

        let mut prefix = 0u32;
        for (idx, ch) in self.text[digit_pos..].iter().enumerate() {
            match (*ch as char).to_digit(10) {
                Some(digit) => prefix = prefix.saturating_mul(10).saturating_add(digit),
                None => return Err(ParseError::InvalidPrefix(digit_pos + idx)),
            }
        }

        if prefix > BITS_LEN as u32 {
            Err(ParseError::PrefixOverflow(prefix))
        } else {
            Ok(prefix as u8)
        }
    }

    fn parse(&mut self, with_prefix: bool) -> Result<(u128, Option<u8>), ParseError> {
        for (idx, &ch) in self.text.iter().enumerate() {
            match ch {
                ch if ch.is_ascii_hexdigit() => self.on_digit(idx)?,
                b':' => self.on_sep(idx)?,
                b'/' if with_prefix => {
                    let ip = self.on_ip_end(idx)?;
                    let prefix = self.on_prefix_sep(idx)?;
                    return Ok((ip, Some(prefix)));
                }
                ch if ch.is_ascii() => return Err(ParseError::UnexpectedCharacter(ch as char, idx)),
                _ => return Err(ParseError::NonAsciiCharacter(idx)),
            }
        }

        let ip = self.on_ip_end(self.text.len())?;
        if with_prefix {
            Err(ParseError::MissingPrefix)
        } else {
            Ok((ip, None))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
///Reasons for rejecting IPv6 literal
pub enum ParseError {
    ///Unexpected character with position where it is encountered at
    #[error("Encountered unexpected character '{0}' at idx={1}")]
    UnexpectedCharacter(char, usize),
    ///Unexpected Non-ASCII character encountered
    #[error("Encountered non-ASCII character at idx={0}")]
    NonAsciiCharacter(usize),
    ///Address is not valid IPv6
    #[error("Address is not valid IPv6")]
    InvalidIpv6,
    ///Group starting at idx has more than 4 hex digits
    #[error("Group at idx={0} is wider than 16 bits")]
    GroupOverflow(usize),
    ///IPv6 Address must have 8 groups
    #[error("IPv6 Address has '{0}' groups but expected 8")]
    InvalidGroupCount(u8),
    ///IPv6 contains more than 1 zero abbreviation
    #[error("IPv6 contains more than 1 zero abbreviation")]
    MultipleZeroAbbrv,
    ///IP address is not specified
    #[error("Address is not specified")]
    MissingIp,
    ///Prefix is not specified
    #[error("Prefix is not specified")]
    MissingPrefix,
    ///Prefix contains non decimal character at idx
    #[error("Invalid prefix character at idx={0}")]
    InvalidPrefix(usize),
    ///Prefix is greater than 128
    #[error("Prefix '{0}' is greater than 128")]
    PrefixOverflow(u32),
    ///Binary string must have exactly 128 digits
    #[error("Binary string has '{0}' digits but expected 128")]
    InvalidBinaryLength(usize),
}

///Parses colon-hex IPv6 literal, with optional `::` compression, into its 128 bits
pub fn parse_ipv6(text: &str) -> Result<u128, ParseError> {
    Parser::new(text).parse(false).map(|(ip, _)| ip)
}

///Parses `<address>/<prefix>` into address bits and prefix length
pub fn parse_cidr(text: &str) -> Result<(u128, u8), ParseError> {
    match Parser::new(text).parse(true)? {
        (ip, Some(prefix)) => Ok((ip, prefix)),
        (_, None) => Err(ParseError::MissingPrefix),
    }
}

///Parses string of exactly 128 binary digits, most significant first
pub fn parse_binary(text: &str) -> Result<u128, ParseError> {
    if text.len() != BITS_LEN as usize {
        return Err(ParseError::InvalidBinaryLength(text.len()));
    }

    let mut bits = 0u128;
    for (idx, ch) in text.bytes().enumerate() {
        bits = match ch {
            b'0' => bits << 1,
            b'1' => (bits << 1) | 1,
            ch if ch.is_ascii() => return Err(ParseError::UnexpectedCharacter(ch as char, idx)),
            _ => return Err(ParseError::NonAsciiCharacter(idx)),
        };
    }
    Ok(bits)
}
