use crate::chunking::NEWLINE;

pub(crate) const SEMICOLON: u8 = 59;
const MINUS: u8 = 45;
const PERIOD: u8 = 46;

/// Parses a value of the form `-?d{1,2}.d` into tenths.
///
/// `buffer` starts at the first byte of the value. Returns the value and the
/// number of bytes consumed, including the trailing newline when there is one;
/// the end of the buffer counts as a terminator. Anything else is `None`.
#[inline]
pub fn parse_tenths(buffer: &[u8]) -> Option<(i32, usize)> {
    let (is_neg, digits) = match buffer {
        [MINUS, rest @ ..] => (true, rest),
        _ => (false, buffer),
    };

    let (acc, width) = match *digits {
        [whole, PERIOD, tenth, ..] => (digit(whole)? * 10 + digit(tenth)?, 3),
        [tens, ones, PERIOD, tenth, ..] => {
            (digit(tens)? * 100 + digit(ones)? * 10 + digit(tenth)?, 4)
        },
        _ => return None
    };

    let consumed = is_neg as usize + width;
    let consumed = match buffer.get(consumed) {
        None => consumed,
        Some(&NEWLINE) => consumed + 1,
        Some(_) => return None
    };

    match is_neg {
        true => Some((-acc, consumed)),
        false => Some((acc, consumed)),
    }
}

#[inline]
fn digit(byte: u8) -> Option<i32> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as i32),
        _ => None
    }
}
