//! Line tokenizer for phase input.
//!
//! Follows the conventions of C `sscanf`: conversions skip leading
//! whitespace, scanning stops at the first token that does not fit, and
//! whatever follows the last requested conversion is ignored. Callers
//! look at how many tokens were read to decide whether the line had the
//! right shape.
//!
//! Lines carry one `char` per input byte (see [`decode_line`]), so a
//! character count is a byte count and a character's low bits are the
//! byte's low bits.

use crate::error::Explosion;

/// Decodes raw input bytes as one `char` per byte (Latin-1).
///
/// Every byte survives unchanged, including bytes that are not valid
/// UTF-8.
#[must_use]
pub fn decode_line(raw: &[u8]) -> String {
    raw.iter().copied().map(char::from).collect()
}

/// Whether `line`, read through [`decode_line`], holds exactly the bytes
/// of `text`.
#[must_use]
pub fn spells(line: &str, text: &str) -> bool {
    line.chars().map(u32::from).eq(text.bytes().map(u32::from))
}

/// `isspace` in the C locale.
#[must_use]
pub const fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Cursor over the unread part of a line.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    /// Starts scanning at the beginning of `line`.
    #[must_use]
    pub const fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start_matches(is_space);
    }

    /// Reads a `%d` conversion.
    ///
    /// Returns `None` (without consuming anything) when the next token is
    /// not a decimal integer or does not fit in 32 bits.
    pub fn int(&mut self) -> Option<i32> {
        let trimmed = self.rest.trim_start_matches(is_space);
        let bytes = trimmed.as_bytes();
        let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
        let digits = bytes[sign_len..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            return None;
        }
        let end = sign_len + digits;
        let value = trimmed[..end].parse::<i32>().ok()?;
        self.rest = &trimmed[end..];
        Some(value)
    }

    /// Reads a ` %c` conversion: the first non-whitespace character.
    pub fn char(&mut self) -> Option<char> {
        self.skip_whitespace();
        let c = self.rest.chars().next()?;
        self.rest = &self.rest[c.len_utf8()..];
        Some(c)
    }

    /// Reads a `%s` conversion: a maximal run of non-whitespace.
    pub fn word(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let end = self
            .rest
            .find(is_space)
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (word, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(word)
    }
}

/// Reads up to `n` integers from the start of `line`.
///
/// The returned vector's length is the number of successful conversions.
#[must_use]
pub fn scan_ints(line: &str, n: usize) -> Vec<i32> {
    let mut scanner = Scanner::new(line);
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        match scanner.int() {
            Some(v) => out.push(v),
            None => break,
        }
    }
    out
}

/// Reads exactly two leading integers.
///
/// # Errors
///
/// Returns [`Explosion::StructuralParseFailure`] if fewer than two parse.
pub fn two_ints(line: &str) -> Result<(i32, i32), Explosion> {
    match scan_ints(line, 2).as_slice() {
        &[a, b] => Ok((a, b)),
        found => Err(Explosion::parse(format!(
            "expected 2 integers, found {}",
            found.len()
        ))),
    }
}

/// Reads the six integers every sequence-style phase expects.
///
/// # Errors
///
/// Returns [`Explosion::StructuralParseFailure`] if fewer than six parse.
pub fn read_six_numbers(line: &str) -> Result<[i32; 6], Explosion> {
    let found = scan_ints(line, 6);
    <[i32; 6]>::try_from(found.as_slice()).map_err(|_| {
        Explosion::parse(format!("expected 6 integers, found {}", found.len()))
    })
}

/// Reads the `"%d %c %d"` shape.
///
/// # Errors
///
/// Returns [`Explosion::StructuralParseFailure`] unless all three convert.
pub fn int_char_int(line: &str) -> Result<(i32, char, i32), Explosion> {
    let mut scanner = Scanner::new(line);
    let first = scanner.int();
    let letter = first.and_then(|_| scanner.char());
    let last = letter.and_then(|_| scanner.int());
    match (first, letter, last) {
        (Some(a), Some(c), Some(b)) => Ok((a, c, b)),
        _ => Err(Explosion::parse("expected <int> <char> <int>")),
    }
}

/// Reads the `"%d %d %s"` shape used for the secret passphrase.
///
/// Returns the word only if all three conversions succeed.
#[must_use]
pub fn trailing_word(line: &str) -> Option<&str> {
    let mut scanner = Scanner::new(line);
    scanner.int()?;
    scanner.int()?;
    scanner.word()
}

/// `strtol`-style parse: optional whitespace and sign, then as many
/// digits as are present. No digits yields `0`; overflow saturates.
#[must_use]
pub fn leading_int(line: &str) -> i64 {
    let trimmed = line.trim_start_matches(is_space);
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    value
}
