//! PostScript calculator tokenizer.
//!
//! Splits a Type 4 function body into numbers, booleans, operator names and
//! the `{`/`}` procedure delimiters. The lexer borrows the whole decoded
//! program text and hands out zero-copy spans; names are resolved against the
//! operator table by the caller.

use crate::error::{PdfError, Result};

/// Calculator token types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalcToken<'a> {
    /// Numeric literal (integers are carried as reals)
    Number(f64),
    /// `true` or `false`
    Bool(bool),
    /// Operator name, unresolved
    Name(&'a [u8]),
    /// `{`
    BraceOpen,
    /// `}`
    BraceClose,
}

impl CalcToken<'_> {
    /// Short description used in log messages.
    pub fn describe(&self) -> String {
        match self {
            CalcToken::Number(n) => n.to_string(),
            CalcToken::Bool(b) => b.to_string(),
            CalcToken::Name(name) => name_from_bytes(name),
            CalcToken::BraceOpen => "{".to_string(),
            CalcToken::BraceClose => "}".to_string(),
        }
    }
}

/// Scanner state between bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    /// Between tokens: whitespace is consumed here
    Skip,
    /// Inside a `%` comment, up to end of line
    Comment,
    /// Inside a span whose first byte sorts below `A`
    Number { start: usize },
    /// Inside any other span
    Name { start: usize },
}

/// Tokenizer over one program text.
pub struct CalcLexer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> CalcLexer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current position in the program text
    pub fn tell(&self) -> usize {
        self.pos
    }

    /// Set current position in the program text.
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }

    /// Get remaining unscanned data
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Get next token with its starting position.
    ///
    /// A span that cannot be parsed as a number is reported as an error; the
    /// lexer has already moved past it, so scanning may continue.
    pub fn next_token(&mut self) -> Option<Result<(usize, CalcToken<'a>)>> {
        let mut state = LexState::Skip;

        loop {
            let byte = self.data.get(self.pos).copied();

            match state {
                LexState::Skip => match byte {
                    None => return None,
                    Some(b'%') => {
                        self.pos += 1;
                        state = LexState::Comment;
                    }
                    Some(b) if is_whitespace(b) => self.pos += 1,
                    Some(b'{') => {
                        self.pos += 1;
                        return Some(Ok((self.pos - 1, CalcToken::BraceOpen)));
                    }
                    Some(b'}') => {
                        self.pos += 1;
                        return Some(Ok((self.pos - 1, CalcToken::BraceClose)));
                    }
                    Some(b) if b < b'A' => {
                        state = LexState::Number { start: self.pos };
                        self.pos += 1;
                    }
                    Some(_) => {
                        state = LexState::Name { start: self.pos };
                        self.pos += 1;
                    }
                },
                LexState::Comment => match byte {
                    None => return None,
                    // The line ending itself is consumed as whitespace.
                    Some(b'\r' | b'\n') => state = LexState::Skip,
                    Some(_) => self.pos += 1,
                },
                LexState::Number { start } | LexState::Name { start } => match byte {
                    Some(b) if !is_token_end(b) => self.pos += 1,
                    _ => {
                        let span = &self.data[start..self.pos];
                        let token = if matches!(state, LexState::Number { .. }) {
                            parse_number(span, start)
                        } else {
                            Ok(classify_name(span))
                        };
                        return Some(token.map(|t| (start, t)));
                    }
                },
            }
        }
    }
}

impl<'a> Iterator for CalcLexer<'a> {
    type Item = Result<(usize, CalcToken<'a>)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Check if byte is whitespace
const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'\x00' | b'\x0c')
}

/// Check if byte ends a number or name span
const fn is_token_end(b: u8) -> bool {
    is_whitespace(b) || matches!(b, b'{' | b'}' | b'%')
}

fn classify_name(span: &[u8]) -> CalcToken<'_> {
    match span {
        b"true" => CalcToken::Bool(true),
        b"false" => CalcToken::Bool(false),
        _ => CalcToken::Name(span),
    }
}

/// Parse a numeric span: `12`, `-3.5`, `.5`, `6.02e23` or radix form `16#FF`.
fn parse_number<'a>(span: &[u8], pos: usize) -> Result<CalcToken<'a>> {
    let invalid = || PdfError::TokenError {
        pos,
        msg: format!("invalid number: {}", name_from_bytes(span)),
    };

    let s = std::str::from_utf8(span).map_err(|_| invalid())?;

    if let Some((base, digits)) = s.split_once('#') {
        let base: u32 = base.parse().map_err(|_| invalid())?;
        // Radix digits carry no sign.
        let unsigned = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_alphanumeric());
        if !(2..=36).contains(&base) || !unsigned {
            return Err(invalid());
        }
        let value = i64::from_str_radix(digits, base).map_err(|_| invalid())?;
        return Ok(CalcToken::Number(value as f64));
    }

    // Rust's float grammar also accepts "inf" and "nan" spellings.
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return Err(invalid());
    }

    s.parse::<f64>()
        .map(CalcToken::Number)
        .map_err(|_| invalid())
}

pub(crate) fn name_from_bytes(bytes: &[u8]) -> String {
    let mut name = String::with_capacity(bytes.len());
    for &b in bytes {
        name.push(char::from(b));
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(data: &[u8]) -> Vec<CalcToken<'_>> {
        CalcLexer::new(data).filter_map(|r| r.ok()).map(|(_, t)| t).collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            tokens(b"0 +1 -2 .5 1.234 5. 1e3 -2.5E-1"),
            vec![
                CalcToken::Number(0.0),
                CalcToken::Number(1.0),
                CalcToken::Number(-2.0),
                CalcToken::Number(0.5),
                CalcToken::Number(1.234),
                CalcToken::Number(5.0),
                CalcToken::Number(1000.0),
                CalcToken::Number(-0.25),
            ]
        );
    }

    #[test]
    fn test_radix_numbers() {
        assert_eq!(
            tokens(b"16#FF 2#101 8#17"),
            vec![
                CalcToken::Number(255.0),
                CalcToken::Number(5.0),
                CalcToken::Number(15.0),
            ]
        );
    }

    #[test]
    fn test_signed_radix_digits_are_invalid() {
        for span in [&b"16#-FF"[..], b"16#+FF", b"-16#FF"] {
            assert!(
                matches!(
                    CalcLexer::new(span).next_token(),
                    Some(Err(PdfError::TokenError { pos: 0, .. }))
                ),
                "{}",
                name_from_bytes(span)
            );
        }
    }

    #[test]
    fn test_booleans_and_names() {
        assert_eq!(
            tokens(b"true false truncate floor"),
            vec![
                CalcToken::Bool(true),
                CalcToken::Bool(false),
                CalcToken::Name(b"truncate"),
                CalcToken::Name(b"floor"),
            ]
        );
    }

    #[test]
    fn test_braces_need_no_whitespace() {
        assert_eq!(
            tokens(b"{1 2 add}"),
            vec![
                CalcToken::BraceOpen,
                CalcToken::Number(1.0),
                CalcToken::Number(2.0),
                CalcToken::Name(b"add"),
                CalcToken::BraceClose,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let positions: Vec<usize> = CalcLexer::new(b"{ 3 4\n\tadd }")
            .map(|r| r.unwrap().0)
            .collect();
        assert_eq!(positions, vec![0, 2, 4, 7, 11]);
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            tokens(b"{ 1 % push one\r\n2%two\nadd }"),
            vec![
                CalcToken::BraceOpen,
                CalcToken::Number(1.0),
                CalcToken::Number(2.0),
                CalcToken::Name(b"add"),
                CalcToken::BraceClose,
            ]
        );
    }

    #[test]
    fn test_invalid_number_reports_and_continues() {
        let mut lexer = CalcLexer::new(b"1.2.3 4");
        match lexer.next_token() {
            Some(Err(PdfError::TokenError { pos, .. })) => assert_eq!(pos, 0),
            other => panic!("expected token error, got {:?}", other),
        }
        assert_eq!(lexer.next_token().unwrap().unwrap(), (6, CalcToken::Number(4.0)));
        assert!(lexer.next_token().is_none());
    }

    #[test]
    fn test_sign_alone_is_invalid() {
        let results: Vec<_> = CalcLexer::new(b"- + #").collect();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.is_err()));
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert!(tokens(b"").is_empty());
        assert!(tokens(b" \t\r\n\x0c\x00").is_empty());
    }

    #[test]
    fn test_unterminated_span_at_end() {
        assert_eq!(
            tokens(b"{ 1 ad"),
            vec![
                CalcToken::BraceOpen,
                CalcToken::Number(1.0),
                CalcToken::Name(b"ad"),
            ]
        );
    }
}
