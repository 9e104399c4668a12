//! Whitespace-separated element streams.

use std::io::BufRead;
use std::str::FromStr;

use crate::error::ReadError;

/// ASCII whitespace plus vertical tab, which `u8::is_ascii_whitespace` omits.
fn is_space(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b'\x0B'
}

/// Pulls whitespace-separated tokens out of a `BufRead`.
///
/// Whitespace following a token is left in the reader, so several values can
/// be read one after another from the same input.
pub struct TokenReader<'r, R: BufRead> {
    reader: &'r mut R,
}

impl<'r, R: BufRead> TokenReader<'r, R> {
    #[must_use]
    pub fn new(reader: &'r mut R) -> Self {
        TokenReader { reader }
    }

    /// Skip over any ASCII whitespace, refilling the reader as needed.
    ///
    /// Returns `false` if the input ended before a non-whitespace byte.
    fn skip_spaces(&mut self) -> std::io::Result<bool> {
        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                return Ok(false);
            }
            let n_spaces = buf.iter().take_while(|&&b| is_space(b)).count();
            let exhausted = n_spaces == buf.len();
            self.reader.consume(n_spaces);
            if !exhausted {
                return Ok(true);
            }
        }
    }

    /// Returns the next token, or `None` at the end of input.
    ///
    /// # Errors
    ///
    /// From the underlying reader.
    pub fn next_token(&mut self) -> std::io::Result<Option<String>> {
        if !self.skip_spaces()? {
            return Ok(None);
        }

        let mut token = Vec::new();
        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                break;
            }
            let n_bytes = buf.iter().take_while(|&&b| !is_space(b)).count();
            token.extend_from_slice(&buf[..n_bytes]);
            let exhausted = n_bytes == buf.len();
            self.reader.consume(n_bytes);
            if !exhausted {
                break;
            }
        }
        Ok(Some(String::from_utf8_lossy(&token).into_owned()))
    }
}

fn parse_token<T: FromStr>(token: String, index: usize) -> Result<T, ReadError> {
    token
        .parse()
        .map_err(|_| ReadError::Parse { index, token })
}

/// Reads exactly `count` elements from `reader`.
pub(crate) fn read_elements<T: FromStr, R: BufRead>(
    reader: &mut R,
    count: usize,
) -> Result<Vec<T>, ReadError> {
    let mut tokens = TokenReader::new(reader);
    let mut values = Vec::with_capacity(count);
    while values.len() < count {
        let Some(token) = tokens.next_token()? else {
            log::debug!("input ended after {} of {count} elements", values.len());
            return Err(ReadError::UnexpectedEof {
                expected: count,
                found: values.len(),
            });
        };
        values.push(parse_token(token, values.len())?);
    }
    Ok(values)
}

/// Parses every token of `text`; `offset` is added to reported positions.
pub(crate) fn parse_tokens<T: FromStr>(text: &str, offset: usize) -> Result<Vec<T>, ReadError> {
    text.split(|c: char| c.is_ascii() && is_space(c as u8))
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| parse_token(token.to_owned(), offset + i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    #[test]
    fn test_tokens_across_small_refills() {
        let data = "  12\t-3\n\n 45  ";
        let mut reader = BufReader::with_capacity(2, data.as_bytes());
        let mut tokens = TokenReader::new(&mut reader);

        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("12"));
        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("-3"));
        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("45"));
        assert_eq!(tokens.next_token().unwrap(), None);
    }

    #[test]
    fn test_vertical_tab_separates_tokens() {
        let mut input = "1\x0B2 \x0B\x0C3".as_bytes();
        let values: Vec<i32> = read_elements(&mut input, 3).unwrap();
        assert_eq!(values, vec![1, 2, 3]);

        let parsed: Vec<i32> = parse_tokens("\x0B4\x0B5\x0B", 0).unwrap();
        assert_eq!(parsed, vec![4, 5]);
    }

    #[test]
    fn test_read_elements_leaves_rest_of_input() {
        let mut input = "1 2 3 4".as_bytes();
        let first: Vec<i32> = read_elements(&mut input, 2).unwrap();
        let rest: Vec<i32> = read_elements(&mut input, 2).unwrap();

        assert_eq!(first, vec![1, 2]);
        assert_eq!(rest, vec![3, 4]);
    }

    #[test]
    fn test_read_elements_eof() {
        let mut input = "1 2".as_bytes();
        let err = read_elements::<i32, _>(&mut input, 3).unwrap_err();
        assert!(matches!(
            err,
            ReadError::UnexpectedEof {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_parse_tokens_reports_position() {
        let err = parse_tokens::<f64>("1.5 oops", 10).unwrap_err();
        match err {
            ReadError::Parse { index, token } => {
                assert_eq!(index, 11);
                assert_eq!(token, "oops");
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }
}
