//! Whitespace-driven tokenizer for ASE text
//!
//! The format is line-oriented only by convention; the grammar itself is a
//! flat token stream where any byte at or below ASCII space separates tokens,
//! `{` and `}` stand alone, and double quotes delimit strings with no escape
//! sequences.

use crate::error::{Error, Result};

/// One lexed token together with its byte offset in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token text, without surrounding quotes for string tokens.
    pub text: &'a str,
    /// Byte offset of the token start in the input.
    pub offset: usize,
    /// Whether the token was written as a quoted string.
    pub quoted: bool,
}

/// Cursor over ASE source text.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Start tokenizing at the beginning of `source`
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// Current byte position, usable with [`rewind`](Self::rewind).
    pub fn checkpoint(&self) -> usize {
        self.pos
    }

    /// Move back to a previously captured [`checkpoint`](Self::checkpoint).
    pub fn rewind(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }

    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.bytes();
        while self.pos < bytes.len() && bytes[self.pos] <= b' ' {
            self.pos += 1;
        }
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        self.skip_whitespace();
        let bytes = self.bytes();
        if self.pos >= bytes.len() {
            return None;
        }
        let start = self.pos;
        match bytes[start] {
            b'{' | b'}' => {
                self.pos += 1;
                Some(Token {
                    text: &self.source[start..self.pos],
                    offset: start,
                    quoted: false,
                })
            }
            b'"' => {
                self.pos += 1;
                let body_start = self.pos;
                while self.pos < bytes.len() && bytes[self.pos] != b'"' {
                    self.pos += 1;
                }
                let body_end = self.pos;
                if self.pos < bytes.len() {
                    self.pos += 1;
                }
                Some(Token {
                    text: &self.source[body_start..body_end],
                    offset: start,
                    quoted: true,
                })
            }
            _ => {
                while self.pos < bytes.len()
                    && bytes[self.pos] > b' '
                    && bytes[self.pos] != b'{'
                    && bytes[self.pos] != b'}'
                    && bytes[self.pos] != b'"'
                {
                    self.pos += 1;
                }
                Some(Token {
                    text: &self.source[start..self.pos],
                    offset: start,
                    quoted: false,
                })
            }
        }
    }

    /// Next token, erroring at end of input.
    pub fn expect_token(&mut self, context: &str) -> Result<Token<'a>> {
        self.next_token()
            .ok_or_else(|| Error::unexpected_eof(context))
    }

    /// Consume the opening `{` of a block.
    pub fn expect_open(&mut self, keyword: &str) -> Result<()> {
        let token = self.expect_token(keyword)?;
        if token.text == "{" {
            Ok(())
        } else {
            Err(Error::syntax_at(
                keyword,
                &format!("expected '{{', found '{}'", token.text),
            ))
        }
    }

    /// Rest of the current line, trimmed, with the cursor left after the
    /// newline. Used for keywords whose value is free text.
    pub fn rest_of_line(&mut self) -> &'a str {
        let bytes = self.bytes();
        let start = self.pos;
        while self.pos < bytes.len() && bytes[self.pos] != b'\n' {
            self.pos += 1;
        }
        let line = self.source[start..self.pos].trim();
        if self.pos < bytes.len() {
            self.pos += 1;
        }
        line
    }

    /// Skip a balanced `{ ... }` block whose opening brace has not yet been
    /// consumed. Tolerates truncated input by stopping at end of text.
    pub fn skip_block(&mut self) -> Result<()> {
        self.expect_open("block")?;
        let mut depth: usize = 1;
        while depth > 0 {
            match self.next_token() {
                Some(token) if token.text == "{" => depth += 1,
                Some(token) if token.text == "}" => depth -= 1,
                Some(_) => {}
                None => break,
            }
        }
        Ok(())
    }

    /// Parse the next token as an integer.
    pub fn expect_usize(&mut self, context: &str) -> Result<usize> {
        let token = self.expect_token(context)?;
        parse_usize(&token)
    }

    /// Parse the next token as a float.
    pub fn expect_float(&mut self, context: &str) -> Result<f64> {
        let token = self.expect_token(context)?;
        parse_float(&token)
    }

    /// Parse the next token as a signed integer.
    pub fn expect_i32(&mut self, context: &str) -> Result<i32> {
        let token = self.expect_token(context)?;
        token.text.parse().map_err(|_| Error::MalformedNumber {
            token: token.text.to_owned(),
            offset: token.offset,
        })
    }
}

/// Parse a token as `usize`, reporting the byte offset on failure.
pub fn parse_usize(token: &Token<'_>) -> Result<usize> {
    token.text.parse().map_err(|_| Error::MalformedNumber {
        token: token.text.to_owned(),
        offset: token.offset,
    })
}

/// Parse a token as `u32`, reporting the byte offset on failure.
pub fn parse_u32(token: &Token<'_>) -> Result<u32> {
    token.text.parse().map_err(|_| Error::MalformedNumber {
        token: token.text.to_owned(),
        offset: token.offset,
    })
}

/// Parse a token as `f64`, reporting the byte offset on failure.
pub fn parse_float(token: &Token<'_>) -> Result<f64> {
    token.text.parse().map_err(|_| Error::MalformedNumber {
        token: token.text.to_owned(),
        offset: token.offset,
    })
}
