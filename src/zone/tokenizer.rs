use tracing::trace;

use super::{Result, ZoneError};
use crate::dns::address::{self, Family};
use crate::dns::name::Name;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    QuotedString,
    Eol,
    Eof,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// First token of a line that began with whitespace, i.e. the owner
    /// field was left blank.
    pub blank_owner: bool,
}

impl Token {
    fn new(kind: TokenKind, value: String, blank_owner: bool) -> Self {
        Self {
            kind,
            value,
            blank_owner,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self.kind, TokenKind::Identifier | TokenKind::QuotedString)
    }

    pub fn is_eol(&self) -> bool {
        matches!(self.kind, TokenKind::Eol | TokenKind::Eof)
    }
}

/// Zone-file lexer.
///
/// Handles `;` comments, double-quoted strings and parenthesised groups that
/// span lines. Newlines inside parentheses are not reported as EOL.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    paren_depth: usize,
    line_start: bool,
    pushed_back: Option<Token>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            paren_depth: 0,
            line_start: true,
            pushed_back: None,
        }
    }

    /// Line the cursor is on, 1-based
    pub fn line(&self) -> usize {
        self.line
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Build an error tagged with the current line
    pub fn error(&self, msg: impl AsRef<str>) -> ZoneError {
        ZoneError::ParseError(format!("line {}: {}", self.line, msg.as_ref()))
    }

    /// Hand a token back; the next [`Tokenizer::get`] returns it again
    pub fn unget(&mut self, token: Token) {
        self.pushed_back = Some(token);
    }

    pub fn get(&mut self) -> Result<Token> {
        if let Some(token) = self.pushed_back.take() {
            return Ok(token);
        }

        let mut skipped_whitespace = false;
        loop {
            match self.peek_char() {
                None => {
                    if self.paren_depth > 0 {
                        return Err(self.error("unterminated parentheses"));
                    }
                    return Ok(Token::new(TokenKind::Eof, String::new(), false));
                }
                Some(' ') | Some('\t') | Some('\r') => {
                    self.bump();
                    skipped_whitespace = true;
                }
                Some('(') => {
                    self.bump();
                    self.paren_depth += 1;
                }
                Some(')') => {
                    self.bump();
                    if self.paren_depth == 0 {
                        return Err(self.error("unbalanced parentheses"));
                    }
                    self.paren_depth -= 1;
                }
                Some(';') => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some('\n') => {
                    self.bump();
                    self.line += 1;
                    if self.paren_depth > 0 {
                        continue;
                    }
                    self.line_start = true;
                    return Ok(Token::new(TokenKind::Eol, String::new(), false));
                }
                Some('"') => {
                    self.bump();
                    let value = self.read_quoted()?;
                    return Ok(self.finish(TokenKind::QuotedString, value, skipped_whitespace));
                }
                Some(_) => {
                    let value = self.read_identifier();
                    return Ok(self.finish(TokenKind::Identifier, value, skipped_whitespace));
                }
            }
        }
    }

    fn finish(&mut self, kind: TokenKind, value: String, skipped_whitespace: bool) -> Token {
        let blank_owner = self.line_start && skipped_whitespace;
        self.line_start = false;
        trace!("Token {:?} {:?} on line {}", kind, value, self.line);
        Token::new(kind, value, blank_owner)
    }

    fn read_quoted(&mut self) -> Result<String> {
        let mut value = String::new();
        loop {
            // The newline stays unread so the line still ends with an EOL.
            if matches!(self.peek_char(), None | Some('\n')) {
                return Err(self.error("unterminated quoted string"));
            }
            match self.bump() {
                None => return Err(self.error("unterminated quoted string")),
                Some('"') => return Ok(value),
                Some('\\') => match self.peek_char() {
                    Some(c) if c != '\n' => {
                        self.bump();
                        value.push(c);
                    }
                    _ => return Err(self.error("unterminated quoted string")),
                },
                Some(c) => value.push(c),
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut value = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || matches!(c, '(' | ')' | ';' | '"') {
                break;
            }
            self.bump();
            value.push(c);
            // Escaped characters are kept verbatim, backslash included.
            if c == '\\' {
                if let Some(escaped) = self.bump() {
                    value.push(escaped);
                }
            }
        }
        value
    }

    /// Next token as a string (identifier or quoted). An EOL found instead is
    /// left in place so the caller can resynchronise on it.
    pub fn get_string(&mut self) -> Result<String> {
        let token = self.get()?;
        if !token.is_string() {
            let err = self.error("expected a string");
            self.unget(token);
            return Err(err);
        }
        Ok(token.value)
    }

    /// Consume tokens up to and including the next EOL or EOF
    pub fn skip_line(&mut self) -> Result<()> {
        loop {
            if self.get()?.is_eol() {
                return Ok(());
            }
        }
    }

    pub fn get_u16(&mut self) -> Result<u16> {
        let value = self.get_string()?;
        value
            .parse()
            .map_err(|_| self.error(format!("expected a 16-bit integer, got {}", value)))
    }

    /// A TTL, either plain seconds or with `w`/`d`/`h`/`m`/`s` units
    pub fn get_ttl(&mut self) -> Result<u32> {
        let value = self.get_string()?;
        parse_ttl(&value).ok_or_else(|| ZoneError::InvalidTTL(value))
    }

    pub fn get_name(&mut self, origin: Option<&Name>) -> Result<Name> {
        let value = self.get_string()?;
        Name::parse(&value, origin)
            .map_err(|e| ZoneError::InvalidDomainName(format!("{}: {}", value, e)))
    }

    /// Parse the next token as an address of `family` and return its octets
    pub fn get_address_bytes(&mut self, family: Family) -> Result<Vec<u8>> {
        let value = self.get_string()?;
        address::to_byte_array(&value, family)
            .ok_or_else(|| self.error(format!("invalid {} address: {}", family, value)))
    }

    /// Concatenate the remaining tokens on the line and decode them as hex.
    /// Leaves the EOL in place.
    pub fn get_hex(&mut self) -> Result<Vec<u8>> {
        let mut digits = String::new();
        loop {
            let token = self.get()?;
            if !token.is_string() {
                self.unget(token);
                break;
            }
            digits.push_str(&token.value);
        }
        hex::decode(&digits).map_err(|e| self.error(format!("invalid hex data: {}", e)))
    }

    /// Require the end of the current line
    pub fn get_eol(&mut self) -> Result<()> {
        let token = self.get()?;
        if !token.is_eol() {
            return Err(self.error(format!("expected end of line, got {}", token.value)));
        }
        Ok(())
    }
}

/// Parse a TTL in seconds or BIND unit notation (`1h30m`, `2D`)
pub fn parse_ttl(text: &str) -> Option<u32> {
    if text.is_empty() {
        return None;
    }
    if let Ok(seconds) = text.parse::<u32>() {
        return Some(seconds);
    }

    let mut total: u64 = 0;
    let mut current: u64 = 0;
    let mut have_digits = false;
    for c in text.chars() {
        if let Some(d) = c.to_digit(10) {
            current = current.checked_mul(10)?.checked_add(d as u64)?;
            have_digits = true;
            continue;
        }
        if !have_digits {
            return None;
        }
        let unit = match c.to_ascii_lowercase() {
            'w' => 604_800,
            'd' => 86_400,
            'h' => 3_600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        total = total.checked_add(current.checked_mul(unit)?)?;
        current = 0;
        have_digits = false;
    }
    total = total.checked_add(current)?;
    u32::try_from(total).ok()
}
