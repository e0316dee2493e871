//! SQL lexer - converts statement text into tokens
//!
//! Recovery is lenient: an unrecognized character is reported as a
//! diagnostic and skipped, and tokenization continues. A statement
//! containing one will normally still fail to parse, but lexing itself
//! never gives up on a single bad character.

use super::token::{Token, TokenType};
use crate::error::{Result, SqlError};

/// One recovered lexical fault: the skipped character and where it was.
#[derive(Debug, Clone, PartialEq)]
pub struct LexDiagnostic {
    pub character: char,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for LexDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "illegal character '{}' at {}:{}",
            self.character, self.line, self.column
        )
    }
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    diagnostics: Vec<LexDiagnostic>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            diagnostics: Vec::new(),
        }
    }

    /// Characters skipped during recovery, in source order.
    pub fn diagnostics(&self) -> &[LexDiagnostic] {
        &self.diagnostics
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.token_type, TokenType::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;

        if self.is_eof() {
            return Ok(Token::new(TokenType::Eof, line, column));
        }

        let ch = self.current_char();

        // Comments are discarded
        if ch == '-' && self.peek_char() == Some('-') {
            self.skip_line_comment();
            return self.next_token();
        }

        if ch == '/' && self.peek_char() == Some('*') {
            self.skip_block_comment()?;
            return self.next_token();
        }

        let token_type = match ch {
            '\'' => self.read_string()?,

            '0'..='9' => self.read_number()?,

            'a'..='z' | 'A'..='Z' | '_' => self.read_identifier(),

            '=' => {
                self.advance();
                TokenType::Eq
            }
            '<' => {
                self.advance();
                if self.current_char() == '=' {
                    self.advance();
                    TokenType::Le
                } else if self.current_char() == '>' {
                    self.advance();
                    TokenType::Ne
                } else {
                    TokenType::Lt
                }
            }
            '>' => {
                self.advance();
                if self.current_char() == '=' {
                    self.advance();
                    TokenType::Ge
                } else {
                    TokenType::Gt
                }
            }
            '&' => {
                self.advance();
                if self.current_char() == '&' {
                    self.advance();
                    TokenType::And
                } else {
                    // Lone '&' is not a token; recover and keep going
                    self.report(ch, line, column);
                    return self.next_token();
                }
            }
            '|' => {
                self.advance();
                if self.current_char() == '|' {
                    self.advance();
                    TokenType::Or
                } else {
                    self.report(ch, line, column);
                    return self.next_token();
                }
            }
            '+' => {
                self.advance();
                TokenType::Plus
            }
            '-' => {
                self.advance();
                TokenType::Minus
            }
            '*' => {
                self.advance();
                TokenType::Star
            }
            '/' => {
                self.advance();
                TokenType::Slash
            }
            '(' => {
                self.advance();
                TokenType::LParen
            }
            ')' => {
                self.advance();
                TokenType::RParen
            }
            ',' => {
                self.advance();
                TokenType::Comma
            }
            ';' => {
                self.advance();
                TokenType::Semicolon
            }
            _ => {
                // Skip exactly this character and continue tokenizing
                self.advance();
                self.report(ch, line, column);
                return self.next_token();
            }
        };

        Ok(Token::new(token_type, line, column))
    }

    fn report(&mut self, character: char, line: usize, column: usize) {
        let diag = LexDiagnostic {
            character,
            line,
            column,
        };
        tracing::warn!(%diag, "skipping unrecognized character");
        self.diagnostics.push(diag);
    }

    fn current_char(&self) -> char {
        if self.is_eof() {
            '\0'
        } else {
            self.input[self.position]
        }
    }

    fn peek_char(&self) -> Option<char> {
        if self.position + 1 < self.input.len() {
            Some(self.input[self.position + 1])
        } else {
            None
        }
    }

    fn advance(&mut self) {
        if !self.is_eof() {
            if self.input[self.position] == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.position += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_eof() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.is_eof() && self.current_char() != '\n' {
            self.advance();
        }
        if !self.is_eof() {
            self.advance(); // skip newline
        }
    }

    fn skip_block_comment(&mut self) -> Result<()> {
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_eof() {
            if self.current_char() == '*' && self.peek_char() == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(SqlError::Syntax("unterminated block comment".to_string()))
    }

    /// Single-quoted text literal. Any character is allowed between the
    /// quotes; backslash escapes the usual set.
    fn read_string(&mut self) -> Result<TokenType> {
        self.advance(); // skip opening quote
        let mut value = String::new();

        while !self.is_eof() && self.current_char() != '\'' {
            if self.current_char() == '\\' {
                self.advance();
                if self.is_eof() {
                    return Err(SqlError::Syntax("unterminated string literal".to_string()));
                }
                let escaped = match self.current_char() {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '\\' => '\\',
                    '\'' => '\'',
                    c => c,
                };
                value.push(escaped);
            } else {
                value.push(self.current_char());
            }
            self.advance();
        }

        if self.is_eof() {
            return Err(SqlError::Syntax("unterminated string literal".to_string()));
        }

        self.advance(); // skip closing quote
        Ok(TokenType::String(value))
    }

    /// Integer literal `\d+` or float literal `\d+.\d+`. A trailing dot
    /// without digits is left for the next token (and will not lex).
    fn read_number(&mut self) -> Result<TokenType> {
        let mut value = String::new();

        while !self.is_eof() && self.current_char().is_ascii_digit() {
            value.push(self.current_char());
            self.advance();
        }

        let is_float = self.current_char() == '.'
            && self
                .peek_char()
                .map(|c| c.is_ascii_digit())
                .unwrap_or(false);

        if is_float {
            value.push('.');
            self.advance();
            while !self.is_eof() && self.current_char().is_ascii_digit() {
                value.push(self.current_char());
                self.advance();
            }
            value
                .parse::<f64>()
                .map(TokenType::FloatNumber)
                .map_err(|_| SqlError::Syntax(format!("invalid number: {}", value)))
        } else {
            value
                .parse::<i64>()
                .map(TokenType::IntNumber)
                .map_err(|_| SqlError::Syntax(format!("invalid number: {}", value)))
        }
    }

    fn read_identifier(&mut self) -> TokenType {
        let mut value = String::new();

        while !self.is_eof() {
            let ch = self.current_char();
            if ch.is_alphanumeric() || ch == '_' {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        TokenType::from_keyword(&value).unwrap_or(TokenType::Identifier(value))
    }
}
