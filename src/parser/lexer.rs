//! Lexer for equation files and prompt lines.

use thiserror::Error;

/// Token types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Symbol, variable, label, directive name or number; the parser decides.
    Ident(String),

    LParen, // (
    RParen, // )
    Colon,  // :
    Equals, // =

    StringLit(String),

    Eof,
}

impl Token {
    pub fn describe(&self) -> String {
        match self {
            Token::Ident(name) => format!("`{}`", name),
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
            Token::Colon => "`:`".to_string(),
            Token::Equals => "`=`".to_string(),
            Token::StringLit(s) => format!("\"{}\"", s),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// Lexer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// Lexer state.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    /// Whether a line break was skipped before the last token.
    pub newline_before: bool,
    /// Where the last token started.
    pub token_line: usize,
    pub token_column: usize,
}

fn is_ident_char(ch: char) -> bool {
    !ch.is_whitespace() && !matches!(ch, '(' | ')' | ':' | '=' | '"')
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
            newline_before: false,
            token_line: 1,
            token_column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.newline_before = false;
        self.skip_whitespace_and_comments();
        self.token_line = self.line;
        self.token_column = self.column;

        let Some(ch) = self.peek_char() else {
            return Ok(Token::Eof);
        };

        let token = match ch {
            '(' => Token::LParen,
            ')' => Token::RParen,
            ':' => Token::Colon,
            '=' => Token::Equals,
            '"' => return self.lex_string(),
            _ => return Ok(self.lex_ident()),
        };
        self.advance(1);
        Ok(token)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn advance(&mut self, bytes: usize) {
        let consumed = &self.input[self.position..self.position + bytes];
        for ch in consumed.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
                self.newline_before = true;
            } else {
                self.column += 1;
            }
        }
        self.position += bytes;
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.advance(ch.len_utf8());
            } else if self.input[self.position..].starts_with("//") {
                while let Some(c) = self.peek_char() {
                    if c == '\n' {
                        break;
                    }
                    self.advance(c.len_utf8());
                }
            } else {
                break;
            }
        }
    }

    fn lex_ident(&mut self) -> Token {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if !is_ident_char(ch) {
                break;
            }
            self.advance(ch.len_utf8());
        }
        Token::Ident(self.input[start..self.position].to_string())
    }

    fn lex_string(&mut self) -> Result<Token, LexError> {
        // Opening quote
        self.advance(1);
        let start = self.position;

        while let Some(ch) = self.peek_char() {
            match ch {
                '"' => {
                    let content = self.input[start..self.position].to_string();
                    self.advance(1);
                    return Ok(Token::StringLit(content));
                }
                '\n' => break,
                _ => self.advance(ch.len_utf8()),
            }
        }

        Err(LexError {
            message: "unterminated string literal".to_string(),
            line: self.line,
            column: self.column,
        })
    }
}
