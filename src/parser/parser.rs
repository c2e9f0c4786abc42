//! Recursive-descent parser for equations and directives.

use thiserror::Error;

use super::ast::{Directive, Setting, Statement};
use super::lexer::{LexError, Lexer, Token};
use crate::order::Combine;
use crate::syntax::Formula;

/// Parse error with location information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
        }
    }
}

/// Parser state.
struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    line: usize,
    column: usize,
    /// Whether a newline was skipped before the current token
    newline_before: bool,
    /// Token after `current`, if it has been looked at
    lookahead: Option<(Token, usize, usize, bool)>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Parser {
            current,
            line: lexer.token_line,
            column: lexer.token_column,
            newline_before: lexer.newline_before,
            lexer,
            lookahead: None,
        })
    }

    fn lex(&mut self) -> Result<(Token, usize, usize, bool), ParseError> {
        if let Some(next) = self.lookahead.take() {
            return Ok(next);
        }
        let token = self.lexer.next_token()?;
        Ok((
            token,
            self.lexer.token_line,
            self.lexer.token_column,
            self.lexer.newline_before,
        ))
    }

    fn advance(&mut self) -> Result<Token, ParseError> {
        let (token, line, column, newline_before) = self.lex()?;
        self.line = line;
        self.column = column;
        self.newline_before = newline_before;
        Ok(std::mem::replace(&mut self.current, token))
    }

    fn peek(&mut self) -> Result<&Token, ParseError> {
        if self.lookahead.is_none() {
            let next = self.lex()?;
            self.lookahead = Some(next);
        }
        match &self.lookahead {
            Some((token, ..)) => Ok(token),
            None => Err(self.error("lookahead lost".to_string())),
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if self.current == expected {
            self.advance()?;
            Ok(())
        } else {
            Err(self.error(format!(
                "expected {}, found {}",
                expected.describe(),
                self.current.describe()
            )))
        }
    }

    fn ident(&mut self, what: &str) -> Result<String, ParseError> {
        match &self.current {
            Token::Ident(name) => {
                let name = name.clone();
                self.advance()?;
                Ok(name)
            }
            other => Err(self.error(format!("expected {}, found {}", what, other.describe()))),
        }
    }

    /// An identifier on the same line as the directive being parsed.
    fn same_line_ident(&mut self) -> Result<Option<String>, ParseError> {
        if self.newline_before || !matches!(self.current, Token::Ident(_)) {
            return Ok(None);
        }
        self.ident("argument").map(Some)
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            line: self.line,
            column: self.column,
        }
    }
}

/// Parse a source file into statements.
pub fn parse_file(source: &str) -> Result<Vec<Statement>, ParseError> {
    let mut parser = Parser::new(source)?;
    let mut statements = Vec::new();

    while parser.current != Token::Eof {
        let stmt = parse_statement(&mut parser)?;
        statements.push(stmt);
    }

    Ok(statements)
}

/// Parse exactly one formula literal.
pub fn parse_formula(source: &str) -> Result<Formula, ParseError> {
    let mut parser = Parser::new(source)?;
    let formula = parse_formula_inner(&mut parser)?;
    if parser.current != Token::Eof {
        return Err(parser.error(format!(
            "unexpected {} after formula",
            parser.current.describe()
        )));
    }
    Ok(formula)
}

fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    if parser.current == Token::Colon {
        return parse_directive(parser);
    }
    if matches!(parser.current, Token::Ident(_)) && *parser.peek()? == Token::Colon {
        let label = parser.ident("label")?;
        parser.expect(Token::Colon)?;
        return parse_equation(parser, Some(label));
    }
    parse_equation(parser, None)
}

fn parse_equation(parser: &mut Parser, label: Option<String>) -> Result<Statement, ParseError> {
    let lhs = parse_formula_inner(parser)?;
    parser.expect(Token::Equals)?;
    let rhs = parse_formula_inner(parser)?;
    Ok(Statement::Equation { label, lhs, rhs })
}

fn parse_formula_inner(parser: &mut Parser) -> Result<Formula, ParseError> {
    match &parser.current {
        Token::Ident(name) => {
            let name = name.clone();
            parser.advance()?;
            Ok(Formula::Var(name))
        }
        Token::LParen => {
            parser.advance()?;
            let symbol = parser.ident("function symbol after `(`")?;
            let mut args = Vec::new();
            while parser.current != Token::RParen {
                if parser.current == Token::Eof {
                    return Err(parser.error(format!("unclosed application of `{}`", symbol)));
                }
                args.push(parse_formula_inner(parser)?);
            }
            parser.expect(Token::RParen)?;
            Ok(Formula::App(symbol, args))
        }
        other => Err(parser.error(format!("expected formula, found {}", other.describe()))),
    }
}

fn parse_number<T: std::str::FromStr>(parser: &Parser, value: &str) -> Result<T, ParseError> {
    value
        .parse::<T>()
        .map_err(|_| parser.error(format!("expected a number, found `{}`", value)))
}

fn parse_directive(parser: &mut Parser) -> Result<Statement, ParseError> {
    parser.expect(Token::Colon)?;
    let (line, column) = (parser.line, parser.column);
    let name = parser.ident("directive name after `:`")?;

    let directive = match name.as_str() {
        "load" => match &parser.current {
            Token::StringLit(path) => {
                let path = path.clone();
                parser.advance()?;
                Directive::Load(path)
            }
            _ => return Err(parser.error("expected string literal after :load".to_string())),
        },
        "set" => {
            let key = parser.ident("setting name after :set")?;
            let value = parser.ident("setting value")?;
            let setting = match key.as_str() {
                "max_steps" if value == "none" => Setting::MaxSteps(None),
                "max_steps" => Setting::MaxSteps(Some(parse_number(parser, &value)?)),
                "max_rewrites" => Setting::MaxRewrites(parse_number(parser, &value)?),
                "var_weight" => Setting::VarWeight(parse_number(parser, &value)?),
                _ => Setting::Unknown { key, value },
            };
            Directive::Set(setting)
        }
        "order" => {
            let mut measures = Vec::new();
            while let Some(measure) = parser.same_line_ident()? {
                measures.push(measure);
            }
            if measures.is_empty() {
                return Err(parser.error("expected at least one measure after :order".to_string()));
            }
            Directive::Order(measures)
        }
        "weight" => {
            let symbol = parser.ident("symbol after :weight")?;
            let mode = parser.ident("`sum` or `product`")?;
            let base: Option<u64> = match parser.same_line_ident()? {
                Some(n) => Some(parse_number(parser, &n)?),
                None => None,
            };
            let combine = match mode.as_str() {
                "sum" => Combine::Sum {
                    base: base.unwrap_or(1),
                },
                "product" => Combine::Product {
                    base: base.unwrap_or(1),
                },
                _ => {
                    return Err(parser.error(format!(
                        "expected `sum` or `product`, found `{}`",
                        mode
                    )))
                }
            };
            Directive::Weight { symbol, combine }
        }
        "reduce" => Directive::Reduce(parse_formula_inner(parser)?),
        "auto" => Directive::Auto,
        "state" => Directive::State,
        "actions" => Directive::Actions,
        "history" => Directive::History,
        "reset" => Directive::Reset,
        "help" => Directive::Help,
        "quit" => Directive::Quit,
        _ => {
            return Err(ParseError {
                message: format!("unknown directive: {}", name),
                line,
                column,
            })
        }
    };
    Ok(Statement::Directive(directive))
}
