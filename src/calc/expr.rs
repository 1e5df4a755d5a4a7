//! Arithmetic expression evaluation for the calculator buffer.
//!
//! The buffer is normalized, percent literals are rewritten into divisions,
//! the result is checked against a character allow-list, and only then is it
//! parsed by a small recursive-descent parser over `+ - * / ( )`.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Parentheses and unary signs may nest this deep before evaluation gives up.
pub const MAX_NESTING_DEPTH: usize = 256;

static PERCENT_RE: OnceLock<Regex> = OnceLock::new();
static ALLOWED_RE: OnceLock<Regex> = OnceLock::new();

fn percent_re() -> &'static Regex {
    PERCENT_RE.get_or_init(|| Regex::new(r"([0-9]+(\.[0-9]+)?)%").expect("percent pattern"))
}

fn allowed_re() -> &'static Regex {
    ALLOWED_RE.get_or_init(|| Regex::new(r"^[0-9+\-*/().% \t]+$").expect("allow-list pattern"))
}

/// Why an expression could not produce a number.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Characters outside the allow-list survived normalization.
    InvalidCharacters,
    /// The expression does not match the grammar.
    Syntax { position: usize, message: String },
    /// Nesting exceeded [`MAX_NESTING_DEPTH`].
    TooDeep,
    /// The arithmetic produced an infinite or NaN value.
    NonFinite,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::InvalidCharacters => write!(f, "expression contains invalid characters"),
            EvalError::Syntax { position, message } => {
                write!(f, "syntax error at {position}: {message}")
            }
            EvalError::TooDeep => write!(f, "expression nested deeper than {MAX_NESTING_DEPTH}"),
            EvalError::NonFinite => write!(f, "result is not a finite number"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Swap display glyphs for their ASCII operators and trim surrounding whitespace.
pub fn normalize(input: &str) -> String {
    input.replace('×', "*").replace('÷', "/").trim().to_string()
}

/// Turn every `<number>%` into `(<number>/100)`.
pub fn rewrite_percent(expr: &str) -> String {
    percent_re().replace_all(expr, "(${1}/100)").into_owned()
}

/// True when the expression only uses digits, operators, parentheses, `.`, `%`,
/// spaces, and tabs.
pub fn is_allowed(expr: &str) -> bool {
    allowed_re().is_match(expr)
}

/// Full evaluation pipeline: normalize, rewrite percent, validate, then parse.
///
/// The rewrite runs before validation, so the allow-list sees the rewritten text.
pub fn evaluate_expression(input: &str) -> Result<f64, EvalError> {
    let expr = rewrite_percent(&normalize(input));
    if !is_allowed(&expr) {
        return Err(EvalError::InvalidCharacters);
    }
    let value = parse_and_eval(&expr)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum TokenKind {
    Number(f64),
    Sym(Sym),
    Eof,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sym {
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Clone, Copy, Debug)]
struct Token {
    kind: TokenKind,
    position: usize,
}

fn syntax_error(position: usize, message: impl Into<String>) -> EvalError {
    EvalError::Syntax {
        position,
        message: message.into(),
    }
}

fn tokenize(expr: &str) -> Result<Vec<Token>, EvalError> {
    let bytes = expr.as_bytes();
    let mut tokens = Vec::new();
    let mut idx = 0;
    while idx < bytes.len() {
        let ch = bytes[idx];
        let sym = match ch {
            b' ' | b'\t' => {
                idx += 1;
                continue;
            }
            b'+' => Some(Sym::Plus),
            b'-' => Some(Sym::Minus),
            b'*' => Some(Sym::Star),
            b'/' => Some(Sym::Slash),
            b'(' => Some(Sym::LParen),
            b')' => Some(Sym::RParen),
            _ => None,
        };
        if let Some(sym) = sym {
            // `++` and `--` with nothing between them are increment/decrement,
            // which arithmetic has no meaning for.
            if matches!(sym, Sym::Plus | Sym::Minus) && bytes.get(idx + 1) == Some(&ch) {
                return Err(syntax_error(
                    idx,
                    format!("unexpected {}{}", ch as char, ch as char),
                ));
            }
            tokens.push(Token {
                kind: TokenKind::Sym(sym),
                position: idx,
            });
            idx += 1;
            continue;
        }
        if ch.is_ascii_digit() || ch == b'.' {
            let start = idx;
            while idx < bytes.len() && (bytes[idx].is_ascii_digit() || bytes[idx] == b'.') {
                idx += 1;
            }
            let text = &expr[start..idx];
            tokens.push(Token {
                kind: TokenKind::Number(parse_number(text, start)?),
                position: start,
            });
            continue;
        }
        return Err(syntax_error(idx, format!("unexpected character {:?}", ch as char)));
    }
    tokens.push(Token {
        kind: TokenKind::Eof,
        position: expr.len(),
    });
    Ok(tokens)
}

/// Accepts `12`, `12.`, `12.5`, `0.5`, and `.5`; rejects a lone `.`, a second
/// point, and leading zeros such as `05` or `00.5`.
fn parse_number(text: &str, position: usize) -> Result<f64, EvalError> {
    if text.matches('.').count() > 1 {
        return Err(syntax_error(position, format!("malformed number {text:?}")));
    }
    let bytes = text.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' && bytes[1].is_ascii_digit() {
        return Err(syntax_error(position, format!("leading zero in {text:?}")));
    }
    if !text.bytes().any(|b| b.is_ascii_digit()) {
        return Err(syntax_error(position, "expected digits"));
    }
    let padded;
    let literal = if text.ends_with('.') {
        padded = format!("{text}0");
        padded.as_str()
    } else {
        text
    };
    literal
        .parse::<f64>()
        .map_err(|_| syntax_error(position, format!("malformed number {text:?}")))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Token {
        // tokenize always ends with Eof, so the last token is a safe fallback.
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn bump(&mut self) -> Token {
        let t = self.peek();
        if !matches!(t.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        t
    }

    fn eat_sym(&mut self, sym: Sym) -> bool {
        matches!(self.peek().kind, TokenKind::Sym(s) if s == sym)
            .then(|| self.bump())
            .is_some()
    }

    fn expect_sym(&mut self, sym: Sym) -> Result<(), EvalError> {
        let t = self.bump();
        match t.kind {
            TokenKind::Sym(s) if s == sym => Ok(()),
            _ => Err(syntax_error(t.position, format!("expected {sym:?}"))),
        }
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(EvalError::TooDeep);
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn parse_expr(&mut self) -> Result<f64, EvalError> {
        self.parse_add()
    }

    fn parse_add(&mut self) -> Result<f64, EvalError> {
        let mut left = self.parse_mul()?;
        loop {
            if self.eat_sym(Sym::Plus) {
                left += self.parse_mul()?;
            } else if self.eat_sym(Sym::Minus) {
                left -= self.parse_mul()?;
            } else {
                break;
            }
        }
        Ok(left)
    }

    fn parse_mul(&mut self) -> Result<f64, EvalError> {
        let mut left = self.parse_unary()?;
        loop {
            if self.eat_sym(Sym::Star) {
                left *= self.parse_unary()?;
            } else if self.eat_sym(Sym::Slash) {
                left /= self.parse_unary()?;
            } else {
                break;
            }
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<f64, EvalError> {
        let sign = if self.eat_sym(Sym::Minus) {
            Some(-1.0)
        } else if self.eat_sym(Sym::Plus) {
            Some(1.0)
        } else {
            None
        };
        let Some(sign) = sign else {
            return self.parse_primary();
        };
        self.enter()?;
        let value = self.parse_unary();
        self.leave();
        Ok(sign * value?)
    }

    fn parse_primary(&mut self) -> Result<f64, EvalError> {
        let t = self.bump();
        match t.kind {
            TokenKind::Number(value) => Ok(value),
            TokenKind::Sym(Sym::LParen) => {
                self.enter()?;
                let inner = self.parse_expr();
                self.leave();
                let inner = inner?;
                self.expect_sym(Sym::RParen)?;
                Ok(inner)
            }
            TokenKind::Sym(sym) => Err(syntax_error(t.position, format!("unexpected {sym:?}"))),
            TokenKind::Eof => Err(syntax_error(t.position, "unexpected end of expression")),
        }
    }
}

/// Parse and evaluate an already validated expression.
pub fn parse_and_eval(expr: &str) -> Result<f64, EvalError> {
    let mut parser = Parser::new(tokenize(expr)?);
    let value = parser.parse_expr()?;
    let trailing = parser.peek();
    if !matches!(trailing.kind, TokenKind::Eof) {
        return Err(syntax_error(trailing.position, "unexpected trailing input"));
    }
    Ok(value)
}
