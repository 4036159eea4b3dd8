use std::fmt;

use logos::{Logos, Span};
use num_bigint::BigInt;

use crate::{
    error::ParseError,
    host::value::{HostString, number_literal, quote_units},
};

/// Represents a lexical token of the host value literal notation.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// BigInt literals, such as `42n`.
    #[regex(r"[0-9]+n", parse_bigint)]
    BigInt(BigInt),
    /// Number literals, such as `3`, `2.5`, `.5` or `1e21`.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Double-quoted strings, such as `"a\uD800b"`.
    #[regex(r#""([^"\\]|\\.)*""#, parse_string, allow_greedy = true)]
    String(HostString),
    /// Boolean literals.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `undefined`
    #[token("undefined")]
    Undefined,
    /// `null`
    #[token("null")]
    Null,
    /// `NaN`
    #[token("NaN")]
    NaN,
    /// `Infinity`
    #[token("Infinity")]
    Infinity,
    /// `Symbol`
    #[token("Symbol")]
    Symbol,
    /// `function`
    #[token("function")]
    Function,
    /// `detached`
    #[token("detached")]
    Detached,
    /// Constructor names, function names and object keys.
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `-`
    #[token("-")]
    Minus,
    /// `+`
    #[token("+")]
    Plus,
    /// Whitespace.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BigInt(n) => write!(f, "{n}n"),
            Self::Number(n) => write!(f, "{}", number_literal(*n)),
            Self::String(s) => write!(f, "{}", quote_units(s.units())),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::NaN => write!(f, "NaN"),
            Self::Infinity => write!(f, "Infinity"),
            Self::Symbol => write!(f, "Symbol"),
            Self::Function => write!(f, "function"),
            Self::Detached => write!(f, "detached"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::Comma => write!(f, ","),
            Self::Colon => write!(f, ":"),
            Self::Minus => write!(f, "-"),
            Self::Plus => write!(f, "+"),
            Self::Ignored => write!(f, " "),
        }
    }
}

/// A token together with its byte range in the source.
pub type Spanned = (Token, Span);

/// Splits `source` into tokens.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for text that forms no token,
/// including strings with invalid escapes.
///
/// # Example
/// ```
/// use webidl_conversions::literal::lexer::{Token, tokenize};
///
/// let tokens = tokenize("Uint8Array(4)").unwrap();
/// assert_eq!(tokens[0].0, Token::Identifier("Uint8Array".to_string()));
/// assert_eq!(tokens[2].0, Token::Number(4.0));
///
/// assert!(tokenize(r#""\q""#).is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push((tok, lexer.span())),
            Err(()) => {
                return Err(ParseError::UnexpectedToken { token:    lexer.slice().to_string(),
                                                         position: lexer.span().start, });
            },
        }
    }

    Ok(tokens)
}

/// Parses a number literal from the current token slice.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses a BigInt literal, dropping the `n` suffix.
fn parse_bigint(lex: &logos::Lexer<Token>) -> Option<BigInt> {
    lex.slice().trim_end_matches('n').parse().ok()
}

/// Decodes a quoted string into UTF-16 code units.
///
/// Supports `\n`, `\t`, `\r`, `\0`, `\"`, `\'`, `\\` and `\uXXXX`. The last
/// may produce unpaired surrogates.
fn parse_string(lex: &logos::Lexer<Token>) -> Option<HostString> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut units = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u16; 2];
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }
        let unit = match chars.next()? {
            'n' => 0x0A,
            't' => 0x09,
            'r' => 0x0D,
            '0' => 0x00,
            '"' => 0x22,
            '\'' => 0x27,
            '\\' => 0x5C,
            'u' => {
                let hex = chars.by_ref().take(4).collect::<String>();
                if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return None;
                }
                u16::from_str_radix(&hex, 16).ok()?
            },
            _ => return None,
        };
        units.push(unit);
    }

    Some(HostString::from_units(units))
}
