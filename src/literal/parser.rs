use std::iter::Peekable;

use logos::Span;

use crate::{
    error::ParseError,
    host::{
        buffer::{BufferClass, BufferRef, ElementKind, ViewRef, classify},
        value::HostValue,
    },
    literal::lexer::{Spanned, Token, tokenize},
    util::num::f64_to_length,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Largest buffer a literal may allocate, in bytes.
pub const MAX_BYTE_LENGTH: usize = 1 << 30;

/// Parses a complete host value literal.
///
/// Grammar:
/// ```text
///     value := undefined | null | true | false
///            | ["-" | "+"] (number | NaN | Infinity | bigint)
///            | string
///            | Symbol "(" [string] ")"
///            | "{" [key ":" value ("," key ":" value)*] "}"
///            | function [name]
///            | detached value
///            | (ArrayBuffer | SharedArrayBuffer) "(" length ")"
///            | TypedArrayName "(" (length | buffer) ")"
///            | DataView "(" buffer ")"
/// ```
/// Object keys are limited to `valueOf` and `toString`.
///
/// # Parameters
/// - `source`: The literal text.
///
/// # Returns
/// A freshly allocated host value. Buffers, views, symbols and objects never
/// alias anything created by an earlier call.
///
/// # Errors
/// Returns a `ParseError` describing the first problem in `source`.
///
/// # Example
/// ```
/// use webidl_conversions::{host::value::HostValue, literal::parser::parse_literal};
///
/// assert_eq!(parse_literal("-0").unwrap().to_string(), "-0");
/// assert_eq!(parse_literal("detached Uint8Array(4)").unwrap().to_string(),
///            "detached Uint8Array(0)");
/// assert!(matches!(parse_literal("12n").unwrap(), HostValue::BigInt(_)));
/// assert!(parse_literal("1 2").is_err());
/// ```
pub fn parse_literal(source: &str) -> ParseResult<HostValue> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    let value = parse_value(&mut iter)?;

    if let Some((token, span)) = iter.next() {
        return Err(ParseError::TrailingInput { token:    token.to_string(),
                                               position: span.start, });
    }

    Ok(value)
}

/// Parses a single value.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the start of a value.
///
/// # Returns
/// The parsed host value.
pub fn parse_value<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<HostValue>
    where I: Iterator<Item = &'a Spanned>
{
    let (token, span) = next_token(tokens)?;

    match token {
        Token::Undefined => Ok(HostValue::Undefined),
        Token::Null => Ok(HostValue::Null),
        Token::Bool(b) => Ok(HostValue::Boolean(*b)),
        Token::Number(n) => Ok(HostValue::Number(*n)),
        Token::NaN => Ok(HostValue::Number(f64::NAN)),
        Token::Infinity => Ok(HostValue::Number(f64::INFINITY)),
        Token::BigInt(n) => Ok(HostValue::BigInt(n.clone())),
        Token::String(s) => Ok(HostValue::String(s.clone())),
        Token::Minus => parse_signed(tokens, true),
        Token::Plus => parse_signed(tokens, false),
        Token::Symbol => parse_symbol(tokens),
        Token::LBrace => parse_object(tokens),
        Token::Function => match tokens.peek().copied() {
            Some((Token::Identifier(name), _)) => {
                tokens.next();
                Ok(HostValue::function(name.as_str()))
            },
            _ => Ok(HostValue::function("")),
        },
        Token::Detached => parse_detached(tokens, span.start),
        Token::Identifier(name) => parse_constructor(tokens, name, span),
        _ => Err(unexpected(token, span)),
    }
}

/// Parses the operand of a unary sign.
///
/// `-0` yields negative zero and `-NaN` is still `NaN`.
fn parse_signed<'a, I>(tokens: &mut Peekable<I>, negative: bool) -> ParseResult<HostValue>
    where I: Iterator<Item = &'a Spanned>
{
    let (token, span) = next_token(tokens)?;
    let sign = if negative { -1.0 } else { 1.0 };

    match token {
        Token::Number(n) => Ok(HostValue::Number(sign * n)),
        Token::Infinity => Ok(HostValue::Number(sign * f64::INFINITY)),
        Token::NaN => Ok(HostValue::Number(f64::NAN)),
        Token::BigInt(n) if negative => Ok(HostValue::BigInt(-n.clone())),
        Token::BigInt(n) => Ok(HostValue::BigInt(n.clone())),
        _ => Err(unexpected(token, span)),
    }
}

/// Parses `Symbol(...)` after the `Symbol` keyword.
fn parse_symbol<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<HostValue>
    where I: Iterator<Item = &'a Spanned>
{
    expect(tokens, &Token::LParen)?;

    let description = match tokens.peek().copied() {
        Some((Token::String(s), _)) => {
            tokens.next();
            Some(s.to_string_lossy())
        },
        _ => None,
    };

    expect(tokens, &Token::RParen)?;
    Ok(HostValue::symbol(description.as_deref()))
}

/// Parses a plain object after the opening brace.
///
/// Repeated keys keep the last value.
fn parse_object<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<HostValue>
    where I: Iterator<Item = &'a Spanned>
{
    let mut value_of = None;
    let mut to_string = None;

    if let Some((Token::RBrace, _)) = tokens.peek() {
        tokens.next();
        return Ok(HostValue::object());
    }

    loop {
        let (key, key_span) = next_token(tokens)?;
        let slot = match key {
            Token::Identifier(name) if name == "valueOf" => &mut value_of,
            Token::Identifier(name) if name == "toString" => &mut to_string,
            _ => return Err(unexpected(key, key_span)),
        };

        expect(tokens, &Token::Colon)?;
        *slot = Some(parse_value(tokens)?);

        match next_token(tokens)? {
            (Token::Comma, _) => {},
            (Token::RBrace, _) => break,
            (token, span) => return Err(unexpected(token, span)),
        }
    }

    Ok(HostValue::object_with(value_of, to_string))
}

/// Parses `detached <value>` and detaches the value's buffer.
///
/// # Errors
/// `NotDetachable` unless the value is a non-shared `ArrayBuffer` or a view
/// over one.
fn parse_detached<'a, I>(tokens: &mut Peekable<I>, position: usize) -> ParseResult<HostValue>
    where I: Iterator<Item = &'a Spanned>
{
    let value = parse_value(tokens)?;

    let buffer = match classify(&value) {
        BufferClass::NonShared(buffer) => buffer.clone(),
        BufferClass::View(view) => view.buffer().clone(),
        _ => return Err(ParseError::NotDetachable { position }),
    };

    if buffer.detach().is_none() {
        return Err(ParseError::NotDetachable { position });
    }

    Ok(value)
}

/// Parses a constructor-style buffer or view literal after its name.
fn parse_constructor<'a, I>(tokens: &mut Peekable<I>,
                            name: &str,
                            span: &Span)
                            -> ParseResult<HostValue>
    where I: Iterator<Item = &'a Spanned>
{
    match name {
        "ArrayBuffer" => Ok(parse_buffer_args(tokens, false)?.into()),
        "SharedArrayBuffer" => Ok(parse_buffer_args(tokens, true)?.into()),
        "DataView" => {
            expect(tokens, &Token::LParen)?;
            let view = ViewRef::over(parse_buffer(tokens)?);
            expect(tokens, &Token::RParen)?;
            Ok(view.into())
        },
        _ => match ElementKind::from_name(name) {
            Some(kind) => parse_typed_array(tokens, kind),
            None => Err(ParseError::UnknownConstructor { name:     name.to_string(),
                                                         position: span.start, }),
        },
    }
}

/// Parses the argument of a typed array literal: a length or a buffer.
fn parse_typed_array<'a, I>(tokens: &mut Peekable<I>, kind: ElementKind) -> ParseResult<HostValue>
    where I: Iterator<Item = &'a Spanned>
{
    expect(tokens, &Token::LParen)?;

    let view = match tokens.peek().copied() {
        Some((Token::Identifier(_), span)) => {
            let position = span.start;
            let buffer = parse_buffer(tokens)?;
            let byte_length = buffer.byte_length();
            ViewRef::typed(kind, buffer).ok_or_else(|| ParseError::InvalidLength {
                                             value: byte_length.to_string(),
                                             position,
                                         })?
        },
        _ => ViewRef::typed_with_length(kind, parse_length(tokens, kind.element_size())?),
    };

    expect(tokens, &Token::RParen)?;
    Ok(view.into())
}

/// Parses a nested `ArrayBuffer(n)` or `SharedArrayBuffer(n)`.
fn parse_buffer<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<BufferRef>
    where I: Iterator<Item = &'a Spanned>
{
    let (token, span) = next_token(tokens)?;

    match token {
        Token::Identifier(name) if name == "ArrayBuffer" => parse_buffer_args(tokens, false),
        Token::Identifier(name) if name == "SharedArrayBuffer" => parse_buffer_args(tokens, true),
        _ => Err(unexpected(token, span)),
    }
}

/// Parses `(n)` and allocates a zero-filled buffer of `n` bytes.
fn parse_buffer_args<'a, I>(tokens: &mut Peekable<I>, shared: bool) -> ParseResult<BufferRef>
    where I: Iterator<Item = &'a Spanned>
{
    expect(tokens, &Token::LParen)?;
    let length = parse_length(tokens, 1)?;
    expect(tokens, &Token::RParen)?;

    Ok(if shared { BufferRef::new_shared(length) } else { BufferRef::new(length) })
}

/// Parses a non-negative integer count of `element_size`-byte elements.
///
/// # Errors
/// `InvalidLength` if the count is not an integer or the buffer it needs
/// would exceed [`MAX_BYTE_LENGTH`].
fn parse_length<'a, I>(tokens: &mut Peekable<I>, element_size: usize) -> ParseResult<usize>
    where I: Iterator<Item = &'a Spanned>
{
    let (token, span) = next_token(tokens)?;

    let Token::Number(n) = token else {
        return Err(unexpected(token, span));
    };

    f64_to_length(*n).filter(|length| {
                         length.checked_mul(element_size)
                               .is_some_and(|bytes| bytes <= MAX_BYTE_LENGTH)
                     })
                     .ok_or_else(|| ParseError::InvalidLength { value:    token.to_string(),
                                                                position: span.start, })
}

/// Consumes the next token, which must equal `expected`.
fn expect<'a, I>(tokens: &mut Peekable<I>, expected: &Token) -> ParseResult<()>
    where I: Iterator<Item = &'a Spanned>
{
    let (token, span) = next_token(tokens)?;
    if token == expected { Ok(()) } else { Err(unexpected(token, span)) }
}

fn next_token<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<&'a Spanned>
    where I: Iterator<Item = &'a Spanned>
{
    tokens.next().ok_or(ParseError::UnexpectedEnd)
}

fn unexpected(token: &Token, span: &Span) -> ParseError {
    ParseError::UnexpectedToken { token:    token.to_string(),
                                  position: span.start, }
}

