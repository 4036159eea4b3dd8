/// The lexer module tokenizes host value literals.
///
/// Produces a stream of tokens (numbers, BigInts, quoted strings with escape
/// sequences, keywords, identifiers and punctuation) with their byte spans.
///
/// # Responsibilities
/// - Converts the input text into tokens with source offsets.
/// - Decodes string escapes, including `\uXXXX` for lone surrogates.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds host values from tokens.
///
/// # Responsibilities
/// - Builds primitives, symbols, plain objects and functions.
/// - Allocates buffers and views, and detaches them on request.
/// - Reports unexpected, missing or trailing tokens with their offsets.
pub mod parser;
