use thiserror::Error;

/// Errors raised while reading the host value literal notation.
///
/// Positions are byte offsets into the source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer or parser met a token it did not expect.
    #[error("Unexpected token '{token}' at offset {position}.")]
    UnexpectedToken {
        /// The offending source text.
        token:    String,
        /// Byte offset of the token.
        position: usize,
    },
    /// The input ended in the middle of a literal.
    #[error("Unexpected end of input.")]
    UnexpectedEnd,
    /// A buffer or view length was not a non-negative integer.
    #[error("Invalid length '{value}' at offset {position}.")]
    InvalidLength {
        /// The rejected length as written.
        value:    String,
        /// Byte offset of the length.
        position: usize,
    },
    /// The name in a constructor-style literal is not a known buffer or view.
    #[error("Unknown constructor '{name}' at offset {position}.")]
    UnknownConstructor {
        /// The unrecognized constructor name.
        name:     String,
        /// Byte offset of the name.
        position: usize,
    },
    /// `detached` was applied to something without a detachable buffer.
    #[error("Value at offset {position} cannot be detached.")]
    NotDetachable {
        /// Byte offset of the `detached` keyword.
        position: usize,
    },
    /// Additional tokens followed a complete literal.
    #[error("Trailing input '{token}' at offset {position}.")]
    TrailingInput {
        /// The first unconsumed token.
        token:    String,
        /// Byte offset of the token.
        position: usize,
    },
}
