//! Codec errors

use std::io;
use thiserror::Error;

/// Result of decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result of encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Structural errors found while decoding bytecode.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unknown opcode: {0:#04x}")]
    UnknownOpcode(u8),

    #[error("Unbalanced block: `End` without a matching `Begin`")]
    UnexpectedEnd,

    #[error("Unbalanced block: {0} quotation(s) left open")]
    UnclosedBegin(usize),

    #[error("Truncated link: expected 32 hash bytes, got {0}")]
    TruncatedLink(usize),

    #[error("Truncated number: expected 8 bytes, got {0}")]
    TruncatedNum(usize),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors encoding a block.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Cannot encode unresolved name `{0}`")]
    UnresolvedVar(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
