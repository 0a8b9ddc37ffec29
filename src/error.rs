// Error types for decoding, puzzle handling and the surrounding glue

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while segmenting a byte stream into instructions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Truncated operand at {pc:#04x}: expected {expected} immediate bytes, found {available}")]
    TruncatedOperand {
        pc: usize,
        expected: usize,
        available: usize,
    },

    #[error("Instruction address {pc} out of bounds (code is {len} bytes)")]
    OutOfBounds { pc: usize, len: usize },
}

/// Player input did not name three allowed operators.
///
/// There is deliberately only one failure value: the player is simply asked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationFailure;

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid solution")
    }
}

impl std::error::Error for ValidationFailure {}

/// Template and substitution errors. These indicate a broken corpus and are never masked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Template does not decode: {0}")]
    Decode(#[from] DecodeError),

    #[error("Template has {placeholders} placeholders but the solution has {operators} operators")]
    PlaceholderCountMismatch {
        placeholders: usize,
        operators: usize,
    },

    #[error("Template must contain exactly {expected} placeholders, found {found}")]
    WrongPlaceholderCount { expected: usize, found: usize },

    #[error("Placeholder byte inside the immediate operand of the instruction at {pc:#04x}")]
    PlaceholderInImmediate { pc: usize },

    #[error("Malformed hex at character {position}: {reason}")]
    MalformedHex { position: usize, reason: String },

    #[error("Attempt is not ready to proceed: {0}")]
    AttemptNotReady(&'static str),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Cannot read puzzle corpus '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Invalid puzzle corpus: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Puzzle corpus is empty")]
    Empty,

    #[error("Puzzle {index} is malformed: {source}")]
    Template { index: usize, source: PuzzleError },
}

/// Failures reaching the external runner. Callers treat every one of them as a rejection.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Failed to launch '{program}': {source}")]
    Launch { program: String, source: io::Error },

    #[error("Runner reported an error: {0}")]
    Runner(String),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("No puzzle at corpus index {0}")]
    NoSuchPuzzle(usize),
}
