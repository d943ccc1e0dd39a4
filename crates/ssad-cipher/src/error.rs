//! Error types for cipher operations

use thiserror::Error;

use crate::key::Method;

/// Errors that can occur while validating keys or transforming text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Size outside the set accepted by the cipher
    #[error("Invalid {method} size: {actual} (must be {expected})")]
    InvalidSize {
        /// Cipher the size was given for
        method: Method,
        /// Accepted sizes, human readable
        expected: &'static str,
        /// Size that was supplied
        actual: i64,
    },

    /// Key rejected before any computation
    #[error("Invalid {method} key: {reason}")]
    InvalidKey {
        /// Cipher the key was given for
        method: Method,
        /// Why the key was rejected
        reason: String,
    },

    /// Hill key does not fill the key matrix
    #[error("Hill key must be {expected} letters for a {size}x{size} matrix, got {actual}")]
    HillKeyLength {
        /// Matrix dimension
        size: usize,
        /// Required number of letters (size²)
        expected: usize,
        /// Number of characters supplied
        actual: usize,
    },

    /// Required parameter absent from a request
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    /// Method name not recognised
    #[error("Unknown encryption method: '{0}' (expected caesar, playfair or hill)")]
    UnknownMethod(String),

    /// Key matrix has no inverse modulo 26
    #[error("Key matrix is not invertible mod 26 (determinant {determinant} shares a factor with 26)")]
    NotInvertible {
        /// Determinant reduced mod 26
        determinant: i64,
    },

    /// Matrix operations only cover 2x2 and 3x3
    #[error("Unsupported matrix size {0}x{0}: only 2x2 and 3x3 are supported")]
    UnsupportedMatrixSize(usize),

    /// Ciphertext does not split into whole blocks
    #[error("Ciphertext length {length} is not a multiple of the block size {block}")]
    IncompleteBlock {
        /// Length of the cleaned ciphertext
        length: usize,
        /// Block size of the cipher
        block: usize,
    },

    /// Character cannot be located in the Playfair key square
    #[error("Character '{0}' is not in the key square")]
    NotInKeySquare(char),
}

/// Broad classes of [`CipherError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Bad input; fix the key, size or text and retry
    Validation,
    /// Key is well formed but the operation is undefined for it
    Mathematical,
}

impl CipherError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotInvertible { .. } => ErrorKind::Mathematical,
            Self::InvalidSize { .. }
            | Self::InvalidKey { .. }
            | Self::HillKeyLength { .. }
            | Self::MissingParameter(_)
            | Self::UnknownMethod(_)
            | Self::UnsupportedMatrixSize(_)
            | Self::IncompleteBlock { .. }
            | Self::NotInKeySquare(_) => ErrorKind::Validation,
        }
    }

    /// Stable variant name, free of any request data.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidSize { .. } => "invalid_size",
            Self::InvalidKey { .. } => "invalid_key",
            Self::HillKeyLength { .. } => "hill_key_length",
            Self::MissingParameter(_) => "missing_parameter",
            Self::UnknownMethod(_) => "unknown_method",
            Self::NotInvertible { .. } => "not_invertible",
            Self::UnsupportedMatrixSize(_) => "unsupported_matrix_size",
            Self::IncompleteBlock { .. } => "incomplete_block",
            Self::NotInKeySquare(_) => "not_in_key_square",
        }
    }

    /// Shorthand for an [`CipherError::InvalidKey`].
    pub(crate) fn invalid_key(method: Method, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            method,
            reason: reason.into(),
        }
    }
}
