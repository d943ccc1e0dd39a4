//! Hill linear block cipher mod 26
//!
//! The key letters fill a 2x2 or 3x3 matrix row by row (`A` = 0 .. `Z` = 25).
//! Each block of the prepared plaintext is read as a column vector and
//! multiplied by the key matrix; decryption multiplies by the inverse matrix
//! mod 26, which only exists when the determinant is coprime with 26.
//!
//! Any well-formed key encrypts. Invertibility is checked when decrypting.

use std::sync::OnceLock;

use crate::error::CipherError;
use crate::key::{self, HillSize, Mode};
use crate::matrix::{self, MODULUS, Matrix, modulo};
use crate::normalize;

/// One block pushed through a key matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockProduct {
    /// Letters of the input block
    pub block: Vec<char>,
    /// Letter indices of the input block
    pub vector: Vec<i64>,
    /// Matrix-vector product before reduction
    pub raw: Vec<i64>,
    /// Product reduced mod 26
    pub reduced: Vec<i64>,
    /// Letters of the output block
    pub output: Vec<char>,
}

/// Hill key matrix with its inverse computed on first use
#[derive(Debug, Clone)]
pub struct KeyMatrix {
    size: HillSize,
    key: String,
    matrix: Matrix,
    determinant: i64,
    inverse: OnceLock<Option<Matrix>>,
}

impl KeyMatrix {
    /// Validate `key` and build its matrix.
    pub fn new(key: &str, size: HillSize) -> Result<Self, CipherError> {
        key::validate_hill_key(key, size)?;
        let key = key.to_ascii_uppercase();
        let letters: Vec<i64> = key.bytes().map(|b| i64::from(b - b'A')).collect();
        let n = size.get();
        let matrix = Matrix::from_fn(n, |r, c| letters[r * n + c]);
        let determinant = matrix::determinant(&matrix)?;
        Ok(Self {
            size,
            key,
            matrix,
            determinant,
            inverse: OnceLock::new(),
        })
    }

    /// Matrix dimension.
    pub const fn size(&self) -> HillSize {
        self.size
    }

    /// Uppercased key letters.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Encryption matrix.
    pub const fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Determinant mod 26.
    pub const fn determinant(&self) -> i64 {
        self.determinant
    }

    /// Whether the matrix can decrypt.
    pub fn is_invertible(&self) -> bool {
        self.inverse().is_some()
    }

    /// Decryption matrix, or [`CipherError::NotInvertible`].
    pub fn decrypt_matrix(&self) -> Result<&Matrix, CipherError> {
        self.inverse().ok_or(CipherError::NotInvertible {
            determinant: self.determinant,
        })
    }

    /// Whether the inverse has been computed already.
    #[cfg(test)]
    pub(crate) fn inverse_is_computed(&self) -> bool {
        self.inverse.get().is_some()
    }

    fn inverse(&self) -> Option<&Matrix> {
        self.inverse
            .get_or_init(|| matrix::decrypt_matrix(&self.matrix).ok().flatten())
            .as_ref()
    }

    /// Matrix used for `mode`.
    pub fn matrix_for(&self, mode: Mode) -> Result<&Matrix, CipherError> {
        match mode {
            Mode::Encrypt => Ok(&self.matrix),
            Mode::Decrypt => self.decrypt_matrix(),
        }
    }

    /// Clean `text` and split it into blocks for `mode`.
    ///
    /// Plaintext is padded with the filler; ciphertext must already be a
    /// whole number of blocks.
    pub fn blocks(&self, text: &str, mode: Mode) -> Result<Vec<Vec<char>>, CipherError> {
        let n = self.size.get();
        let prepared: Vec<char> = match mode {
            Mode::Encrypt => normalize::hill_prepare(text, self.size).chars().collect(),
            Mode::Decrypt => {
                let cleaned: Vec<char> = normalize::hill_clean(text).chars().collect();
                if cleaned.len() % n != 0 {
                    return Err(CipherError::IncompleteBlock {
                        length: cleaned.len(),
                        block: n,
                    });
                }
                cleaned
            }
        };
        Ok(prepared.chunks(n).map(<[char]>::to_vec).collect())
    }

    /// Multiply one block by the matrix for `mode`.
    pub fn multiply_block(&self, block: &[char], mode: Mode) -> Result<BlockProduct, CipherError> {
        Ok(multiply(self.matrix_for(mode)?, block))
    }

    /// Encrypt `text`.
    pub fn encrypt(&self, text: &str) -> Result<String, CipherError> {
        self.transform(text, Mode::Encrypt)
    }

    /// Decrypt `text`; padding added during encryption stays in the output.
    pub fn decrypt(&self, text: &str) -> Result<String, CipherError> {
        self.transform(text, Mode::Decrypt)
    }

    fn transform(&self, text: &str, mode: Mode) -> Result<String, CipherError> {
        let matrix = self.matrix_for(mode)?;
        Ok(self
            .blocks(text, mode)?
            .iter()
            .flat_map(|block| multiply(matrix, block).output)
            .collect())
    }
}

fn multiply(matrix: &Matrix, block: &[char]) -> BlockProduct {
    let vector: Vec<i64> = block.iter().map(|&c| letter_index(c)).collect();
    let raw = matrix.mul_vector(&vector);
    let reduced: Vec<i64> = raw.iter().map(|&v| modulo(v, MODULUS)).collect();
    let output = reduced.iter().map(|&v| index_letter(v)).collect();
    BlockProduct {
        block: block.to_vec(),
        vector,
        raw,
        reduced,
        output,
    }
}

/// `A` = 0 .. `Z` = 25.
#[inline]
pub fn letter_index(ch: char) -> i64 {
    i64::from(ch as u8 - b'A')
}

/// Inverse of [`letter_index`] for values in `[0, 26)`.
#[inline]
pub fn index_letter(index: i64) -> char {
    char::from(b'A' + modulo(index, MODULUS) as u8)
}

/// Encrypt `text` with a matrix built from `key`.
pub fn encrypt(text: &str, key: &str, size: HillSize) -> Result<String, CipherError> {
    KeyMatrix::new(key, size)?.encrypt(text)
}

/// Decrypt `text` with a matrix built from `key`.
pub fn decrypt(text: &str, key: &str, size: HillSize) -> Result<String, CipherError> {
    KeyMatrix::new(key, size)?.decrypt(text)
}
