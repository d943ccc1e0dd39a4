//! Uniform interface over the three ciphers

use std::sync::Arc;

use crate::caesar;
use crate::error::CipherError;
use crate::hill::KeyMatrix;
use crate::key::{CipherKey, Method, Mode};
use crate::playfair::KeySquare;

/// A keyed cipher ready to transform text
pub trait Cipher {
    /// Cipher family.
    fn method(&self) -> Method;

    /// Plaintext to ciphertext.
    fn encrypt(&self, text: &str) -> Result<String, CipherError>;

    /// Ciphertext to plaintext.
    fn decrypt(&self, text: &str) -> Result<String, CipherError>;

    /// Text as the cipher sees it before any substitution.
    fn normalize(&self, text: &str) -> String;

    /// Run in the given direction.
    fn apply(&self, text: &str, mode: Mode) -> Result<String, CipherError> {
        match mode {
            Mode::Encrypt => self.encrypt(text),
            Mode::Decrypt => self.decrypt(text),
        }
    }
}

/// Keyed Caesar cipher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Caesar {
    /// Shift as given; reduced mod 26 when applied
    pub shift: i64,
}

impl Cipher for Caesar {
    fn method(&self) -> Method {
        Method::Caesar
    }

    fn encrypt(&self, text: &str) -> Result<String, CipherError> {
        Ok(caesar::encrypt(text, self.shift))
    }

    fn decrypt(&self, text: &str) -> Result<String, CipherError> {
        Ok(caesar::decrypt(text, self.shift))
    }

    fn normalize(&self, text: &str) -> String {
        text.to_string()
    }
}

impl Cipher for KeySquare {
    fn method(&self) -> Method {
        Method::Playfair
    }

    fn encrypt(&self, text: &str) -> Result<String, CipherError> {
        Self::encrypt(self, text)
    }

    fn decrypt(&self, text: &str) -> Result<String, CipherError> {
        Self::decrypt(self, text)
    }

    fn normalize(&self, text: &str) -> String {
        self.prepare(text)
    }
}

impl Cipher for KeyMatrix {
    fn method(&self) -> Method {
        Method::Hill
    }

    fn encrypt(&self, text: &str) -> Result<String, CipherError> {
        Self::encrypt(self, text)
    }

    fn decrypt(&self, text: &str) -> Result<String, CipherError> {
        Self::decrypt(self, text)
    }

    fn normalize(&self, text: &str) -> String {
        crate::normalize::hill_clean(text)
    }
}

/// Any of the three keyed ciphers
#[derive(Debug, Clone)]
pub enum Codec {
    /// Caesar shift
    Caesar(Caesar),
    /// Playfair key square
    Playfair(Arc<KeySquare>),
    /// Hill key matrix
    Hill(Arc<KeyMatrix>),
}

impl Codec {
    fn inner(&self) -> &dyn Cipher {
        match self {
            Self::Caesar(c) => c,
            Self::Playfair(c) => c.as_ref(),
            Self::Hill(c) => c.as_ref(),
        }
    }
}

impl Cipher for Codec {
    fn method(&self) -> Method {
        self.inner().method()
    }

    fn encrypt(&self, text: &str) -> Result<String, CipherError> {
        self.inner().encrypt(text)
    }

    fn decrypt(&self, text: &str) -> Result<String, CipherError> {
        self.inner().decrypt(text)
    }

    fn normalize(&self, text: &str) -> String {
        self.inner().normalize(text)
    }
}

impl From<Caesar> for Codec {
    fn from(c: Caesar) -> Self {
        Self::Caesar(c)
    }
}

impl From<KeySquare> for Codec {
    fn from(c: KeySquare) -> Self {
        Self::Playfair(Arc::new(c))
    }
}

impl From<Arc<KeySquare>> for Codec {
    fn from(c: Arc<KeySquare>) -> Self {
        Self::Playfair(c)
    }
}

impl From<KeyMatrix> for Codec {
    fn from(c: KeyMatrix) -> Self {
        Self::Hill(Arc::new(c))
    }
}

impl From<Arc<KeyMatrix>> for Codec {
    fn from(c: Arc<KeyMatrix>) -> Self {
        Self::Hill(c)
    }
}

impl CipherKey {
    /// Derive the keyed cipher for this key.
    pub fn codec(&self) -> Result<Codec, CipherError> {
        Ok(match self {
            Self::Caesar { shift } => Caesar { shift: *shift }.into(),
            Self::Playfair { key, size } => KeySquare::new(key, *size)?.into(),
            Self::Hill { key, size } => KeyMatrix::new(key, *size)?.into(),
        })
    }
}
