//! Cipher keys and the parameter objects they travel in
//!
//! A [`CipherKey`] is the validated, per-method key material the codecs work
//! from. On the wire keys travel as loose [`KeyParams`] objects
//! (`{"key": .., "size": .., "shift": ..}`), either inside a chat negotiation
//! ([`ChatParams`]) or inside an HTTP request; [`KeyParams::resolve`] turns
//! them into a `CipherKey`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CipherError;
use crate::normalize;

/// Cipher families supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Shift substitution
    Caesar,
    /// Digraph substitution over a key square
    Playfair,
    /// Linear block cipher mod 26
    Hill,
}

impl Method {
    /// Lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Caesar => "caesar",
            Self::Playfair => "playfair",
            Self::Hill => "hill",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "caesar" => Ok(Self::Caesar),
            "playfair" => Ok(Self::Playfair),
            "hill" => Ok(Self::Hill),
            _ => Err(CipherError::UnknownMethod(s.to_string())),
        }
    }
}

/// Direction of a transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Plaintext to ciphertext
    #[default]
    Encrypt,
    /// Ciphertext to plaintext
    Decrypt,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
        })
    }
}

/// Playfair key square dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum PlayfairSize {
    /// 5x5 letters-only square, J merged into I
    Five,
    /// 6x6 square of letters and digits
    Six,
}

impl PlayfairSize {
    /// Side length of the square.
    pub const fn get(self) -> usize {
        match self {
            Self::Five => 5,
            Self::Six => 6,
        }
    }
}

impl TryFrom<i64> for PlayfairSize {
    type Error = CipherError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(Self::Five),
            6 => Ok(Self::Six),
            _ => Err(CipherError::InvalidSize {
                method: Method::Playfair,
                expected: "5 or 6",
                actual: value,
            }),
        }
    }
}

impl From<PlayfairSize> for i64 {
    fn from(size: PlayfairSize) -> Self {
        size.get() as Self
    }
}

impl fmt::Display for PlayfairSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.get())
    }
}

/// Hill key matrix dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum HillSize {
    /// 2x2 matrix, 4-letter key
    Two,
    /// 3x3 matrix, 9-letter key
    Three,
}

impl HillSize {
    /// Side length of the matrix, also the block length.
    pub const fn get(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl TryFrom<i64> for HillSize {
    type Error = CipherError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            _ => Err(CipherError::InvalidSize {
                method: Method::Hill,
                expected: "2 or 3",
                actual: value,
            }),
        }
    }
}

impl From<HillSize> for i64 {
    fn from(size: HillSize) -> Self {
        size.get() as Self
    }
}

impl fmt::Display for HillSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.get())
    }
}

/// Key material for one of the three ciphers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CipherKey {
    /// Caesar shift; any integer, taken mod 26
    Caesar {
        /// Number of positions to rotate right (negative rotates left)
        shift: i64,
    },
    /// Playfair keyword and square size
    Playfair {
        /// Keyword as typed by the user
        key: String,
        /// Square dimension
        size: PlayfairSize,
    },
    /// Hill key letters and matrix size
    Hill {
        /// size² letters, row-major
        key: String,
        /// Matrix dimension
        size: HillSize,
    },
}

impl CipherKey {
    /// Caesar key with the given shift.
    pub const fn caesar(shift: i64) -> Self {
        Self::Caesar { shift }
    }

    /// Validated Playfair key.
    pub fn playfair(key: impl Into<String>, size: i64) -> Result<Self, CipherError> {
        let key = Self::Playfair {
            key: key.into(),
            size: PlayfairSize::try_from(size)?,
        };
        key.validate()?;
        Ok(key)
    }

    /// Validated Hill key.
    pub fn hill(key: impl Into<String>, size: i64) -> Result<Self, CipherError> {
        let key = Self::Hill {
            key: key.into(),
            size: HillSize::try_from(size)?,
        };
        key.validate()?;
        Ok(key)
    }

    /// Cipher family of this key.
    pub const fn method(&self) -> Method {
        match self {
            Self::Caesar { .. } => Method::Caesar,
            Self::Playfair { .. } => Method::Playfair,
            Self::Hill { .. } => Method::Hill,
        }
    }

    /// Check the key format without deriving anything from it.
    ///
    /// Hill invertibility is not checked here; it only matters for decryption.
    pub fn validate(&self) -> Result<(), CipherError> {
        match self {
            Self::Caesar { .. } => Ok(()),
            Self::Playfair { key, size } => validate_playfair_key(key, *size),
            Self::Hill { key, size } => validate_hill_key(key, *size),
        }
    }
}

pub(crate) fn validate_playfair_key(key: &str, size: PlayfairSize) -> Result<(), CipherError> {
    if let Some(bad) = key
        .chars()
        .find(|c| !c.is_alphanumeric() && !c.is_whitespace())
    {
        return Err(CipherError::invalid_key(
            Method::Playfair,
            format!("'{bad}' is not a letter or digit"),
        ));
    }

    let has_digit = key.chars().any(|c| c.is_ascii_digit());
    match size {
        PlayfairSize::Five if has_digit => {
            return Err(CipherError::invalid_key(
                Method::Playfair,
                "a 5x5 key cannot contain digits",
            ));
        }
        PlayfairSize::Six if !has_digit => {
            return Err(CipherError::invalid_key(
                Method::Playfair,
                "a 6x6 key must contain at least one digit",
            ));
        }
        _ => {}
    }

    if normalize::playfair_clean(key, size).is_empty() {
        return Err(CipherError::invalid_key(
            Method::Playfair,
            "key must contain at least one usable letter",
        ));
    }
    Ok(())
}

pub(crate) fn validate_hill_key(key: &str, size: HillSize) -> Result<(), CipherError> {
    let n = size.get();
    let actual = key.chars().count();
    if actual != n * n {
        return Err(CipherError::HillKeyLength {
            size: n,
            expected: n * n,
            actual,
        });
    }
    if let Some(bad) = key.chars().find(|c| !c.is_ascii_alphabetic()) {
        return Err(CipherError::invalid_key(
            Method::Hill,
            format!("'{bad}' is not a letter A-Z"),
        ));
    }
    Ok(())
}

/// Loose `{key, shift, size}` object used by chat negotiation and requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyParams {
    /// Playfair keyword or Hill key letters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Caesar shift
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<i64>,
    /// Playfair (5|6) or Hill (2|3) size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

impl KeyParams {
    /// Guess the method from which parameters are present.
    ///
    /// A shift means Caesar; a key with size 2 or 3 means Hill; a key with
    /// size 5 or 6 means Playfair.
    pub fn infer_method(&self) -> Result<Method, CipherError> {
        if self.shift.is_some() {
            return Ok(Method::Caesar);
        }
        match (self.key.as_ref(), self.size) {
            (Some(_), Some(2 | 3)) => Ok(Method::Hill),
            (Some(_), Some(5 | 6)) => Ok(Method::Playfair),
            (None, _) => Err(CipherError::MissingParameter("key")),
            (Some(_), None) => Err(CipherError::MissingParameter("size")),
            (Some(_), Some(_)) => Err(CipherError::MissingParameter("method")),
        }
    }

    /// Build a validated key for `method`, inferring the method when absent.
    pub fn resolve(&self, method: Option<Method>) -> Result<CipherKey, CipherError> {
        let method = match method {
            Some(method) => method,
            None => self.infer_method()?,
        };

        match method {
            Method::Caesar => self
                .shift
                .map(CipherKey::caesar)
                .ok_or(CipherError::MissingParameter("shift")),
            Method::Playfair => {
                let (key, size) = self.key_and_size()?;
                CipherKey::playfair(key, size)
            }
            Method::Hill => {
                let (key, size) = self.key_and_size()?;
                CipherKey::hill(key, size)
            }
        }
    }

    fn key_and_size(&self) -> Result<(&str, i64), CipherError> {
        let key = self
            .key
            .as_deref()
            .ok_or(CipherError::MissingParameter("key"))?;
        let size = self.size.ok_or(CipherError::MissingParameter("size"))?;
        Ok((key, size))
    }
}

impl From<&CipherKey> for KeyParams {
    fn from(key: &CipherKey) -> Self {
        match key {
            CipherKey::Caesar { shift } => Self {
                shift: Some(*shift),
                ..Self::default()
            },
            CipherKey::Playfair { key, size } => Self {
                key: Some(key.clone()),
                size: Some((*size).into()),
                ..Self::default()
            },
            CipherKey::Hill { key, size } => Self {
                key: Some(key.clone()),
                size: Some((*size).into()),
                ..Self::default()
            },
        }
    }
}

/// Cipher negotiated for a chat
///
/// Serialized as `{"encryption_method": "hill", "encryption_params": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatParams {
    /// Cipher family
    pub encryption_method: Method,
    /// Negotiated parameters
    pub encryption_params: KeyParams,
}

impl ChatParams {
    /// Parameters announcing `key` in a chat request.
    pub fn new(key: &CipherKey) -> Self {
        Self {
            encryption_method: key.method(),
            encryption_params: KeyParams::from(key),
        }
    }

    /// Key exactly as negotiated.
    pub fn cipher_key(&self) -> Result<CipherKey, CipherError> {
        self.encryption_params.resolve(Some(self.encryption_method))
    }

    /// Key built from the secret a participant typed, with the negotiated size.
    ///
    /// For Caesar the secret is the shift as decimal text.
    pub fn key_with_secret(&self, secret: &str) -> Result<CipherKey, CipherError> {
        let secret = secret.trim();
        match self.encryption_method {
            Method::Caesar => secret.parse::<i64>().map(CipherKey::caesar).map_err(|_| {
                CipherError::invalid_key(Method::Caesar, "shift must be an integer")
            }),
            Method::Playfair | Method::Hill => {
                let params = KeyParams {
                    key: Some(secret.to_string()),
                    shift: None,
                    size: self.encryption_params.size,
                };
                params.resolve(Some(self.encryption_method))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_str() {
        assert_eq!("Playfair".parse::<Method>().unwrap(), Method::Playfair);
        assert_eq!(" hill ".parse::<Method>().unwrap(), Method::Hill);
        assert!(matches!(
            "vigenere".parse::<Method>(),
            Err(CipherError::UnknownMethod(_))
        ));
    }

    #[test]
    fn test_sizes() {
        assert_eq!(PlayfairSize::try_from(6).unwrap().get(), 6);
        assert_eq!(HillSize::try_from(2).unwrap(), HillSize::Two);
        assert!(matches!(
            PlayfairSize::try_from(4),
            Err(CipherError::InvalidSize { actual: 4, .. })
        ));
        assert!(HillSize::try_from(5).is_err());
    }

    #[test]
    fn test_playfair_key_rules() {
        assert!(CipherKey::playfair("MONARCHY", 5).is_ok());
        assert!(CipherKey::playfair("Crème brûlée", 5).is_ok());
        assert!(CipherKey::playfair("SECRET1", 6).is_ok());

        let err = CipherKey::playfair("SECRET1", 5).unwrap_err();
        assert!(err.to_string().contains("cannot contain digits"));
        let err = CipherKey::playfair("SECRET", 6).unwrap_err();
        assert!(err.to_string().contains("at least one digit"));
        assert!(CipherKey::playfair("", 5).is_err());
        assert!(CipherKey::playfair("KEY!", 5).is_err());
    }

    #[test]
    fn test_hill_key_rules() {
        assert!(CipherKey::hill("hill", 2).is_ok());
        assert!(CipherKey::hill("GYBNQKURP", 3).is_ok());
        assert!(matches!(
            CipherKey::hill("GYBNQ", 2),
            Err(CipherError::HillKeyLength {
                expected: 4,
                actual: 5,
                ..
            })
        ));
        assert!(matches!(
            CipherKey::hill("AB1D", 2),
            Err(CipherError::InvalidKey {
                method: Method::Hill,
                ..
            })
        ));
        // Singular keys are still valid keys
        assert!(CipherKey::hill("ABCD", 2).is_ok());
    }

    #[test]
    fn test_infer_method() {
        let params = KeyParams {
            shift: Some(3),
            ..KeyParams::default()
        };
        assert_eq!(params.infer_method().unwrap(), Method::Caesar);

        let params = KeyParams {
            key: Some("HILL".into()),
            size: Some(2),
            shift: None,
        };
        assert_eq!(params.infer_method().unwrap(), Method::Hill);

        let params = KeyParams {
            key: Some("MONARCHY".into()),
            size: Some(5),
            shift: None,
        };
        assert_eq!(params.infer_method().unwrap(), Method::Playfair);

        let params = KeyParams {
            key: Some("MONARCHY".into()),
            size: Some(4),
            shift: None,
        };
        assert_eq!(
            params.infer_method(),
            Err(CipherError::MissingParameter("method"))
        );
        assert_eq!(
            KeyParams::default().resolve(None),
            Err(CipherError::MissingParameter("key"))
        );
    }

    #[test]
    fn test_resolve_requires_parameters() {
        assert_eq!(
            KeyParams::default().resolve(Some(Method::Caesar)),
            Err(CipherError::MissingParameter("shift"))
        );
        let params = KeyParams {
            key: Some("HILL".into()),
            ..KeyParams::default()
        };
        assert_eq!(
            params.resolve(Some(Method::Hill)),
            Err(CipherError::MissingParameter("size"))
        );
    }

    #[test]
    fn test_chat_params_wire_format() {
        let json = r#"{"encryption_method":"playfair","encryption_params":{"key":"KEY7","size":6}}"#;
        let params: ChatParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.encryption_method, Method::Playfair);
        assert_eq!(
            params.cipher_key().unwrap(),
            CipherKey::Playfair {
                key: "KEY7".into(),
                size: PlayfairSize::Six
            }
        );

        let round = serde_json::to_string(&ChatParams::new(&CipherKey::caesar(-4))).unwrap();
        assert_eq!(
            round,
            r#"{"encryption_method":"caesar","encryption_params":{"shift":-4}}"#
        );
    }

    #[test]
    fn test_chat_key_with_secret() {
        let caesar = ChatParams::new(&CipherKey::caesar(5));
        assert_eq!(
            caesar.key_with_secret(" 7 ").unwrap(),
            CipherKey::caesar(7)
        );
        assert!(caesar.key_with_secret("seven").is_err());

        let hill = ChatParams::new(&CipherKey::hill("HILL", 2).unwrap());
        assert_eq!(
            hill.key_with_secret("GYBN").unwrap(),
            CipherKey::Hill {
                key: "GYBN".into(),
                size: HillSize::Two
            }
        );
        assert!(hill.key_with_secret("GYBNQKURP").is_err());
    }
}
