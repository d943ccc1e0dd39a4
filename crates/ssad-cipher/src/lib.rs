//! Classical cipher engine for teaching
//!
//! This crate implements the three textbook ciphers used by the SSAD chat
//! and visualizer: Caesar, Playfair (5x5 and 6x6 squares) and Hill (2x2 and
//! 3x3 matrices mod 26). Every cipher can also be run as a [`trace`], which
//! records each micro-operation for step-by-step animation.
//!
//! # Components
//!
//! - **Codecs**: [`caesar`], [`playfair`], [`hill`], unified by the [`Cipher`] trait
//! - **Keys**: [`CipherKey`] and the wire parameter objects in [`key`]
//! - **Math**: mod 26 matrices and inverses in [`matrix`]
//! - **Normalization**: per-cipher text cleaning in [`normalize`]
//! - **Caching**: [`KeyCache`] for derived key squares and key matrices
//!
//! All computation is pure and synchronous. Decrypting with a wrong but
//! valid key is not an error; it returns unreadable text.
//!
//! # Examples
//!
//! ## Encrypt and decrypt
//!
//! ```
//! let secret = ssad_cipher::hill_encrypt("help", "HILL", 2)?;
//! assert_eq!(secret, "DRPA");
//! assert_eq!(ssad_cipher::hill_decrypt(&secret, "HILL", 2)?, "HELP");
//! # Ok::<(), ssad_cipher::CipherError>(())
//! ```
//!
//! ## Chat parameters
//!
//! ```
//! use ssad_cipher::{Cipher, ChatParams};
//!
//! let chat: ChatParams = serde_json::from_str(
//!     r#"{"encryption_method": "playfair", "encryption_params": {"key": "MONARCHY", "size": 5}}"#,
//! ).expect("valid json");
//! let codec = chat.cipher_key()?.codec()?;
//! assert_eq!(codec.encrypt("instruments")?, "GATLMZCLRQXA");
//! # Ok::<(), ssad_cipher::CipherError>(())
//! ```
//!
//! ## Step traces
//!
//! ```
//! use ssad_cipher::{KeyParams, Method};
//!
//! let params = KeyParams { shift: Some(1), ..KeyParams::default() };
//! let steps = ssad_cipher::trace_encrypt(Method::Caesar, "ab", &params)?;
//! assert_eq!(steps.len(), 3);
//! assert_eq!(steps[2].output().as_deref(), Some("bc"));
//! # Ok::<(), ssad_cipher::CipherError>(())
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod caesar;
pub mod codec;
pub mod error;
pub mod hill;
pub mod key;
pub mod matrix;
pub mod normalize;
pub mod playfair;
pub mod trace;
pub mod weakness;

pub use error::{CipherError, ErrorKind};

// Re-export commonly used types
pub use cache::KeyCache;
pub use codec::{Cipher, Codec};
pub use hill::KeyMatrix;
pub use key::{ChatParams, CipherKey, HillSize, KeyParams, Method, Mode, PlayfairSize};
pub use playfair::KeySquare;
pub use trace::{Step, StepData, Trace};
pub use weakness::{Weakness, weakness};

/// Caesar-encrypt `text`.
pub fn caesar_encrypt(text: &str, shift: i64) -> String {
    caesar::encrypt(text, shift)
}

/// Caesar-decrypt `text`.
pub fn caesar_decrypt(text: &str, shift: i64) -> String {
    caesar::decrypt(text, shift)
}

/// Playfair-encrypt `text` with a `size`x`size` square (5 or 6).
pub fn playfair_encrypt(text: &str, key: &str, size: i64) -> Result<String, CipherError> {
    playfair::encrypt(text, key, PlayfairSize::try_from(size)?)
}

/// Playfair-decrypt `text` with a `size`x`size` square (5 or 6).
pub fn playfair_decrypt(text: &str, key: &str, size: i64) -> Result<String, CipherError> {
    playfair::decrypt(text, key, PlayfairSize::try_from(size)?)
}

/// Hill-encrypt `text` with a `size`x`size` key matrix (2 or 3).
pub fn hill_encrypt(text: &str, key: &str, size: i64) -> Result<String, CipherError> {
    hill::encrypt(text, key, HillSize::try_from(size)?)
}

/// Hill-decrypt `text`; fails when the key matrix is not invertible mod 26.
pub fn hill_decrypt(text: &str, key: &str, size: i64) -> Result<String, CipherError> {
    hill::decrypt(text, key, HillSize::try_from(size)?)
}

/// Steps of encrypting `text` with `method` and its parameters.
pub fn trace_encrypt(
    method: Method,
    text: &str,
    params: &KeyParams,
) -> Result<Vec<Step>, CipherError> {
    let key = params.resolve(Some(method))?;
    Ok(trace::trace(&key, text, Mode::Encrypt)?.steps)
}
