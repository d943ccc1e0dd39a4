//! Caesar shift cipher
//!
//! Only ASCII letters move; case is preserved and every other character
//! (digits, punctuation, whitespace, non-ASCII) passes through unchanged, so
//! decryption is an exact inverse.
//!
//! ```
//! use ssad_cipher::caesar;
//!
//! let secret = caesar::encrypt("Hello, World!", 3);
//! assert_eq!(secret, "Khoor, Zruog!");
//! assert_eq!(caesar::decrypt(&secret, 3), "Hello, World!");
//! ```

use serde::{Deserialize, Serialize};

use crate::matrix::{MODULUS, modulo};

/// Number of distinct Caesar keys (shift 0 is the identity)
pub const KEY_SPACE: i64 = MODULUS;

/// Rotate one character by `shift`; `None` for non-letters.
pub fn shift_char(ch: char, shift: i64) -> Option<char> {
    let base = if ch.is_ascii_lowercase() {
        b'a'
    } else if ch.is_ascii_uppercase() {
        b'A'
    } else {
        return None;
    };
    let index = i64::from(ch as u8 - base);
    let rotated = modulo(index + modulo(shift, MODULUS), MODULUS) as u8;
    Some(char::from(base + rotated))
}

/// Encrypt by rotating letters `shift` places (mod 26).
pub fn encrypt(text: &str, shift: i64) -> String {
    text.chars()
        .map(|c| shift_char(c, shift).unwrap_or(c))
        .collect()
}

/// Decrypt by rotating letters back `shift` places.
pub fn decrypt(text: &str, shift: i64) -> String {
    encrypt(text, -modulo(shift, MODULUS))
}

/// One candidate from [`brute_force`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Shift that was tried
    pub shift_key_used: i64,
    /// Result of decrypting with it
    pub decrypted_text: String,
}

/// Try every non-trivial shift (1 to 25) on `ciphertext`.
pub fn brute_force(ciphertext: &str) -> Vec<Candidate> {
    (1..KEY_SPACE)
        .map(|shift| Candidate {
            shift_key_used: shift,
            decrypted_text: decrypt(ciphertext, shift),
        })
        .collect()
}
