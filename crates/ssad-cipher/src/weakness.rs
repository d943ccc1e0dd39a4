//! Teaching notes on how each cipher is broken

use serde::Serialize;

use crate::key::Method;

/// The main weakness of a cipher and what fixes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Weakness {
    /// Name of the attack
    pub flaw: &'static str,
    /// How the attack works
    pub description: &'static str,
    /// What a stronger design does instead
    pub solution: &'static str,
}

/// Weakness notes for `method`.
pub const fn weakness(method: Method) -> Weakness {
    match method {
        Method::Caesar => Weakness {
            flaw: "Brute-Force Attack",
            description: "There are only 25 useful keys (shifts 1-25). An attacker tries \
                every one and keeps the decryption that reads as language.",
            solution: "No parameter choice fixes a key space this small. Use a \
                polyalphabetic cipher such as Vigenere, or a modern cipher such as AES.",
        },
        Method::Playfair => Weakness {
            flaw: "Digraph Frequency Analysis",
            description: "Playfair substitutes pairs of letters with a fixed square, so the \
                frequency of each plaintext pair carries over to its ciphertext pair. Common \
                pairs like 'TH' show up as common ciphertext pairs and give the square away.",
            solution: "A static substitution cannot hide pair statistics. Modern ciphers \
                use large keys and many rounds of substitution and permutation.",
        },
        Method::Hill => Weakness {
            flaw: "Known-Plaintext Attack",
            description: "Encryption is a linear map mod 26. With a few known plaintext and \
                ciphertext blocks an attacker solves a linear system for the key matrix; a \
                2x2 key falls to 4 known letters.",
            solution: "Linearity is the flaw. Modern ciphers add non-linear S-boxes and \
                iterate substitution and permutation over many rounds.",
        },
    }
}
