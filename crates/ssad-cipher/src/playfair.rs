//! Playfair digraph cipher over a 5x5 or 6x6 key square
//!
//! The square is filled with the cleaned keyword (duplicates dropped) and then
//! with the rest of the alphabet: 25 letters without `J` for 5x5, 26 letters
//! and 10 digits for 6x6. Each digraph of the prepared text is replaced
//! according to where its two characters sit:
//!
//! - same row: each moves one column right (left to decrypt), wrapping
//! - same column: each moves one row down (up to decrypt), wrapping
//! - otherwise: each takes the other's column in its own row
//!
//! ```
//! use ssad_cipher::key::PlayfairSize;
//! use ssad_cipher::playfair::KeySquare;
//!
//! let square = KeySquare::new("MONARCHY", PlayfairSize::Five)?;
//! let secret = square.encrypt("balloon")?;
//! assert_eq!(square.decrypt(&secret)?, "BALXLOON");
//! # Ok::<(), ssad_cipher::CipherError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CipherError;
use crate::key::{self, Mode, PlayfairSize};
use crate::normalize::{self, Folding};

/// `[row, column]` of a cell
pub type Position = [usize; 2];

/// Which Playfair rule a digraph fell under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    /// Both characters share a row
    #[serde(rename = "Same Row")]
    SameRow,
    /// Both characters share a column
    #[serde(rename = "Same Column")]
    SameColumn,
    /// Opposite corners of a rectangle
    #[serde(rename = "Rectangle")]
    Rectangle,
}

impl Rule {
    /// Display name, also the wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SameRow => "Same Row",
            Self::SameColumn => "Same Column",
            Self::Rectangle => "Rectangle",
        }
    }
}

/// Everything that happened to one digraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Digraph that went in
    pub input: [char; 2],
    /// Rule that applied
    pub rule: Rule,
    /// Positions of the input characters
    pub from: [Position; 2],
    /// Positions of the output characters
    pub to: [Position; 2],
    /// Digraph that came out
    pub output: [char; 2],
}

/// Playfair key square
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySquare {
    size: PlayfairSize,
    key: String,
    cells: Vec<char>,
}

impl KeySquare {
    /// Validate `key` and build its square.
    pub fn new(key: &str, size: PlayfairSize) -> Result<Self, CipherError> {
        key::validate_playfair_key(key, size)?;
        Ok(Self::from_cleaned(normalize::playfair_clean(key, size), size))
    }

    /// Build a square from an already cleaned keyword.
    pub(crate) fn from_cleaned(key: String, size: PlayfairSize) -> Self {
        let mut cells: Vec<char> = Vec::with_capacity(size.get() * size.get());
        for c in key.chars().chain(alphabet(size)) {
            if !cells.contains(&c) {
                cells.push(c);
            }
        }
        Self { size, key, cells }
    }

    /// Square dimension.
    pub const fn size(&self) -> PlayfairSize {
        self.size
    }

    /// Cleaned keyword the square was built from.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Character at `[row, column]`.
    #[inline]
    pub fn get(&self, [r, c]: Position) -> char {
        self.cells[r * self.size.get() + c]
    }

    /// Where `ch` sits in the square.
    pub fn position(&self, ch: char) -> Option<Position> {
        let n = self.size.get();
        self.cells
            .iter()
            .position(|&cell| cell == ch)
            .map(|i| [i / n, i % n])
    }

    /// Grid rows, the shape renderers expect.
    pub fn rows(&self) -> Vec<Vec<char>> {
        self.cells
            .chunks(self.size.get())
            .map(<[char]>::to_vec)
            .collect()
    }

    /// Clean `text` for this square.
    pub fn prepare(&self, text: &str) -> String {
        normalize::playfair_clean(text, self.size)
    }

    /// Clean `text` for this square with a custom accent folding.
    pub fn prepare_with(&self, text: &str, folding: &dyn Folding) -> String {
        normalize::playfair_clean_with(text, self.size, folding)
    }

    /// Apply the Playfair rules to one digraph.
    pub fn substitute(&self, input: [char; 2], mode: Mode) -> Result<Substitution, CipherError> {
        let n = self.size.get();
        let locate = |ch: char| self.position(ch).ok_or(CipherError::NotInKeySquare(ch));
        let [r1, c1] = locate(input[0])?;
        let [r2, c2] = locate(input[1])?;

        // one step right/down to encrypt, one step left/up to decrypt
        let step = |i: usize| match mode {
            Mode::Encrypt => (i + 1) % n,
            Mode::Decrypt => (i + n - 1) % n,
        };

        let (rule, to) = if r1 == r2 {
            (Rule::SameRow, [[r1, step(c1)], [r2, step(c2)]])
        } else if c1 == c2 {
            (Rule::SameColumn, [[step(r1), c1], [step(r2), c2]])
        } else {
            (Rule::Rectangle, [[r1, c2], [r2, c1]])
        };

        Ok(Substitution {
            input,
            rule,
            from: [[r1, c1], [r2, c2]],
            to,
            output: [self.get(to[0]), self.get(to[1])],
        })
    }

    /// Digraphs a ciphertext splits into: cleaned, paired in order, no filler.
    pub fn ciphertext_pairs(&self, ciphertext: &str) -> Result<Vec<[char; 2]>, CipherError> {
        let cleaned: Vec<char> = self.prepare(ciphertext).chars().collect();
        if cleaned.len() % 2 != 0 {
            return Err(CipherError::IncompleteBlock {
                length: cleaned.len(),
                block: 2,
            });
        }
        Ok(cleaned.chunks_exact(2).map(|p| [p[0], p[1]]).collect())
    }

    /// Encrypt `text` with this square.
    pub fn encrypt(&self, text: &str) -> Result<String, CipherError> {
        self.transform(&normalize::digraphs(&self.prepare(text)), Mode::Encrypt)
    }

    /// Decrypt `text` with this square.
    ///
    /// Fillers inserted during encryption stay in the output.
    pub fn decrypt(&self, text: &str) -> Result<String, CipherError> {
        self.transform(&self.ciphertext_pairs(text)?, Mode::Decrypt)
    }

    fn transform(&self, pairs: &[[char; 2]], mode: Mode) -> Result<String, CipherError> {
        let mut out = String::with_capacity(pairs.len() * 2);
        for &pair in pairs {
            out.extend(self.substitute(pair, mode)?.output);
        }
        Ok(out)
    }
}

/// Characters a square of `size` holds, in fill order.
pub fn alphabet(size: PlayfairSize) -> impl Iterator<Item = char> {
    let letters =
        ('A'..='Z').filter(move |&c| size == PlayfairSize::Six || c != normalize::MERGED_LETTER);
    let digits = ('0'..='9').filter(move |_| size == PlayfairSize::Six);
    letters.chain(digits)
}

/// Encrypt `text` with a square built from `key`.
pub fn encrypt(text: &str, key: &str, size: PlayfairSize) -> Result<String, CipherError> {
    KeySquare::new(key, size)?.encrypt(text)
}

/// Decrypt `text` with a square built from `key`.
pub fn decrypt(text: &str, key: &str, size: PlayfairSize) -> Result<String, CipherError> {
    KeySquare::new(key, size)?.decrypt(text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn monarchy() -> KeySquare {
        KeySquare::new("MONARCHY", PlayfairSize::Five).expect("valid key")
    }

    #[test]
    fn test_square_layout_5x5() {
        let rows: Vec<String> = monarchy().rows().iter().map(|r| r.iter().collect()).collect();
        assert_eq!(rows, vec!["MONAR", "CHYBD", "EFGIK", "LPQST", "UVWXZ"]);
    }

    #[test]
    fn test_square_layout_6x6() {
        let square = KeySquare::new("Key 2024", PlayfairSize::Six).unwrap();
        assert_eq!(square.key(), "KEY2024");
        let rows: Vec<String> = square.rows().iter().map(|r| r.iter().collect()).collect();
        assert_eq!(rows, vec!["KEY204", "ABCDFG", "HIJLMN", "OPQRST", "UVWXZ1", "356789"]);
    }

    #[test]
    fn test_square_cells_are_a_bijection() {
        for size in [PlayfairSize::Five, PlayfairSize::Six] {
            let key = if size == PlayfairSize::Six { "ZEBRA9" } else { "ZEBRAS" };
            let square = KeySquare::new(key, size).unwrap();
            let mut cells: Vec<char> = square.rows().into_iter().flatten().collect();
            assert_eq!(cells.len(), size.get() * size.get());
            cells.sort_unstable();
            let mut expected: Vec<char> = alphabet(size).collect();
            expected.sort_unstable();
            assert_eq!(cells, expected);
        }
    }

    #[test]
    fn test_rules() {
        let square = monarchy();
        let row = square.substitute(['S', 'T'], Mode::Encrypt).unwrap();
        assert_eq!(row.rule, Rule::SameRow);
        assert_eq!(row.output, ['T', 'L']);
        assert_eq!(row.from, [[3, 3], [3, 4]]);
        assert_eq!(row.to, [[3, 4], [3, 0]]);

        let column = square.substitute(['M', 'E'], Mode::Encrypt).unwrap();
        assert_eq!(column.rule, Rule::SameColumn);
        assert_eq!(column.output, ['C', 'L']);

        let rectangle = square.substitute(['I', 'N'], Mode::Encrypt).unwrap();
        assert_eq!(rectangle.rule, Rule::Rectangle);
        assert_eq!(rectangle.output, ['G', 'A']);
    }

    #[test]
    fn test_decrypt_rules_mirror_encrypt() {
        let square = monarchy();
        for pair in [['S', 'T'], ['M', 'E'], ['I', 'N'], ['U', 'Z'], ['A', 'X']] {
            let there = square.substitute(pair, Mode::Encrypt).unwrap();
            let back = square.substitute(there.output, Mode::Decrypt).unwrap();
            assert_eq!(back.output, pair);
        }
    }

    #[test]
    fn test_instruments() {
        let secret = encrypt("instruments", "MONARCHY", PlayfairSize::Five).unwrap();
        assert_eq!(secret, "GATLMZCLRQXA");
        assert_eq!(
            decrypt(&secret, "MONARCHY", PlayfairSize::Five).unwrap(),
            "INSTRUMENTSX"
        );
    }

    #[test]
    fn test_filler_pair_encrypts_to_doubled_letters() {
        let square = KeySquare::new("MONARCHY", PlayfairSize::Five).unwrap();
        // a lone X is padded to XX, which sits in one row
        assert_eq!(square.encrypt("x").unwrap(), "ZZ");
        assert_eq!(square.decrypt("ZZ").unwrap(), "XX");

        assert_eq!(square.encrypt("taxxi").unwrap(), "SRZZAS");
        assert_eq!(square.decrypt("SRZZAS").unwrap(), "TAXXXI");
    }

    #[test]
    fn test_j_folds_to_i() {
        let square = KeySquare::new("ABC", PlayfairSize::Five).unwrap();
        assert_eq!(square.position('J'), None);
        let with_j = square.encrypt("HIJKL").unwrap();
        assert_eq!(with_j, square.encrypt("HIIKL").unwrap());
        assert_eq!(square.decrypt(&with_j).unwrap(), "HIIKLX");
    }

    #[test]
    fn test_six_by_six_keeps_digits() {
        let square = KeySquare::new("Agent007", PlayfairSize::Six).unwrap();
        let secret = square.encrypt("Meet at 9pm, Jay").unwrap();
        // the doubled E straddles a pair boundary, so no filler goes in
        assert_eq!(square.decrypt(&secret).unwrap(), "MEETAT9PMJAY");
    }

    #[test]
    fn test_decrypt_rejects_odd_ciphertext() {
        assert_eq!(
            monarchy().decrypt("GAT"),
            Err(CipherError::IncompleteBlock { length: 3, block: 2 })
        );
    }

    #[test]
    fn test_invalid_keys_rejected_before_work() {
        assert!(KeySquare::new("", PlayfairSize::Five).is_err());
        assert!(KeySquare::new("abc1", PlayfairSize::Five).is_err());
        assert!(KeySquare::new("abc", PlayfairSize::Six).is_err());
    }
}
