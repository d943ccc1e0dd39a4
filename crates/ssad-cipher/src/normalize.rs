//! Text normalization for the block ciphers
//!
//! Caesar works on raw text. Playfair and Hill first reduce their input to an
//! uppercase alphabet of their own:
//!
//! - Playfair lowercases, folds accented letters through a [`Folding`],
//!   keeps `[a-z0-9]` and uppercases. A 5x5 square then drops digits and maps
//!   `J` to `I`; a 6x6 square keeps letters and digits.
//! - Hill keeps `A-Z` only and pads to a whole number of blocks with
//!   [`FILLER`].
//!
//! The accent table of [`BaselineFolding`] is the one chat clients have always
//! used, so ciphertext stays interchangeable with them. Other tables can be
//! plugged in through the `*_with` variants.

use crate::key::{HillSize, PlayfairSize};

/// Character inserted to split doubled letters and to pad the last block
pub const FILLER: char = 'X';

/// Letter removed from the 5x5 Playfair alphabet
pub const MERGED_LETTER: char = 'J';

/// Letter that [`MERGED_LETTER`] is written as in a 5x5 square
pub const MERGED_INTO: char = 'I';

/// Maps a lowercase character to the base letter used for enciphering
///
/// Characters the folding does not know must be returned unchanged; anything
/// that is not `[a-z0-9]` afterwards is discarded by the caller.
pub trait Folding: Send + Sync {
    /// Fold one lowercase character.
    fn fold(&self, ch: char) -> char;
}

impl<F> Folding for F
where
    F: Fn(char) -> char + Send + Sync,
{
    fn fold(&self, ch: char) -> char {
        self(ch)
    }
}

/// The original French-oriented table: é è ê → e, à â → a, ç → c
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineFolding;

impl Folding for BaselineFolding {
    fn fold(&self, ch: char) -> char {
        match ch {
            'é' | 'è' | 'ê' => 'e',
            'à' | 'â' => 'a',
            'ç' => 'c',
            other => other,
        }
    }
}

/// Superset of [`BaselineFolding`] covering the common Latin-1 accents
#[derive(Debug, Clone, Copy, Default)]
pub struct LatinFolding;

impl Folding for LatinFolding {
    fn fold(&self, ch: char) -> char {
        match ch {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'ç' => 'c',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ñ' => 'n',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            'ý' | 'ÿ' => 'y',
            other => other,
        }
    }
}

/// Clean `text` for a Playfair square of `size` with the baseline folding.
pub fn playfair_clean(text: &str, size: PlayfairSize) -> String {
    playfair_clean_with(text, size, &BaselineFolding)
}

/// Clean `text` for a Playfair square of `size` with a custom folding.
pub fn playfair_clean_with(text: &str, size: PlayfairSize, folding: &dyn Folding) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| folding.fold(c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .map(|c| c.to_ascii_uppercase())
        .filter_map(|c| match size {
            PlayfairSize::Five if c.is_ascii_digit() => None,
            PlayfairSize::Five if c == MERGED_LETTER => Some(MERGED_INTO),
            _ => Some(c),
        })
        .collect()
}

/// Split cleaned Playfair text into digraphs.
///
/// Scans left to right: a doubled letter gets [`FILLER`] inserted after its
/// first occurrence and the scan advances by one; otherwise both characters
/// are consumed. A lone trailing character is padded with the filler.
pub fn digraphs(prepared: &str) -> Vec<[char; 2]> {
    let chars: Vec<char> = prepared.chars().collect();
    let mut pairs = Vec::with_capacity(chars.len().div_ceil(2) + 1);
    let mut i = 0;

    while i < chars.len() {
        let a = chars[i];
        match chars.get(i + 1) {
            Some(&b) if b != a => {
                pairs.push([a, b]);
                i += 2;
            }
            // doubled letter or lone tail
            _ => {
                pairs.push([a, FILLER]);
                i += 1;
            }
        }
    }

    pairs
}

/// Uppercase and keep only `A-Z`.
pub fn hill_clean(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Clean `text` and pad it to a multiple of the block size with [`FILLER`].
pub fn hill_prepare(text: &str, size: HillSize) -> String {
    let mut prepared = hill_clean(text);
    let block = size.get();
    let remainder = prepared.len() % block;
    if remainder != 0 {
        prepared.extend(std::iter::repeat_n(FILLER, block - remainder));
    }
    prepared
}
