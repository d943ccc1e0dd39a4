//! Step-by-step traces of cipher runs for animated rendering
//!
//! A [`Trace`] runs the same transformation as the codecs but records every
//! intermediate state as a [`Step`]: one per character for Caesar, one per
//! digraph for Playfair, one per block for Hill, preceded by key and
//! preparation steps where the cipher has them and closed by a final summary
//! step titled [`FINAL_TITLE`].
//!
//! The JSON shape of steps is shared with existing renderers, so field names
//! follow their convention (`char`, `new_char`, `pos1`, `new_block`, ...).
//!
//! Concatenating the output of every non-final step reproduces the codec's
//! output exactly:
//!
//! ```
//! use ssad_cipher::key::{CipherKey, Mode};
//! use ssad_cipher::trace;
//!
//! let key = CipherKey::playfair("MONARCHY", 5)?;
//! let trace = trace::trace(&key, "instruments", Mode::Encrypt)?;
//! assert_eq!(trace.replay(), "GATLMZCLRQXA");
//! assert_eq!(trace.final_text, "GATLMZCLRQXA");
//! # Ok::<(), ssad_cipher::CipherError>(())
//! ```

mod caesar;
mod hill;
mod playfair;

use serde::{Deserialize, Serialize};

use crate::codec::Codec;
use crate::error::CipherError;
use crate::key::{CipherKey, Method, Mode};
use crate::playfair::{Position, Rule};

/// Title of the closing step; renderers switch on it
pub const FINAL_TITLE: &str = "Final Result";

/// Alphabet strip shown with every Caesar step
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One recorded state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Short heading
    pub step_title: String,
    /// One-sentence explanation
    pub description: String,
    /// Direction of the traced run
    pub mode: Mode,
    /// Cipher-specific payload
    pub data: StepData,
}

impl Step {
    pub(crate) fn new(
        step_title: impl Into<String>,
        description: impl Into<String>,
        mode: Mode,
        data: impl Into<StepData>,
    ) -> Self {
        Self {
            step_title: step_title.into(),
            description: description.into(),
            mode,
            data: data.into(),
        }
    }

    /// Text this step produces, if any.
    ///
    /// Key and preparation steps produce nothing; the final step yields the
    /// whole result.
    pub fn output(&self) -> Option<String> {
        match &self.data {
            StepData::CaesarShift(d) => Some(d.new_char.to_string()),
            StepData::CaesarSkip(d) => Some(d.ch.to_string()),
            StepData::PlayfairDigraph(d) => Some(d.new_digraph.clone()),
            StepData::HillBlock(d) => Some(d.new_block.clone()),
            StepData::Final(d) => Some(d.final_text.clone()),
            StepData::KeySquare(_) | StepData::KeyMatrix(_) | StepData::Prepared(_) => None,
        }
    }

    /// Whether this is the closing summary step.
    pub const fn is_final(&self) -> bool {
        matches!(self.data, StepData::Final(_))
    }
}

/// Step payloads
///
/// Serialized without a tag, as a flat object. Variants that are a superset
/// of another come first so deserialization picks the richer one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepData {
    /// Caesar: a letter moved along the alphabet
    CaesarShift(CaesarShift),
    /// Playfair: a digraph substituted
    PlayfairDigraph(PlayfairDigraph),
    /// Hill: a block multiplied by the key matrix
    HillBlock(HillBlock),
    /// Closing summary
    Final(Final),
    /// Playfair: the generated key square
    KeySquare(KeySquareData),
    /// Hill: the key matrix, and its inverse when decrypting
    KeyMatrix(KeyMatrixData),
    /// Cleaned input
    Prepared(Prepared),
    /// Caesar: a character that is not a letter
    CaesarSkip(CaesarSkip),
}

/// A letter shifted by the Caesar cipher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaesarShift {
    /// Input character, case preserved
    #[serde(rename = "char")]
    pub ch: char,
    /// Alphabet index of the input
    pub idx: usize,
    /// Output character, same case as the input
    pub new_char: char,
    /// Alphabet index of the output
    pub new_idx: usize,
    /// Shift as given by the user
    pub shift: i64,
    /// Alphabet strip
    pub alphabet: String,
}

/// A character the Caesar cipher leaves alone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaesarSkip {
    /// The character, passed through unchanged
    #[serde(rename = "char")]
    pub ch: char,
    /// Alphabet strip
    pub alphabet: String,
}

/// A generated Playfair square
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySquareData {
    /// Cleaned keyword
    pub key: String,
    /// Square rows
    pub matrix: Vec<Vec<char>>,
    /// Side length
    pub size: usize,
}

/// A Hill key matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMatrixData {
    /// Uppercased key letters
    pub key: String,
    /// Encryption matrix rows
    pub matrix: Vec<Vec<i64>>,
    /// Decryption matrix rows, present when decrypting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse: Option<Vec<Vec<i64>>>,
}

/// Input after cleaning and padding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prepared {
    /// Text as given
    pub original: String,
    /// Text the cipher works on
    pub prepared: String,
    /// Playfair digraphs of the prepared text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digraphs: Option<Vec<String>>,
}

/// One Playfair substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayfairDigraph {
    /// Square rows
    pub matrix: Vec<Vec<char>>,
    /// Side length
    pub size: usize,
    /// Input digraph
    pub digraph: String,
    /// Position of the first input character
    pub pos1: Position,
    /// Position of the second input character
    pub pos2: Position,
    /// Rule that applied
    pub rule: Rule,
    /// Position of the first output character
    pub new_pos1: Position,
    /// Position of the second output character
    pub new_pos2: Position,
    /// Output digraph
    pub new_digraph: String,
}

/// One Hill block multiplication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HillBlock {
    /// Matrix the block was multiplied by
    pub matrix: Vec<Vec<i64>>,
    /// Input block
    pub block: String,
    /// Letter indices of the block
    pub vector: Vec<i64>,
    /// Human readable expansion of the product
    pub calculation_steps: Vec<String>,
    /// Product before reduction
    pub raw_vector: Vec<i64>,
    /// Product mod 26
    pub result_vector: Vec<i64>,
    /// Output block
    pub new_block: String,
}

/// Closing summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Final {
    /// Text as given
    pub original: String,
    /// Cleaned text, for ciphers that clean
    pub prepared: Option<String>,
    /// Result of the run
    #[serde(rename = "final")]
    pub final_text: String,
}

macro_rules! step_data_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(impl From<$ty> for StepData {
            fn from(data: $ty) -> Self {
                Self::$variant(data)
            }
        })*
    };
}

step_data_from!(
    CaesarShift(CaesarShift),
    CaesarSkip(CaesarSkip),
    KeySquare(KeySquareData),
    KeyMatrix(KeyMatrixData),
    Prepared(Prepared),
    PlayfairDigraph(PlayfairDigraph),
    HillBlock(HillBlock),
    Final(Final),
);

/// A traced run, as served to renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Cipher that ran
    pub algorithm: Method,
    /// Input text
    pub original_text: String,
    /// Output text
    pub final_text: String,
    /// Steps in order, final step last
    pub steps: Vec<Step>,
}

impl Trace {
    /// Close a run: compute the result from the unit steps and append the
    /// final step.
    pub(crate) fn finish(
        algorithm: Method,
        original_text: &str,
        prepared: Option<String>,
        mut steps: Vec<Step>,
        mode: Mode,
    ) -> Self {
        let final_text = replay(&steps);
        let description = match mode {
            Mode::Encrypt => "The encryption process is complete.",
            Mode::Decrypt => "The decryption process is complete.",
        };
        steps.push(Step::new(
            FINAL_TITLE,
            description,
            mode,
            Final {
                original: original_text.to_string(),
                prepared,
                final_text: final_text.clone(),
            },
        ));
        Self {
            algorithm,
            original_text: original_text.to_string(),
            final_text,
            steps,
        }
    }

    /// Concatenated output of every non-final step.
    pub fn replay(&self) -> String {
        replay(&self.steps)
    }

    /// The closing step.
    pub fn final_step(&self) -> Option<&Step> {
        self.steps.last().filter(|s| s.is_final())
    }
}

fn replay(steps: &[Step]) -> String {
    steps
        .iter()
        .filter(|s| !s.is_final())
        .filter_map(Step::output)
        .collect()
}

/// Trace `text` through the cipher for `key`.
pub fn trace(key: &CipherKey, text: &str, mode: Mode) -> Result<Trace, CipherError> {
    trace_with(&key.codec()?, text, mode)
}

/// Trace `text` through an already derived cipher.
pub fn trace_with(codec: &Codec, text: &str, mode: Mode) -> Result<Trace, CipherError> {
    match codec {
        Codec::Caesar(c) => Ok(caesar::trace(c.shift, text, mode)),
        Codec::Playfair(square) => playfair::trace(square, text, mode),
        Codec::Hill(matrix) => hill::trace(matrix, text, mode),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::codec::Cipher;
    use pretty_assertions::assert_eq;

    fn keys() -> Vec<CipherKey> {
        vec![
            CipherKey::caesar(7),
            CipherKey::playfair("MONARCHY", 5).unwrap(),
            CipherKey::playfair("Agent007", 6).unwrap(),
            CipherKey::hill("HILL", 2).unwrap(),
            CipherKey::hill("GYBNQKURP", 3).unwrap(),
        ]
    }

    #[test]
    fn test_replay_matches_codec_both_modes() {
        let text = "Meet me at the old mill, 9pm!";
        for key in keys() {
            let codec = key.codec().unwrap();
            let secret = codec.encrypt(text).unwrap();
            let enc = trace(&key, text, Mode::Encrypt).unwrap();
            assert_eq!(enc.replay(), secret, "{key:?}");
            assert_eq!(enc.final_text, secret);

            let dec = trace(&key, &secret, Mode::Decrypt).unwrap();
            assert_eq!(dec.replay(), codec.decrypt(&secret).unwrap(), "{key:?}");
        }
    }

    #[test]
    fn test_every_trace_ends_with_final_step() {
        for key in keys() {
            let t = trace(&key, "hello", Mode::Encrypt).unwrap();
            let last = t.final_step().expect("final step");
            assert_eq!(last.step_title, FINAL_TITLE);
            assert_eq!(last.output(), Some(t.final_text.clone()));
            assert_eq!(t.steps.iter().filter(|s| s.is_final()).count(), 1);
        }
    }

    #[test]
    fn test_step_json_field_names() {
        let t = trace(&CipherKey::caesar(1), "a!", Mode::Encrypt).unwrap();
        let json = serde_json::to_value(&t.steps).unwrap();
        assert_eq!(
            json[0],
            serde_json::json!({
                "step_title": "Processing 'a'",
                "description": "Letter 'a' (index 0) shifted by 1 becomes 'b' (index 1).",
                "mode": "encrypt",
                "data": {
                    "char": "a", "idx": 0, "new_char": "b", "new_idx": 1,
                    "shift": 1, "alphabet": ALPHABET
                }
            })
        );
        assert_eq!(json[1]["data"], serde_json::json!({"char": "!", "alphabet": ALPHABET}));
        assert_eq!(
            json[2]["data"],
            serde_json::json!({"original": "a!", "prepared": null, "final": "b!"})
        );
    }

    #[test]
    fn test_step_json_roundtrip_keeps_variants() {
        for key in keys() {
            let t = trace(&key, "attack at dawn", Mode::Encrypt).unwrap();
            let json = serde_json::to_string(&t).unwrap();
            let back: Trace = serde_json::from_str(&json).unwrap();
            assert_eq!(back, t);
        }
        let t = trace(&CipherKey::hill("HILL", 2).unwrap(), "DRPA", Mode::Decrypt).unwrap();
        let back: Trace = serde_json::from_str(&serde_json::to_string(&t).unwrap()).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_errors_match_codec() {
        let singular = CipherKey::hill("ABCD", 2).unwrap();
        assert_eq!(
            trace(&singular, "DRPA", Mode::Decrypt),
            Err(CipherError::NotInvertible { determinant: 24 })
        );
        assert!(trace(&singular, "HELP", Mode::Encrypt).is_ok());

        let playfair = CipherKey::playfair("MONARCHY", 5).unwrap();
        assert!(matches!(
            trace(&playfair, "ABC", Mode::Decrypt),
            Err(CipherError::IncompleteBlock { .. })
        ));
    }
}
