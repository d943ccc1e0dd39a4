use super::{ALPHABET, CaesarShift, CaesarSkip, Step, Trace};
use crate::caesar::shift_char;
use crate::key::{Method, Mode};
use crate::matrix::{MODULUS, modulo};

fn alphabet_index(ch: char) -> usize {
    usize::from(ch.to_ascii_uppercase() as u8 - b'A')
}

pub(super) fn trace(shift: i64, text: &str, mode: Mode) -> Trace {
    let effective = match mode {
        Mode::Encrypt => shift,
        Mode::Decrypt => -modulo(shift, MODULUS),
    };
    let verb = match mode {
        Mode::Encrypt => "shifted by",
        Mode::Decrypt => "shifted back by",
    };

    let steps = text
        .chars()
        .map(|ch| match shift_char(ch, effective) {
            Some(new_char) => {
                let (idx, new_idx) = (alphabet_index(ch), alphabet_index(new_char));
                Step::new(
                    format!("Processing '{ch}'"),
                    format!(
                        "Letter '{ch}' (index {idx}) {verb} {shift} becomes '{new_char}' (index {new_idx})."
                    ),
                    mode,
                    CaesarShift {
                        ch,
                        idx,
                        new_char,
                        new_idx,
                        shift,
                        alphabet: ALPHABET.to_string(),
                    },
                )
            }
            None => Step::new(
                format!("Skipping '{ch}'"),
                format!("'{ch}' is not a letter of the alphabet and stays unchanged."),
                mode,
                CaesarSkip {
                    ch,
                    alphabet: ALPHABET.to_string(),
                },
            ),
        })
        .collect();

    Trace::finish(Method::Caesar, text, None, steps, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caesar;
    use crate::trace::StepData;

    #[test]
    fn test_one_step_per_character() {
        let t = trace(1, "ab", Mode::Encrypt);
        assert_eq!(t.steps.len(), 3);
        assert_eq!(t.steps.iter().filter(|s| !s.is_final()).count(), 2);
        assert_eq!(t.final_text, caesar::encrypt("ab", 1));
    }

    #[test]
    fn test_decrypt_steps_move_backwards() {
        let t = trace(3, "Khoor", Mode::Decrypt);
        assert_eq!(t.final_text, "Hello");
        let StepData::CaesarShift(first) = &t.steps[0].data else {
            unreachable!("letter step expected");
        };
        assert_eq!((first.idx, first.new_idx), (10, 7));
        assert_eq!(first.shift, 3);
        assert!(t.steps[0].description.contains("shifted back by 3"));
    }

    #[test]
    fn test_skips_keep_position() {
        let t = trace(13, "a-b", Mode::Encrypt);
        assert!(matches!(t.steps[1].data, StepData::CaesarSkip(_)));
        assert_eq!(t.replay(), "n-o");
    }
}
