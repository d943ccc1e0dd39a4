use super::{KeySquareData, PlayfairDigraph, Prepared, Step, Trace};
use crate::error::CipherError;
use crate::key::{Method, Mode};
use crate::normalize;
use crate::playfair::KeySquare;

fn pair_string(pair: [char; 2]) -> String {
    pair.iter().collect()
}

pub(super) fn trace(square: &KeySquare, text: &str, mode: Mode) -> Result<Trace, CipherError> {
    let n = square.size().get();
    let matrix = square.rows();

    let (prepared, pairs, description) = match mode {
        Mode::Encrypt => {
            let prepared = square.prepare(text);
            let pairs = normalize::digraphs(&prepared);
            let description = if n == 5 {
                "Text cleaned and uppercased, 'J' becomes 'I', then split into digraphs. \
                 'X' separates doubled letters and pads an odd tail."
            } else {
                "Text cleaned and uppercased, letters and digits kept, then split into \
                 digraphs. 'X' separates doubled letters and pads an odd tail."
            };
            (prepared, pairs, description)
        }
        Mode::Decrypt => (
            square.prepare(text),
            square.ciphertext_pairs(text)?,
            "Ciphertext cleaned and uppercased, then split into pairs as received.",
        ),
    };

    let mut steps = vec![
        Step::new(
            format!("Step 1: Generate the {n}x{n} Key Square"),
            format!(
                "Key '{}' fills the square first, followed by the rest of the alphabet.",
                square.key()
            ),
            mode,
            KeySquareData {
                key: square.key().to_string(),
                matrix: matrix.clone(),
                size: n,
            },
        ),
        Step::new(
            "Step 2: Prepare the Text",
            description,
            mode,
            Prepared {
                original: text.to_string(),
                prepared: prepared.clone(),
                digraphs: Some(pairs.iter().copied().map(pair_string).collect()),
            },
        ),
    ];

    let verb = match mode {
        Mode::Encrypt => "Encrypt",
        Mode::Decrypt => "Decrypt",
    };
    for (i, &pair) in pairs.iter().enumerate() {
        let sub = square.substitute(pair, mode)?;
        let digraph = pair_string(sub.input);
        let new_digraph = pair_string(sub.output);
        let [[r1, c1], [r2, c2]] = sub.from;
        steps.push(Step::new(
            format!("Step {}: {verb} Digraph '{digraph}'", i + 3),
            format!(
                "'{}' at ({r1},{c1}) and '{}' at ({r2},{c2}). Applying the '{}' rule gives '{new_digraph}'.",
                sub.input[0],
                sub.input[1],
                sub.rule.as_str()
            ),
            mode,
            PlayfairDigraph {
                matrix: matrix.clone(),
                size: n,
                digraph,
                pos1: sub.from[0],
                pos2: sub.from[1],
                rule: sub.rule,
                new_pos1: sub.to[0],
                new_pos2: sub.to[1],
                new_digraph,
            },
        ));
    }

    Ok(Trace::finish(Method::Playfair, text, Some(prepared), steps, mode))
}
