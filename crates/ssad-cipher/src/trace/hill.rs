use super::{HillBlock, KeyMatrixData, Prepared, Step, Trace};
use crate::error::CipherError;
use crate::hill::{BlockProduct, KeyMatrix};
use crate::key::{Method, Mode};
use crate::matrix::Matrix;

fn expansion(matrix: &Matrix, product: &BlockProduct) -> Vec<String> {
    let rows: Vec<String> = (0..matrix.size())
        .map(|r| {
            let terms: Vec<String> = matrix
                .row(r)
                .iter()
                .zip(&product.vector)
                .map(|(k, v)| format!("{k}*{v}"))
                .collect();
            format!("Row {r}: ({}) = {}", terms.join(" + "), product.raw[r])
        })
        .collect();
    let block: String = product.output.iter().collect();
    vec![
        rows.join("\n"),
        format!("Result Vector (Raw): {:?}", product.raw),
        format!("Result Vector (mod 26): {:?}", product.reduced),
        format!("Output Block: '{block}'"),
    ]
}

pub(super) fn trace(km: &KeyMatrix, text: &str, mode: Mode) -> Result<Trace, CipherError> {
    let n = km.size().get();
    let matrix = km.matrix_for(mode)?;

    let (key_title, key_description, inverse) = match mode {
        Mode::Encrypt => (
            "Step 1: Generate the Key Matrix (K)",
            format!("Key '{}' becomes a {n}x{n} matrix (A=0 ... Z=25).", km.key()),
            None,
        ),
        Mode::Decrypt => (
            "Step 1: Generate the Key Matrix (K) and its Inverse",
            format!(
                "Key '{}' becomes a {n}x{n} matrix (A=0 ... Z=25). Its determinant {} is \
                 invertible mod 26, giving the decryption matrix K⁻¹.",
                km.key(),
                km.determinant()
            ),
            Some(matrix.to_rows()),
        ),
    };

    let blocks = km.blocks(text, mode)?;
    let prepared: String = blocks.iter().flatten().collect();
    let prepare_description = match mode {
        Mode::Encrypt => {
            format!("Text cleaned, uppercased and padded with 'X' to a multiple of {n}.")
        }
        Mode::Decrypt => format!("Ciphertext cleaned and uppercased into blocks of {n}."),
    };

    let mut steps = vec![
        Step::new(
            key_title,
            key_description,
            mode,
            KeyMatrixData {
                key: km.key().to_string(),
                matrix: km.matrix().to_rows(),
                inverse,
            },
        ),
        Step::new(
            "Step 2: Prepare the Text",
            prepare_description,
            mode,
            Prepared {
                original: text.to_string(),
                prepared: prepared.clone(),
                digraphs: None,
            },
        ),
    ];

    let (verb, equation) = match mode {
        Mode::Encrypt => ("Encrypt", "C = (K * P) mod 26"),
        Mode::Decrypt => ("Decrypt", "P = (K⁻¹ * C) mod 26"),
    };
    for (i, block) in blocks.iter().enumerate() {
        let product = km.multiply_block(block, mode)?;
        let block: String = product.block.iter().collect();
        steps.push(Step::new(
            format!("Step {}: {verb} Block '{block}'", i + 3),
            format!("Block '{block}' is multiplied by the key matrix: {equation}."),
            mode,
            HillBlock {
                matrix: matrix.to_rows(),
                calculation_steps: expansion(matrix, &product),
                block,
                new_block: product.output.iter().collect(),
                vector: product.vector,
                raw_vector: product.raw,
                result_vector: product.reduced,
            },
        ));
    }

    Ok(Trace::finish(Method::Hill, text, Some(prepared), steps, mode))
}
