//! Integer matrices and mod 26 number theory for the Hill cipher
//!
//! Only 2x2 and 3x3 matrices are supported by the determinant and adjugate
//! formulas; other sizes fail with [`CipherError::UnsupportedMatrixSize`].

use crate::error::CipherError;

/// Size of the Latin alphabet; all Hill arithmetic is mod this
pub const MODULUS: i64 = 26;

/// Mathematical modulo: the result is always in `[0, m)` for positive `m`.
#[inline]
pub fn modulo(n: i64, m: i64) -> i64 {
    n.rem_euclid(m)
}

/// Multiplicative inverse of `a` mod `m`, found by exhaustive search.
///
/// Returns `None` when `gcd(a, m) != 1`.
pub fn mod_inverse(a: i64, m: i64) -> Option<i64> {
    let a = modulo(a, m);
    (1..m).find(|x| modulo(a * x, m) == 1)
}

/// Square integer matrix, row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    size: usize,
    cells: Vec<i64>,
}

impl Matrix {
    /// Build a `size`x`size` matrix from a cell function.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> i64) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for r in 0..size {
            for c in 0..size {
                cells.push(f(r, c));
            }
        }
        Self { size, cells }
    }

    /// Build a matrix from rows; every row must be as long as there are rows.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, CipherError> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(CipherError::UnsupportedMatrixSize(size));
        }
        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Side length.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Cell at row `r`, column `c`.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> i64 {
        self.cells[r * self.size + c]
    }

    /// Row `r` as a slice.
    pub fn row(&self, r: usize) -> &[i64] {
        &self.cells[r * self.size..(r + 1) * self.size]
    }

    /// Rows as nested vectors, the shape renderers expect.
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.cells.chunks(self.size).map(<[i64]>::to_vec).collect()
    }

    /// Product with a column vector, without reduction.
    pub fn mul_vector(&self, vector: &[i64]) -> Vec<i64> {
        (0..self.size)
            .map(|r| self.row(r).iter().zip(vector).map(|(k, v)| k * v).sum())
            .collect()
    }

    fn map(&self, f: impl Fn(i64) -> i64) -> Self {
        Self {
            size: self.size,
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }
}

fn raw_determinant(m: &Matrix) -> Result<i64, CipherError> {
    match m.size() {
        2 => Ok(m.get(0, 0) * m.get(1, 1) - m.get(0, 1) * m.get(1, 0)),
        3 => Ok(m.get(0, 0) * (m.get(1, 1) * m.get(2, 2) - m.get(1, 2) * m.get(2, 1))
            - m.get(0, 1) * (m.get(1, 0) * m.get(2, 2) - m.get(1, 2) * m.get(2, 0))
            + m.get(0, 2) * (m.get(1, 0) * m.get(2, 1) - m.get(1, 1) * m.get(2, 0))),
        n => Err(CipherError::UnsupportedMatrixSize(n)),
    }
}

/// Determinant reduced mod 26.
///
/// Uses `ad - bc` for 2x2 and cofactor expansion along the first row for 3x3.
pub fn determinant(m: &Matrix) -> Result<i64, CipherError> {
    raw_determinant(m).map(|d| modulo(d, MODULUS))
}

/// Classical adjugate (transpose of the cofactor matrix), unreduced.
pub fn adjugate(m: &Matrix) -> Result<Matrix, CipherError> {
    match m.size() {
        2 => Ok(Matrix::from_fn(2, |r, c| match (r, c) {
            (0, 0) => m.get(1, 1),
            (0, 1) => -m.get(0, 1),
            (1, 0) => -m.get(1, 0),
            _ => m.get(0, 0),
        })),
        3 => Ok(Matrix::from_fn(3, |r, c| cofactor3(m, c, r))),
        n => Err(CipherError::UnsupportedMatrixSize(n)),
    }
}

/// Signed cofactor of cell (`row`, `col`) of a 3x3 matrix.
fn cofactor3(m: &Matrix, row: usize, col: usize) -> i64 {
    let rows: Vec<usize> = (0..3).filter(|&r| r != row).collect();
    let cols: Vec<usize> = (0..3).filter(|&c| c != col).collect();
    let minor = m.get(rows[0], cols[0]) * m.get(rows[1], cols[1])
        - m.get(rows[0], cols[1]) * m.get(rows[1], cols[0]);
    if (row + col) % 2 == 0 { minor } else { -minor }
}

/// Inverse of `m` mod 26: `adjugate(m) * det(m)⁻¹`, entrywise mod 26.
///
/// `Ok(None)` when the determinant has no inverse mod 26.
pub fn decrypt_matrix(m: &Matrix) -> Result<Option<Matrix>, CipherError> {
    let det = determinant(m)?;
    let Some(det_inv) = mod_inverse(det, MODULUS) else {
        return Ok(None);
    };
    let adj = adjugate(m)?;
    Ok(Some(adj.map(|a| modulo(a * det_inv, MODULUS))))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matrix(rows: &[&[i64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn mul_mod(a: &Matrix, b: &Matrix) -> Matrix {
        Matrix::from_fn(a.size(), |r, c| {
            modulo(
                (0..a.size()).map(|k| a.get(r, k) * b.get(k, c)).sum(),
                MODULUS,
            )
        })
    }

    fn identity(size: usize) -> Matrix {
        Matrix::from_fn(size, |r, c| i64::from(r == c))
    }

    #[test]
    fn test_modulo_is_never_negative() {
        assert_eq!(modulo(-11, 26), 15);
        assert_eq!(modulo(-26, 26), 0);
        assert_eq!(modulo(27, 26), 1);
        assert_eq!(modulo(-1, 26), 25);
    }

    #[test]
    fn test_mod_inverse() {
        assert_eq!(mod_inverse(15, 26), Some(7));
        assert_eq!(mod_inverse(25, 26), Some(25));
        assert_eq!(mod_inverse(-1, 26), Some(25));
        assert_eq!(mod_inverse(2, 26), None);
        assert_eq!(mod_inverse(13, 26), None);
        assert_eq!(mod_inverse(0, 26), None);
    }

    #[test]
    fn test_determinant_2x2() {
        // HILL
        assert_eq!(determinant(&matrix(&[&[7, 8], &[11, 11]])).unwrap(), 15);
    }

    #[test]
    fn test_determinant_3x3() {
        // GYBNQKURP: raw determinant 441
        let m = matrix(&[&[6, 24, 1], &[13, 16, 10], &[20, 17, 15]]);
        assert_eq!(determinant(&m).unwrap(), 25);
    }

    #[test]
    fn test_determinant_rejects_other_sizes() {
        let m = Matrix::from_fn(4, |r, c| (r + c) as i64);
        assert_eq!(
            determinant(&m),
            Err(CipherError::UnsupportedMatrixSize(4))
        );
        assert_eq!(adjugate(&m), Err(CipherError::UnsupportedMatrixSize(4)));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Matrix::from_rows(vec![vec![1, 2], vec![3]]).is_err());
    }

    #[test]
    fn test_adjugate_2x2() {
        let adj = adjugate(&matrix(&[&[7, 8], &[11, 11]])).unwrap();
        assert_eq!(adj.to_rows(), vec![vec![11, -8], vec![-11, 7]]);
    }

    #[test]
    fn test_adjugate_times_matrix_is_det_identity_3x3() {
        let m = matrix(&[&[2, 4, 5], &[9, 2, 1], &[3, 17, 7]]);
        let adj = adjugate(&m).unwrap();
        let det = raw_determinant(&m).unwrap();
        for r in 0..3 {
            for c in 0..3 {
                let cell: i64 = (0..3).map(|k| m.get(r, k) * adj.get(k, c)).sum();
                assert_eq!(cell, if r == c { det } else { 0 }, "cell ({r},{c})");
            }
        }
    }

    #[test]
    fn test_decrypt_matrix_2x2() {
        let m = matrix(&[&[7, 8], &[11, 11]]);
        let inv = decrypt_matrix(&m).unwrap().unwrap();
        assert_eq!(inv.to_rows(), vec![vec![25, 22], vec![1, 23]]);
        assert_eq!(mul_mod(&m, &inv), identity(2));
    }

    #[test]
    fn test_decrypt_matrix_3x3() {
        let m = matrix(&[&[6, 24, 1], &[13, 16, 10], &[20, 17, 15]]);
        let inv = decrypt_matrix(&m).unwrap().unwrap();
        assert_eq!(
            inv.to_rows(),
            vec![vec![8, 5, 10], vec![21, 8, 21], vec![21, 12, 8]]
        );
        assert_eq!(mul_mod(&inv, &m), identity(3));
    }

    #[test]
    fn test_decrypt_matrix_singular() {
        // det = -2
        assert_eq!(decrypt_matrix(&matrix(&[&[0, 1], &[2, 3]])).unwrap(), None);
        // det = 13
        assert_eq!(decrypt_matrix(&matrix(&[&[1, 0], &[0, 13]])).unwrap(), None);
    }

    #[test]
    fn test_mul_vector() {
        let m = matrix(&[&[6, 24, 1], &[13, 16, 10], &[20, 17, 15]]);
        // "ACT"
        assert_eq!(m.mul_vector(&[0, 2, 19]), vec![67, 222, 319]);
    }
}
