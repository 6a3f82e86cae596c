//! Immutable unitary matrices, built only through the named factories in
//! [`factory`].
//!
//! A [`Gate`] is lazy: it carries only its matrix and a display name,
//! never the qubits it will act on -- those are bound later when a
//! [`crate::circuit::Circuit`] adds it as an operation. A `Gate` is
//! cheap to `Clone` (the matrix lives behind an [`Arc`]) and may be
//! reused across any number of operations or circuits.

use std::fmt;
use std::sync::Arc;

use crate::math::{approx_cmp::approx_cmp, C, N};

pub mod factory;

/// An immutable `2^k x 2^k` unitary matrix, `k` its arity.
#[derive(Clone)]
pub struct Gate {
    arity: u32,
    matrix: Arc<[C]>,
    name: String,
}

impl Gate {
    /// Build a gate from a row-major `size x size` matrix, `size = 2^k`.
    ///
    /// This is `pub(crate)` -- external callers only ever obtain a
    /// `Gate` through [`factory`], which is what keeps the "factory
    /// outputs are exactly these matrices" contract enforceable.
    pub(crate) fn from_matrix(name: impl Into<String>, matrix: Vec<C>) -> Self {
        let size = matrix.len();
        let side = (size as f64).sqrt().round() as usize;
        debug_assert_eq!(side * side, size, "gate matrix must be square");
        debug_assert!(crate::math::is_pow2(side), "gate side must be a power of two");
        Self {
            arity: crate::math::log2_exact(side),
            matrix: Arc::from(matrix),
            name: name.into(),
        }
    }

    /// `2^k`, the dimension of the matrix.
    #[inline]
    pub fn size(&self) -> N {
        1usize << self.arity
    }

    /// `k`, the number of qubits this gate acts on.
    #[inline]
    pub fn arity(&self) -> u32 {
        self.arity
    }

    /// Matrix element at `(row, col)`, zero-indexed.
    #[inline]
    pub fn get(&self, row: N, col: N) -> C {
        self.matrix[row * self.size() + col]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Conjugate transpose. Used by the round-trip property tests
    /// (`ApplyGate(G) . ApplyGate(G†) == identity`) and available to
    /// callers who want to undo a gate application explicitly.
    pub fn adjoint(&self) -> Self {
        let size = self.size();
        let mut matrix = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                matrix.push(self.get(col, row).conj());
            }
        }
        Self {
            arity: self.arity,
            matrix: Arc::from(matrix),
            name: format!("{}†", self.name),
        }
    }

    /// `true` if `G . G† == I` within [`crate::math::EPS`] (scaled for
    /// matrix size, since the check sums `size` terms per entry).
    pub fn is_unitary(&self) -> bool {
        let size = self.size();
        let tol = crate::math::EPS.max(1e-8) * size as f64;
        for i in 0..size {
            for j in 0..size {
                let mut acc = crate::math::C_ZERO;
                for k in 0..size {
                    acc += self.get(i, k) * self.get(j, k).conj();
                }
                let expected = if i == j { crate::math::C_ONE } else { crate::math::C_ZERO };
                if !approx_cmp(acc.re, expected.re) && (acc.re - expected.re).abs() > tol {
                    return false;
                }
                if !approx_cmp(acc.im, expected.im) && (acc.im - expected.im).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate").field("name", &self.name).field("arity", &self.arity).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::factory::*;

    #[test]
    fn hadamard_is_unitary() {
        assert!(hadamard().is_unitary());
    }

    #[test]
    fn cnot_is_unitary() {
        assert!(cnot().is_unitary());
    }

    #[test]
    fn rx_is_unitary_for_arbitrary_angle() {
        assert!(rx(1.23456).is_unitary());
    }

    #[test]
    fn adjoint_of_adjoint_matches_original() {
        let g = rx(0.77);
        let gg = g.adjoint().adjoint();
        for row in 0..g.size() {
            for col in 0..g.size() {
                assert!((g.get(row, col) - gg.get(row, col)).norm() < 1e-12);
            }
        }
    }
}
