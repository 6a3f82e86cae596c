//! Named gate factories. This is the *only* way to construct a [`Gate`]
//! from outside the crate -- callers rely on the bit/row convention
//! documented here: row/column indices of a `k`-qubit gate enumerate
//! local bit positions `(bit_{k-1}, .., bit_0)`, with `bit_0` bound to
//! the first qubit a [`crate::circuit::Circuit`] operation lists,
//! `bit_1` the second, and so on.

use std::f64::consts::FRAC_1_SQRT_2;

use super::Gate;
use crate::error::GateError;
use crate::math::{C, C_ONE, C_ZERO, N, R};

const I: C = C::new(0.0, 1.0);

/// Identity on one qubit. Not named in spec.md's factory list but handy
/// as a building block and for tests; acts as the arity-1 no-op.
pub fn identity() -> Gate {
    Gate::from_matrix("I", vec![C_ONE, C_ZERO, C_ZERO, C_ONE])
}

pub fn hadamard() -> Gate {
    let h = C::new(FRAC_1_SQRT_2, 0.0);
    Gate::from_matrix("H", vec![h, h, h, -h])
}

pub fn pauli_x() -> Gate {
    Gate::from_matrix("X", vec![C_ZERO, C_ONE, C_ONE, C_ZERO])
}

pub fn pauli_y() -> Gate {
    Gate::from_matrix("Y", vec![C_ZERO, -I, I, C_ZERO])
}

pub fn pauli_z() -> Gate {
    Gate::from_matrix("Z", vec![C_ONE, C_ZERO, C_ZERO, -C_ONE])
}

pub fn rx(theta: R) -> Gate {
    let (s, c) = (theta / 2.0).sin_cos();
    Gate::from_matrix(
        format!("RX({theta})"),
        vec![C::new(c, 0.0), C::new(0.0, -s), C::new(0.0, -s), C::new(c, 0.0)],
    )
}

pub fn ry(theta: R) -> Gate {
    let (s, c) = (theta / 2.0).sin_cos();
    Gate::from_matrix(
        format!("RY({theta})"),
        vec![C::new(c, 0.0), C::new(-s, 0.0), C::new(s, 0.0), C::new(c, 0.0)],
    )
}

pub fn rz(theta: R) -> Gate {
    let half = theta / 2.0;
    Gate::from_matrix(
        format!("RZ({theta})"),
        vec![C::from_polar(1.0, -half), C_ZERO, C_ZERO, C::from_polar(1.0, half)],
    )
}

/// `qubits = [control, target]`; flips `target` (local bit 1) iff
/// `control` (local bit 0) is `1`.
pub fn cnot() -> Gate {
    let mut m = vec![C_ZERO; 16];
    let set = |m: &mut Vec<C>, row: N, col: N| m[row * 4 + col] = C_ONE;
    set(&mut m, 0, 0);
    set(&mut m, 3, 1);
    set(&mut m, 2, 2);
    set(&mut m, 1, 3);
    Gate::from_matrix("CNOT", m)
}

/// `qubits = [a, b]`; exchanges the two qubits' states.
pub fn swap() -> Gate {
    let mut m = vec![C_ZERO; 16];
    let set = |m: &mut Vec<C>, row: N, col: N| m[row * 4 + col] = C_ONE;
    set(&mut m, 0, 0);
    set(&mut m, 2, 1);
    set(&mut m, 1, 2);
    set(&mut m, 3, 3);
    Gate::from_matrix("SWAP", m)
}

/// `qubits = [a, b]`; applies `e^{i*theta}` to the `|11>` amplitude only.
pub fn controlled_phase_shift(theta: R) -> Gate {
    let mut m = vec![C_ZERO; 16];
    for i in 0..3 {
        m[i * 4 + i] = C_ONE;
    }
    m[3 * 4 + 3] = C::from_polar(1.0, theta);
    Gate::from_matrix(format!("CPHASE({theta})"), m)
}

/// `qubits = [c0, c1, target]`; flips `target` (local bit 2) iff both
/// `c0` and `c1` (local bits 0 and 1) are `1`.
pub fn toffoli() -> Gate {
    let mut m = vec![C_ZERO; 64];
    for row in 0..8usize {
        let col = if row & 0b011 == 0b011 { row ^ 0b100 } else { row };
        m[col * 8 + row] = C_ONE;
    }
    Gate::from_matrix("TOFFOLI", m)
}

/// Diagonal unitary over a `width`-qubit subspace: `-1` at basis index
/// `mark`, `+1` elsewhere.
pub fn oracle(width: N, mark: N) -> Result<Gate, GateError> {
    if width < 1 {
        return Err(GateError::InvalidWidth { width });
    }
    let size = 1usize << width;
    if mark >= size {
        return Err(GateError::MarkOutOfRange { width, mark });
    }
    let mut m = vec![C_ZERO; size * size];
    for i in 0..size {
        m[i * size + i] = if i == mark { -C_ONE } else { C_ONE };
    }
    Ok(Gate::from_matrix(format!("ORACLE({width},{mark})"), m))
}

/// Grover diffusion operator over a `width`-qubit subspace:
/// `2/2^width * J - I`, `J` the all-ones matrix.
pub fn diffusion(width: N) -> Result<Gate, GateError> {
    if width < 1 {
        return Err(GateError::InvalidWidth { width });
    }
    let size = 1usize << width;
    let off = 2.0 / size as R;
    let mut m = vec![C::new(off, 0.0); size * size];
    for i in 0..size {
        m[i * size + i] = C::new(off - 1.0, 0.0);
    }
    Ok(Gate::from_matrix(format!("DIFFUSION({width})"), m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPS;

    #[test]
    fn oracle_rejects_bad_width_and_mark() {
        assert_eq!(oracle(0, 0), Err(GateError::InvalidWidth { width: 0 }));
        assert_eq!(oracle(2, 4), Err(GateError::MarkOutOfRange { width: 2, mark: 4 }));
        assert!(oracle(2, 3).is_ok());
    }

    #[test]
    fn diffusion_rejects_zero_width() {
        assert_eq!(diffusion(0), Err(GateError::InvalidWidth { width: 0 }));
    }

    #[test]
    fn diffusion_one_equals_pauli_x_up_to_global_phase() {
        let d = diffusion(1).unwrap();
        let x = pauli_x();
        // Diffusion(1) = 2/2*J - I = [[0,1],[1,0]] = X exactly (phase 1).
        for row in 0..2 {
            for col in 0..2 {
                assert!((d.get(row, col) - x.get(row, col)).norm() < EPS);
            }
        }
    }

    #[test]
    fn oracle_one_mark_one_equals_pauli_z() {
        let o = oracle(1, 1).unwrap();
        let z = pauli_z();
        for row in 0..2 {
            for col in 0..2 {
                assert!((o.get(row, col) - z.get(row, col)).norm() < EPS);
            }
        }
    }

    #[test]
    fn cnot_flips_target_only_when_control_set() {
        let g = cnot();
        // basis index bit0 = control, bit1 = target.
        // |control=1,target=0> (idx=1) -> |control=1,target=1> (idx=3)
        assert_eq!(g.get(3, 1), C_ONE);
        // |control=0,target=1> (idx=2) is left alone
        assert_eq!(g.get(2, 2), C_ONE);
    }

    #[test]
    fn toffoli_flips_target_only_when_both_controls_set() {
        let g = toffoli();
        assert_eq!(g.get(0b111, 0b011), C_ONE);
        assert_eq!(g.get(0b011, 0b111), C_ONE);
        assert_eq!(g.get(0b001, 0b001), C_ONE);
    }
}
