//! Sparse superposition storage and the gate-application / measurement
//! algorithms that act on it.
//!
//! The storage here is a `HashMap<N, C>` instead of a dense buffer, so
//! a freshly constructed state never pays for `2^n` amplitudes it
//! doesn't have. The *shape* of gate application -- build a new
//! amplitude map from the old one, never mutate in place mid-sweep --
//! matches a dense state-vector sweep; only the storage differs.

use std::collections::HashMap;

use log::trace;
use rand::Rng;

use crate::config::SimConfig;
use crate::error::StateError;
use crate::gate::Gate;
use crate::math::{approx_cmp::approx_cmp, C, C_ZERO, N, R};

/// Above this fraction of populated basis states, [`SparseState::apply_gate`]
/// walks `0..size` directly instead of the sparse key set -- see
/// SPEC_FULL.md's densification note. Chosen so a state that is already
/// close to fully dense doesn't pay hash-map overhead on every entry.
const DENSIFY_THRESHOLD: R = 0.25;

/// A sparse superposition over `2^n` computational basis states.
#[derive(Clone, Debug)]
pub struct SparseState {
    n: N,
    amps: HashMap<N, C>,
    normalize_each_step: bool,
    debug: bool,
}

impl SparseState {
    /// Places amplitude `1+0i` at `initial`. `initial` must be in
    /// `[0, 2^n)`. Equivalent to [`Self::with_config`] with
    /// `SimConfig { normalize_each_step, debug: false }`.
    pub fn new(n: N, initial: N, normalize_each_step: bool) -> Result<Self, StateError> {
        Self::with_config(n, initial, SimConfig { normalize_each_step, debug: false })
    }

    /// Places amplitude `1+0i` at `initial`, governed by `config`:
    /// `config.normalize_each_step` controls renormalization after every
    /// [`Self::apply_gate`], `config.debug` gates the `trace!` execution
    /// tracing emitted by [`Self::apply_gate`]/[`Self::measure`].
    pub fn with_config(n: N, initial: N, config: SimConfig) -> Result<Self, StateError> {
        let size = 1usize << n;
        if initial >= size {
            return Err(StateError::OutOfRange { index: initial, n });
        }
        let mut amps = HashMap::with_capacity(1);
        amps.insert(initial, crate::math::C_ONE);
        Ok(Self { n, amps, normalize_each_step: config.normalize_each_step, debug: config.debug })
    }

    pub fn n(&self) -> N {
        self.n
    }

    pub fn size(&self) -> N {
        1usize << self.n
    }

    /// Amplitude at `index`, `0` if absent from the sparse map.
    pub fn amplitude(&self, index: N) -> Result<C, StateError> {
        if index >= self.size() {
            return Err(StateError::OutOfRange { index, n: self.n });
        }
        Ok(self.amps.get(&index).copied().unwrap_or(C_ZERO))
    }

    /// Number of basis states currently holding a (possibly tiny)
    /// nonzero amplitude. Exposed mainly for tests and tracing.
    pub fn populated(&self) -> N {
        self.amps.len()
    }

    fn should_densify(&self) -> bool {
        self.amps.len() as R >= self.size() as R * DENSIFY_THRESHOLD
    }

    /// Applies `gate` to the ordered `qubits`, per the sparse
    /// gate-application algorithm: `qubits[j]` is bound to local bit
    /// position `j` of the gate's matrix.
    ///
    /// Caller contract: `qubits.len() == gate.arity()`, entries
    /// distinct and within `[0, n)` -- a [`crate::circuit::Circuit`]
    /// validates this eagerly at `Add*` time, so violations here are
    /// programmer defects rather than recoverable errors.
    pub fn apply_gate(&mut self, gate: &Gate, qubits: &[N]) -> Result<(), StateError> {
        debug_assert_eq!(qubits.len(), gate.arity() as usize);
        let k = qubits.len();
        let basis_size = 1usize << k;

        let mut new_amps: HashMap<N, C> = HashMap::with_capacity(self.amps.len().max(1));

        let mut sweep = |state_index: N, amp: C, new_amps: &mut HashMap<N, C>| {
            let mut basis_index = 0usize;
            for (j, &t) in qubits.iter().enumerate() {
                basis_index |= ((state_index >> t) & 1) << j;
            }
            for i in 0..basis_size {
                let element = gate.get(i, basis_index);
                if element == C_ZERO {
                    continue;
                }
                let mut new_state_index = state_index;
                for (j, &t) in qubits.iter().enumerate() {
                    let bit = (i >> j) & 1;
                    new_state_index = (new_state_index & !(1 << t)) | (bit << t);
                }
                *new_amps.entry(new_state_index).or_insert(C_ZERO) += amp * element;
            }
        };

        if self.should_densify() {
            for state_index in 0..self.size() {
                let amp = self.amps.get(&state_index).copied().unwrap_or(C_ZERO);
                if amp == C_ZERO {
                    continue;
                }
                sweep(state_index, amp, &mut new_amps);
            }
        } else {
            for (&state_index, &amp) in self.amps.iter() {
                sweep(state_index, amp, &mut new_amps);
            }
        }

        for amp in new_amps.values() {
            if !amp.re.is_finite() || !amp.im.is_finite() {
                return Err(StateError::NumericOverflow { qubit: qubits.first().copied() });
            }
        }

        if self.debug {
            trace!(
                "apply_gate {} on {:?}: {} -> {} populated",
                gate.name(),
                qubits,
                self.amps.len(),
                new_amps.len()
            );
        }

        self.amps = new_amps;
        if self.normalize_each_step {
            self.normalize()?;
        }
        Ok(())
    }

    /// Projective measurement of a single qubit: draws a uniform random
    /// outcome weighted by `p0`/`p1`, collapses, and renormalizes.
    pub fn measure(&mut self, qubit: N, rng: &mut impl Rng) -> Result<u8, StateError> {
        debug_assert!(qubit < self.n);
        let p0: R = self
            .amps
            .iter()
            .filter(|(&idx, _)| (idx >> qubit) & 1 == 0)
            .map(|(_, a)| a.norm_sqr())
            .sum();
        let u: R = rng.gen_range(0.0..1.0);
        let outcome: u8 = if u < p0 { 0 } else { 1 };

        self.amps.retain(|&idx, _| ((idx >> qubit) & 1) as u8 == outcome);
        self.normalize()?;
        if self.debug {
            trace!("measure qubit {qubit} -> {outcome} (p0={p0})");
        }
        Ok(outcome)
    }

    /// Sequentially measures qubits `0..n-1`, returning one outcome per
    /// qubit.
    pub fn measure_all(&mut self, rng: &mut impl Rng) -> Result<Vec<u8>, StateError> {
        (0..self.n).map(|q| self.measure(q, rng)).collect()
    }

    /// Divides every amplitude by `sqrt(sum |a|^2)`.
    pub fn normalize(&mut self) -> Result<(), StateError> {
        let total: R = self.amps.values().map(|a| a.norm_sqr()).sum();
        if total <= crate::math::EPS {
            return Err(StateError::DegenerateState);
        }
        if approx_cmp(total, 1.0) {
            return Ok(());
        }
        let norm = total.sqrt();
        for amp in self.amps.values_mut() {
            *amp /= norm;
        }
        Ok(())
    }
}
