//! Ordered operation list with eager validation, classical conditions,
//! and the `run` entry point that drives a fresh [`SparseState`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::CircuitError;
use crate::gate::Gate;
use crate::math::N;
use crate::state::SparseState;

/// A classical condition gating an operation: the gate only fires if
/// measuring `qubit` yields `value`. Shared with [`crate::interop::circuit_json`],
/// which (de)serializes this directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub qubit: N,
    pub value: u8,
}

/// An ordered, validated sequence of gate applications over `n` qubits,
/// starting from basis state `initial`. Each entry is a [`Gate`] bound
/// to an ordered qubit list, optionally gated by a [`Condition`].
#[derive(Clone, Debug)]
pub struct Circuit {
    n: N,
    initial: N,
    ops: Vec<(Gate, Vec<N>, Option<Condition>)>,
    config: SimConfig,
}

impl Circuit {
    /// `n >= 1`, `initial` in `[0, 2^n)`.
    pub fn new(n: N, initial: N) -> Result<Self, CircuitError> {
        if n < 1 || initial >= (1usize << n) {
            return Err(CircuitError::InvalidCircuit { n, initial });
        }
        Ok(Self { n, initial, ops: Vec::new(), config: SimConfig::default() })
    }

    pub fn with_normalize_each_step(mut self, normalize_each_step: bool) -> Self {
        self.config.normalize_each_step = normalize_each_step;
        self
    }

    /// Replaces this circuit's [`SimConfig`] wholesale -- the `run()`
    /// path passed straight through to [`SparseState::with_config`], so
    /// `config.debug` governs whether the run's state emits `trace!`
    /// execution logging.
    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    pub fn n(&self) -> N {
        self.n
    }

    pub fn len(&self) -> N {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn validate_gate(&self, gate: &Gate, qubits: &[N]) -> Result<(), CircuitError> {
        let op_index = self.ops.len();
        if qubits.len() != gate.arity() as usize {
            return Err(CircuitError::ArityMismatch {
                op_index,
                expected: gate.arity() as N,
                found: qubits.len(),
            });
        }
        for &q in qubits {
            if q >= self.n {
                return Err(CircuitError::QubitOutOfRange { op_index, qubit: q, n: self.n });
            }
        }
        for (i, &a) in qubits.iter().enumerate() {
            if qubits[i + 1..].contains(&a) {
                return Err(CircuitError::DuplicateQubit { op_index, qubit: a });
            }
        }
        Ok(())
    }

    /// Appends an unconditional gate application. Validates arity,
    /// qubit range, and target distinctness eagerly.
    pub fn add_gate(&mut self, gate: Gate, qubits: Vec<N>) -> Result<(), CircuitError> {
        self.validate_gate(&gate, &qubits)?;
        self.ops.push((gate, qubits, None));
        Ok(())
    }

    /// Appends a gate gated by a classical condition on `condition.qubit`.
    pub fn add_conditional_gate(
        &mut self,
        gate: Gate,
        qubits: Vec<N>,
        condition: Condition,
    ) -> Result<(), CircuitError> {
        self.validate_gate(&gate, &qubits)?;
        let op_index = self.ops.len();
        if condition.qubit >= self.n {
            return Err(CircuitError::QubitOutOfRange {
                op_index,
                qubit: condition.qubit,
                n: self.n,
            });
        }
        if qubits.contains(&condition.qubit) {
            return Err(CircuitError::ConditionOverlapsTarget {
                op_index,
                qubit: condition.qubit,
            });
        }
        if condition.value > 1 {
            return Err(CircuitError::InvalidConditionValue {
                op_index,
                value: condition.value as N,
            });
        }
        self.ops.push((gate, qubits, Some(condition)));
        Ok(())
    }

    /// Creates a fresh [`SparseState`] at `(n, initial)` and applies
    /// every operation in insertion order. Conditional operations
    /// project-measure their condition qubit first, collapsing the
    /// state, then apply the gate iff the outcome matches. Any failure
    /// from the state aborts the run and is reported against the
    /// operation index that caused it.
    pub fn run(&self, rng: &mut impl Rng) -> Result<SparseState, CircuitError> {
        let mut state = SparseState::with_config(self.n, self.initial, self.config)
            .map_err(|source| CircuitError::Run { op_index: 0, source })?;
        for (op_index, (gate, qubits, condition)) in self.ops.iter().enumerate() {
            let fire = match condition {
                None => true,
                Some(cond) => {
                    let outcome = state
                        .measure(cond.qubit, rng)
                        .map_err(|source| CircuitError::Run { op_index, source })?;
                    outcome == cond.value
                }
            };
            if fire {
                state
                    .apply_gate(gate, qubits)
                    .map_err(|source| CircuitError::Run { op_index, source })?;
            }
        }
        Ok(state)
    }
}
