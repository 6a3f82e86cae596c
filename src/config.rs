//! Simulator-wide configuration, consumed by [`crate::circuit::Circuit::with_config`]
//! and [`crate::state::SparseState::with_config`]. `normalize_each_step` controls
//! whether a gate application renormalizes the state afterward; `debug`
//! gates the `trace!` execution tracing in [`crate::state`] and never
//! changes a run's numerical result.

/// `normalize_each_step` defaults to `true`, matching [`crate::state::SparseState`]'s
/// own default; `debug` defaults to `false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub normalize_each_step: bool,
    pub debug: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { normalize_each_step: true, debug: false }
    }
}
