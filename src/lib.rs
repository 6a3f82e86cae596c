#![warn(clippy::cargo)]
#![allow(clippy::comparison_chain)]
#![doc = include_str!("../README.md")]

pub mod circuit;
pub mod config;
pub mod error;
pub mod gate;
pub mod interop;
pub mod math;
pub mod observables;
pub mod state;

#[doc(hidden)]
pub mod prelude {
    pub use crate::{
        circuit::{Circuit, Condition},
        config::SimConfig,
        error::{CircuitError, GateError, StateError},
        gate,
        gate::Gate,
        observables,
        state::SparseState,
    };
}
