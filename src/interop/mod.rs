//! Host interchange formats: Circuit JSON in, Amplitudes CSV out.
//! Neither format is needed by the core simulation algorithms -- both
//! exist purely so a surrounding UI (out of scope here) has a stable
//! wire format to hand circuits in and read results back out.

pub mod amplitudes_csv;
pub mod circuit_json;
