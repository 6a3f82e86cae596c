//! Amplitudes CSV export: `index,state,real,imag,phase,prob`, one row
//! per basis index ascending, `state` the n-bit binary label with bit
//! `q` reflecting qubit `q` (least-significant bit first).

use std::fmt;
use std::io::Write;

use crate::error::StateError;
use crate::state::SparseState;

/// `n`-character label with qubit `0` as the leftmost character (the
/// "little end"), qubit `n-1` rightmost.
fn state_label(index: usize, n: usize) -> String {
    (0..n).map(|q| if (index >> q) & 1 == 1 { '1' } else { '0' }).collect()
}

/// Failure writing the amplitudes export: either the state itself
/// couldn't answer an `amplitude` query, or the underlying writer (a
/// real file, socket, ...) hit a genuine IO error -- a full disk or
/// broken pipe is not a programmer defect and must be reported through
/// a `Result`, not a panic.
#[derive(Debug)]
pub enum ExportError {
    State(StateError),
    Csv(csv::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::State(source) => write!(f, "{source}"),
            ExportError::Csv(source) => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<StateError> for ExportError {
    fn from(source: StateError) -> Self {
        ExportError::State(source)
    }
}

impl From<csv::Error> for ExportError {
    fn from(source: csv::Error) -> Self {
        ExportError::Csv(source)
    }
}

/// Writes the CSV export of `state`'s amplitudes to `writer`. `writer`
/// may be a real `File` or socket, not just an in-memory buffer, so
/// every fallible step here propagates its error through [`ExportError`]
/// rather than `.expect()`-ing it away.
pub fn write<W: Write>(state: &SparseState, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["index", "state", "real", "imag", "phase", "prob"])?;

    for index in 0..state.size() {
        let amp = state.amplitude(index)?;
        csv_writer.write_record([
            index.to_string(),
            state_label(index, state.n()),
            amp.re.to_string(),
            amp.im.to_string(),
            amp.arg().to_string(),
            amp.norm_sqr().to_string(),
        ])?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Convenience wrapper returning the CSV export as a `String`. Backed
/// by an in-memory `Vec<u8>`, so the only way [`write`] can fail here
/// is a [`StateError`]; the final `from_utf8` is infallible because
/// every field this module writes is ASCII/numeric.
pub fn to_string(state: &SparseState) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write(state, &mut buf)?;
    Ok(String::from_utf8(buf).expect("csv writer only emits UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Circuit;
    use crate::gate::factory;
    use rand::SeedableRng;
    use std::io;

    #[test]
    fn exports_header_and_one_row_per_basis_index() {
        let mut c = Circuit::new(2, 0).unwrap();
        c.add_gate(factory::hadamard(), vec![0]).unwrap();
        c.add_gate(factory::cnot(), vec![0, 1]).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let state = c.run(&mut rng).unwrap();

        let csv = to_string(&state).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "index,state,real,imag,phase,prob");
        assert_eq!(lines.count(), 4);
    }

    #[test]
    fn state_label_is_little_endian_by_qubit() {
        assert_eq!(state_label(0b01, 2), "10");
        assert_eq!(state_label(0b10, 2), "01");
    }

    /// A writer that always fails, standing in for a full disk or a
    /// broken pipe.
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
        }
    }

    #[test]
    fn write_propagates_io_errors_instead_of_panicking() {
        let mut c = Circuit::new(1, 0).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let state = c.run(&mut rng).unwrap();

        let err = write(&state, FailingWriter);
        assert!(matches!(err, Err(ExportError::Csv(_))), "expected a propagated IO error, got {err:?}");
    }
}
