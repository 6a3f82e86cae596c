use criterion::*;
use qsim_core::gate::factory;
use qsim_core::circuit::Circuit;
use rand::SeedableRng;

/// Hadamard on every qubit (fully densifies the state), then a ladder
/// of CNOTs -- exercises the densification threshold in
/// `SparseState::apply_gate` at a size large enough to matter.
fn run_dense_circuit(q_num: usize) {
    let mut circuit = Circuit::new(q_num, 0).expect("q_num >= 1");
    for q in 0..q_num {
        circuit.add_gate(factory::hadamard(), vec![q]).unwrap();
    }
    for q in 0..q_num - 1 {
        circuit.add_gate(factory::cnot(), vec![q, q + 1]).unwrap();
    }
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let state = circuit.run(&mut rng).unwrap();
    assert_eq!(state.n(), q_num);
}

fn performance(c: &mut Criterion) {
    for qu_num in [12, 16, 18] {
        c.bench_function(format!("dense_circuit_qu{qu_num}").as_str(), |b| {
            b.iter(|| run_dense_circuit(black_box(qu_num)))
        });
    }
}

criterion_group!(benches, performance);
criterion_main!(benches);
