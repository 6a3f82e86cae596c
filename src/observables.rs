//! Derived quantities computed from a finished [`SparseState`] run:
//! the probability vector, shot sampling, and per-qubit Bloch
//! parameters.
//!
//! Shot sampling uses `rand_distr::WeightedIndex` over the probability
//! vector, the same approach a `measure`/`measure_mask`-style API
//! reaches for; [`sample_histogram_fast`] is a Gaussian-smoothed
//! rounding shortcut kept as a named supplement for large shot counts
//! where per-shot independence is not required.

use rand::Rng;
use rand_distr::{Distribution, Normal, WeightedIndex};

use crate::math::{N, R};
use crate::state::SparseState;

/// `P[i] = |amps[i]|^2`, renormalized if the sum deviates from `1` by
/// more than a small tolerance (compensates for cumulative float error).
pub fn probabilities(state: &SparseState) -> Vec<R> {
    let size = state.size();
    let mut p = vec![0.0; size];
    for (i, slot) in p.iter_mut().enumerate() {
        *slot = state.amplitude(i).expect("index within size is always in range").norm_sqr();
    }
    let total: R = p.iter().sum();
    if total > 0.0 && (total - 1.0).abs() > 1e-6 {
        for slot in p.iter_mut() {
            *slot /= total;
        }
    }
    p
}

/// Draws `shots` independent outcomes, each the smallest index `i`
/// whose cumulative probability exceeds a fresh `u ~ Uniform[0,1)`.
pub fn sample_shots(state: &SparseState, shots: N, rng: &mut impl Rng) -> Vec<N> {
    let p = probabilities(state);
    // WeightedIndex handles the "all-zero remainder attributed to the
    // last index" edge case internally via its cumulative-weight search.
    let dist = match WeightedIndex::new(&p) {
        Ok(d) => d,
        Err(_) => return vec![p.len().saturating_sub(1); shots],
    };
    (0..shots).map(|_| dist.sample(rng)).collect()
}

/// Fast approximate shot histogram for large `shots`: instead of
/// drawing `shots` independent samples, estimates each outcome's count
/// as `round(p_i * shots)` perturbed by a small Gaussian jitter and
/// renormalized to sum to `shots`, avoiding a full per-shot sampling
/// loop. Exact per-shot independence is not guaranteed; use
/// [`sample_shots`] when that matters.
pub fn sample_histogram_fast(state: &SparseState, shots: N, rng: &mut impl Rng) -> Vec<N> {
    let p = probabilities(state);
    let shots_f = shots as R;
    let sigma = (shots_f * 0.01).max(0.5);
    let jitter = Normal::new(0.0, sigma).expect("sigma is always positive");

    let mut raw: Vec<R> = p.iter().map(|&pi| (pi * shots_f + jitter.sample(rng)).max(0.0)).collect();
    let raw_total: R = raw.iter().sum();
    if raw_total > 0.0 {
        for r in raw.iter_mut() {
            *r *= shots_f / raw_total;
        }
    }

    let mut counts: Vec<N> = raw.iter().map(|&r| r.round() as N).collect();
    let mut drift = shots as i64 - counts.iter().map(|&c| c as i64).sum::<i64>();
    let mut i = 0;
    while drift != 0 && !counts.is_empty() {
        let idx = i % counts.len();
        if drift > 0 {
            counts[idx] += 1;
            drift -= 1;
        } else if counts[idx] > 0 {
            counts[idx] -= 1;
            drift += 1;
        }
        i += 1;
    }
    counts
}

/// Per-qubit Bloch-sphere parameters derived from the reduced
/// single-qubit Pauli expectations of the full state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlochParams {
    pub theta: R,
    pub phi: R,
    pub r: R,
    pub e_z: R,
}

/// Computes [`BlochParams`] for `qubit` from the full state's
/// amplitudes: `e_z` from the diagonal population difference, `e_x +
/// i*e_y` from twice the off-diagonal coherence between basis states
/// that differ only in `qubit`.
pub fn bloch(state: &SparseState, qubit: N) -> BlochParams {
    let size = state.size();
    let mut e_z = 0.0;
    let mut e_x = 0.0;
    let mut e_y = 0.0;

    for i in 0..size {
        let amp_i = state.amplitude(i).expect("index within size is always in range");
        if amp_i == crate::math::C_ZERO {
            continue;
        }
        let sign = if (i >> qubit) & 1 == 0 { 1.0 } else { -1.0 };
        e_z += amp_i.norm_sqr() * sign;

        if (i >> qubit) & 1 == 0 {
            let partner = i ^ (1 << qubit);
            let amp_partner = state.amplitude(partner).expect("partner index is always in range");
            let coherence = 2.0 * amp_i.conj() * amp_partner;
            e_x += coherence.re;
            e_y += coherence.im;
        }
    }

    let r = (e_x * e_x + e_y * e_y + e_z * e_z).sqrt().clamp(0.0, 1.0);
    let (theta, phi) = if r > 0.0 { ((e_z / r).clamp(-1.0, 1.0).acos(), e_y.atan2(e_x)) } else { (0.0, 0.0) };

    BlochParams { theta, phi, r, e_z }
}
