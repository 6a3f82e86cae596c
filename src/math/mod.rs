//! Numeric foundations shared by every other module: the complex scalar
//! type, a handful of type aliases kept for readability at call sites,
//! and tolerance-aware comparison helpers used by the unitarity and
//! norm-conservation checks in [`crate::gate`] and [`crate::state`].

pub mod approx_cmp;

pub use num_complex::Complex64;

/// Basis-state index / qubit count. Aliased for readability since this
/// short name appears pervasively through signatures.
pub type N = usize;
/// Real-valued amplitude component, angle, or probability.
pub type R = f64;
/// Complex amplitude.
pub type C = Complex64;

pub const C_ZERO: C = C::new(0.0, 0.0);
pub const C_ONE: C = C::new(1.0, 0.0);
pub const C_I: C = C::new(0.0, 1.0);

/// Absolute tolerance used throughout for "is this amplitude/probability
/// close enough to some exact value" checks (spec's ε = 1e-10 .. 1e-8
/// family collapses to one constant here; call sites that need a looser
/// bound multiply it up rather than invent a second constant).
pub const EPS: R = 1e-10;

#[inline]
pub fn is_pow2(x: N) -> bool {
    x != 0 && x & (x - 1) == 0
}

/// `log2` of a known power of two. Panics (a programmer defect, per the
/// crate's error-handling policy) if `size` is not a power of two --
/// callers are required to have validated that already.
#[inline]
pub fn log2_exact(size: N) -> u32 {
    debug_assert!(is_pow2(size), "log2_exact called on non power-of-two {size}");
    size.trailing_zeros()
}
