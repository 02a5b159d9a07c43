use num_traits::Float;
use std::fmt::Debug;

/// Float type a [`VectorField`] and its stepper agree on. The stepper only
/// needs `zero`, `+` and `*`, so plain `Float` covers it; the phase portrait
/// runs on `f64` while `f32` fields step through the same code.
pub trait Scalar: Float + Debug + Send + Sync + 'static {}

impl<T: Float + Debug + Send + Sync + 'static> Scalar for T {}

/// An autonomous or time-dependent vector field `x' = f(t, x)`.
pub trait VectorField<T: Scalar> {
    /// Number of state variables.
    fn dimension(&self) -> usize;

    /// Writes `f(t, x)` into `out`. `out` has the same length as `x`.
    fn apply(&self, t: T, x: &[T], out: &mut [T]);
}

/// A fixed-step integrator. Advances `state` and `t` in place by one step of
/// size `dt`.
pub trait Steppable<T: Scalar> {
    fn step(&mut self, field: &impl VectorField<T>, t: &mut T, state: &mut [T], dt: T);
}
