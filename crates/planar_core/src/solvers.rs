use crate::traits::{Scalar, Steppable, VectorField};

/// Explicit (forward) Euler stepper: `x_{n+1} = x_n + f(t_n, x_n) * dt`.
///
/// First order and unconditionally explicit, so unstable or stiff fields
/// blow up quickly; the phase portrait only needs the qualitative picture.
pub struct ForwardEuler<T: Scalar> {
    derivative: Vec<T>,
}

impl<T: Scalar> ForwardEuler<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            derivative: vec![T::zero(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for ForwardEuler<T> {
    fn step(&mut self, field: &impl VectorField<T>, t: &mut T, state: &mut [T], dt: T) {
        // Derivative is evaluated at the old state for every component
        // before any component moves.
        field.apply(*t, state, &mut self.derivative);

        for (value, derivative) in state.iter_mut().zip(&self.derivative) {
            *value = *value + *derivative * dt;
        }

        *t = *t + dt;
    }
}
