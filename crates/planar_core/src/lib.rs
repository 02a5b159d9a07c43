//! The `planar_core` crate is the numerical engine behind the linear phase
//! plane analyzer. It takes the system `v' = A v` for a real 2×2 matrix `A`,
//! classifies the critical point at the origin, and integrates the phase
//! portrait the front end draws.
//!
//! Key components:
//! - **Matrix**: validated `Matrix2x2` with closed-form eigenvalues.
//! - **Classification**: critical-point type, stability and uniqueness.
//! - **Trajectory**: forward Euler trajectories from the fixed initial conditions.
//! - **Analysis**: one-shot entry point bundling both for a UI.

pub mod analysis;
pub mod classification;
pub mod error;
pub mod matrix;
pub mod solvers;
pub mod traits;
pub mod trajectory;

pub use analysis::{analyze, analyze_coefficients, analyze_with, Analysis, PhasePortrait};
pub use classification::{classify, ClassificationResult, CriticalPointType, Stability};
pub use error::InvalidInput;
pub use matrix::{Eigenvalue, Matrix2x2};
pub use trajectory::{integrate, integrate_with, IntegrationSettings, Trajectory};
