//! `wasm-bindgen` bridge between the browser UI and `planar_core`.
//!
//! The UI builds a [`WasmLinearSystem`] from the four coefficients it read
//! from the form (or calls [`analyze_linear_system`] once) and receives the
//! classification message plus serialized trajectories to plot.

mod logging;
mod system;

pub use logging::init_logging;
pub use system::{analyze_linear_system, WasmLinearSystem};
