//! Linear system wrapper handed to the browser UI.

use planar_core::analysis::{analyze, analyze_with, PhasePortrait};
use planar_core::classification::{classify, ClassificationResult};
use planar_core::error::InvalidInput;
use planar_core::matrix::Matrix2x2;
use planar_core::trajectory::{integrate, integrate_with, IntegrationSettings};
use serde_wasm_bindgen::{from_value, to_value};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

/// A validated system `x' = a1 x + b1 y, y' = a2 x + b2 y` together with its
/// classification. The classification is computed once on construction so
/// every getter reports on the same matrix the portrait is drawn from.
#[wasm_bindgen]
pub struct WasmLinearSystem {
    pub(crate) matrix: Matrix2x2,
    pub(crate) classification: ClassificationResult,
}

impl WasmLinearSystem {
    pub(crate) fn build(
        a1: Option<f64>,
        b1: Option<f64>,
        a2: Option<f64>,
        b2: Option<f64>,
    ) -> Result<Self, InvalidInput> {
        let matrix = Matrix2x2::from_options(a1, b1, a2, b2).map_err(|err| {
            warn!(%err, "rejected linear system coefficients");
            err
        })?;
        let classification = classify(&matrix);
        debug!(
            coefficients = ?matrix.coefficients(),
            eigenvalues = ?classification.eigenvalues,
            determinant = classification.determinant,
            "classified linear system"
        );
        Ok(Self {
            matrix,
            classification,
        })
    }
}

pub(crate) fn invalid_input_to_js(err: InvalidInput) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn serialize<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[wasm_bindgen]
impl WasmLinearSystem {
    /// Missing (`undefined`) or non-finite coefficients are rejected.
    #[wasm_bindgen(constructor)]
    pub fn new(
        a1: Option<f64>,
        b1: Option<f64>,
        a2: Option<f64>,
        b2: Option<f64>,
    ) -> Result<WasmLinearSystem, JsValue> {
        console_error_panic_hook::set_once();
        Self::build(a1, b1, a2, b2).map_err(invalid_input_to_js)
    }

    pub fn coefficients(&self) -> Vec<f64> {
        self.matrix.coefficients().to_vec()
    }

    pub fn message(&self) -> String {
        self.classification.message()
    }

    pub fn critical_point_type(&self) -> String {
        self.classification.critical_point_type.display_name().to_string()
    }

    pub fn stability(&self) -> String {
        self.classification.stability.display_name().to_string()
    }

    pub fn is_unique(&self) -> bool {
        self.classification.is_unique
    }

    /// Flattened as `[re1, im1, re2, im2]`.
    pub fn eigenvalues(&self) -> Vec<f64> {
        self.classification
            .eigenvalues
            .iter()
            .flat_map(|value| [value.re, value.im])
            .collect()
    }

    pub fn determinant(&self) -> f64 {
        self.classification.determinant
    }

    pub fn classification(&self) -> Result<JsValue, JsValue> {
        serialize(&self.classification)
    }

    pub fn phase_portrait(&self) -> Result<JsValue, JsValue> {
        serialize(&PhasePortrait::new(integrate(&self.matrix)))
    }

    /// `settings` is a `{ dt, t_max }` object.
    pub fn phase_portrait_with(&self, settings: JsValue) -> Result<JsValue, JsValue> {
        let settings: IntegrationSettings = from_value(settings)
            .map_err(|e| JsValue::from_str(&format!("Invalid integration settings: {}", e)))?;
        let trajectories = integrate_with(&self.matrix, settings).map_err(|err| {
            warn!(%err, "rejected integration settings");
            invalid_input_to_js(err)
        })?;
        serialize(&PhasePortrait::new(trajectories))
    }

    pub fn analyze(&self) -> Result<JsValue, JsValue> {
        serialize(&analyze(self.matrix))
    }

    pub fn analyze_with(&self, settings: JsValue) -> Result<JsValue, JsValue> {
        let settings: IntegrationSettings = from_value(settings)
            .map_err(|e| JsValue::from_str(&format!("Invalid integration settings: {}", e)))?;
        let analysis = analyze_with(self.matrix, settings).map_err(invalid_input_to_js)?;
        serialize(&analysis)
    }
}

/// One-shot analysis: validates the four coefficients, then returns the
/// serialized classification message, classification and phase portrait.
#[wasm_bindgen]
pub fn analyze_linear_system(
    a1: Option<f64>,
    b1: Option<f64>,
    a2: Option<f64>,
    b2: Option<f64>,
) -> Result<JsValue, JsValue> {
    let system = WasmLinearSystem::new(a1, b1, a2, b2)?;
    system.analyze()
}

#[cfg(test)]
mod tests {
    use super::*;
    use planar_core::classification::{CriticalPointType, Stability};

    #[test]
    fn build_classifies_on_construction() {
        let system = WasmLinearSystem::build(Some(-1.0), Some(1.0), Some(-1.0), Some(-1.0))
            .expect("system should build");

        assert_eq!(
            system.classification.critical_point_type,
            CriticalPointType::FocusOrSpiral
        );
        assert_eq!(system.classification.stability, Stability::AsymptoticallyStable);
        assert_eq!(system.critical_point_type(), "Focus or spiral");
        assert_eq!(system.stability(), "Asymptotically stable");
        assert!(system.is_unique());
        assert_eq!(system.determinant(), 2.0);
    }

    #[test]
    fn build_rejects_missing_coefficient() {
        let result = WasmLinearSystem::build(Some(1.0), None, Some(0.0), Some(1.0));
        assert!(matches!(
            result,
            Err(InvalidInput::MissingCoefficient { name: "b1" })
        ));
    }

    #[test]
    fn build_rejects_non_finite_coefficient() {
        let result = WasmLinearSystem::build(Some(1.0), Some(0.0), Some(f64::NAN), Some(1.0));
        assert!(matches!(
            result,
            Err(InvalidInput::NonFiniteCoefficient { name: "a2", .. })
        ));
    }

    #[test]
    fn wasm_linear_system_constructor_accepts_finite_input() {
        let system = WasmLinearSystem::new(Some(1.0), Some(2.0), Some(-3.0), Some(4.0))
            .expect("system should build");
        assert_eq!(system.coefficients(), vec![1.0, 2.0, -3.0, 4.0]);
    }

    #[test]
    fn eigenvalues_are_flattened_pairs() {
        let system = WasmLinearSystem::build(Some(0.0), Some(1.0), Some(-1.0), Some(0.0))
            .expect("system should build");
        assert_eq!(system.eigenvalues(), vec![0.0, 1.0, 0.0, -1.0]);
        assert_eq!(
            system.message(),
            "Critical point (0,0) unique; critical-point type: Center; stability: Stable."
        );
    }

    #[test]
    fn zero_system_reports_line_of_points() {
        let system = WasmLinearSystem::build(Some(0.0), Some(0.0), Some(0.0), Some(0.0))
            .expect("system should build");
        assert!(!system.is_unique());
        assert_eq!(system.critical_point_type(), "Line of points");
        assert_eq!(
            system.message(),
            "Critical point (0,0) not unique; critical-point type: Line of points."
        );
    }

    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen_test::wasm_bindgen_test]
    fn wasm_linear_system_rejects_missing_coefficient() {
        let result = WasmLinearSystem::new(Some(1.0), None, Some(0.0), Some(1.0));
        assert!(result.is_err(), "expected missing coefficient error");
    }

    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen_test::wasm_bindgen_test]
    fn analyze_linear_system_returns_payload() {
        let result = analyze_linear_system(Some(1.0), Some(0.0), Some(0.0), Some(-1.0));
        assert!(result.is_ok(), "expected analysis to succeed");
    }

    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen_test::wasm_bindgen_test]
    fn phase_portrait_with_rejects_zero_step() {
        let system = WasmLinearSystem::new(Some(1.0), Some(0.0), Some(0.0), Some(1.0))
            .expect("system should build");
        let settings = to_value(&IntegrationSettings {
            dt: 0.0,
            t_max: 10.0,
        })
        .expect("settings serialize");
        assert!(system.phase_portrait_with(settings).is_err());
    }
}
