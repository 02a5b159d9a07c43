use crate::classification::{classify, ClassificationResult};
use crate::error::Result;
use crate::matrix::Matrix2x2;
use crate::trajectory::{integrate, integrate_with, IntegrationSettings, Trajectory};
use serde::Serialize;

/// Both plot axes span this interval.
pub const AXIS_RANGE: [f64; 2] = [-100.0, 100.0];
pub const PORTRAIT_TITLE: &str = "Phase diagram";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhasePortrait {
    pub title: &'static str,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub trajectories: Vec<Trajectory>,
}

impl PhasePortrait {
    pub fn new(trajectories: Vec<Trajectory>) -> Self {
        Self {
            title: PORTRAIT_TITLE,
            x_range: AXIS_RANGE,
            y_range: AXIS_RANGE,
            trajectories,
        }
    }
}

/// Everything one analysis run hands back to the front end. Classification
/// and portrait are computed from the same `matrix`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub matrix: Matrix2x2,
    pub classification: ClassificationResult,
    pub message: String,
    pub portrait: PhasePortrait,
}

pub fn analyze(matrix: Matrix2x2) -> Analysis {
    let classification = classify(&matrix);
    let portrait = PhasePortrait::new(integrate(&matrix));
    assemble(matrix, classification, portrait)
}

pub fn analyze_with(matrix: Matrix2x2, settings: IntegrationSettings) -> Result<Analysis> {
    // Settings are checked before anything runs so a bad request yields no
    // classification either.
    settings.validate()?;
    let classification = classify(&matrix);
    let portrait = PhasePortrait::new(integrate_with(&matrix, settings)?);
    Ok(assemble(matrix, classification, portrait))
}

/// Validates raw coefficients and analyzes the resulting system.
pub fn analyze_coefficients(a1: f64, b1: f64, a2: f64, b2: f64) -> Result<Analysis> {
    let matrix = Matrix2x2::new(a1, b1, a2, b2)?;
    Ok(analyze(matrix))
}

fn assemble(
    matrix: Matrix2x2,
    classification: ClassificationResult,
    portrait: PhasePortrait,
) -> Analysis {
    Analysis {
        matrix,
        message: classification.message(),
        classification,
        portrait,
    }
}
