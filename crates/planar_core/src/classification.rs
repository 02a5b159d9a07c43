use crate::matrix::{Eigenvalue, Matrix2x2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Real parts below this bound count as "zero" for the uniqueness test.
/// The type and stability branches compare against exact zero instead.
pub const NON_UNIQUE_REAL_PART_BOUND: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriticalPointType {
    StarNode,
    RegularNode,
    SaddlePoint,
    Center,
    FocusOrSpiral,
    LineOfPoints,
}

impl CriticalPointType {
    pub fn display_name(self) -> &'static str {
        match self {
            CriticalPointType::StarNode => "Star node",
            CriticalPointType::RegularNode => "Regular node",
            CriticalPointType::SaddlePoint => "Saddle point",
            CriticalPointType::Center => "Center",
            CriticalPointType::FocusOrSpiral => "Focus or spiral",
            CriticalPointType::LineOfPoints => "Line of points",
        }
    }
}

impl fmt::Display for CriticalPointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stability {
    AsymptoticallyStable,
    Stable,
    Unstable,
}

impl Stability {
    pub fn display_name(self) -> &'static str {
        match self {
            Stability::AsymptoticallyStable => "Asymptotically stable",
            Stability::Stable => "Stable",
            Stability::Unstable => "Unstable",
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Outcome of classifying the critical point at the origin.
///
/// When `is_unique` is false the origin lies on a whole line of equilibria:
/// `critical_point_type` is forced to [`CriticalPointType::LineOfPoints`] and
/// `stability` is kept for inspection but left out of [`Self::message`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub critical_point_type: CriticalPointType,
    pub stability: Stability,
    pub is_unique: bool,
    pub eigenvalues: [Eigenvalue; 2],
    pub determinant: f64,
}

impl ClassificationResult {
    pub fn message(&self) -> String {
        if self.is_unique {
            format!(
                "Critical point (0,0) unique; critical-point type: {}; stability: {}.",
                self.critical_point_type, self.stability
            )
        } else {
            format!(
                "Critical point (0,0) not unique; critical-point type: {}.",
                CriticalPointType::LineOfPoints
            )
        }
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

pub fn classify(matrix: &Matrix2x2) -> ClassificationResult {
    let eigenvalues = matrix.eigenvalues();
    let determinant = matrix.determinant();

    let is_unique = !(determinant == 0.0
        && eigenvalues
            .iter()
            .all(|value| value.re < NON_UNIQUE_REAL_PART_BOUND));
    let critical_point_type = if is_unique {
        critical_point_type(&eigenvalues)
    } else {
        CriticalPointType::LineOfPoints
    };

    ClassificationResult {
        critical_point_type,
        stability: stability(&eigenvalues),
        is_unique,
        eigenvalues,
        determinant,
    }
}

// Branch order is the classification policy; first match wins.
fn critical_point_type(eigenvalues: &[Eigenvalue; 2]) -> CriticalPointType {
    let [first, second] = eigenvalues;
    let both_real = eigenvalues.iter().all(Eigenvalue::is_real);
    let any_oscillating = !both_real;

    if first.re == second.re && both_real {
        CriticalPointType::StarNode
    } else if first.re * second.re > 0.0 && both_real {
        CriticalPointType::RegularNode
    } else if eigenvalues.iter().any(|value| value.re < 0.0)
        && eigenvalues.iter().any(|value| value.re > 0.0)
    {
        CriticalPointType::SaddlePoint
    } else if eigenvalues.iter().all(|value| value.re == 0.0) && any_oscillating {
        CriticalPointType::Center
    } else if any_oscillating {
        CriticalPointType::FocusOrSpiral
    } else {
        CriticalPointType::LineOfPoints
    }
}

fn stability(eigenvalues: &[Eigenvalue; 2]) -> Stability {
    if eigenvalues.iter().all(|value| value.re < 0.0) {
        Stability::AsymptoticallyStable
    } else if eigenvalues.iter().all(|value| value.re == 0.0)
        && !eigenvalues.iter().all(Eigenvalue::is_real)
    {
        Stability::Stable
    } else {
        Stability::Unstable
    }
}
