use crate::error::{InvalidInput, Result};
use crate::matrix::Matrix2x2;
use crate::solvers::ForwardEuler;
use crate::traits::{Steppable, VectorField};
use serde::{Deserialize, Serialize};

/// Upper bound on samples per trajectory accepted from caller-supplied
/// settings.
pub const MAX_STEPS: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrationSettings {
    pub dt: f64,
    pub t_max: f64,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            dt: 0.1,
            t_max: 10.0,
        }
    }
}

impl IntegrationSettings {
    /// Number of recorded samples, `round(t_max / dt)`.
    pub fn steps(&self) -> usize {
        (self.t_max / self.dt).round() as usize
    }

    pub fn validate(&self) -> Result<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(InvalidInput::InvalidSettings {
                reason: format!("dt must be finite and positive (got {}).", self.dt),
            });
        }
        if !self.t_max.is_finite() || self.t_max <= 0.0 {
            return Err(InvalidInput::InvalidSettings {
                reason: format!("t_max must be finite and positive (got {}).", self.t_max),
            });
        }
        let steps = (self.t_max / self.dt).round();
        if steps < 1.0 {
            return Err(InvalidInput::InvalidSettings {
                reason: format!(
                    "t_max / dt must give at least one step (got {} / {}).",
                    self.t_max, self.dt
                ),
            });
        }
        if steps > MAX_STEPS as f64 {
            return Err(InvalidInput::InvalidSettings {
                reason: format!("t_max / dt exceeds the {} step limit.", MAX_STEPS),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialCondition {
    pub x: f64,
    pub y: f64,
}

impl InitialCondition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn label(&self) -> String {
        format!("Trajectory from ({}, {})", self.x, self.y)
    }
}

/// Starting points of the phase portrait: every sign combination of
/// `(±m, ±m)` for `m` in 1, 0.5, 0.1.
pub const INITIAL_CONDITIONS: [InitialCondition; 12] = [
    InitialCondition::new(1.0, 1.0),
    InitialCondition::new(-1.0, 1.0),
    InitialCondition::new(1.0, -1.0),
    InitialCondition::new(-1.0, -1.0),
    InitialCondition::new(0.5, 0.5),
    InitialCondition::new(-0.5, 0.5),
    InitialCondition::new(0.5, -0.5),
    InitialCondition::new(-0.5, -0.5),
    InitialCondition::new(0.1, 0.1),
    InitialCondition::new(-0.1, 0.1),
    InitialCondition::new(0.1, -0.1),
    InitialCondition::new(-0.1, -0.1),
];

/// Samples of one solution, stored as parallel coordinate arrays the way
/// plotting front ends consume them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub initial_condition: InitialCondition,
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Integrates every entry of [`INITIAL_CONDITIONS`] with the default settings.
pub fn integrate(matrix: &Matrix2x2) -> Vec<Trajectory> {
    trajectories(matrix, IntegrationSettings::default())
}

pub fn integrate_with(
    matrix: &Matrix2x2,
    settings: IntegrationSettings,
) -> Result<Vec<Trajectory>> {
    settings.validate()?;
    Ok(trajectories(matrix, settings))
}

fn trajectories(matrix: &Matrix2x2, settings: IntegrationSettings) -> Vec<Trajectory> {
    INITIAL_CONDITIONS
        .iter()
        .map(|initial| trajectory(matrix, *initial, settings.dt, settings.steps()))
        .collect()
}

/// Records the state before each step, so the first sample is the initial
/// condition and the state produced by the final step is dropped.
pub fn trajectory(
    matrix: &Matrix2x2,
    initial: InitialCondition,
    dt: f64,
    steps: usize,
) -> Trajectory {
    let mut stepper = ForwardEuler::<f64>::new(matrix.dimension());
    let mut state = [initial.x, initial.y];
    let mut t = 0.0;
    let mut x = Vec::with_capacity(steps);
    let mut y = Vec::with_capacity(steps);

    for _ in 0..steps {
        x.push(state[0]);
        y.push(state[1]);
        stepper.step(matrix, &mut t, &mut state, dt);
    }

    Trajectory {
        initial_condition: initial,
        label: initial.label(),
        x,
        y,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        integrate, integrate_with, trajectory, InitialCondition, IntegrationSettings,
        INITIAL_CONDITIONS,
    };
    use crate::error::InvalidInput;
    use crate::matrix::Matrix2x2;

    fn matrix(a1: f64, b1: f64, a2: f64, b2: f64) -> Matrix2x2 {
        Matrix2x2::new(a1, b1, a2, b2).expect("finite coefficients")
    }

    #[test]
    fn default_settings_give_one_hundred_steps() {
        let settings = IntegrationSettings::default();
        assert_eq!(settings.steps(), 100);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn every_trajectory_starts_at_its_initial_condition() {
        for m in [
            matrix(1.0, 2.0, -3.0, 4.0),
            matrix(0.0, 0.0, 0.0, 0.0),
            matrix(-5.0, 3.0, 2.0, 8.0),
        ] {
            let trajectories = integrate(&m);
            assert_eq!(trajectories.len(), INITIAL_CONDITIONS.len());
            for (traj, initial) in trajectories.iter().zip(INITIAL_CONDITIONS.iter()) {
                assert_eq!(traj.initial_condition, *initial);
                assert_eq!(traj.len(), 100);
                assert_eq!(traj.y.len(), 100);
                assert_eq!(traj.x[0], initial.x);
                assert_eq!(traj.y[0], initial.y);
            }
        }
    }

    #[test]
    fn zero_matrix_keeps_points_fixed() {
        let trajectories = integrate(&matrix(0.0, 0.0, 0.0, 0.0));
        for traj in &trajectories {
            let start = (traj.initial_condition.x, traj.initial_condition.y);
            assert!(traj.samples().all(|sample| sample == start));
        }
    }

    #[test]
    fn samples_follow_euler_recurrence() {
        let m = matrix(1.0, 2.0, -3.0, 4.0);
        let traj = trajectory(&m, InitialCondition::new(1.0, 1.0), 0.1, 3);
        // (1, 1) -> (1 + 0.3, 1 + 0.1) -> (1.3 + 0.1*(1.3 + 2.2), 1.1 + 0.1*(-3.9 + 4.4))
        let expected = [(1.0, 1.0), (1.3, 1.1), (1.65, 1.15)];
        assert_eq!(traj.len(), 3);
        for ((x, y), (ex, ey)) in traj.samples().zip(expected) {
            assert!((x - ex).abs() < 1e-12, "x = {x}, expected {ex}");
            assert!((y - ey).abs() < 1e-12, "y = {y}, expected {ey}");
        }
    }

    #[test]
    fn last_update_is_not_recorded() {
        let m = matrix(1.0, 0.0, 0.0, 1.0);
        let traj = trajectory(&m, InitialCondition::new(1.0, 0.0), 0.5, 2);
        assert_eq!(traj.x, vec![1.0, 1.5]);
        assert_eq!(traj.y, vec![0.0, 0.0]);
    }

    #[test]
    fn integration_is_deterministic() {
        let m = matrix(0.3, -1.7, 2.9, 0.1);
        let first = integrate(&m);
        let second = integrate(&m);
        for (lhs, rhs) in first.iter().zip(second.iter()) {
            let lhs_bits: Vec<u64> = lhs.x.iter().chain(&lhs.y).map(|v| v.to_bits()).collect();
            let rhs_bits: Vec<u64> = rhs.x.iter().chain(&rhs.y).map(|v| v.to_bits()).collect();
            assert_eq!(lhs_bits, rhs_bits);
        }
    }

    #[test]
    fn labels_name_the_initial_condition() {
        let trajectories = integrate(&matrix(1.0, 0.0, 0.0, 1.0));
        assert_eq!(trajectories[0].label, "Trajectory from (1, 1)");
        assert_eq!(trajectories[5].label, "Trajectory from (-0.5, 0.5)");
        assert_eq!(trajectories[11].label, "Trajectory from (-0.1, -0.1)");
    }

    #[test]
    fn custom_settings_change_sample_count() {
        let settings = IntegrationSettings { dt: 0.05, t_max: 2.0 };
        let trajectories = integrate_with(&matrix(-1.0, 0.0, 0.0, -1.0), settings)
            .expect("valid settings");
        assert!(trajectories.iter().all(|traj| traj.len() == 40));
    }

    #[test]
    fn rejects_invalid_settings() {
        let m = matrix(1.0, 0.0, 0.0, 1.0);
        for settings in [
            IntegrationSettings { dt: 0.0, t_max: 10.0 },
            IntegrationSettings { dt: -0.1, t_max: 10.0 },
            IntegrationSettings { dt: f64::NAN, t_max: 10.0 },
            IntegrationSettings { dt: 0.1, t_max: 0.0 },
            IntegrationSettings { dt: 0.1, t_max: f64::INFINITY },
            IntegrationSettings { dt: 1.0, t_max: 0.2 },
            IntegrationSettings { dt: 1e-9, t_max: 10.0 },
        ] {
            let err = integrate_with(&m, settings).expect_err("settings should be rejected");
            assert!(
                matches!(err, InvalidInput::InvalidSettings { .. }),
                "unexpected error {err:?}"
            );
        }
    }
}
