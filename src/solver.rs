//! Dense solution of the reduced (free-DOF) stiffness system.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::config::{AnalysisSettings, InstabilityPolicy};
use crate::errors::AnalysisError;
use crate::partition::Partition;
use crate::stiffness::StiffnessAssembly;

/// Numerical health of the reduced stiffness system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Stability {
    /// The condition number is within the threshold.
    Stable {
        /// Condition number of the reduced stiffness matrix.
        condition_number: f64,
    },
    /// The condition number exceeded the threshold and member forces were scaled.
    Unstable {
        /// Condition number of the reduced stiffness matrix.
        condition_number: f64,
        /// Factor applied to every member force.
        force_scale: f64,
    },
}

impl Stability {
    /// Condition number of the reduced stiffness matrix.
    #[must_use]
    pub fn condition_number(&self) -> f64 {
        match *self {
            Stability::Stable { condition_number }
            | Stability::Unstable {
                condition_number, ..
            } => condition_number,
        }
    }

    /// Whether the structure was found to be unstable.
    #[must_use]
    pub fn is_unstable(&self) -> bool {
        matches!(self, Stability::Unstable { .. })
    }

    /// Multiplier to apply to recovered member forces.
    #[must_use]
    pub fn force_scale(&self) -> f64 {
        match *self {
            Stability::Stable { .. } => 1.0,
            Stability::Unstable { force_scale, .. } => force_scale,
        }
    }
}

/// Deflections of the free DOFs.
#[derive(Clone, Debug, PartialEq)]
pub struct ReducedSolution {
    /// Deflection of each free DOF, ordered as [`Partition::free_dofs`].
    pub deflections: DVector<f64>,
    /// Stability of the reduced system.
    pub stability: Stability,
}

/// Ratio of the largest to smallest singular value, infinite when singular.
///
/// # Examples
/// ```
/// use nalgebra::DMatrix;
/// use trussform::condition_number;
///
/// let matrix = DMatrix::from_row_slice(2, 2, &[4.0, 0.0, 0.0, 2.0]);
/// assert!((condition_number(&matrix) - 2.0).abs() < 1.0e-12);
/// ```
#[must_use]
pub fn condition_number(matrix: &DMatrix<f64>) -> f64 {
    if matrix.is_empty() {
        return 1.0;
    }
    let singular_values = matrix.clone().svd(false, false).singular_values;
    let smallest = singular_values.min();
    if smallest == 0.0 {
        f64::INFINITY
    } else {
        singular_values.max() / smallest
    }
}

/// Whether `condition` exceeds `threshold`; a NaN condition number always does.
fn is_ill_conditioned(condition: f64, threshold: f64) -> bool {
    condition.is_nan() || condition > threshold
}

/// Solve `K_ff · u_f = F_f` for the free-DOF deflections.
///
/// # Errors
///
/// Returns [`AnalysisError::UnstableStructure`] when the condition number
/// exceeds the threshold under [`InstabilityPolicy::Reject`], and
/// [`AnalysisError::SingularStiffness`] when no solution can be formed.
pub fn solve(
    assembly: &StiffnessAssembly,
    partition: &Partition,
    settings: &AnalysisSettings,
) -> Result<ReducedSolution, AnalysisError> {
    let free = &partition.free_dofs;
    let k_ff = assembly.matrix.select_rows(free).select_columns(free);
    let f_f = partition.free_loads();

    let condition = condition_number(&k_ff);
    let stability = if is_ill_conditioned(condition, settings.condition_threshold) {
        log::warn!(
            "reduced stiffness condition number {condition:e} exceeds {:e}",
            settings.condition_threshold
        );
        match settings.instability_policy {
            InstabilityPolicy::Reject => {
                return Err(AnalysisError::UnstableStructure {
                    condition_number: condition,
                    threshold: settings.condition_threshold,
                })
            }
            InstabilityPolicy::ScaleForces => Stability::Unstable {
                condition_number: condition,
                force_scale: settings.instability_scale,
            },
        }
    } else {
        Stability::Stable {
            condition_number: condition,
        }
    };

    if free.is_empty() {
        return Ok(ReducedSolution {
            deflections: DVector::zeros(0),
            stability,
        });
    }

    let deflections = match k_ff.clone().lu().solve(&f_f) {
        Some(deflections) => deflections,
        None => {
            log::debug!("LU solve failed, falling back to least squares");
            let svd = k_ff.svd(true, true);
            let tolerance = svd.singular_values.max() * f64::EPSILON * free.len() as f64;
            svd.solve(&f_f, tolerance)
                .map_err(|_| AnalysisError::SingularStiffness)?
        }
    };

    Ok(ReducedSolution {
        deflections,
        stability,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn system(
        matrix: DMatrix<f64>,
        loads: Vec<f64>,
        free_dofs: Vec<usize>,
    ) -> (StiffnessAssembly, Partition) {
        let constrained_dofs = (0..matrix.nrows())
            .filter(|dof| !free_dofs.contains(dof))
            .collect();
        (
            StiffnessAssembly {
                matrix,
                axial_stiffness: Vec::new(),
            },
            Partition {
                free_dofs,
                constrained_dofs,
                loads: DVector::from_vec(loads),
            },
        )
    }

    #[test]
    fn solves_only_the_free_block() {
        let matrix = DMatrix::from_row_slice(
            3,
            3,
            &[4.0, -2.0, 0.0, -2.0, 4.0, -2.0, 0.0, -2.0, 4.0],
        );
        let (assembly, partition) = system(matrix, vec![0.0, 2.0, 100.0], vec![0, 1]);
        let solution =
            solve(&assembly, &partition, &AnalysisSettings::default()).expect("solvable");
        // [4 -2; -2 4] u = [0; 2]
        assert_relative_eq!(solution.deflections[0], 1.0 / 3.0, epsilon = 1.0e-12);
        assert_relative_eq!(solution.deflections[1], 2.0 / 3.0, epsilon = 1.0e-12);
        assert!(!solution.stability.is_unstable());
        assert_relative_eq!(solution.stability.force_scale(), 1.0);
    }

    #[test]
    fn singular_system_is_rejected_by_default() {
        let matrix = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 0.0]);
        let (assembly, partition) = system(matrix, vec![1.0, 1.0], vec![0, 1]);
        let error = solve(&assembly, &partition, &AnalysisSettings::default())
            .expect_err("singular matrix rejected");
        assert!(matches!(
            error,
            AnalysisError::UnstableStructure { condition_number, .. } if condition_number > 1.0e10
        ));
    }

    #[test]
    fn singular_system_is_flagged_when_scaling_forces() {
        let matrix = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 0.0]);
        let (assembly, partition) = system(matrix, vec![1.0, 1.0], vec![0, 1]);
        let settings =
            AnalysisSettings::default().with_instability_policy(InstabilityPolicy::ScaleForces);
        let solution = solve(&assembly, &partition, &settings).expect("least squares fallback");
        assert!(solution.stability.is_unstable());
        assert_relative_eq!(solution.stability.force_scale(), 1.0e10);
        assert_relative_eq!(solution.deflections[0], 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn empty_free_set_is_trivially_stable() {
        let (assembly, partition) = system(DMatrix::zeros(3, 3), vec![0.0; 3], Vec::new());
        let solution = solve(&assembly, &partition, &AnalysisSettings::default())
            .expect("nothing to solve");
        assert_eq!(solution.deflections.len(), 0);
        assert_relative_eq!(solution.stability.condition_number(), 1.0);
    }

    #[test]
    fn nan_condition_number_counts_as_unstable() {
        assert!(is_ill_conditioned(f64::NAN, 1.0e10));
        assert!(is_ill_conditioned(f64::INFINITY, 1.0e10));
        assert!(is_ill_conditioned(2.0e10, 1.0e10));
        assert!(!is_ill_conditioned(1.0e10, 1.0e10));
        assert!(!is_ill_conditioned(3.0, 1.0e10));
    }

    #[test]
    fn condition_number_of_singular_matrix_is_infinite() {
        let matrix = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        assert!(condition_number(&matrix) > 1.0e10);
    }
}
