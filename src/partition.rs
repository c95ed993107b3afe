//! Splitting the global system into free and constrained degrees of freedom.

use nalgebra::DVector;

use crate::config::AnalysisSettings;
use crate::model::StructuralModel;

/// Degree-of-freedom partition and effective nodal loads for one analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    /// Unconstrained DOFs in joint-major, axis-minor order.
    pub free_dofs: Vec<usize>,
    /// Constrained DOFs in the same order.
    pub constrained_dofs: Vec<usize>,
    /// Applied loads plus lumped self-weight for every DOF.
    pub loads: DVector<f64>,
}

impl Partition {
    /// Effective loads restricted to the free DOFs.
    #[must_use]
    pub fn free_loads(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.free_dofs.len(),
            self.free_dofs.iter().map(|&dof| self.loads[dof]),
        )
    }
}

/// Partition the model's DOFs by support flag and build the effective load vector.
///
/// Half of each member's weight is applied to each of its joints against the
/// gravity axis.
#[must_use]
pub fn partition(model: &StructuralModel, settings: &AnalysisSettings) -> Partition {
    let mut free_dofs = Vec::new();
    let mut constrained_dofs = Vec::new();
    let mut loads = DVector::zeros(model.dof_count());

    for (joint, (support, load)) in model.supports().iter().zip(model.loads()).enumerate() {
        let base = joint * 3;
        for axis in 0..3 {
            if support[axis] {
                constrained_dofs.push(base + axis);
            } else {
                free_dofs.push(base + axis);
            }
        }
        loads[base] = load.x;
        loads[base + 1] = load.y;
        loads[base + 2] = load.z;

        if settings.include_self_weight {
            let weight: f64 = model
                .incident_members(joint)
                .iter()
                .map(|&member| model.member_mass(member) / 2.0 * settings.gravity)
                .sum();
            loads[base + settings.gravity_axis.index()] -= weight;
        }
    }

    log::debug!(
        "{} free and {} constrained degrees of freedom",
        free_dofs.len(),
        constrained_dofs.len()
    );

    Partition {
        free_dofs,
        constrained_dofs,
        loads,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{point, Axis, Force};
    use crate::material::Material;
    use crate::model::MemberProperties;
    use crate::section::CrossSection;

    fn hanging_bar() -> StructuralModel {
        StructuralModel::new(
            vec![point(0.0, 0.0, 0.0), point(2.0, 0.0, 0.0)],
            vec![[true, true, true], [false, true, false]],
            vec![Force::default(), Force::new(5.0, -10.0, 0.0)],
            vec![[0, 1]],
            vec![MemberProperties::new(
                Material::A36,
                CrossSection::Square { width: 0.1 },
            )],
        )
        .expect("valid model")
    }

    #[test]
    fn free_dofs_are_joint_major_axis_minor() {
        let split = partition(&hanging_bar(), &AnalysisSettings::default());
        assert_eq!(split.free_dofs, vec![3, 5]);
        assert_eq!(split.constrained_dofs, vec![0, 1, 2, 4]);
    }

    #[test]
    fn self_weight_is_split_between_member_ends() {
        let model = hanging_bar();
        let settings = AnalysisSettings::default();
        let split = partition(&model, &settings);
        let half_weight = model.member_mass(0) / 2.0 * settings.gravity;
        assert_relative_eq!(split.loads[1], -half_weight);
        assert_relative_eq!(split.loads[4], -10.0 - half_weight);
        assert_relative_eq!(split.loads[3], 5.0);
        assert_eq!(split.free_loads().as_slice(), &[5.0, 0.0]);
    }

    #[test]
    fn gravity_axis_and_self_weight_are_configurable() {
        let model = hanging_bar();
        let settings = AnalysisSettings {
            gravity_axis: Axis::Z,
            ..AnalysisSettings::default()
        };
        let split = partition(&model, &settings);
        assert_relative_eq!(split.loads[4], -10.0);
        assert!(split.loads[5] < 0.0);

        let weightless = partition(&model, &AnalysisSettings::default().without_self_weight());
        assert_eq!(weightless.loads.as_slice(), &[0.0, 0.0, 0.0, 5.0, -10.0, 0.0]);
    }
}
