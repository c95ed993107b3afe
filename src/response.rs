//! Recovery of deflections, member forces and support reactions from the reduced solution.

use nalgebra::{DVector, Vector3};

use crate::model::StructuralModel;
use crate::partition::Partition;
use crate::solver::ReducedSolution;
use crate::stiffness::StiffnessAssembly;

/// Structural response over every DOF and member.
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    /// Deflection of every DOF; zero at constrained DOFs.
    pub deflections: DVector<f64>,
    /// Axial force per member, positive in tension.
    pub member_forces: Vec<f64>,
    /// Reaction at every DOF; only constrained DOFs are populated.
    pub reactions: DVector<f64>,
}

impl Response {
    /// Deflection vector of `joint`.
    #[must_use]
    pub fn joint_deflection(&self, joint: usize) -> Vector3<f64> {
        self.deflections.fixed_rows::<3>(joint * 3).into_owned()
    }
}

/// Scatter the free-DOF solution and derive member forces and reactions.
///
/// Member forces are multiplied by the stability force scale, so an unstable
/// structure solved under
/// [`InstabilityPolicy::ScaleForces`](crate::InstabilityPolicy::ScaleForces)
/// reports inflated forces.
#[must_use]
pub fn recover(
    model: &StructuralModel,
    assembly: &StiffnessAssembly,
    partition: &Partition,
    solution: &ReducedSolution,
) -> Response {
    let mut deflections = DVector::zeros(model.dof_count());
    for (&dof, &value) in partition.free_dofs.iter().zip(solution.deflections.iter()) {
        deflections[dof] = value;
    }

    let scale = solution.stability.force_scale();
    let member_forces = model
        .connectivity()
        .iter()
        .enumerate()
        .map(|(member, &[start, end])| {
            let relative =
                deflections.fixed_rows::<3>(end * 3) - deflections.fixed_rows::<3>(start * 3);
            assembly.axial_force(member, &relative) * scale
        })
        .collect();

    let mut reactions = DVector::zeros(model.dof_count());
    for &dof in &partition.constrained_dofs {
        reactions[dof] = assembly.matrix.row(dof).dot(&deflections.transpose());
    }

    Response {
        deflections,
        member_forces,
        reactions,
    }
}
