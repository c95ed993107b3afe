//! Full static analysis of a validated model and the resulting values.

use serde::Serialize;

use crate::config::AnalysisSettings;
use crate::errors::AnalysisError;
use crate::geometry::{Axis, Displacement, Force};
use crate::model::StructuralModel;
use crate::partition::partition;
use crate::response::recover;
use crate::safety::{LimitState, MemberSafety, SafetySummary};
use crate::solver::{solve, Stability};
use crate::stiffness::assemble;

/// Result on one axis of one joint.
///
/// A constrained axis carries a reaction and a free axis carries a deflection,
/// never both.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisResponse {
    /// Deflection in metres along a free axis.
    Deflection(f64),
    /// Reaction in newtons along a constrained axis.
    Reaction(f64),
}

/// Deflections and reactions of one joint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct JointResponse {
    /// Response per axis in X, Y, Z order.
    pub axes: [AxisResponse; 3],
}

impl JointResponse {
    /// Response along `axis`.
    #[must_use]
    pub fn axis(&self, axis: Axis) -> AxisResponse {
        self.axes[axis.index()]
    }

    /// Deflection of the joint, zero along constrained axes.
    #[must_use]
    pub fn deflection(&self) -> Displacement {
        Displacement::from_array(self.axes.map(|response| match response {
            AxisResponse::Deflection(value) => value,
            AxisResponse::Reaction(_) => 0.0,
        }))
    }

    /// Reaction at the joint, zero along free axes.
    #[must_use]
    pub fn reaction(&self) -> Force {
        Force::from_array(self.axes.map(|response| match response {
            AxisResponse::Deflection(_) => 0.0,
            AxisResponse::Reaction(value) => value,
        }))
    }
}

/// Force, mass and safety of one member.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MemberResult {
    /// Unstressed length in metres.
    pub length: f64,
    /// Axial force in newtons, positive in tension.
    pub force: f64,
    /// Mass in kilograms.
    pub mass: f64,
    /// Factor of safety against yielding.
    pub fos_yielding: f64,
    /// Factor of safety against buckling, infinite unless in compression.
    pub fos_buckling: f64,
}

impl MemberResult {
    /// Whether the member is in compression.
    #[must_use]
    pub fn is_compressive(&self) -> bool {
        self.force < 0.0
    }

    /// Limit state governing this member.
    #[must_use]
    pub fn limit_state(&self) -> LimitState {
        LimitState::governing(self.fos_yielding, self.fos_buckling)
    }
}

/// Complete output of one analysis run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisResults {
    /// Per-joint response in insertion order.
    pub joints: Vec<JointResponse>,
    /// Per-member response in insertion order.
    pub members: Vec<MemberResult>,
    /// Structure-wide safety and mass.
    pub summary: SafetySummary,
    /// Numerical health of the solve.
    pub stability: Stability,
}

impl AnalysisResults {
    /// Total mass in kilograms.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.summary.mass
    }

    /// Governing factor of safety.
    #[must_use]
    pub fn fos_total(&self) -> f64 {
        self.summary.fos_total
    }

    /// Governing limit state.
    #[must_use]
    pub fn limit_state(&self) -> LimitState {
        self.summary.limit_state
    }

    /// Whether the solve was flagged as unstable.
    #[must_use]
    pub fn is_unstable(&self) -> bool {
        self.stability.is_unstable()
    }

    /// Largest deflection magnitude over all joints.
    #[must_use]
    pub fn max_deflection(&self) -> f64 {
        self.joints
            .iter()
            .map(|joint| joint.deflection().magnitude())
            .fold(0.0, f64::max)
    }

    /// Sum of all reactions.
    #[must_use]
    pub fn total_reaction(&self) -> Force {
        self.joints
            .iter()
            .map(JointResponse::reaction)
            .fold(Force::default(), |total, reaction| total + reaction)
    }
}

/// Run the direct stiffness method on `model`.
///
/// # Errors
///
/// Returns [`AnalysisError::UnstableStructure`] when the reduced stiffness
/// matrix is ill-conditioned and the settings reject unstable structures, and
/// [`AnalysisError::SingularStiffness`] when no solution can be formed.
pub fn analyze(
    model: &StructuralModel,
    settings: &AnalysisSettings,
) -> Result<AnalysisResults, AnalysisError> {
    let assembly = assemble(model);
    let split = partition(model, settings);
    let solution = solve(&assembly, &split, settings)?;
    let response = recover(model, &assembly, &split, &solution);

    let joints = model
        .supports()
        .iter()
        .enumerate()
        .map(|(joint, support)| {
            let base = joint * 3;
            let mut axes = [AxisResponse::Deflection(0.0); 3];
            for axis in 0..3 {
                axes[axis] = if support[axis] {
                    AxisResponse::Reaction(response.reactions[base + axis])
                } else {
                    AxisResponse::Deflection(response.deflections[base + axis])
                };
            }
            JointResponse { axes }
        })
        .collect();

    let members: Vec<MemberResult> = response
        .member_forces
        .iter()
        .enumerate()
        .map(|(member, &force)| {
            let length = model.member_length(member);
            let safety = MemberSafety::evaluate(&model.properties()[member], length, force);
            MemberResult {
                length,
                force,
                mass: model.member_mass(member),
                fos_yielding: safety.fos_yielding,
                fos_buckling: safety.fos_buckling,
            }
        })
        .collect();

    let summary = SafetySummary::from_members(members.iter().map(|member| {
        (
            MemberSafety {
                fos_yielding: member.fos_yielding,
                fos_buckling: member.fos_buckling,
            },
            member.mass,
        )
    }));

    log::info!(
        "analysed {} joints and {} members: mass {:.3} kg, fos {:.3} ({})",
        model.joint_count(),
        model.member_count(),
        summary.mass,
        summary.fos_total,
        summary.limit_state
    );

    Ok(AnalysisResults {
        joints,
        members,
        summary,
        stability: solution.stability,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::InstabilityPolicy;
    use crate::geometry::point;
    use crate::material::Material;
    use crate::model::MemberProperties;
    use crate::section::CrossSection;

    fn triangle(load: f64) -> StructuralModel {
        StructuralModel::new(
            vec![
                point(0.0, 0.0, 0.0),
                point(2.0, 0.0, 0.0),
                point(1.0, 1.0, 0.0),
            ],
            vec![[true; 3], [true; 3], [false, false, true]],
            vec![Force::default(), Force::default(), Force::new(0.0, load, 0.0)],
            vec![[2, 0], [2, 1]],
            vec![MemberProperties::new(Material::A36, CrossSection::default()); 2],
        )
        .expect("valid model")
    }

    #[test]
    fn each_axis_carries_exactly_one_response() {
        let results = analyze(&triangle(-1_000.0), &AnalysisSettings::default()).expect("stable");
        assert!(matches!(results.joints[0].axis(Axis::X), AxisResponse::Reaction(_)));
        assert!(matches!(results.joints[2].axis(Axis::X), AxisResponse::Deflection(_)));
        assert!(matches!(results.joints[2].axis(Axis::Z), AxisResponse::Reaction(_)));
        assert_eq!(results.joints[0].deflection(), Displacement::default());
        assert_eq!(results.joints[2].reaction().x, 0.0);
    }

    #[test]
    fn symmetric_triangle_shares_the_load() {
        let settings = AnalysisSettings::default().without_self_weight();
        let results = analyze(&triangle(-1_000.0), &settings).expect("stable");
        let expected = -1_000.0 / 2.0_f64.sqrt();
        assert_relative_eq!(results.members[0].force, expected, max_relative = 1.0e-9);
        assert_relative_eq!(results.members[1].force, expected, max_relative = 1.0e-9);
        assert!(results.members[0].is_compressive());
        assert_relative_eq!(results.total_reaction().y, 1_000.0, max_relative = 1.0e-9);
        assert!(results.max_deflection() > 0.0);
        assert!(!results.is_unstable());
    }

    #[test]
    fn dangling_joint_is_unstable() {
        let model = StructuralModel::new(
            vec![point(0.0, 0.0, 0.0), point(1.0, 0.0, 0.0)],
            vec![[true; 3], [false; 3]],
            vec![Force::default(), Force::new(0.0, -1_000.0, 0.0)],
            vec![[0, 1]],
            vec![MemberProperties::default()],
        )
        .expect("valid model");
        let error = analyze(&model, &AnalysisSettings::default()).expect_err("unstable");
        assert!(matches!(error, AnalysisError::UnstableStructure { .. }));

        let settings =
            AnalysisSettings::default().with_instability_policy(InstabilityPolicy::ScaleForces);
        let results = analyze(&model, &settings).expect("scaled");
        assert!(results.is_unstable());
        assert!(results.stability.condition_number() > 1.0e10);
    }
}
