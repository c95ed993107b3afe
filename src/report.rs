//! Serialisable summary of an analysed truss for report writers.
//!
//! Infinite factors of safety are written as `null` in JSON.

use serde::Serialize;

use crate::analysis::{AnalysisResults, MemberResult};
use crate::geometry::{Displacement, Force};
use crate::goals::{DesignGoals, GoalCheck};
use crate::safety::LimitState;
use crate::solver::Stability;

/// Deflection and reaction of one joint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct JointReport {
    /// Deflection, zero along constrained axes.
    pub deflection: Displacement,
    /// Reaction, zero along free axes.
    pub reaction: Force,
}

/// Everything a report writer needs about one analysis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrussReport {
    /// Total mass in kilograms.
    pub mass: f64,
    /// Smallest factor of safety against yielding.
    pub fos_yielding: f64,
    /// Smallest factor of safety against buckling.
    pub fos_buckling: f64,
    /// Governing factor of safety.
    pub fos_total: f64,
    /// Governing limit state.
    pub limit_state: LimitState,
    /// Numerical health of the solve.
    pub stability: Stability,
    /// Per-joint results.
    pub joints: Vec<JointReport>,
    /// Per-member results.
    pub members: Vec<MemberResult>,
    /// Outcome of every configured design goal.
    pub goals: Vec<GoalCheck>,
}

impl TrussReport {
    /// Collect results and goal checks into a report.
    #[must_use]
    pub fn new(results: &AnalysisResults, goals: &DesignGoals) -> Self {
        Self {
            mass: results.summary.mass,
            fos_yielding: results.summary.fos_yielding,
            fos_buckling: results.summary.fos_buckling,
            fos_total: results.summary.fos_total,
            limit_state: results.summary.limit_state,
            stability: results.stability,
            joints: results
                .joints
                .iter()
                .map(|joint| JointReport {
                    deflection: joint.deflection(),
                    reaction: joint.reaction(),
                })
                .collect(),
            members: results.members.clone(),
            goals: goals.evaluate(results),
        }
    }

    /// Whether every configured goal was met.
    #[must_use]
    pub fn all_goals_met(&self) -> bool {
        self.goals.iter().all(|check| check.passed)
    }

    /// Render the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serialiser error if the report cannot be encoded.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
