//! Factors of safety against yielding and Euler buckling.
//!
//! A factor of safety that cannot govern (zero force for yielding, zero or
//! tensile force for buckling) is reported as [`f64::INFINITY`].

use std::f64::consts::PI;
use std::fmt;

use serde::Serialize;

use crate::model::MemberProperties;

/// Failure mode that limits the capacity of the structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitState {
    /// Material yielding under axial stress.
    Yielding,
    /// Euler buckling of a compression member.
    Buckling,
}

impl LimitState {
    /// Lower-case name of the limit state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LimitState::Yielding => "yielding",
            LimitState::Buckling => "buckling",
        }
    }

    /// Governing limit state for a pair of factors of safety; ties go to yielding.
    #[must_use]
    pub fn governing(fos_yielding: f64, fos_buckling: f64) -> Self {
        if fos_buckling < fos_yielding {
            LimitState::Buckling
        } else {
            LimitState::Yielding
        }
    }
}

impl fmt::Display for LimitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Factors of safety of one member.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MemberSafety {
    /// Yield capacity over axial demand.
    pub fos_yielding: f64,
    /// Euler critical load over compressive demand.
    pub fos_buckling: f64,
}

impl MemberSafety {
    /// Evaluate a member of the given length carrying `axial_force`.
    ///
    /// # Examples
    /// ```
    /// use trussform::{CrossSection, Material, MemberProperties, MemberSafety};
    ///
    /// let properties = MemberProperties::new(Material::A36, CrossSection::Square { width: 0.1 });
    /// let tension = MemberSafety::evaluate(&properties, 1.0, 1_000.0);
    /// assert!(tension.fos_buckling.is_infinite());
    /// let compression = MemberSafety::evaluate(&properties, 1.0, -1_000.0);
    /// assert!(compression.fos_buckling.is_finite());
    /// ```
    #[must_use]
    pub fn evaluate(properties: &MemberProperties, length: f64, axial_force: f64) -> Self {
        let demand = axial_force.abs();
        let area = properties.section.area();
        let fos_yielding = if demand == 0.0 {
            f64::INFINITY
        } else {
            properties.material.yield_strength * area / demand
        };
        let fos_buckling = if axial_force < 0.0 {
            euler_critical_load(properties, length) / demand
        } else {
            f64::INFINITY
        };
        Self {
            fos_yielding,
            fos_buckling,
        }
    }

    /// Smaller of the two factors of safety.
    #[must_use]
    pub fn governing(&self) -> f64 {
        self.fos_yielding.min(self.fos_buckling)
    }

    /// Limit state that governs this member.
    #[must_use]
    pub fn limit_state(&self) -> LimitState {
        LimitState::governing(self.fos_yielding, self.fos_buckling)
    }
}

/// Critical Euler load `π²EI/L²` of a pin-ended member.
#[must_use]
pub fn euler_critical_load(properties: &MemberProperties, length: f64) -> f64 {
    PI.powi(2) * properties.material.elastic_modulus * properties.section.second_moment_of_area()
        / length.powi(2)
}

/// Structure-wide safety and mass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SafetySummary {
    /// Total mass in kilograms.
    pub mass: f64,
    /// Smallest member factor of safety against yielding.
    pub fos_yielding: f64,
    /// Smallest member factor of safety against buckling.
    pub fos_buckling: f64,
    /// Smaller of the yielding and buckling factors.
    pub fos_total: f64,
    /// Failure mode with the smaller factor of safety.
    pub limit_state: LimitState,
}

impl SafetySummary {
    /// Aggregate member results; `members` pairs each member's safety with its mass.
    #[must_use]
    pub fn from_members<I>(members: I) -> Self
    where
        I: IntoIterator<Item = (MemberSafety, f64)>,
    {
        let mut mass = 0.0;
        let mut fos_yielding = f64::INFINITY;
        let mut fos_buckling = f64::INFINITY;
        for (safety, member_mass) in members {
            mass += member_mass;
            fos_yielding = fos_yielding.min(safety.fos_yielding);
            fos_buckling = fos_buckling.min(safety.fos_buckling);
        }
        Self {
            mass,
            fos_yielding,
            fos_buckling,
            fos_total: fos_yielding.min(fos_buckling),
            limit_state: LimitState::governing(fos_yielding, fos_buckling),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::material::Material;
    use crate::section::CrossSection;

    fn slender() -> MemberProperties {
        MemberProperties::new(Material::A36, CrossSection::Bar { radius: 0.01 })
    }

    #[test]
    fn zero_force_never_governs() {
        let safety = MemberSafety::evaluate(&slender(), 1.0, 0.0);
        assert!(safety.fos_yielding.is_infinite());
        assert!(safety.fos_buckling.is_infinite());
        assert_eq!(safety.limit_state(), LimitState::Yielding);
    }

    #[test]
    fn tension_only_checks_yielding() {
        let properties = slender();
        let safety = MemberSafety::evaluate(&properties, 2.0, 10_000.0);
        let capacity = 250.0e6 * properties.section.area();
        assert_relative_eq!(safety.fos_yielding, capacity / 10_000.0, max_relative = 1.0e-12);
        assert!(safety.fos_buckling.is_infinite());
    }

    #[test]
    fn compression_checks_euler_buckling() {
        let properties = slender();
        let safety = MemberSafety::evaluate(&properties, 2.0, -10_000.0);
        let inertia = PI * 0.01_f64.powi(4) / 4.0;
        let critical = PI * PI * 200.0e9 * inertia / 4.0;
        assert_relative_eq!(safety.fos_buckling, critical / 10_000.0, max_relative = 1.0e-9);
        assert_eq!(safety.limit_state(), LimitState::Buckling);
        assert_relative_eq!(safety.governing(), safety.fos_buckling);
    }

    #[test]
    fn summary_takes_minimum_and_sums_mass() {
        let members = [
            (
                MemberSafety {
                    fos_yielding: 3.0,
                    fos_buckling: f64::INFINITY,
                },
                10.0,
            ),
            (
                MemberSafety {
                    fos_yielding: 5.0,
                    fos_buckling: 2.0,
                },
                4.0,
            ),
        ];
        let summary = SafetySummary::from_members(members);
        assert_relative_eq!(summary.mass, 14.0);
        assert_relative_eq!(summary.fos_yielding, 3.0);
        assert_relative_eq!(summary.fos_buckling, 2.0);
        assert_relative_eq!(summary.fos_total, 2.0);
        assert_eq!(summary.limit_state, LimitState::Buckling);
    }

    #[test]
    fn ties_favour_yielding() {
        assert_eq!(LimitState::governing(2.0, 2.0), LimitState::Yielding);
        assert_eq!(LimitState::Buckling.to_string(), "buckling");
        let empty = SafetySummary::from_members(std::iter::empty());
        assert!(empty.fos_total.is_infinite());
        assert_eq!(empty.limit_state, LimitState::Yielding);
    }
}
