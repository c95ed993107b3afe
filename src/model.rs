//! Validated, immutable view of a truss used by the analysis pipeline.
//!
//! Joint `i` owns degrees of freedom `3i`, `3i + 1` and `3i + 2`; members are
//! indexed by insertion order.

use crate::errors::{AnalysisError, GeometryError, MemberPropertyError};
use crate::geometry::{Force, Point};
use crate::material::Material;
use crate::section::CrossSection;

/// Material and section assigned to one member.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MemberProperties {
    /// Member material.
    pub material: Material,
    /// Member cross-section.
    pub section: CrossSection,
}

impl MemberProperties {
    /// Pair a material with a section.
    #[must_use]
    pub const fn new(material: Material, section: CrossSection) -> Self {
        Self { material, section }
    }

    /// Axial stiffness inputs `(E, A)`.
    #[must_use]
    pub fn stiffness(&self) -> (f64, f64) {
        (self.material.elastic_modulus, self.section.area())
    }
}

/// Joint and member arrays checked for consistency.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuralModel {
    /// Joint positions.
    coordinates: Vec<Point>,
    /// Restrained axes per joint.
    supports: Vec<[bool; 3]>,
    /// Applied loads per joint.
    loads: Vec<Force>,
    /// Start and end joint of each member.
    connectivity: Vec<[usize; 2]>,
    /// Properties of each member.
    properties: Vec<MemberProperties>,
    /// Members incident on each joint.
    incidence: Vec<Vec<usize>>,
}

impl StructuralModel {
    /// Build a model from per-joint and per-member arrays.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidGeometry`] when array lengths disagree,
    /// a coordinate or load is not finite, a member references a missing
    /// joint, connects a joint to itself or has zero length, and
    /// [`AnalysisError::InvalidMemberProperties`] when a member's material or
    /// section is not physically meaningful.
    ///
    /// # Examples
    /// ```
    /// use trussform::{point, AnalysisError, Force, GeometryError, MemberProperties, StructuralModel};
    ///
    /// let error = StructuralModel::new(
    ///     vec![point(0.0, 0.0, 0.0), point(1.0, 0.0, 0.0)],
    ///     vec![[true; 3], [true; 3]],
    ///     vec![Force::default(); 2],
    ///     vec![[0, 0]],
    ///     vec![MemberProperties::default()],
    /// )
    /// .expect_err("self connected member rejected");
    /// assert_eq!(
    ///     error,
    ///     AnalysisError::InvalidGeometry(GeometryError::SelfConnectedMember { member: 0, joint: 0 })
    /// );
    /// ```
    pub fn new(
        coordinates: Vec<Point>,
        supports: Vec<[bool; 3]>,
        loads: Vec<Force>,
        connectivity: Vec<[usize; 2]>,
        properties: Vec<MemberProperties>,
    ) -> Result<Self, AnalysisError> {
        let joints = coordinates.len();
        check_length("supports", joints, supports.len())?;
        check_length("loads", joints, loads.len())?;
        check_length("properties", connectivity.len(), properties.len())?;
        for (joint, (position, load)) in coordinates.iter().zip(&loads).enumerate() {
            if !position.to_vector().iter().all(|value| value.is_finite()) {
                return Err(GeometryError::NonFiniteCoordinate { joint }.into());
            }
            if !load.to_vector().iter().all(|value| value.is_finite()) {
                return Err(GeometryError::NonFiniteLoad { joint }.into());
            }
        }

        let mut incidence = vec![Vec::new(); joints];
        for (member, &[start, end]) in connectivity.iter().enumerate() {
            for joint in [start, end] {
                if joint >= joints {
                    return Err(GeometryError::UnknownJoint { member, joint }.into());
                }
            }
            if start == end {
                return Err(GeometryError::SelfConnectedMember {
                    member,
                    joint: start,
                }
                .into());
            }
            if coordinates[start].distance_to(coordinates[end]) == 0.0 {
                return Err(GeometryError::ZeroLengthMember(member).into());
            }
            let member_properties = &properties[member];
            member_properties
                .material
                .validate()
                .and_then(|()| {
                    member_properties
                        .section
                        .validate()
                        .map_err(MemberPropertyError::from)
                })
                .map_err(|source| AnalysisError::InvalidMemberProperties { member, source })?;
            incidence[start].push(member);
            incidence[end].push(member);
        }

        Ok(Self {
            coordinates,
            supports,
            loads,
            connectivity,
            properties,
            incidence,
        })
    }

    /// Number of joints.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.coordinates.len()
    }

    /// Number of members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.connectivity.len()
    }

    /// Total number of degrees of freedom.
    #[must_use]
    pub fn dof_count(&self) -> usize {
        self.joint_count() * 3
    }

    /// Joint positions.
    #[must_use]
    pub fn coordinates(&self) -> &[Point] {
        &self.coordinates
    }

    /// Restraint flags per joint, `true` meaning constrained.
    #[must_use]
    pub fn supports(&self) -> &[[bool; 3]] {
        &self.supports
    }

    /// Applied loads per joint.
    #[must_use]
    pub fn loads(&self) -> &[Force] {
        &self.loads
    }

    /// Start and end joint of every member.
    #[must_use]
    pub fn connectivity(&self) -> &[[usize; 2]] {
        &self.connectivity
    }

    /// Material and section of every member.
    #[must_use]
    pub fn properties(&self) -> &[MemberProperties] {
        &self.properties
    }

    /// `(E, A)` for every member.
    #[must_use]
    pub fn stiffness_properties(&self) -> Vec<(f64, f64)> {
        self.properties.iter().map(MemberProperties::stiffness).collect()
    }

    /// Members attached to `joint`.
    #[must_use]
    pub fn incident_members(&self, joint: usize) -> &[usize] {
        &self.incidence[joint]
    }

    /// Unstressed length of `member`.
    #[must_use]
    pub fn member_length(&self, member: usize) -> f64 {
        let [start, end] = self.connectivity[member];
        self.coordinates[start].distance_to(self.coordinates[end])
    }

    /// Mass of `member` in kilograms.
    #[must_use]
    pub fn member_mass(&self, member: usize) -> f64 {
        let properties = &self.properties[member];
        properties.material.density * properties.section.area() * self.member_length(member)
    }
}

/// Compare an array length against the count it must match.
fn check_length(field: &'static str, expected: usize, found: usize) -> Result<(), GeometryError> {
    if expected == found {
        Ok(())
    } else {
        Err(GeometryError::MismatchedLengths {
            field,
            expected,
            found,
        })
    }
}
