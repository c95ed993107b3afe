//! Error types produced while editing or analysing trusses.

use petgraph::graph::{EdgeIndex, NodeIndex};
use thiserror::Error;

/// Error returned when the connectivity or geometry of a model is unusable.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Returned when a member references a joint index that does not exist.
    #[error("member {member} references joint {joint}, which does not exist")]
    UnknownJoint {
        /// Position of the member in insertion order.
        member: usize,
        /// Offending joint index.
        joint: usize,
    },
    /// Returned when both ends of a member are the same joint.
    #[error("member {member} connects joint {joint} to itself")]
    SelfConnectedMember {
        /// Position of the member in insertion order.
        member: usize,
        /// Joint used for both ends.
        joint: usize,
    },
    /// Returned when a joint coordinate is NaN or infinite.
    #[error("joint {joint} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Offending joint index.
        joint: usize,
    },
    /// Returned when a joint load is NaN or infinite.
    #[error("joint {joint} has a non-finite load")]
    NonFiniteLoad {
        /// Offending joint index.
        joint: usize,
    },
    /// Returned when the two joints of a member coincide in space.
    #[error("member {0} has zero length")]
    ZeroLengthMember(usize),
    /// Returned when the per-joint or per-member arrays disagree in length.
    #[error("expected {expected} entries for {field}, found {found}")]
    MismatchedLengths {
        /// Name of the offending array.
        field: &'static str,
        /// Length implied by the joint or member count.
        expected: usize,
        /// Length actually supplied.
        found: usize,
    },
}

/// Error returned when a cross-section has impossible dimensions.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SectionError {
    /// Returned when a dimension is zero, negative or not finite.
    #[error("{dimension} must be positive (received {value})")]
    NonPositiveDimension {
        /// Name of the dimension.
        dimension: &'static str,
        /// Rejected value in metres.
        value: f64,
    },
    /// Returned when walls or flanges would overlap.
    #[error("{dimension} of {value} does not fit inside the section")]
    WallTooThick {
        /// Name of the dimension.
        dimension: &'static str,
        /// Rejected value in metres.
        value: f64,
    },
}

/// Error returned when the material or section assigned to a member is not physically meaningful.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MemberPropertyError {
    /// Returned when the elastic modulus is zero or negative.
    #[error("elastic modulus must be positive (received {0})")]
    NonPositiveElasticModulus(f64),
    /// Returned when the yield strength is zero or negative.
    #[error("yield strength must be positive (received {0})")]
    NonPositiveYieldStrength(f64),
    /// Returned when the density is negative.
    #[error("density must not be negative (received {0})")]
    NegativeDensity(f64),
    /// Returned when the cross-section is invalid.
    #[error("invalid cross-section: {0}")]
    InvalidSection(#[from] SectionError),
}

/// Error returned by the material lookup table.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MaterialError {
    /// Returned when no material with the given name is known.
    #[error("{0} is not a known material; try A36, A992 or 6061_T6")]
    InvalidMaterial(String),
}

/// Error returned while configuring design goals.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GoalError {
    /// Returned when a goal key is not recognised.
    #[error(
        "{0} is not a valid design goal; try min_fos_total, min_fos_yielding, \
         min_fos_buckling, max_mass or max_deflection"
    )]
    InvalidGoal(String),
    /// Returned when a goal target is NaN or infinite.
    #[error("target for {goal} must be finite (received {value})")]
    NonFiniteTarget {
        /// Key of the goal.
        goal: &'static str,
        /// Rejected target.
        value: f64,
    },
}

/// Error returned when analysis settings are out of range.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SettingsError {
    /// Returned when a setting has an unusable value.
    #[error("setting {name} has invalid value {value}")]
    InvalidValue {
        /// Name of the setting.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the settings document cannot be parsed.
    #[error("could not parse settings: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for SettingsError {
    fn from(error: serde_json::Error) -> Self {
        SettingsError::Parse(error.to_string())
    }
}

/// Error returned when a truss analysis fails.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when the connectivity or geometry is invalid.
    #[error(transparent)]
    InvalidGeometry(#[from] GeometryError),
    /// Returned when the supplied properties for a member are not physically meaningful.
    #[error("member {member} has invalid properties: {source}")]
    InvalidMemberProperties {
        /// Position of the offending member.
        member: usize,
        /// Description of the invalid property.
        #[source]
        source: MemberPropertyError,
    },
    /// Returned when the reduced stiffness matrix is too ill-conditioned to trust.
    #[error(
        "structure is unstable: reduced stiffness condition number {condition_number:e} \
         exceeds {threshold:e}"
    )]
    UnstableStructure {
        /// Condition number of the free-DOF stiffness matrix.
        condition_number: f64,
        /// Threshold that was exceeded.
        threshold: f64,
    },
    /// Returned when no solution of the reduced system could be computed at all.
    #[error("stiffness matrix is singular; check supports and connectivity")]
    SingularStiffness,
}

/// Error returned when editing a [`Truss`](crate::Truss).
///
/// # Examples
///
/// ```
/// use petgraph::graph::NodeIndex;
/// use trussform::{point, Material, Truss, TrussEditError};
///
/// let mut truss = Truss::new();
/// let a = truss.add_joint(point(0.0, 0.0, 0.0));
/// let missing = NodeIndex::new(7);
/// let error = truss
///     .add_member(a, missing, Material::A36, Default::default())
///     .expect_err("unknown joint is rejected");
/// assert_eq!(error, TrussEditError::UnknownJoint(missing));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TrussEditError {
    /// Returned when a joint cannot be found in the truss.
    #[error("joint {0:?} does not exist in this truss")]
    UnknownJoint(NodeIndex),
    /// Returned when a member cannot be found in the truss.
    #[error("member {0:?} does not exist in this truss")]
    UnknownMember(EdgeIndex),
    /// Returned when a member would connect a joint to itself.
    #[error("a member cannot connect joint {0:?} to itself")]
    SelfConnectedMember(NodeIndex),
    /// Returned when the supplied member properties are invalid.
    #[error(transparent)]
    InvalidMemberProperties(#[from] MemberPropertyError),
    /// Returned when a material name cannot be resolved.
    #[error(transparent)]
    InvalidMaterial(#[from] MaterialError),
    /// Returned when replacement settings are out of range.
    #[error(transparent)]
    InvalidSettings(#[from] SettingsError),
}
