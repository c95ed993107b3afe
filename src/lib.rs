#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod analysis;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod goals;
pub mod material;
pub mod model;
pub mod partition;
pub mod report;
pub mod response;
pub mod safety;
pub mod section;
pub mod solver;
pub mod stiffness;
pub mod truss;

pub use analysis::{analyze, AnalysisResults, AxisResponse, JointResponse, MemberResult};
pub use config::{AnalysisSettings, InstabilityPolicy};
pub use errors::{
    AnalysisError, GeometryError, GoalError, MaterialError, MemberPropertyError, SectionError,
    SettingsError, TrussEditError,
};
pub use geometry::{displacement, force, point, Axis, Displacement, Force, Point};
pub use goals::{DesignGoals, Goal, GoalCheck};
pub use material::{Material, STANDARD_GRAVITY};
pub use model::{MemberProperties, StructuralModel};
pub use partition::{partition, Partition};
pub use report::{JointReport, TrussReport};
pub use response::{recover, Response};
pub use safety::{euler_critical_load, LimitState, MemberSafety, SafetySummary};
pub use section::CrossSection;
pub use solver::{condition_number, solve, ReducedSolution, Stability};
pub use stiffness::{assemble, StiffnessAssembly};
pub use structural_shapes::StructuralShape;
pub use truss::{AnalysisState, Truss};
