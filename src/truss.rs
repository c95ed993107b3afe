//! Editable truss model and its analysis state.

use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::analysis::{analyze, AnalysisResults};
use crate::config::AnalysisSettings;
use crate::errors::{AnalysisError, GoalError, TrussEditError};
use crate::geometry::{Displacement, Force, Point};
use crate::goals::{DesignGoals, Goal};
use crate::material::Material;
use crate::model::{MemberProperties, StructuralModel};
use crate::report::TrussReport;
use crate::safety::LimitState;
use crate::section::CrossSection;

/// Internal representation of a truss joint.
#[derive(Clone, Debug)]
struct Joint {
    /// Position of the joint in metres.
    position: Point,
    /// Indicator for each translational degree of freedom that is restrained.
    support: [bool; 3],
    /// External load applied to the joint in newtons.
    load: Force,
}

impl Joint {
    /// Create an unloaded joint with the supplied position and restraints.
    fn new(position: Point, support: [bool; 3]) -> Self {
        Self {
            position,
            support,
            load: Force::default(),
        }
    }
}

/// Whether the cached results describe the current structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisState {
    /// The structure changed since the last analysis, or was never analysed.
    Unanalyzed,
    /// Results are current.
    Analyzed,
}

/// Container for a pin-jointed truss model.
///
/// Joints and members are only ever appended, so their indices double as
/// degree-of-freedom and result indices.
#[derive(Clone, Debug, Default)]
pub struct Truss {
    /// Joints as nodes, members as edges from start to end joint.
    graph: Graph<Joint, MemberProperties>,
    /// Configured design goals.
    goals: DesignGoals,
    /// Settings used by [`Truss::evaluate`].
    settings: AnalysisSettings,
    /// Results of the last analysis while they are current.
    results: Option<AnalysisResults>,
}

impl Truss {
    /// Create an empty truss.
    ///
    /// # Examples
    /// ```
    /// use trussform::Truss;
    ///
    /// let truss = Truss::new();
    /// assert_eq!(truss.joint_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty truss analysed with `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::InvalidSettings`] when a setting is out of range.
    pub fn with_settings(settings: AnalysisSettings) -> Result<Self, TrussEditError> {
        settings.validate()?;
        Ok(Self {
            settings,
            ..Self::default()
        })
    }

    /// Return the number of joints in the truss.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of members in the truss.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a joint that is free to move along every axis.
    ///
    /// # Examples
    /// ```
    /// use trussform::{point, Truss};
    ///
    /// let mut truss = Truss::new();
    /// let joint = truss.add_joint(point(0.0, 0.0, 0.0));
    /// assert_eq!(truss.joint_count(), 1);
    /// assert_eq!(joint.index(), 0);
    /// ```
    pub fn add_joint(&mut self, position: Point) -> NodeIndex {
        self.invalidate();
        self.graph.add_node(Joint::new(position, [false; 3]))
    }

    /// Add a joint pinned along every axis.
    pub fn add_support(&mut self, position: Point) -> NodeIndex {
        self.invalidate();
        self.graph.add_node(Joint::new(position, [true; 3]))
    }

    /// Update the position of an existing joint.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of this truss.
    pub fn move_joint(&mut self, joint: NodeIndex, position: Point) -> Result<(), TrussEditError> {
        self.joint_mut(joint)?.position = position;
        Ok(())
    }

    /// Set the restraint state for a joint.
    ///
    /// Each entry in `support` corresponds to the X, Y and Z directions respectively. A
    /// value of `true` indicates that the degree of freedom is fixed.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of this truss.
    pub fn set_support(
        &mut self,
        joint: NodeIndex,
        support: [bool; 3],
    ) -> Result<(), TrussEditError> {
        self.joint_mut(joint)?.support = support;
        Ok(())
    }

    /// Apply a point load to a joint.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of this truss.
    pub fn set_load(&mut self, joint: NodeIndex, load: Force) -> Result<(), TrussEditError> {
        self.joint_mut(joint)?.load = load;
        Ok(())
    }

    /// Connect two joints with a new member.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when either joint is missing,
    /// [`TrussEditError::SelfConnectedMember`] when `start == end` and
    /// [`TrussEditError::InvalidMemberProperties`] when the material or section
    /// is not physically meaningful.
    pub fn add_member(
        &mut self,
        start: NodeIndex,
        end: NodeIndex,
        material: Material,
        section: CrossSection,
    ) -> Result<EdgeIndex, TrussEditError> {
        for joint in [start, end] {
            if self.graph.node_weight(joint).is_none() {
                return Err(TrussEditError::UnknownJoint(joint));
            }
        }
        if start == end {
            return Err(TrussEditError::SelfConnectedMember(start));
        }
        material.validate()?;
        section
            .validate()
            .map_err(|source| TrussEditError::InvalidMemberProperties(source.into()))?;
        self.invalidate();
        Ok(self
            .graph
            .add_edge(start, end, MemberProperties::new(material, section)))
    }

    /// Connect two joints with a member made of a material from the built-in table.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::InvalidMaterial`] for an unknown material name,
    /// otherwise the errors of [`Truss::add_member`].
    ///
    /// # Examples
    /// ```
    /// use trussform::{point, CrossSection, Truss, TrussEditError};
    ///
    /// let mut truss = Truss::new();
    /// let a = truss.add_support(point(0.0, 0.0, 0.0));
    /// let b = truss.add_joint(point(1.0, 0.0, 0.0));
    /// truss
    ///     .add_member_with_material(a, b, "6061_T6", CrossSection::Bar { radius: 0.01 })
    ///     .expect("known material");
    /// let error = truss
    ///     .add_member_with_material(a, b, "balsa", CrossSection::default())
    ///     .expect_err("unknown material");
    /// assert!(matches!(error, TrussEditError::InvalidMaterial(_)));
    /// ```
    pub fn add_member_with_material(
        &mut self,
        start: NodeIndex,
        end: NodeIndex,
        material: &str,
        section: CrossSection,
    ) -> Result<EdgeIndex, TrussEditError> {
        let material = Material::lookup(material)?;
        self.add_member(start, end, material, section)
    }

    /// Replace the material of a member.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownMember`] when `member` is not part of this truss
    /// and [`TrussEditError::InvalidMemberProperties`] for an invalid material.
    pub fn set_member_material(
        &mut self,
        member: EdgeIndex,
        material: Material,
    ) -> Result<(), TrussEditError> {
        material.validate()?;
        self.member_mut(member)?.material = material;
        Ok(())
    }

    /// Replace the cross-section of a member.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownMember`] when `member` is not part of this truss
    /// and [`TrussEditError::InvalidMemberProperties`] for an invalid section.
    pub fn set_member_section(
        &mut self,
        member: EdgeIndex,
        section: CrossSection,
    ) -> Result<(), TrussEditError> {
        section
            .validate()
            .map_err(|source| TrussEditError::InvalidMemberProperties(source.into()))?;
        self.member_mut(member)?.section = section;
        Ok(())
    }

    /// Members attached to `joint`, in insertion order.
    #[must_use]
    pub fn incident_members(&self, joint: NodeIndex) -> Vec<EdgeIndex> {
        let mut members: Vec<EdgeIndex> = self
            .graph
            .edges_directed(joint, Direction::Outgoing)
            .chain(self.graph.edges_directed(joint, Direction::Incoming))
            .map(|edge| edge.id())
            .collect();
        members.sort_unstable();
        members
    }

    /// Configured design goals.
    #[must_use]
    pub fn goals(&self) -> &DesignGoals {
        &self.goals
    }

    /// Set or clear one design goal.
    ///
    /// # Errors
    ///
    /// Returns [`GoalError::NonFiniteTarget`] for NaN or infinite targets.
    pub fn set_goal(&mut self, goal: Goal, target: Option<f64>) -> Result<(), GoalError> {
        self.goals.set(goal, target)
    }

    /// Set several design goals by key; nothing is applied if any entry is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`GoalError::InvalidGoal`] for an unrecognised key.
    pub fn set_goals<'a, I>(&mut self, entries: I) -> Result<(), GoalError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        self.goals.apply(entries)
    }

    /// Settings used for analysis.
    #[must_use]
    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Replace the analysis settings.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::InvalidSettings`] when a setting is out of range.
    pub fn set_settings(&mut self, settings: AnalysisSettings) -> Result<(), TrussEditError> {
        settings.validate()?;
        self.invalidate();
        self.settings = settings;
        Ok(())
    }

    /// Whether the cached results are current.
    #[must_use]
    pub fn state(&self) -> AnalysisState {
        if self.results.is_some() {
            AnalysisState::Analyzed
        } else {
            AnalysisState::Unanalyzed
        }
    }

    /// Snapshot the truss as a validated model.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidGeometry`] when a member has zero length.
    pub fn model(&self) -> Result<StructuralModel, AnalysisError> {
        let joints: Vec<&Joint> = self.graph.node_weights().collect();
        StructuralModel::new(
            joints.iter().map(|joint| joint.position).collect(),
            joints.iter().map(|joint| joint.support).collect(),
            joints.iter().map(|joint| joint.load).collect(),
            self.graph
                .raw_edges()
                .iter()
                .map(|edge| [edge.source().index(), edge.target().index()])
                .collect(),
            self.graph.edge_weights().copied().collect(),
        )
    }

    /// Analyse the truss under the configured loads and settings.
    ///
    /// Results are cached until the next edit, so repeated calls are free.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] when the geometry is invalid or the structure
    /// is unstable under [`InstabilityPolicy::Reject`](crate::InstabilityPolicy::Reject).
    pub fn evaluate(&mut self) -> Result<&AnalysisResults, AnalysisError> {
        let results = match self.results.take() {
            Some(results) => results,
            None => analyze(&self.model()?, &self.settings)?,
        };
        Ok(self.results.insert(results))
    }

    /// Results of the last analysis while they are current.
    #[must_use]
    pub fn results(&self) -> Option<&AnalysisResults> {
        self.results.as_ref()
    }

    /// Report of the current results and goal checks.
    #[must_use]
    pub fn report(&self) -> Option<TrussReport> {
        self.results
            .as_ref()
            .map(|results| TrussReport::new(results, &self.goals))
    }

    /// Retrieve the deflection of a joint after analysis.
    #[must_use]
    pub fn joint_deflection(&self, joint: NodeIndex) -> Option<Displacement> {
        self.results
            .as_ref()?
            .joints
            .get(joint.index())
            .map(|joint| joint.deflection())
    }

    /// Retrieve the support reaction at a joint after analysis.
    #[must_use]
    pub fn joint_reaction(&self, joint: NodeIndex) -> Option<Force> {
        self.results
            .as_ref()?
            .joints
            .get(joint.index())
            .map(|joint| joint.reaction())
    }

    /// Retrieve the axial force in a member after analysis.
    #[must_use]
    pub fn member_axial_force(&self, member: EdgeIndex) -> Option<f64> {
        self.results
            .as_ref()?
            .members
            .get(member.index())
            .map(|member| member.force)
    }

    /// Retrieve the factor of safety against yielding for a member.
    #[must_use]
    pub fn member_fos_yielding(&self, member: EdgeIndex) -> Option<f64> {
        self.results
            .as_ref()?
            .members
            .get(member.index())
            .map(|member| member.fos_yielding)
    }

    /// Retrieve the factor of safety against buckling for a member.
    #[must_use]
    pub fn member_fos_buckling(&self, member: EdgeIndex) -> Option<f64> {
        self.results
            .as_ref()?
            .members
            .get(member.index())
            .map(|member| member.fos_buckling)
    }

    /// Total mass after analysis.
    #[must_use]
    pub fn mass(&self) -> Option<f64> {
        self.results.as_ref().map(AnalysisResults::mass)
    }

    /// Governing factor of safety after analysis.
    #[must_use]
    pub fn fos_total(&self) -> Option<f64> {
        self.results.as_ref().map(AnalysisResults::fos_total)
    }

    /// Governing limit state after analysis.
    #[must_use]
    pub fn limit_state(&self) -> Option<LimitState> {
        self.results.as_ref().map(AnalysisResults::limit_state)
    }

    /// Discard cached results when the structure or settings change.
    fn invalidate(&mut self) {
        if self.results.take().is_some() {
            log::debug!("truss edited, discarding analysis results");
        }
    }

    /// Mutable access to a joint, invalidating results.
    fn joint_mut(&mut self, joint: NodeIndex) -> Result<&mut Joint, TrussEditError> {
        if self.graph.node_weight(joint).is_none() {
            return Err(TrussEditError::UnknownJoint(joint));
        }
        self.invalidate();
        self.graph
            .node_weight_mut(joint)
            .ok_or(TrussEditError::UnknownJoint(joint))
    }

    /// Mutable access to a member, invalidating results.
    fn member_mut(&mut self, member: EdgeIndex) -> Result<&mut MemberProperties, TrussEditError> {
        if self.graph.edge_weight(member).is_none() {
            return Err(TrussEditError::UnknownMember(member));
        }
        self.invalidate();
        self.graph
            .edge_weight_mut(member)
            .ok_or(TrussEditError::UnknownMember(member))
    }
}
