//! Tunable settings for the stiffness analysis.

use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;
use crate::geometry::Axis;
use crate::material::STANDARD_GRAVITY;

/// Response to a reduced stiffness matrix whose condition number exceeds the threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstabilityPolicy {
    /// Fail the analysis with [`AnalysisError::UnstableStructure`](crate::AnalysisError::UnstableStructure).
    #[default]
    Reject,
    /// Complete the analysis, multiply every member force by
    /// [`AnalysisSettings::instability_scale`] and flag the results as unstable.
    ScaleForces,
}

/// Settings that control a single analysis run.
///
/// # Examples
/// ```
/// use trussform::{AnalysisSettings, InstabilityPolicy};
///
/// let settings = AnalysisSettings::from_json(r#"{ "instability_policy": "scale_forces" }"#)
///     .expect("valid settings");
/// assert_eq!(settings.instability_policy, InstabilityPolicy::ScaleForces);
/// assert_eq!(settings.condition_threshold, 1.0e10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Gravitational acceleration in m/s² used for self-weight.
    pub gravity: f64,
    /// Axis along which gravity acts, in the negative direction.
    pub gravity_axis: Axis,
    /// Whether member self-weight is lumped onto the joints.
    pub include_self_weight: bool,
    /// Condition number above which the reduced system is considered unstable.
    pub condition_threshold: f64,
    /// What to do when the threshold is exceeded.
    pub instability_policy: InstabilityPolicy,
    /// Factor applied to member forces under [`InstabilityPolicy::ScaleForces`].
    pub instability_scale: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            gravity: STANDARD_GRAVITY,
            gravity_axis: Axis::Y,
            include_self_weight: true,
            condition_threshold: 1.0e10,
            instability_policy: InstabilityPolicy::Reject,
            instability_scale: 1.0e10,
        }
    }
}

impl AnalysisSettings {
    /// Parse settings from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed JSON and
    /// [`SettingsError::InvalidValue`] for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: AnalysisSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings that ignore member self-weight.
    #[must_use]
    pub fn without_self_weight(mut self) -> Self {
        self.include_self_weight = false;
        self
    }

    /// Settings using the given instability policy.
    #[must_use]
    pub fn with_instability_policy(mut self, policy: InstabilityPolicy) -> Self {
        self.instability_policy = policy;
        self
    }

    /// Check that every numeric setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidValue`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.gravity >= 0.0 && self.gravity.is_finite()) {
            return Err(SettingsError::InvalidValue {
                name: "gravity",
                value: self.gravity,
            });
        }
        if !(self.condition_threshold > 0.0 && self.condition_threshold.is_finite()) {
            return Err(SettingsError::InvalidValue {
                name: "condition_threshold",
                value: self.condition_threshold,
            });
        }
        if !(self.instability_scale > 0.0 && self.instability_scale.is_finite()) {
            return Err(SettingsError::InvalidValue {
                name: "instability_scale",
                value: self.instability_scale,
            });
        }
        Ok(())
    }
}
