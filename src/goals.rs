//! Design goals and their evaluation against analysis results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResults;
use crate::errors::GoalError;

/// A design criterion that can be configured on a truss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Minimum governing factor of safety.
    MinFosTotal,
    /// Minimum factor of safety against yielding.
    MinFosYielding,
    /// Minimum factor of safety against buckling.
    MinFosBuckling,
    /// Maximum total mass in kilograms.
    MaxMass,
    /// Maximum joint deflection magnitude in metres.
    MaxDeflection,
}

impl Goal {
    /// Every goal, in reporting order.
    pub const ALL: [Goal; 5] = [
        Goal::MinFosTotal,
        Goal::MinFosYielding,
        Goal::MinFosBuckling,
        Goal::MaxMass,
        Goal::MaxDeflection,
    ];

    /// Configuration key of the goal.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Goal::MinFosTotal => "min_fos_total",
            Goal::MinFosYielding => "min_fos_yielding",
            Goal::MinFosBuckling => "min_fos_buckling",
            Goal::MaxMass => "max_mass",
            Goal::MaxDeflection => "max_deflection",
        }
    }

    /// Whether the goal is a lower bound.
    #[must_use]
    pub const fn is_minimum(self) -> bool {
        matches!(
            self,
            Goal::MinFosTotal | Goal::MinFosYielding | Goal::MinFosBuckling
        )
    }

    /// Value of the goal's quantity in `results`.
    #[must_use]
    pub fn measure(self, results: &AnalysisResults) -> f64 {
        match self {
            Goal::MinFosTotal => results.summary.fos_total,
            Goal::MinFosYielding => results.summary.fos_yielding,
            Goal::MinFosBuckling => results.summary.fos_buckling,
            Goal::MaxMass => results.summary.mass,
            Goal::MaxDeflection => results.max_deflection(),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Goal {
    type Err = GoalError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Goal::ALL
            .into_iter()
            .find(|goal| goal.key() == key)
            .ok_or_else(|| GoalError::InvalidGoal(key.to_owned()))
    }
}

/// Optional targets for each design goal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignGoals {
    /// Minimum governing factor of safety.
    pub min_fos_total: Option<f64>,
    /// Minimum factor of safety against yielding.
    pub min_fos_yielding: Option<f64>,
    /// Minimum factor of safety against buckling.
    pub min_fos_buckling: Option<f64>,
    /// Maximum mass in kilograms.
    pub max_mass: Option<f64>,
    /// Maximum deflection in metres.
    pub max_deflection: Option<f64>,
}

impl DesignGoals {
    /// Target configured for `goal`, if any.
    #[must_use]
    pub fn get(&self, goal: Goal) -> Option<f64> {
        *self.slot(goal)
    }

    /// Set or clear the target for `goal`.
    ///
    /// # Errors
    ///
    /// Returns [`GoalError::NonFiniteTarget`] for NaN or infinite targets.
    pub fn set(&mut self, goal: Goal, target: Option<f64>) -> Result<(), GoalError> {
        if let Some(value) = target {
            check_finite(goal, value)?;
        }
        *self.slot_mut(goal) = target;
        Ok(())
    }

    /// Set several goals by key; nothing is applied unless every entry is valid.
    ///
    /// # Errors
    ///
    /// Returns [`GoalError::InvalidGoal`] for an unknown key and
    /// [`GoalError::NonFiniteTarget`] for a NaN or infinite target.
    ///
    /// # Examples
    /// ```
    /// use trussform::{DesignGoals, Goal, GoalError};
    ///
    /// let mut goals = DesignGoals::default();
    /// let error = goals
    ///     .apply([("max_mass", 5.0), ("max_weight", 1.0)])
    ///     .expect_err("unknown key rejected");
    /// assert_eq!(error, GoalError::InvalidGoal("max_weight".to_owned()));
    /// assert_eq!(goals.get(Goal::MaxMass), None);
    /// ```
    pub fn apply<'a, I>(&mut self, entries: I) -> Result<(), GoalError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let parsed = entries
            .into_iter()
            .map(|(key, value)| -> Result<(Goal, f64), GoalError> {
                let goal: Goal = key.parse()?;
                check_finite(goal, value)?;
                Ok((goal, value))
            })
            .collect::<Result<Vec<_>, _>>()?;
        for (goal, value) in parsed {
            *self.slot_mut(goal) = Some(value);
        }
        Ok(())
    }

    /// Whether no goal has been configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Goal::ALL.iter().all(|&goal| self.get(goal).is_none())
    }

    /// Check every configured goal against `results`.
    #[must_use]
    pub fn evaluate(&self, results: &AnalysisResults) -> Vec<GoalCheck> {
        Goal::ALL
            .into_iter()
            .filter_map(|goal| {
                let target = self.get(goal)?;
                let actual = goal.measure(results);
                let passed = if goal.is_minimum() {
                    actual >= target
                } else {
                    actual <= target
                };
                Some(GoalCheck {
                    goal,
                    target,
                    actual,
                    passed,
                })
            })
            .collect()
    }

    /// Storage for `goal`.
    fn slot(&self, goal: Goal) -> &Option<f64> {
        match goal {
            Goal::MinFosTotal => &self.min_fos_total,
            Goal::MinFosYielding => &self.min_fos_yielding,
            Goal::MinFosBuckling => &self.min_fos_buckling,
            Goal::MaxMass => &self.max_mass,
            Goal::MaxDeflection => &self.max_deflection,
        }
    }

    /// Mutable storage for `goal`.
    fn slot_mut(&mut self, goal: Goal) -> &mut Option<f64> {
        match goal {
            Goal::MinFosTotal => &mut self.min_fos_total,
            Goal::MinFosYielding => &mut self.min_fos_yielding,
            Goal::MinFosBuckling => &mut self.min_fos_buckling,
            Goal::MaxMass => &mut self.max_mass,
            Goal::MaxDeflection => &mut self.max_deflection,
        }
    }
}

/// Reject NaN and infinite targets.
fn check_finite(goal: Goal, value: f64) -> Result<(), GoalError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GoalError::NonFiniteTarget {
            goal: goal.key(),
            value,
        })
    }
}

/// Outcome of checking one goal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GoalCheck {
    /// Goal that was checked.
    pub goal: Goal,
    /// Configured target.
    pub target: f64,
    /// Value achieved by the structure.
    pub actual: f64,
    /// Whether the target was met.
    pub passed: bool,
}
