//! Material properties and the table of named structural materials.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{MaterialError, MemberPropertyError};

/// Standard gravitational acceleration in m/s², used to turn member mass into weight.
pub const STANDARD_GRAVITY: f64 = 9.806_65;

/// Isotropic material properties of a truss member.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Density in kg/m³.
    pub density: f64,
    /// Elastic modulus in pascals.
    pub elastic_modulus: f64,
    /// Yield strength in pascals.
    pub yield_strength: f64,
}

impl Material {
    /// ASTM A36 structural steel.
    pub const A36: Material = Material::new(7800.0, 200.0e9, 250.0e6);
    /// ASTM A992 structural steel.
    pub const A992: Material = Material::new(7800.0, 200.0e9, 345.0e6);
    /// 6061-T6 aluminium alloy.
    pub const ALUMINUM_6061_T6: Material = Material::new(2700.0, 68.9e9, 276.0e6);

    /// Create a custom material.
    #[must_use]
    pub const fn new(density: f64, elastic_modulus: f64, yield_strength: f64) -> Self {
        Self {
            density,
            elastic_modulus,
            yield_strength,
        }
    }

    /// Resolve a material from the built-in table.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::InvalidMaterial`] when `name` is not in the table.
    ///
    /// # Examples
    /// ```
    /// use trussform::Material;
    ///
    /// let steel = Material::lookup("A992").expect("known material");
    /// assert_eq!(steel.yield_strength, 345.0e6);
    /// assert!(Material::lookup("unobtainium").is_err());
    /// ```
    pub fn lookup(name: &str) -> Result<Self, MaterialError> {
        MATERIALS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, material)| *material)
            .ok_or_else(|| MaterialError::InvalidMaterial(name.to_owned()))
    }

    /// Names of every material in the built-in table.
    pub fn names() -> impl Iterator<Item = &'static str> {
        MATERIALS.iter().map(|(name, _)| *name)
    }

    /// Check that the properties describe a physically meaningful material.
    ///
    /// # Errors
    ///
    /// Returns a [`MemberPropertyError`] naming the first offending property.
    pub fn validate(&self) -> Result<(), MemberPropertyError> {
        if !(self.elastic_modulus > 0.0 && self.elastic_modulus.is_finite()) {
            return Err(MemberPropertyError::NonPositiveElasticModulus(
                self.elastic_modulus,
            ));
        }
        if !(self.yield_strength > 0.0 && self.yield_strength.is_finite()) {
            return Err(MemberPropertyError::NonPositiveYieldStrength(
                self.yield_strength,
            ));
        }
        if !(self.density >= 0.0 && self.density.is_finite()) {
            return Err(MemberPropertyError::NegativeDensity(self.density));
        }
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::A36
    }
}

impl FromStr for Material {
    type Err = MaterialError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Material::lookup(name)
    }
}

/// Built-in materials keyed by their conventional designation.
const MATERIALS: [(&str, Material); 3] = [
    ("A36", Material::A36),
    ("A992", Material::A992),
    ("6061_T6", Material::ALUMINUM_6061_T6),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_entries_resolve_by_name() {
        for name in Material::names() {
            let material: Material = name.parse().expect("table entry parses");
            material.validate().expect("table entry is valid");
        }
        assert_eq!(
            Material::lookup("6061_T6"),
            Ok(Material::ALUMINUM_6061_T6)
        );
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            Material::lookup("a36"),
            Err(MaterialError::InvalidMaterial("a36".to_owned()))
        );
    }

    #[test]
    fn invalid_properties_are_reported() {
        let soft = Material::new(7800.0, 0.0, 250.0e6);
        assert_eq!(
            soft.validate(),
            Err(MemberPropertyError::NonPositiveElasticModulus(0.0))
        );
        let weak = Material::new(7800.0, 200.0e9, -1.0);
        assert_eq!(
            weak.validate(),
            Err(MemberPropertyError::NonPositiveYieldStrength(-1.0))
        );
        let hollow = Material::new(-1.0, 200.0e9, 250.0e6);
        assert_eq!(
            hollow.validate(),
            Err(MemberPropertyError::NegativeDensity(-1.0))
        );
    }
}
