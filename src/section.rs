//! Cross-section shapes for truss members.
//!
//! Members carry axial load only, so a section contributes its area to the
//! stiffness and mass and its smallest principal second moment of area to the
//! Euler buckling check. All dimensions are in metres; section properties come
//! from [`StructuralShape`] and only the dimension checks live here.

use serde::{Deserialize, Serialize};
use structural_shapes::StructuralShape;
use uom::si::{f64::Length, length::meter};

use crate::errors::SectionError;

/// Cross-sectional shape of a member.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum CrossSection {
    /// Hollow circular tube.
    Pipe {
        /// Outer radius.
        outer_radius: f64,
        /// Wall thickness.
        thickness: f64,
    },
    /// Solid round bar.
    Bar {
        /// Radius.
        radius: f64,
    },
    /// Solid square bar.
    Square {
        /// Side length.
        width: f64,
    },
    /// Solid rectangular bar.
    Rectangle {
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
    /// Hollow rectangular tube.
    Box {
        /// Outer width.
        width: f64,
        /// Outer height.
        height: f64,
        /// Wall thickness.
        thickness: f64,
    },
    /// Doubly symmetric I-shape.
    IBeam {
        /// Flange width.
        width: f64,
        /// Overall depth.
        height: f64,
        /// Web thickness.
        web_thickness: f64,
        /// Flange thickness.
        flange_thickness: f64,
    },
}

impl Default for CrossSection {
    fn default() -> Self {
        CrossSection::Pipe {
            outer_radius: 0.02,
            thickness: 0.002,
        }
    }
}

impl CrossSection {
    /// Geometric shape used for section properties, centred on the member axis.
    ///
    /// # Examples
    /// ```
    /// use trussform::{CrossSection, StructuralShape};
    ///
    /// let shape = CrossSection::Bar { radius: 0.01 }.shape();
    /// assert!(matches!(shape, StructuralShape::Rod { .. }));
    /// ```
    #[must_use]
    pub fn shape(&self) -> StructuralShape {
        let centroid = (metres(0.0), metres(0.0));
        match *self {
            CrossSection::Pipe {
                outer_radius,
                thickness,
            } => StructuralShape::Pipe {
                outer_radius: metres(outer_radius),
                thickness: metres(thickness),
                center_of_gravity: centroid,
            },
            CrossSection::Bar { radius } => StructuralShape::Rod {
                radius: metres(radius),
                center_of_gravity: centroid,
            },
            CrossSection::Square { width } => StructuralShape::Rectangle {
                width: metres(width),
                height: metres(width),
                center_of_gravity: centroid,
            },
            CrossSection::Rectangle { width, height } => StructuralShape::Rectangle {
                width: metres(width),
                height: metres(height),
                center_of_gravity: centroid,
            },
            CrossSection::Box {
                width,
                height,
                thickness,
            } => StructuralShape::BoxBeam {
                width: metres(width),
                height: metres(height),
                thickness: metres(thickness),
                center_of_gravity: centroid,
            },
            CrossSection::IBeam {
                width,
                height,
                web_thickness,
                flange_thickness,
            } => StructuralShape::IBeam {
                width: metres(width),
                height: metres(height),
                web_thickness: metres(web_thickness),
                flange_thickness: metres(flange_thickness),
                center_of_gravity: centroid,
            },
        }
    }

    /// Cross-sectional area in m².
    ///
    /// # Examples
    /// ```
    /// use trussform::CrossSection;
    ///
    /// let plate = CrossSection::Rectangle { width: 0.1, height: 0.02 };
    /// assert!((plate.area() - 0.002).abs() < 1.0e-12);
    /// ```
    #[must_use]
    pub fn area(&self) -> f64 {
        self.shape().area().value
    }

    /// Smallest principal second moment of area in m⁴.
    #[must_use]
    pub fn second_moment_of_area(&self) -> f64 {
        let shape = self.shape();
        shape.moi_x().value.min(shape.moi_y().value)
    }

    /// Check that every dimension is positive and walls fit inside the outline.
    ///
    /// # Errors
    ///
    /// Returns a [`SectionError`] describing the first offending dimension.
    pub fn validate(&self) -> Result<(), SectionError> {
        match *self {
            CrossSection::Pipe {
                outer_radius,
                thickness,
            } => {
                positive("outer_radius", outer_radius)?;
                positive("thickness", thickness)?;
                fits("thickness", thickness, outer_radius)
            }
            CrossSection::Bar { radius } => positive("radius", radius),
            CrossSection::Square { width } => positive("width", width),
            CrossSection::Rectangle { width, height } => {
                positive("width", width)?;
                positive("height", height)
            }
            CrossSection::Box {
                width,
                height,
                thickness,
            } => {
                positive("width", width)?;
                positive("height", height)?;
                positive("thickness", thickness)?;
                fits("thickness", thickness, width.min(height) / 2.0)
            }
            CrossSection::IBeam {
                width,
                height,
                web_thickness,
                flange_thickness,
            } => {
                positive("width", width)?;
                positive("height", height)?;
                positive("web_thickness", web_thickness)?;
                positive("flange_thickness", flange_thickness)?;
                fits("web_thickness", web_thickness, width)?;
                fits("flange_thickness", flange_thickness, height / 2.0)
            }
        }
    }
}

/// Length in metres.
fn metres(value: f64) -> Length {
    Length::new::<meter>(value)
}

/// Reject zero, negative and non-finite dimensions.
fn positive(dimension: &'static str, value: f64) -> Result<(), SectionError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SectionError::NonPositiveDimension { dimension, value })
    }
}

/// Reject walls that exceed the space available for them.
fn fits(dimension: &'static str, value: f64, limit: f64) -> Result<(), SectionError> {
    if value <= limit {
        Ok(())
    } else {
        Err(SectionError::WallTooThick { dimension, value })
    }
}
