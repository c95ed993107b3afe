//! Fundamental geometric types for truss modelling.

use std::ops::{Add, Index, Neg};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// One of the three global translational axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Global X axis.
    X,
    /// Global Y axis, the default direction of gravity.
    Y,
    /// Global Z axis.
    Z,
}

impl Axis {
    /// All axes in degree-of-freedom order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Offset of this axis within a joint's block of degrees of freedom.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Generates a three component Cartesian value type with the shared conversions.
macro_rules! cartesian {
    ($(#[$meta:meta])* $name:ident, $unit:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            #[doc = concat!("Component along the global X axis in ", $unit, ".")]
            pub x: f64,
            #[doc = concat!("Component along the global Y axis in ", $unit, ".")]
            pub y: f64,
            #[doc = concat!("Component along the global Z axis in ", $unit, ".")]
            pub z: f64,
        }

        impl $name {
            #[doc = concat!("Create a [`", stringify!($name), "`] with explicit components.")]
            #[must_use]
            pub const fn new(x: f64, y: f64, z: f64) -> Self {
                Self { x, y, z }
            }

            /// Convert into an algebraic vector.
            #[must_use]
            pub fn to_vector(self) -> Vector3<f64> {
                Vector3::new(self.x, self.y, self.z)
            }

            /// Component along `axis`.
            #[must_use]
            pub const fn component(self, axis: Axis) -> f64 {
                match axis {
                    Axis::X => self.x,
                    Axis::Y => self.y,
                    Axis::Z => self.z,
                }
            }

            /// Build from per-axis components in X, Y, Z order.
            #[must_use]
            pub const fn from_array(values: [f64; 3]) -> Self {
                Self::new(values[0], values[1], values[2])
            }
        }

        impl Index<Axis> for $name {
            type Output = f64;

            fn index(&self, axis: Axis) -> &f64 {
                match axis {
                    Axis::X => &self.x,
                    Axis::Y => &self.y,
                    Axis::Z => &self.z,
                }
            }
        }

        impl From<Vector3<f64>> for $name {
            fn from(value: Vector3<f64>) -> Self {
                Self::new(value.x, value.y, value.z)
            }
        }

        impl From<$name> for Vector3<f64> {
            fn from(value: $name) -> Self {
                value.to_vector()
            }
        }
    };
}

cartesian!(
    /// Position in three dimensional space measured in metres.
    Point,
    "metres"
);

cartesian!(
    /// Cartesian vector representing a three dimensional force in newtons.
    Force,
    "newtons"
);

cartesian!(
    /// Translation vector describing joint deflection in metres.
    Displacement,
    "metres"
);

impl Point {
    /// Straight-line distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }
}

impl Displacement {
    /// Euclidean length of the deflection.
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.to_vector().norm()
    }
}

impl Add for Force {
    type Output = Force;

    fn add(self, rhs: Force) -> Force {
        Force::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Neg for Force {
    type Output = Force;

    fn neg(self) -> Force {
        Force::new(-self.x, -self.y, -self.z)
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use trussform::point;
///
/// let origin = point(0.0, 0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

/// Convenience helper for creating [`Force`] instances.
///
/// # Examples
/// ```
/// use trussform::force;
///
/// let load = force(1.0, 0.0, -5.0);
/// assert_eq!(load.z, -5.0);
/// ```
#[must_use]
pub const fn force(x: f64, y: f64, z: f64) -> Force {
    Force::new(x, y, z)
}

/// Convenience helper for creating [`Displacement`] instances.
#[must_use]
pub const fn displacement(x: f64, y: f64, z: f64) -> Displacement {
    Displacement::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_indices_follow_dof_order() {
        let indices: Vec<usize> = Axis::ALL.iter().map(|axis| axis.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn components_are_addressable_by_axis() {
        let load = force(1.0, -2.0, 3.0);
        assert_eq!(load[Axis::Y], -2.0);
        assert_eq!(load.component(Axis::Z), 3.0);
        assert_eq!(Force::from_array([1.0, -2.0, 3.0]), load);
    }

    #[test]
    fn distance_and_magnitude_use_euclidean_norm() {
        assert_eq!(point(0.0, 0.0, 0.0).distance_to(point(3.0, 4.0, 0.0)), 5.0);
        assert_eq!(displacement(0.0, 3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn forces_sum_componentwise() {
        let total = force(1.0, 2.0, 3.0) + -force(0.5, 2.0, 1.0);
        assert_eq!(total, force(0.5, 0.0, 2.0));
    }

    #[test]
    fn displacement_from_vector() {
        let vector = Vector3::new(0.1, -0.2, 0.3);
        assert_eq!(Displacement::from(vector), Displacement::new(0.1, -0.2, 0.3));
    }
}
