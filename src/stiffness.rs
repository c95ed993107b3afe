//! Assembly of the global stiffness matrix by the direct stiffness method.
//!
//! See <https://en.wikipedia.org/wiki/Direct_stiffness_method>.

use nalgebra::{DMatrix, Matrix3, Vector3};

use crate::model::StructuralModel;

/// Global stiffness matrix together with the per-member axial stiffness vectors.
#[derive(Clone, Debug, PartialEq)]
pub struct StiffnessAssembly {
    /// Global 3N×3N stiffness matrix.
    pub matrix: DMatrix<f64>,
    /// `(E·A/L)·d` for every member, with `d` the unit vector from start to end joint.
    pub axial_stiffness: Vec<Vector3<f64>>,
}

impl StiffnessAssembly {
    /// Axial force carried by `member` for the relative end deflection `end - start`.
    #[must_use]
    pub fn axial_force(&self, member: usize, relative_deflection: &Vector3<f64>) -> f64 {
        self.axial_stiffness[member].dot(relative_deflection)
    }
}

/// Assemble the global stiffness matrix for a validated model.
#[must_use]
pub fn assemble(model: &StructuralModel) -> StiffnessAssembly {
    let dof = model.dof_count();
    let mut matrix = DMatrix::zeros(dof, dof);
    let mut axial_stiffness = Vec::with_capacity(model.member_count());

    for (member, &[start, end]) in model.connectivity().iter().enumerate() {
        let delta =
            model.coordinates()[end].to_vector() - model.coordinates()[start].to_vector();
        let length = delta.norm();
        let direction = delta / length;
        let (elastic_modulus, area) = model.properties()[member].stiffness();
        let ea_over_l = elastic_modulus * area / length;

        let block: Matrix3<f64> = ea_over_l * direction * direction.transpose();
        let blocks = [
            (start, start, 1.0),
            (start, end, -1.0),
            (end, start, -1.0),
            (end, end, 1.0),
        ];
        for (row_joint, col_joint, sign) in blocks {
            let row_base = row_joint * 3;
            let col_base = col_joint * 3;
            for row in 0..3 {
                for col in 0..3 {
                    matrix[(row_base + row, col_base + col)] += sign * block[(row, col)];
                }
            }
        }
        axial_stiffness.push(ea_over_l * direction);
    }

    log::debug!(
        "assembled {dof}x{dof} stiffness matrix from {} members",
        model.member_count()
    );

    StiffnessAssembly {
        matrix,
        axial_stiffness,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{point, Force};
    use crate::material::Material;
    use crate::model::MemberProperties;
    use crate::section::CrossSection;

    fn bar_model(end: [f64; 3]) -> StructuralModel {
        let section = CrossSection::Square { width: 0.1 };
        StructuralModel::new(
            vec![point(0.0, 0.0, 0.0), point(end[0], end[1], end[2])],
            vec![[true; 3], [false; 3]],
            vec![Force::default(); 2],
            vec![[0, 1]],
            vec![MemberProperties::new(Material::A36, section)],
        )
        .expect("valid model")
    }

    #[test]
    fn axial_bar_only_stiffens_its_own_axis() {
        let assembly = assemble(&bar_model([2.0, 0.0, 0.0]));
        let k = 200.0e9 * 0.01 / 2.0;
        assert_relative_eq!(assembly.matrix[(0, 0)], k, max_relative = 1.0e-12);
        assert_relative_eq!(assembly.matrix[(0, 3)], -k, max_relative = 1.0e-12);
        assert_relative_eq!(assembly.matrix[(3, 3)], k, max_relative = 1.0e-12);
        assert_relative_eq!(assembly.matrix[(1, 1)], 0.0);
        assert_relative_eq!(assembly.matrix[(4, 4)], 0.0);
        assert_relative_eq!(
            assembly.axial_stiffness[0],
            Vector3::new(k, 0.0, 0.0),
            max_relative = 1.0e-12
        );
    }

    #[test]
    fn inclined_bar_is_symmetric_with_zero_row_sums() {
        let assembly = assemble(&bar_model([1.0, 2.0, 2.0]));
        let matrix = &assembly.matrix;
        assert_relative_eq!(matrix.clone(), matrix.transpose(), epsilon = 1.0e-3);
        for row in 0..6 {
            let sum: f64 = matrix.row(row).iter().sum();
            assert_relative_eq!(sum / matrix[(row, row)].abs().max(1.0), 0.0, epsilon = 1.0e-12);
        }
        let k = 200.0e9 * 0.01 / 3.0;
        assert_relative_eq!(matrix[(1, 2)], k * 4.0 / 9.0, max_relative = 1.0e-12);
    }

    #[test]
    fn shared_joints_accumulate_contributions() {
        let section = CrossSection::Square { width: 0.1 };
        let properties = MemberProperties::new(Material::A36, section);
        let model = StructuralModel::new(
            vec![
                point(0.0, 0.0, 0.0),
                point(1.0, 0.0, 0.0),
                point(2.0, 0.0, 0.0),
            ],
            vec![[true; 3], [false; 3], [true; 3]],
            vec![Force::default(); 3],
            vec![[0, 1], [1, 2]],
            vec![properties; 2],
        )
        .expect("valid model");
        let assembly = assemble(&model);
        let k = 200.0e9 * 0.01;
        assert_relative_eq!(assembly.matrix[(3, 3)], 2.0 * k, max_relative = 1.0e-12);
        assert_relative_eq!(
            assembly.axial_force(0, &Vector3::new(1.0e-6, 0.0, 0.0)),
            k * 1.0e-6,
            max_relative = 1.0e-12
        );
    }
}
