#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use petgraph::graph::{EdgeIndex, NodeIndex};
use trussform::{force, point, AnalysisSettings, CrossSection, LimitState, Material, Truss};

#[derive(Debug, Clone, Copy)]
struct CantileverGeometry {
    fixed_joint: NodeIndex,
    loaded_joint: NodeIndex,
    member: EdgeIndex,
}

#[derive(Debug, Clone, Copy)]
struct CantileverProperties {
    width: f64,
    axial_load: f64,
}

impl CantileverProperties {
    fn area(self) -> f64 {
        self.width * self.width
    }
}

impl Default for CantileverProperties {
    fn default() -> Self {
        Self {
            width: 0.1,
            axial_load: -1_000.0,
        }
    }
}

fn build_cantilever_truss(properties: CantileverProperties) -> (Truss, CantileverGeometry) {
    let mut truss = Truss::with_settings(AnalysisSettings::default().without_self_weight())
        .expect("default settings are valid");
    let fixed_joint = truss.add_support(point(0.0, 0.0, 0.0));
    let loaded_joint = truss.add_joint(point(1.0, 0.0, 0.0));
    let member = truss
        .add_member(
            fixed_joint,
            loaded_joint,
            Material::A36,
            CrossSection::Square {
                width: properties.width,
            },
        )
        .expect("member joins two existing joints");

    (
        truss,
        CantileverGeometry {
            fixed_joint,
            loaded_joint,
            member,
        },
    )
}

fn apply_cantilever_conditions(
    truss: &mut Truss,
    geometry: &CantileverGeometry,
    properties: CantileverProperties,
) {
    truss
        .set_support(geometry.loaded_joint, [false, true, true])
        .expect("loaded joint support assignment succeeds");
    truss
        .set_load(
            geometry.loaded_joint,
            force(properties.axial_load, 0.0, 0.0),
        )
        .expect("axial load assignment succeeds");
}

#[test]
fn builds_expected_topology() {
    let (truss, geometry) = build_cantilever_truss(CantileverProperties::default());

    assert_eq!(truss.joint_count(), 2);
    assert_eq!(truss.member_count(), 1);
    assert_eq!(geometry.fixed_joint.index(), 0);
    assert_eq!(geometry.loaded_joint.index(), 1);
    assert_eq!(geometry.member.index(), 0);
}

#[test]
fn cantilever_response_matches_closed_form_solution() {
    let properties = CantileverProperties::default();
    let (mut truss, geometry) = build_cantilever_truss(properties);
    apply_cantilever_conditions(&mut truss, &geometry, properties);

    truss
        .evaluate()
        .expect("cantilever analysis produces results");

    let displacement = truss
        .joint_deflection(geometry.loaded_joint)
        .expect("cantilever displacement available");
    let axial_force = truss
        .member_axial_force(geometry.member)
        .expect("cantilever axial force available");
    let fos_yielding = truss
        .member_fos_yielding(geometry.member)
        .expect("cantilever factor of safety available");
    let reaction = truss
        .joint_reaction(geometry.fixed_joint)
        .expect("cantilever reaction available");

    let elastic_modulus = Material::A36.elastic_modulus;
    let expected_displacement = properties.axial_load * 1.0 / (properties.area() * elastic_modulus);

    assert_relative_eq!(displacement.x, expected_displacement, max_relative = 1.0e-9);
    assert_relative_eq!(displacement.y, 0.0);
    assert_relative_eq!(displacement.z, 0.0);

    assert_relative_eq!(axial_force, properties.axial_load, max_relative = 1.0e-9);
    assert_relative_eq!(reaction.x, -properties.axial_load, max_relative = 1.0e-9);
    assert_relative_eq!(
        fos_yielding,
        Material::A36.yield_strength * properties.area() / properties.axial_load.abs(),
        max_relative = 1.0e-9
    );
}

#[test]
fn slender_cantilever_in_compression_buckles_first() {
    let properties = CantileverProperties {
        width: 0.01,
        axial_load: -1_000.0,
    };
    let (mut truss, geometry) = build_cantilever_truss(properties);
    apply_cantilever_conditions(&mut truss, &geometry, properties);
    truss.evaluate().expect("analysis succeeds");

    let fos_buckling = truss
        .member_fos_buckling(geometry.member)
        .expect("buckling factor available");
    let inertia = properties.width.powi(4) / 12.0;
    let critical = std::f64::consts::PI.powi(2) * Material::A36.elastic_modulus * inertia;
    assert_relative_eq!(fos_buckling, critical / 1_000.0, max_relative = 1.0e-9);
    assert_eq!(truss.limit_state(), Some(LimitState::Buckling));
}

#[test]
fn cantilever_in_tension_yields() {
    let properties = CantileverProperties {
        width: 0.01,
        axial_load: 1_000.0,
    };
    let (mut truss, geometry) = build_cantilever_truss(properties);
    apply_cantilever_conditions(&mut truss, &geometry, properties);
    truss.evaluate().expect("analysis succeeds");

    assert!(truss
        .member_fos_buckling(geometry.member)
        .expect("buckling factor available")
        .is_infinite());
    assert_eq!(truss.limit_state(), Some(LimitState::Yielding));
}
