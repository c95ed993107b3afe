use std::error::Error;

use trussform::{force, point, CrossSection, Material, Truss};

/// Load applied to each interior top-chord joint, in newtons.
const PANEL_LOAD: f64 = -20_000.0;

/// Build a five-bay planar Pratt truss spanning five metres, one metre deep.
fn pratt_truss() -> Result<Truss, Box<dyn Error>> {
    let mut truss = Truss::new();
    let section = CrossSection::default();

    let mut bottom = Vec::with_capacity(6);
    for i in 0_u32..6 {
        let position = point(f64::from(i), 0.0, 0.0);
        let joint = if i == 0 || i == 5 {
            truss.add_support(position)
        } else {
            truss.add_joint(position)
        };
        bottom.push(joint);
    }
    let mut top = Vec::with_capacity(5);
    for i in 0_u32..5 {
        top.push(truss.add_joint(point(f64::from(i) + 0.5, 1.0, 0.0)));
    }

    // Keep the truss in the XY plane.
    for &joint in bottom[1..5].iter().chain(&top) {
        truss.set_support(joint, [false, false, true])?;
    }
    for &joint in &top[1..4] {
        truss.set_load(joint, force(0.0, PANEL_LOAD, 0.0))?;
    }

    for pair in bottom.windows(2).chain(top.windows(2)) {
        truss.add_member(pair[0], pair[1], Material::A36, section)?;
    }
    for (i, &apex) in top.iter().enumerate() {
        truss.add_member(bottom[i], apex, Material::A36, section)?;
        truss.add_member(apex, bottom[i + 1], Material::A36, section)?;
    }

    truss.set_goals([
        ("min_fos_buckling", 1.5),
        ("min_fos_yielding", 1.5),
        ("max_mass", 5.0),
        ("max_deflection", 6.0e-3),
    ])?;
    Ok(truss)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut truss = pratt_truss()?;
    truss.evaluate()?;
    if let Some(report) = truss.report() {
        println!("{}", report.to_json()?);
        if !report.all_goals_met() {
            log::warn!("not every design goal is met");
        }
    }
    Ok(())
}
