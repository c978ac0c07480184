use log::{ info, warn };
use ndarray as nd;
use xwave::bifurcation::{ self as bif, Equilibrium, NormalForm, Stability };
use lib::{ init_logging, outdir, write_npz };

fn stability_code(stability: Stability) -> f64 {
    match stability {
        Stability::Stable => -1.0,
        Stability::Neutral => 0.0,
        Stability::Unstable => 1.0,
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let r: nd::Array1<f64> = nd::Array1::linspace(-4.0, 4.0, 161);
    // offset from the r grid so that samples avoid exact equilibria
    let x: nd::Array1<f64> = nd::Array1::linspace(-5.013, 4.987, 1001);
    let outdir = outdir()?;
    for form in NormalForm::ALL {
        let found: Vec<(f64, Equilibrium)> = bif::diagram(
            |r, x| form.rhs(r, x), |r, x| form.drhs(r, x), &r, &x)?;
        let exact = form.diagram(&r);
        if found.len() != exact.len() {
            // tangent equilibria at the bifurcation point are not bracketed
            warn!(
                "{}: found {} equilibria numerically, expected {}",
                form, found.len(), exact.len(),
            );
        } else {
            info!("{}: {} equilibria", form, found.len());
        }
        let rs: nd::Array1<f64> = found.iter().map(|(rk, _)| *rk).collect();
        let xs: nd::Array1<f64> = found.iter().map(|(_, eq)| eq.x).collect();
        let st: nd::Array1<f64>
            = found.iter().map(|(_, eq)| stability_code(eq.stability)).collect();
        write_npz!(
            outdir.join(format!("bifurcation_{}.npz", form.name())),
            arrays: {
                "r" => &rs,
                "x_eq" => &xs,
                "stability" => &st,
            }
        )?;
    }
    Ok(())
}
