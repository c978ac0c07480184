use anyhow::Context;
use log::info;
use ndarray as nd;
use xwave::{
    cnwave::{ CNWave, Correction, Params },
    grid::Grid,
    nonlinear::Phi4,
};
use lib::{ init_logging, outdir, write_npz };

const LAMBDA: f64 = 1.0;
const AMP: f64 = 1.5; // initial pulse height
const NSTEPS: usize = 400;

struct Run {
    t: nd::Array1<f64>,
    energy: nd::Array1<f64>,
    iterations: nd::Array1<f64>,
}

fn run(correction: Correction) -> anyhow::Result<Run> {
    let params = Params::default()
        .with_tol(1e-10)
        .with_max_iter(200)
        .with_correction(correction);
    let grid = Grid::new(-20.0, 20.0, 201)?;
    let mut wave = CNWave::with_params(Phi4 { lambda: LAMBDA }, grid, params)?;
    wave.set_phi_n_with(|x| AMP * (-x * x).exp());

    let mut t: nd::Array1<f64> = nd::Array1::zeros(NSTEPS + 1);
    let mut energy: nd::Array1<f64> = nd::Array1::zeros(NSTEPS + 1);
    let mut iterations: nd::Array1<f64> = nd::Array1::zeros(NSTEPS + 1);
    energy[0] = wave.energy().context("missing potential")?;
    for k in 1..=NSTEPS {
        let status = wave.step()?;
        t[k] = wave.t();
        energy[k] = wave.energy().context("missing potential")?;
        iterations[k] = status.iterations as f64;
    }
    let e0 = energy[0];
    let drift = energy.iter()
        .map(|e| ((e - e0) / e0).abs())
        .fold(0.0, f64::max);
    info!(
        "{:?}: E0 = {:.8}, max relative drift = {:.3e}, mean iterations = {:.2}",
        correction,
        e0,
        drift,
        iterations.iter().skip(1).sum::<f64>() / NSTEPS as f64,
    );
    Ok(Run { t, energy, iterations })
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let picard = run(Correction::Picard)?;
    let newton = run(Correction::Newton)?;
    write_npz!(
        outdir()?.join("phi4_energy.npz"),
        arrays: {
            "t" => &picard.t,
            "e_picard" => &picard.energy,
            "e_newton" => &newton.energy,
            "iter_picard" => &picard.iterations,
            "iter_newton" => &newton.iterations,
        }
    )?;
    Ok(())
}
