use std::f64::consts::{ PI, TAU };
use anyhow::Context;
use log::info;
use ndarray as nd;
use xwave::{
    cnwave::{ CNWave, Params },
    grid::Grid,
    interp::{ self, Zero },
    nonlinear::SineGordon,
};
use lib::{ init_logging, outdir, write_npz };

const X0: f64 = 10.0; // initial half-separation
const V: f64 = 0.5; // approach speed of each soliton

// kink at -X0 moving right plus antikink at +X0 moving left; φ vanishes at
// both ends of the domain
fn kink_antikink(x: f64) -> (f64, f64) {
    let (phi_k, pi_k) = SineGordon::kink(x, -X0, V, 0.0);
    let (phi_a, pi_a) = SineGordon::kink(-x, -X0, V, 0.0);
    (phi_k + phi_a - TAU, pi_k + pi_a)
}

fn kink_position(x: &nd::Array1<f64>, wave: &CNWave<SineGordon>)
    -> anyhow::Result<f64>
{
    let y = wave.phi().mapv(|phi| phi - PI);
    interp::find_zeros(x, &y, Zero::Rising)?
        .first()
        .copied()
        .context("lost track of the kink")
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let params = Params::default().with_tol(1e-8).with_eps(0.05);
    let grid = Grid::new(-30.0, 30.0, 801)?;
    let mut wave = CNWave::with_params(SineGordon, grid, params)?;
    wave.set_phi_n_with(|x| kink_antikink(x).0);
    wave.set_pi_n_with(|x| kink_antikink(x).1);
    let x = wave.x();
    let e0 = wave.energy().context("missing potential")?;
    info!("dx = {:.4}, dt = {:.4}, E0 = {:.6}", wave.dx(), wave.dt(), e0);

    let mut t: Vec<f64> = vec![wave.t()];
    let mut pos: Vec<f64> = vec![kink_position(&x, &wave)?];
    let mut energy: Vec<f64> = vec![e0];
    let mut unconverged: usize = 0;
    // stop well before the collision at t = X0 / V
    while wave.t() < 0.75 * X0 / V {
        let statuses = wave.run_until(wave.t() + 0.5)?;
        unconverged += statuses.iter().filter(|s| !s.converged).count();
        t.push(wave.t());
        pos.push(kink_position(&x, &wave)?);
        energy.push(wave.energy().context("missing potential")?);
    }
    let t = nd::Array1::from(t);
    let pos = nd::Array1::from(pos);
    let expected = t.mapv(|tk| -X0 + V * tk);
    let energy = nd::Array1::from(energy);
    let drift = energy.iter()
        .map(|e| ((e - e0) / e0).abs())
        .fold(0.0, f64::max);
    let offset = pos.iter().zip(&expected)
        .map(|(p, e)| (p - e).abs())
        .fold(0.0, f64::max);
    info!("max relative energy change: {:.3e}", drift);
    info!("max kink position error: {:.3e}", offset);
    info!("unconverged steps: {}", unconverged);

    write_npz!(
        outdir()?.join("sine_gordon.npz"),
        arrays: {
            "t" => &t,
            "x_kink" => &pos,
            "x_expected" => &expected,
            "energy" => &energy,
            "x" => &x,
            "phi" => &wave.phi(),
            "pi" => &wave.pi(),
        }
    )?;
    Ok(())
}
