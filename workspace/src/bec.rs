use std::f64::consts::PI;
use log::info;
use ndarray as nd;
use num_complex::Complex64 as C64;
use xwave::{
    gpe::{ Params, Simulation },
    units::{ self, Units },
    utils::trapz2,
};
use lib::{ init_logging, outdir, write_npz };

const MASS: f64 = 86.909180527; // ⁸⁷Rb; amu
const TRAP_FREQ: f64 = 50.0; // radial; Hz
const AXIAL_FREQ: f64 = 2e3; // Hz
const ATOMS: f64 = 1e3;
const SCATTERING_LENGTH: f64 = 100.0; // a₀
const KICK: f64 = 1.0; // initial momentum along x; natural units

fn center_of_mass(sim: &Simulation, x: &nd::Array2<f64>) -> f64 {
    let dx = sim.dx();
    trapz2(&(x * &sim.density()), dx, dx) / sim.norm()
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let uu = Units::from_amu_hz(MASS, TRAP_FREQ);
    let g = uu.g_2d(
        ATOMS, SCATTERING_LENGTH * units::a0, 2.0 * PI * AXIAL_FREQ);
    info!(
        "length scale {:.3} um, time scale {:.3} ms, g = {:.3}",
        uu.a * 1e6, uu.t * 1e3, g,
    );

    let params = Params::default().with_xmax(10.0).with_n(128).with_g(g)
        .with_dt(1e-3);
    let mut sim = Simulation::new(params)?;
    sim.set_psi(|x, y| C64::from((-(x * x + y * y) / 2.0).exp()));
    let steps = sim.ground_state(1e-10, 100_000)?;
    info!(
        "ground state after {} steps: E = {:.6}, mu = {:.6}",
        steps, sim.energy(), sim.chemical_potential(),
    );

    // a uniform kick excites the dipole mode, whose center of mass follows
    // KICK sin(t) independently of g
    let (xgrid, _) = sim.meshgrid();
    let kicked = sim.psi() * &xgrid.mapv(|xk| C64::cis(KICK * xk));
    sim.set_psi_array(kicked)?;
    let period = 2.0 * PI;
    let record_every: usize = 20;
    let nrecords = (period / params.dt).round() as usize / record_every;
    let mut t: nd::Array1<f64> = nd::Array1::zeros(nrecords + 1);
    let mut xcom: nd::Array1<f64> = nd::Array1::zeros(nrecords + 1);
    xcom[0] = center_of_mass(&sim, &xgrid);
    for k in 1..=nrecords {
        sim.evolve(record_every);
        t[k] = sim.t();
        xcom[k] = center_of_mass(&sim, &xgrid);
    }
    let expected = t.mapv(|tk| KICK * tk.sin());
    let err = xcom.iter().zip(&expected)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    info!("max deviation from dipole motion: {:.3e}", err);
    info!("norm after {:.3} trap periods: {:.12}", t[nrecords] / period, sim.norm());

    let t_ms = t.mapv(|tk| uu.from_nat_time(tk) * 1e3);
    let xcom_um = xcom.mapv(|xk| uu.from_nat_length(xk) * 1e6);
    let expected_um = expected.mapv(|xk| uu.from_nat_length(xk) * 1e6);
    write_npz!(
        outdir()?.join("bec_dipole.npz"),
        arrays: {
            "t_ms" => &t_ms,
            "x_com_um" => &xcom_um,
            "x_expected_um" => &expected_um,
            "density" => &sim.density(),
        }
    )?;
    Ok(())
}
