#![allow(non_upper_case_globals)]

//! Convenience functions and constructs to handle minutiae associated with
//! conversion to and from the natural units of a harmonic trap.
//!
//! Concrete physical constants are taken from NIST.

use std::f64::consts::PI;

/// Planck constant (kg m^2 s^-1)
pub const h: f64 = 6.62607015e-34;
//             +/- 0 (exact)

/// reduced Planck constant (kg m^2 s^-1)
pub const hbar: f64 = h / 2.0 / PI;
//                +/- 0 (exact)

/// Boltzmann's constant (J K^-1)
pub const kB: f64 = 1.380649e-23;
//              +/- 0 (exact)

/// unified atomic mass unit (kg)
pub const mu: f64 = 1.66053906660e-27;
//              +/- 0.00000000050e-27

/// Bohr radius (m)
pub const a0: f64 = 5.29177210903e-11;
//              +/- 0.00000000080e-11

/// A collection of natural unit scaling factors for a particle of mass `m` in
/// an isotropic harmonic trap of angular frequency `w`, relative to MKS units.
///
/// In these units `ħ = m = ω = 1`, so that the trap potential is `(x² + y²)/2`
/// and oscillator eigenstates have energies `n + 1/2` per axis.
///
/// See [`docs/units`][crate::docs#units] for more information.
#[derive(Copy, Clone, Debug)]
pub struct Units {
    /// Particle mass.
    pub m: f64,
    /// Trap angular frequency.
    pub w: f64,
    /// Oscillator length scale, `√(ħ/mω)`.
    pub a: f64,
    /// Energy scale, `ħω`.
    pub e: f64,
    /// Time scale, `1/ω`.
    pub t: f64,
}

impl Units {
    /// Construct from a mass (kg) and trap angular frequency (s^-1).
    pub fn from_trap(mass: f64, w: f64) -> Self {
        let a = (hbar / mass / w).sqrt();
        Self { m: mass, w, a, e: hbar * w, t: w.recip() }
    }

    /// Construct from a mass in atomic mass units and a trap frequency in
    /// hertz (not angular).
    pub fn from_amu_hz(mass: f64, freq: f64) -> Self {
        Self::from_trap(mass * mu, 2.0 * PI * freq)
    }

    /// Dimensionless interaction coefficient `g` for a quasi-two-dimensional
    /// condensate of `atoms` atoms with s-wave scattering length `a_s` (m),
    /// tightly confined along the third axis by a trap of angular frequency
    /// `w_z`.
    ///
    /// This is `√(8π) N a_s / l_z` with `l_z` the axial oscillator length
    /// expressed in units of [`Self::a`].
    pub fn g_2d(&self, atoms: f64, a_s: f64, w_z: f64) -> f64 {
        let l_z = (hbar / self.m / w_z).sqrt() / self.a;
        (8.0 * PI).sqrt() * atoms * self.to_nat_length(a_s) / l_z
    }

    /// Convert a quantity with dimensions of length in MKS units to natural
    /// units.
    pub fn to_nat_length<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.a.recip()
    }

    /// Convert a dimensionless quantity to one with length units in MKS.
    pub fn from_nat_length<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.a
    }

    /// Convert a quantity with dimensions of energy in MKS units to natural
    /// units.
    pub fn to_nat_energy<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.e.recip()
    }

    /// Convert a dimensionless quantity to one with energy units in MKS.
    pub fn from_nat_energy<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.e
    }

    /// Convert a quantity with dimensions of time in MKS units to natural
    /// units.
    pub fn to_nat_time<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.t.recip()
    }

    /// Convert a dimensionless quantity to one with time units in MKS.
    pub fn from_nat_time<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oscillator_scales() {
        let uu = Units::from_amu_hz(87.0, 100.0);
        let w = 2.0 * PI * 100.0;
        assert!((uu.e - hbar * w).abs() / uu.e < 1e-12);
        assert!((uu.t * w - 1.0).abs() < 1e-12);
        // ground state energy of one axis is half a quantum
        let e0: f64 = uu.to_nat_energy(0.5 * hbar * w);
        assert!((e0 - 0.5).abs() < 1e-12);
        let back: f64 = uu.from_nat_length(uu.to_nat_length(3e-6));
        assert!((back - 3e-6).abs() < 1e-18);
    }

    #[test]
    fn quasi_2d_coupling_scales_with_atoms() {
        let uu = Units::from_amu_hz(87.0, 20.0);
        let g1 = uu.g_2d(1e3, 100.0 * a0, 2.0 * PI * 2e3);
        let g2 = uu.g_2d(2e3, 100.0 * a0, 2.0 * PI * 2e3);
        assert!(g1 > 0.0);
        assert!((g2 / g1 - 2.0).abs() < 1e-12);
    }
}
