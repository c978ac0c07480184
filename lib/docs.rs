//! Theoretical background.
//!
//! # Contents
//! - [Crank-Nicolson](#crank-nicolson)
//! - [Dissipation and energy](#dissipation-and-energy)
//! - [Units](#units)
//! - [Split-step evolution](#split-step-evolution)
//! - [Bifurcations](#bifurcations)
//!
//! # Crank-Nicolson
//! The nonlinear wave equation
//! ```text
//!   ∂²φ   ∂²φ
//! - --- + --- = F(φ)
//!   ∂t²   ∂x²
//! ```
//! is second order in time, so it is first rewritten as a pair of first-order
//! equations by introducing the conjugate field *π* ≡ ∂*φ*/∂*t*:
//! ```text
//! ∂φ
//! -- = π
//! ∂t
//!
//! ∂π   ∂²φ
//! -- = --- - F(φ)
//! ∂t   ∂x²
//! ```
//! Space is discretized on a uniform periodic grid
//! *x*\[*i*\] = *x*<sub>min</sub> + *i* *δx* for *i* ∊ {0, ..., *N* - 1},
//! where the last point is identified
//! with the first so that only *N* - 1 of the samples are independent. The
//! second derivative is replaced by the centered difference
//! ```text
//!          u[i + 1] - 2 u[i] + u[i - 1]
//! L u[i] = ----------------------------
//!                      δx²
//! ```
//! with indices wrapped around the independent points.
//!
//! The Crank-Nicolson scheme then evaluates each right-hand side as the average
//! of its values at the current time level *n* and the next level *n* + 1,
//! ```text
//! φ[n + 1] - φ[n]   1
//! --------------- = - (π[n + 1] + π[n])
//!       δt          2
//!
//! π[n + 1] - π[n]   1                         1
//! --------------- = - (L φ[n + 1] + L φ[n]) - - (F(φ[n + 1]) + F(φ[n]))
//!       δt          2                         2
//! ```
//! which is second-order accurate in both *δt* and *δx*, unconditionally stable
//! for the linear part, and (for *F* ≡ 0) exactly conserves the discrete energy
//! described below. The price is that the *n* + 1 level appears on both sides,
//! so each step requires the solution of a (generally nonlinear) system of
//! equations. Moving everything to one side defines the residuals
//! *R*<sub>*φ*</sub> and *R*<sub>*π*</sub>, which vanish for the exact update.
//!
//! Two ways of driving the residuals to zero are provided. The first is simple
//! repeated substitution (a Picard iteration),
//! ```text
//! φ[n + 1] ← φ[n + 1] - δt R_φ
//! π[n + 1] ← π[n + 1] - δt R_π
//! ```
//! which, for the linear part, contracts the error by a factor of roughly
//! *δt* / *δx* per iteration and therefore converges for Courant factors below
//! 1; the default Courant factor is 1/2. The second is Newton's method, which
//! linearizes the residuals about the current iterate and solves
//! ```text
//!   ⎡ I             -h I  ⎤ ⎡ δφ ⎤        ⎡ R_φ ⎤
//!   ⎢                     ⎥ ⎢    ⎥ = - δt ⎢     ⎥
//!   ⎣ -h L + h dF   I     ⎦ ⎣ δπ ⎦        ⎣ R_π ⎦
//! ```
//! with *h* = *δt* / 2 and *dF* the diagonal matrix of *F*'(*φ*[*n* + 1])
//! (shown without the dissipation term below, which subtracts *h* *Q* from
//! both diagonal blocks), at
//! the cost of a dense linear solve per iteration. Newton's method converges
//! quadratically and tolerates stiff nonlinearities for which the Picard
//! iteration diverges.
//!
//! An iteration is stopped when the root-mean-square residual over both fields
//! and all independent points drops below a tolerance. If this does not happen
//! within a fixed number of iterations, the step is completed anyway and
//! flagged as not converged; no retries or step size changes are attempted.
//!
//! # Dissipation and energy
//! Centered differencing supports a spurious grid-scale (sawtooth) mode that
//! the nonlinearity can feed. Kreiss-Oliger dissipation damps it selectively by
//! adding the term
//! ```text
//!             ε
//! Q u[i] = - ---- (u[i + 2] - 4 u[i + 1] + 6 u[i] - 4 u[i - 1] + u[i - 2])
//!            16 δx
//! ```
//! to the right-hand side of each evolution equation. The fourth difference is
//! of order *δx*⁴ for smooth fields, so the damping is invisible at the
//! resolved scales while the sawtooth mode is damped at a rate *ε* / *δx*. This
//! term is averaged over both time levels in the same way as all others, and
//! vanishes identically for *ε* = 0.
//!
//! When *F* = *V*' for some potential *V*, the continuum equations conserve
//! ```text
//!     ⌠   ⎡ π²   1 ⎛ ∂φ ⎞²       ⎤
//! E = ⎮dx ⎢ -- + - ⎜ -- ⎟ + V(φ) ⎥
//!     ⌡   ⎣ 2    2 ⎝ ∂x ⎠        ⎦
//! ```
//! which is discretized using the forward difference for the gradient and the
//! rectangle rule over the independent points. The linear part of the scheme
//! conserves this quantity exactly; for a nonlinear *F*, the energy drifts only
//! at the level of the iteration tolerance and the truncation error of the
//! time average of *F*.
//!
//! # Units
//! Condensate simulations are carried out in the natural units of an isotropic
//! harmonic trap. For particles of mass *m* in a trap of angular frequency *ω*,
//! the Gross-Pitaevskii equation in two dimensions reads
//! ```text
//!    ∂ψ      ħ²          m ω²                    2
//! iħ -- = - --- ∇²ψ + ( ---- (x² + y²) + g₂ N |ψ| ) ψ
//!    ∂t     2 m           2
//! ```
//! with *ψ* normalized to 1 and *N* the number of atoms. Choosing the oscillator
//! length *a* ≡ √(*ħ* / *m* *ω*), the energy *ħω*, and the time 1/*ω* as units
//! and changing variables according to
//! ```text
//! x → x / a
//! t → ω t
//! ψ → a ψ
//! ```
//! (which preserves the normalization of *ψ*) gives the dimensionless equation
//! ```text
//!   ∂ψ     1       x² + y²          2
//! i -- = - - ∇²ψ + ------- ψ + g |ψ|  ψ
//!   ∂t     2          2
//! ```
//! Oscillator eigenstates then have energies *n* + 1/2 per axis and the trap
//! ground state has energy 1. For a condensate that is tightly confined along
//! *z* by a trap of frequency *ω*<sub>*z*</sub>, integrating out the ground
//! state along *z* produces the effective two-dimensional coupling
//! ```text
//!     √(8π) N a_s
//! g = -----------
//!       a l_z
//! ```
//! where *a*<sub>*s*</sub> is the *s*-wave scattering length and *l*<sub>*z*</sub>
//! the oscillator length along *z*, both in MKS units.
//!
//! Items in [`units`][crate::units] are provided to handle the minutiae
//! associated with conversion to and from naturalized units.
//!
//! # Split-step evolution
//! The right-hand side of the dimensionless Gross-Pitaevskii equation is the
//! sum of a kinetic operator *H*<sub>*k*</sub> = *k*² / 2, diagonal in
//! momentum space, and a potential operator *H*<sub>*v*</sub> = *V* +
//! *g* |*ψ*|², diagonal in position space. Approximating the propagator by a
//! symmetric (Strang) product
//! ```text
//!               -i H_v dt/2  -i H_k dt  -i H_v dt/2
//! ψ(t + dt) = [e            e          e           ] ψ(t) + O(dt³)
//! ```
//! lets each factor be applied as a pointwise phase, the kinetic one between a
//! forward and an inverse fast Fourier transform:
//! ```text
//!        ψ(t, x)
//!           |
//!           V
//!   -i (V + g|ψ|²) dt/2
//!  e
//!           |
//!           '--> FFT ---.
//!                       |
//!                       V
//!                  -i k² dt/2
//!                 e
//!                       |
//!           .-- iFFT <--'
//!           |
//!           V
//!   -i (V + g|ψ|²) dt/2
//!  e
//!           |
//!           V
//!     ψ(t + dt, x)
//! ```
//! Each factor has unit modulus, so the norm of *ψ* is preserved to machine
//! precision. The interaction term is re-evaluated from the current *ψ* before
//! each half step.
//!
//! Replacing *t* → -*i* *τ* turns every phase into a real exponential decay
//! that suppresses excited components of *ψ* faster than the ground state.
//! Renormalizing after every step and iterating until the chemical potential
//! ```text
//!     ⌠     ⎡ 1      2     2        4 ⎤
//! μ = ⎮dx dy⎢ - |∇ψ|  + V|ψ|  + g |ψ|  ⎥
//!     ⌡     ⎣ 2                         ⎦
//! ```
//! stops changing then yields the ground state of the (nonlinear) trap.
//!
//! # Bifurcations
//! For a one-dimensional flow *dx*/*dt* = *f*(*r*, *x*), equilibria are the
//! zeros of *f* at fixed *r*, and their linear stability is set by the sign of
//! ∂*f*/∂*x* there: negative slopes attract, positive slopes repel, and a zero
//! slope marks a point where the number or stability of equilibria may change
//! as *r* is varied. Near such a point, any generic flow reduces to one of a
//! few normal forms:
//! ```text
//! saddle-node               f = r - x²      pair of equilibria ±√r born at r = 0
//! transcritical             f = r x - x²    x = 0 and x = r exchange stability
//! supercritical pitchfork   f = r x - x³    x = 0 destabilizes, ±√r stable for r > 0
//! subcritical pitchfork     f = r x + x³    x = 0 stabilizes, ±√-r unstable for r < 0
//! ```
//! Equilibria of arbitrary flows are located numerically by sampling *f* over a
//! grid and interpolating the inverse function through the samples around each
//! sign change; equilibria where *f* touches zero without changing sign are
//! invisible to this approach.
