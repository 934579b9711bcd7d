//! The $8\times 8$ sp3 Hamiltonian of the diamond lattice and its diagonalization.
//!
//! The Bloch basis is one s and three p orbitals on each of the two sites A and B
//! of the primitive cell, ordered
//! $(s_A, s_B, p_{x,A}, p_{y,A}, p_{z,A}, p_{x,B}, p_{y,B}, p_{z,B})$.
//! Only A-B hoppings enter, so every off-diagonal element couples an A orbital to a
//! B orbital through one of the structure factors $g_1\dots g_4$:
//!
//! | | $s_B$ | $p_{x,B}$ | $p_{y,B}$ | $p_{z,B}$ |
//! |---|---|---|---|---|
//! | $s_A$ | $V_{ss}g_1$ | $V_{sp}g_2$ | $V_{sp}g_3$ | $V_{sp}g_4$ |
//! | $p_{x,A}$ | $-V_{sp}g_2$ | $V_{xx}g_1$ | $V_{xy}g_4$ | $V_{xy}g_3$ |
//! | $p_{y,A}$ | $-V_{sp}g_3$ | $V_{xy}g_4$ | $V_{xx}g_1$ | $V_{xy}g_2$ |
//! | $p_{z,A}$ | $-V_{sp}g_4$ | $V_{xy}g_3$ | $V_{xy}g_2$ | $V_{xx}g_1$ |
//!
//! The B-A elements are the complex conjugates of this table.
use crate::error::{Result, TbError};
use crate::material::{EigenOptions, TbParams};
use crate::structure_factor::StructureFactors;
use nalgebra::{SMatrix, SymmetricEigen};
use ndarray::Array1;
use num_complex::Complex64;

/// Number of basis states.
pub const NSTA: usize = 8;

pub const S_A: usize = 0;
pub const S_B: usize = 1;
pub const PX_A: usize = 2;
pub const PY_A: usize = 3;
pub const PZ_A: usize = 4;
pub const PX_B: usize = 5;
pub const PY_B: usize = 6;
pub const PZ_B: usize = 7;

/// p orbitals of each site, in x, y, z order.
const P_A: [usize; 3] = [PX_A, PY_A, PZ_A];
const P_B: [usize; 3] = [PX_B, PY_B, PZ_B];

/// Structure factor index (into `g`) coupling $p_{\alpha,A}$ to $p_{\beta,B}$ for $\alpha\ne\beta$:
/// x-y uses $g_4$, y-z uses $g_2$, z-x uses $g_3$. Diagonal entries are the $V_{xx}g_1$ terms.
const PP_CROSS: [[usize; 3]; 3] = [[0, 3, 2], [3, 0, 1], [2, 1, 0]];

pub type Hamiltonian = SMatrix<Complex64, NSTA, NSTA>;

/// Set the A-B element and its conjugate partner.
#[inline(always)]
fn set_pair(ham: &mut Hamiltonian, i: usize, j: usize, value: Complex64) {
    ham[(i, j)] = value;
    ham[(j, i)] = value.conj();
}

/// Assemble $H(\bm k)$ from the structure factors and the tight-binding energies.
#[allow(non_snake_case)]
pub fn gen_ham(g: &StructureFactors, params: &TbParams) -> Hamiltonian {
    let mut ham = Hamiltonian::zeros();
    let Es = Complex64::new(params.e_s, 0.0);
    let Ep = Complex64::new(params.e_p, 0.0);
    ham[(S_A, S_A)] = Es;
    ham[(S_B, S_B)] = Es;
    for i in P_A.iter().chain(P_B.iter()) {
        ham[(*i, *i)] = Ep;
    }

    set_pair(&mut ham, S_A, S_B, g.g1() * params.v_ss);
    for alpha in 0..3 {
        // s-p bonds: g_2, g_3, g_4 for x, y, z
        let gs = g.g[alpha + 1];
        set_pair(&mut ham, S_A, P_B[alpha], gs * params.v_sp);
        set_pair(&mut ham, S_B, P_A[alpha], -gs.conj() * params.v_sp);
        for beta in 0..3 {
            let value = if alpha == beta {
                g.g1() * params.v_xx
            } else {
                g.g[PP_CROSS[alpha][beta]] * params.v_xy
            };
            set_pair(&mut ham, P_A[alpha], P_B[beta], value);
        }
    }
    ham
}

/// Whether `ham` equals its conjugate transpose up to `tol` in every element.
pub fn is_hermitian(ham: &Hamiltonian, tol: f64) -> bool {
    let adj = ham.adjoint();
    ham.iter().zip(adj.iter()).all(|(a, b)| (a - b).norm() <= tol)
}

/// Eigenvalues of a Hermitian matrix, ascending.
///
/// # Errors
/// `TbError::NumericalFailure` when the eigensolver does not converge within
/// `opts.max_niter` sweeps or returns a non-finite value.
pub fn eigvalsh(ham: &Hamiltonian, opts: &EigenOptions) -> Result<Array1<f64>> {
    if ham.iter().any(|x| !(x.re.is_finite() && x.im.is_finite())) {
        return Err(TbError::NumericalFailure {
            k: None,
            reason: "Hamiltonian has non-finite elements".to_string(),
        });
    }
    let eig = SymmetricEigen::try_new(*ham, opts.eps, opts.max_niter).ok_or_else(|| {
        TbError::NumericalFailure {
            k: None,
            reason: format!("no convergence within {} iterations", opts.max_niter),
        }
    })?;
    let mut eval: Vec<f64> = eig.eigenvalues.iter().copied().collect();
    if eval.iter().any(|x| !x.is_finite()) {
        return Err(TbError::NumericalFailure {
            k: None,
            reason: "non-finite eigenvalue".to_string(),
        });
    }
    eval.sort_by(|a, b| a.total_cmp(b));
    Ok(Array1::from_vec(eval))
}

/// Sorted band energies for one set of structure factors.
pub fn solve_band_onek(g: &StructureFactors, params: &TbParams, opts: &EigenOptions) -> Result<Array1<f64>> {
    let ham = gen_ham(g, params);
    eigvalsh(&ham, opts)
}
