//! Phase factors of the four diamond bonds.
//!
//! For a wavevector $\bm k$ and bond vectors $\bm d_j$ we have $e_j=e^{i\bm k\cdot\bm d_j}$ and
//! $$\\begin{aligned}
//! g_1&=\tfrac14(e_1+e_2+e_3+e_4), & g_2&=\tfrac14(e_1+e_2-e_3-e_4),\\\\
//! g_3&=\tfrac14(e_1-e_2+e_3-e_4), & g_4&=\tfrac14(e_1-e_2-e_3+e_4).
//! \\end{aligned}$$
use crate::error::{Result, TbError};
use crate::material::{N_NEIGHBORS, check_neighbors};
use ndarray::{ArrayBase, Data, Ix1, Ix2};
use num_complex::Complex64;
use num_traits::Zero;

/// Sign pattern of each $g$ over the four bonds.
const SIGNS: [[f64; N_NEIGHBORS]; 4] = [
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0, 1.0],
];

/// The structure factors $g_1\dots g_4$ at one wavevector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureFactors {
    pub g: [Complex64; 4],
}

impl StructureFactors {
    #[inline(always)]
    pub fn g1(&self) -> Complex64 {
        self.g[0]
    }
    #[inline(always)]
    pub fn g2(&self) -> Complex64 {
        self.g[1]
    }
    #[inline(always)]
    pub fn g3(&self) -> Complex64 {
        self.g[2]
    }
    #[inline(always)]
    pub fn g4(&self) -> Complex64 {
        self.g[3]
    }
}

/// Length-3 check for a wavevector, returning it as a fixed array.
pub(crate) fn kvec3<S: Data<Elem = f64>>(kvec: &ArrayBase<S, Ix1>) -> Result<[f64; 3]> {
    if kvec.len() != 3 {
        return Err(TbError::shape("wavevector components", 3, kvec.len()));
    }
    Ok([kvec[0], kvec[1], kvec[2]])
}

/// Per-bond phases $e^{i\bm k\cdot\bm d_j}$.
pub fn bond_phases<S, T>(kvec: &ArrayBase<S, Ix1>, neighbors: &ArrayBase<T, Ix2>) -> Result<[Complex64; N_NEIGHBORS]>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
{
    kvec3(kvec)?;
    check_neighbors(neighbors)?;
    let kd = neighbors.dot(kvec);
    let mut e = [Complex64::new(1.0, 0.0); N_NEIGHBORS];
    for (ej, phase) in e.iter_mut().zip(kd.iter()) {
        *ej = Complex64::new(0.0, *phase).exp();
    }
    Ok(e)
}

/// Compute $g_1\dots g_4$ for the wavevector `kvec` and the $4\times 3$ bond array `neighbors`.
///
/// # Errors
/// `TbError::ShapeMismatch` if `kvec` is not of length 3 or `neighbors` is not $4\times 3$.
pub fn structure_factors<S, T>(kvec: &ArrayBase<S, Ix1>, neighbors: &ArrayBase<T, Ix2>) -> Result<StructureFactors>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
{
    let e = bond_phases(kvec, neighbors)?;
    let mut g = [Complex64::zero(); 4];
    for (gi, signs) in g.iter_mut().zip(SIGNS.iter()) {
        let sum = e
            .iter()
            .zip(signs.iter())
            .fold(Complex64::zero(), |acc, (ej, s)| acc + *ej * *s);
        *gi = sum / 4.0;
    }
    Ok(StructureFactors { g })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::DiamondLattice;
    use crate::phy_const::two_pi_over;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, array};

    #[test]
    fn test_gamma() {
        let lat = DiamondLattice::new(5.4e-10);
        let g = structure_factors(&array![0.0, 0.0, 0.0], lat.neighbors()).unwrap();
        assert_eq!(g.g1(), Complex64::new(1.0, 0.0));
        assert_eq!(g.g2(), Complex64::new(0.0, 0.0));
        assert_eq!(g.g3(), Complex64::new(0.0, 0.0));
        assert_eq!(g.g4(), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_x_point() {
        // at X=(0,0,1)2pi/a the phases are exp(+-i pi/2), so only g4 survives
        let a = 5.4e-10;
        let lat = DiamondLattice::new(a);
        let k = array![0.0, 0.0, 1.0] * two_pi_over(a);
        let g = structure_factors(&k, lat.neighbors()).unwrap();
        assert_abs_diff_eq!(g.g1().norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.g2().norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.g3().norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.g4().im, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.g4().re, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unit_modulus_phases() {
        let lat = DiamondLattice::new(1.0);
        let e = bond_phases(&array![0.3, -1.7, 2.2], lat.neighbors()).unwrap();
        for ej in e.iter() {
            assert_abs_diff_eq!(ej.norm(), 1.0, epsilon = 1e-14);
        }
        // sum of |g|^2 equals the mean of |e_j|^2 by orthogonality of the sign patterns
        let g = structure_factors(&array![0.3, -1.7, 2.2], lat.neighbors()).unwrap();
        let total: f64 = g.g.iter().map(|x| x.norm_sqr()).sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shape_mismatch() {
        let bad = Array2::<f64>::zeros((3, 3));
        assert!(matches!(
            structure_factors(&array![0.0, 0.0, 0.0], &bad),
            Err(TbError::ShapeMismatch { expected: 4, found: 3, .. })
        ));
        let lat = DiamondLattice::new(1.0);
        assert!(matches!(
            structure_factors(&array![0.0, 0.0], lat.neighbors()),
            Err(TbError::ShapeMismatch { expected: 3, found: 2, .. })
        ));
    }
}
