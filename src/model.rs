//! Band energies of the sp3 diamond model along a path of wavevectors.
use crate::error::{Result, TbError};
use crate::hamiltonian::{self, Hamiltonian, NSTA};
use crate::material::{DiamondLattice, EigenOptions, Material, TbParams};
use crate::structure_factor::{kvec3, structure_factors};
use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// An sp3 tight-binding model on the diamond lattice.
///
/// The model holds only immutable configuration, so one instance can be shared by any
/// number of threads evaluating different wavevectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiamondModel {
    /// The six empirical energies
    pub params: TbParams,
    /// Nearest-neighbour bond vectors
    pub lattice: DiamondLattice,
    /// Eigensolver settings
    pub eigen: EigenOptions,
}

impl DiamondModel {
    pub fn new(params: TbParams, lattice: DiamondLattice) -> Self {
        Self {
            params,
            lattice,
            eigen: EigenOptions::default(),
        }
    }

    pub fn from_material(material: &Material) -> Self {
        Self::new(material.params, material.lattice())
    }

    pub fn with_eigen_options(mut self, eigen: EigenOptions) -> Self {
        self.eigen = eigen;
        self
    }

    #[inline(always)]
    pub fn nsta(&self) -> usize {
        NSTA
    }

    /// $H(\bm k)$ at the Cartesian wavevector `kvec`.
    pub fn gen_ham<S: Data<Elem = f64>>(&self, kvec: &ArrayBase<S, Ix1>) -> Result<Hamiltonian> {
        let g = structure_factors(kvec, self.lattice.neighbors())?;
        Ok(hamiltonian::gen_ham(&g, &self.params))
    }

    /// The eight band energies at one wavevector, ascending.
    pub fn solve_band_onek<S: Data<Elem = f64>>(&self, kvec: &ArrayBase<S, Ix1>) -> Result<Array1<f64>> {
        let k = kvec3(kvec)?;
        let g = structure_factors(kvec, self.lattice.neighbors())?;
        hamiltonian::solve_band_onek(&g, &self.params, &self.eigen).map_err(|e| {
            warn!("eigensolver failed at k={:?}", k);
            e.at_k(k)
        })
    }

    /// Band matrix of shape `(8, nk)` for the wavevectors in the rows of `kvec`, in path order.
    ///
    /// Row `n` holds the n-th lowest energy at every k-point. The rank is taken point by
    /// point, so bands that cross swap rows there.
    pub fn solve_band_all<S: Data<Elem = f64>>(&self, kvec: &ArrayBase<S, Ix2>) -> Result<Array2<f64>> {
        let nk = check_path(kvec)?;
        debug!("solving {} k-points", nk);
        let mut band = Array2::<f64>::zeros((NSTA, nk));
        for (k, mut col) in kvec.outer_iter().zip(band.axis_iter_mut(Axis(1))) {
            let eval = self.solve_band_onek(&k)?;
            col.assign(&eval);
        }
        Ok(band)
    }

    /// Same as [`solve_band_all`](Self::solve_band_all), one task per k-point on the rayon pool.
    pub fn solve_band_all_parallel<S>(&self, kvec: &ArrayBase<S, Ix2>) -> Result<Array2<f64>>
    where
        S: Data<Elem = f64> + Sync,
    {
        let nk = check_path(kvec)?;
        debug!("solving {} k-points in parallel", nk);
        let evals: Vec<Array1<f64>> = (0..nk)
            .into_par_iter()
            .map(|i| self.solve_band_onek(&kvec.row(i)))
            .collect::<Result<Vec<_>>>()?;
        let mut band = Array2::<f64>::zeros((NSTA, nk));
        for (eval, mut col) in evals.iter().zip(band.axis_iter_mut(Axis(1))) {
            col.assign(eval);
        }
        Ok(band)
    }

    /// Serial evaluation that stops before the next k-point once `cancel` is set.
    ///
    /// # Errors
    /// `TbError::Cancelled` carrying the number of finished k-points.
    pub fn solve_band_all_cancellable<S: Data<Elem = f64>>(
        &self,
        kvec: &ArrayBase<S, Ix2>,
        cancel: &AtomicBool,
    ) -> Result<Array2<f64>> {
        let nk = check_path(kvec)?;
        let mut band = Array2::<f64>::zeros((NSTA, nk));
        for (i, (k, mut col)) in kvec.outer_iter().zip(band.axis_iter_mut(Axis(1))).enumerate() {
            if cancel.load(Ordering::Relaxed) {
                debug!("cancelled after {} of {} k-points", i, nk);
                return Err(TbError::Cancelled { done: i });
            }
            col.assign(&self.solve_band_onek(&k)?);
        }
        Ok(band)
    }
}

fn check_path<S: Data<Elem = f64>>(kvec: &ArrayBase<S, Ix2>) -> Result<usize> {
    if kvec.ncols() != 3 {
        return Err(TbError::shape("k-path components", 3, kvec.ncols()));
    }
    Ok(kvec.nrows())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::is_hermitian;
    use crate::kpoints::{HighSymmetryPoint, k_path, linspace_path, path_nodes};
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, array};

    fn silicon() -> DiamondModel {
        DiamondModel::from_material(&Material::silicon())
    }

    #[test]
    fn test_gamma_conduction_band() {
        let model = silicon();
        let eval = model.solve_band_onek(&array![0.0, 0.0, 0.0]).unwrap();
        assert_abs_diff_eq!(eval[4], 8.13, epsilon = 1e-9);
        assert_abs_diff_eq!(eval[0], -8.13, epsilon = 1e-9);
        assert_abs_diff_eq!(eval[3], 7.20 - 3.17, epsilon = 1e-9);
    }

    #[test]
    fn test_lambda_minimum_at_l() {
        let model = silicon();
        let a = model.lattice.a();
        let l = HighSymmetryPoint::L.coords(a);
        let g = HighSymmetryPoint::Gamma.coords(a);
        let x = HighSymmetryPoint::X.coords(a);
        let n = 100;
        let lambda = linspace_path(&l, &g, n, false).unwrap();
        let delta = linspace_path(&g, &x, n, true).unwrap();
        let mut kvec = lambda.clone();
        kvec.append(Axis(0), delta.view()).unwrap();
        let band = model.solve_band_all(&kvec).unwrap();
        assert_eq!(band.shape(), &[8, 2 * n]);
        let cb = band.row(4);
        let seg = cb.slice(ndarray::s![0..n]);
        let (imin, emin) = seg
            .iter()
            .enumerate()
            .fold((0, f64::INFINITY), |acc, (i, e)| if *e < acc.1 { (i, *e) } else { acc });
        assert_eq!(imin, 0);
        assert_abs_diff_eq!(emin, 7.95, epsilon = 0.01);
    }

    #[test]
    fn test_hermitian_along_path() {
        let model = silicon();
        let nodes = path_nodes(
            &[HighSymmetryPoint::W, HighSymmetryPoint::L, HighSymmetryPoint::Gamma, HighSymmetryPoint::X, HighSymmetryPoint::K],
            model.lattice.a(),
        );
        let (k_vec, _, _) = k_path(&nodes, &[7, 7, 7, 7]).unwrap();
        for k in k_vec.outer_iter() {
            assert!(is_hermitian(&model.gen_ham(&k).unwrap(), 1e-12));
        }
    }

    #[test]
    fn test_single_point_path() {
        let model = silicon();
        let k = array![1.0e9, -2.0e9, 3.5e9];
        let kvec = k.clone().insert_axis(Axis(0));
        let band = model.solve_band_all(&kvec).unwrap();
        assert_eq!(band.shape(), &[8, 1]);
        assert_eq!(band.column(0), model.solve_band_onek(&k).unwrap());
    }

    #[test]
    fn test_deterministic_and_parallel() {
        let model = silicon();
        let a = model.lattice.a();
        let nodes = path_nodes(&[HighSymmetryPoint::L, HighSymmetryPoint::Gamma, HighSymmetryPoint::X], a);
        let (k_vec, _, _) = k_path(&nodes, &[40, 41]).unwrap();
        let first = model.solve_band_all(&k_vec).unwrap();
        let second = model.solve_band_all(&k_vec).unwrap();
        let par = model.solve_band_all_parallel(&k_vec).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, par);
        for col in first.axis_iter(Axis(1)) {
            for w in col.windows(2) {
                assert!(w[0] <= w[1]);
            }
        }
    }

    #[test]
    fn test_empty_path() {
        let model = silicon();
        let band = model.solve_band_all(&Array2::<f64>::zeros((0, 3))).unwrap();
        assert_eq!(band.shape(), &[8, 0]);
    }

    #[test]
    fn test_shape_errors() {
        let model = silicon();
        assert!(matches!(
            model.solve_band_all(&Array2::<f64>::zeros((5, 2))),
            Err(TbError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            model.solve_band_onek(&array![0.0, 0.0, 0.0, 0.0]),
            Err(TbError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_numerical_failure_carries_k() {
        let model = silicon().with_eigen_options(EigenOptions {
            eps: f64::EPSILON,
            max_niter: 1,
        });
        let k = array![1.0e9, -2.0e9, 3.5e9];
        match model.solve_band_onek(&k) {
            Err(TbError::NumericalFailure { k: Some(at), .. }) => assert_eq!(at, [1.0e9, -2.0e9, 3.5e9]),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_cancel() {
        let model = silicon();
        let kvec = Array2::<f64>::zeros((4, 3));
        let cancel = AtomicBool::new(true);
        assert!(matches!(
            model.solve_band_all_cancellable(&kvec, &cancel),
            Err(TbError::Cancelled { done: 0 })
        ));
        cancel.store(false, Ordering::Relaxed);
        let band = model.solve_band_all_cancellable(&kvec, &cancel).unwrap();
        assert_eq!(band, model.solve_band_all(&kvec).unwrap());
    }
}
