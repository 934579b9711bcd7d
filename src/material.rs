//! Configuration values of the model: the six empirical energies, the diamond
//! neighbour geometry and the eigensolver options. All of them are plain
//! immutable values handed to [`DiamondModel`](crate::DiamondModel).
use crate::error::{Result, TbError};
use crate::phy_const::a_Si;
use ndarray::{Array2, ArrayBase, Data, Ix2, arr2};
use serde::{Deserialize, Serialize};

/// Number of empirical parameters of the sp3 diamond model.
pub const N_PARAMS: usize = 6;
/// Number of nearest neighbours of a diamond-lattice site.
pub const N_NEIGHBORS: usize = 4;

/// Empirical tight-binding energies, in eV.
///
/// The order used by [`TbParams::from_slice`] and [`TbParams::to_array`] is fixed:
/// $(E_s, E_p, V_{ss}, V_{sp}, V_{xx}, V_{xy})$.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TbParams {
    /// On-site energy of the s orbitals
    pub e_s: f64,
    /// On-site energy of the p orbitals
    pub e_p: f64,
    /// $V_{ss}$, s-s hopping
    pub v_ss: f64,
    /// $V_{sp}$, s-p hopping
    pub v_sp: f64,
    /// $V_{xx}$, p-p hopping between parallel orbitals
    pub v_xx: f64,
    /// $V_{xy}$, p-p hopping between perpendicular orbitals
    pub v_xy: f64,
}

impl TbParams {
    pub fn new(e_s: f64, e_p: f64, v_ss: f64, v_sp: f64, v_xx: f64, v_xy: f64) -> Self {
        Self {
            e_s,
            e_p,
            v_ss,
            v_sp,
            v_xx,
            v_xy,
        }
    }

    /// Build the parameters from a slice in the fixed order.
    ///
    /// # Errors
    /// Returns `TbError::ShapeMismatch` unless the slice holds exactly six values.
    pub fn from_slice(p: &[f64]) -> Result<Self> {
        match *p {
            [e_s, e_p, v_ss, v_sp, v_xx, v_xy] => Ok(Self::new(e_s, e_p, v_ss, v_sp, v_xx, v_xy)),
            _ => Err(TbError::shape("tight-binding parameters", N_PARAMS, p.len())),
        }
    }

    pub fn to_array(&self) -> [f64; N_PARAMS] {
        [self.e_s, self.e_p, self.v_ss, self.v_sp, self.v_xx, self.v_xy]
    }

    /// Chadi-Cohen parameters of silicon with $E_s$ taken as the energy zero.
    pub fn silicon() -> Self {
        Self::new(0.0, 7.20, -8.13, 5.88, 3.17, 7.51)
    }
}

impl TryFrom<&[f64]> for TbParams {
    type Error = TbError;
    fn try_from(p: &[f64]) -> Result<Self> {
        Self::from_slice(p)
    }
}

/// Nearest-neighbour geometry of the diamond lattice.
///
/// `neighbors` is a $4\times 3$ array, each row a Cartesian displacement from an
/// A site to one of its four B neighbours, in the same length unit as `a`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiamondLattice {
    a: f64,
    neighbors: Array2<f64>,
}

impl DiamondLattice {
    /// The standard neighbour set $\frac{a}{4}(1,1,1)$, $\frac{a}{4}(1,\bar1,\bar1)$,
    /// $\frac{a}{4}(\bar1,1,\bar1)$, $\frac{a}{4}(\bar1,\bar1,1)$.
    pub fn new(a: f64) -> Self {
        let neighbors = arr2(&[
            [1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
        ]) * (a / 4.0);
        Self { a, neighbors }
    }

    /// Use a caller-supplied neighbour set, e.g. a strained lattice.
    ///
    /// # Errors
    /// Returns `TbError::ShapeMismatch` if `neighbors` is not $4\times 3$.
    pub fn from_neighbors<S: Data<Elem = f64>>(a: f64, neighbors: &ArrayBase<S, Ix2>) -> Result<Self> {
        check_neighbors(neighbors)?;
        Ok(Self {
            a,
            neighbors: neighbors.to_owned(),
        })
    }

    /// Cubic lattice constant
    #[inline(always)]
    pub fn a(&self) -> f64 {
        self.a
    }

    #[inline(always)]
    pub fn neighbors(&self) -> &Array2<f64> {
        &self.neighbors
    }
}

pub(crate) fn check_neighbors<S: Data<Elem = f64>>(neighbors: &ArrayBase<S, Ix2>) -> Result<()> {
    if neighbors.nrows() != N_NEIGHBORS {
        return Err(TbError::shape("neighbor vectors", N_NEIGHBORS, neighbors.nrows()));
    }
    if neighbors.ncols() != 3 {
        return Err(TbError::shape("neighbor vector components", 3, neighbors.ncols()));
    }
    Ok(())
}

/// Options of the dense Hermitian eigensolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EigenOptions {
    /// Convergence threshold on the off-diagonal elements
    pub eps: f64,
    /// Maximum number of implicit QR sweeps; `0` means unbounded
    pub max_niter: usize,
}

impl Default for EigenOptions {
    fn default() -> Self {
        Self {
            eps: f64::EPSILON,
            max_niter: 1000,
        }
    }
}

/// A named material: lattice constant plus tight-binding energies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Cubic lattice constant, in meters
    pub a: f64,
    pub params: TbParams,
}

impl Material {
    pub fn silicon() -> Self {
        Self {
            name: "Si".to_string(),
            a: a_Si,
            params: TbParams::silicon(),
        }
    }

    pub fn lattice(&self) -> DiamondLattice {
        DiamondLattice::new(self.a)
    }
}
