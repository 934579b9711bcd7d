#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]
//! This crate computes the band structure of diamond-lattice semiconductors with the
//! empirical sp3 tight-binding model, currently including:
//!
//! 1: The structure factors $g_1\dots g_4$ of the four nearest-neighbour bonds
//!
//! 2: The $8\times 8$ Bloch Hamiltonian and its sorted eigenvalues at any wavevector
//!
//! 3: Band energies along straight k-paths through the fcc Brillouin zone, serially or on the rayon pool
//!
//! 4: Band minima, band edges and plain-text band files
//!
//! ```
//! use Rustb_sp3::*;
//!
//! let si = Material::silicon();
//! let model = DiamondModel::from_material(&si);
//! let nodes = path_nodes(&[HighSymmetryPoint::L, HighSymmetryPoint::Gamma, HighSymmetryPoint::X], si.a);
//! let (k_vec, _k_dist, _k_node) = k_path(&nodes, &[50, 51]).unwrap();
//! let bands = model.solve_band_all_parallel(&k_vec).unwrap();
//! let cbm = band_minimum(&bands, N_OCCUPIED).unwrap();
//! assert_eq!(cbm.positions, vec![0]); // the conduction band bottoms out at L on this path
//! ```
pub mod analysis;
pub mod error;
pub mod hamiltonian;
pub mod kpoints;
pub mod material;
pub mod model;
pub mod output;
pub mod phy_const;
pub mod structure_factor;

pub use crate::analysis::{BandEdges, BandExtremum, N_OCCUPIED, band_edges, band_maximum, band_minimum};
pub use crate::error::{Result, TbError};
pub use crate::hamiltonian::{Hamiltonian, NSTA, gen_ham, is_hermitian};
pub use crate::kpoints::{HighSymmetryPoint, k_path, linspace_path, path_nodes};
pub use crate::material::{DiamondLattice, EigenOptions, Material, TbParams};
pub use crate::model::DiamondModel;
pub use crate::structure_factor::{StructureFactors, structure_factors};
