//! Extrema of band matrices: the minimum of one band along a path and the band edges.
use crate::error::{Result, TbError};
use ndarray::{ArrayBase, Data, Ix2};

/// Occupied bands of an sp3 diamond semiconductor (8 electrons per cell, 2 per band).
pub const N_OCCUPIED: usize = 4;

/// Extremum of one band row.
#[derive(Debug, Clone, PartialEq)]
pub struct BandExtremum {
    /// Band rank (row of the band matrix)
    pub band: usize,
    pub energy: f64,
    /// Every path position where `energy` is reached
    pub positions: Vec<usize>,
}

/// Valence-band maximum, conduction-band minimum and the gap between them.
#[derive(Debug, Clone, PartialEq)]
pub struct BandEdges {
    pub vbm: BandExtremum,
    pub cbm: BandExtremum,
    pub gap: f64,
}

impl BandEdges {
    /// Whether no VBM position coincides with a CBM position.
    pub fn is_indirect(&self) -> bool {
        !self.vbm.positions.iter().any(|p| self.cbm.positions.contains(p))
    }
}

fn extremum<S: Data<Elem = f64>>(bands: &ArrayBase<S, Ix2>, band: usize, lowest: bool) -> Result<BandExtremum> {
    if band >= bands.nrows() {
        return Err(TbError::shape("band index bound", bands.nrows(), band + 1));
    }
    if bands.ncols() == 0 {
        return Err(TbError::shape("k-points in band matrix", 1, 0));
    }
    let row = bands.row(band);
    let energy = if lowest {
        row.iter().copied().fold(f64::INFINITY, f64::min)
    } else {
        row.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    };
    let positions = row
        .iter()
        .enumerate()
        .filter(|(_, e)| **e == energy)
        .map(|(i, _)| i)
        .collect();
    Ok(BandExtremum {
        band,
        energy,
        positions,
    })
}

/// Minimum of row `band` of a `(nband, nk)` band matrix and the positions achieving it.
///
/// # Errors
/// `TbError::ShapeMismatch` if `band` is out of range or the matrix has no columns.
pub fn band_minimum<S: Data<Elem = f64>>(bands: &ArrayBase<S, Ix2>, band: usize) -> Result<BandExtremum> {
    extremum(bands, band, true)
}

/// Maximum of row `band`, see [`band_minimum`].
pub fn band_maximum<S: Data<Elem = f64>>(bands: &ArrayBase<S, Ix2>, band: usize) -> Result<BandExtremum> {
    extremum(bands, band, false)
}

/// Band edges with the first `n_occupied` rows filled.
pub fn band_edges<S: Data<Elem = f64>>(bands: &ArrayBase<S, Ix2>, n_occupied: usize) -> Result<BandEdges> {
    if n_occupied == 0 {
        return Err(TbError::shape("occupied bands", 1, 0));
    }
    let vbm = band_maximum(bands, n_occupied - 1)?;
    let cbm = band_minimum(bands, n_occupied)?;
    let gap = cbm.energy - vbm.energy;
    Ok(BandEdges { vbm, cbm, gap })
}
