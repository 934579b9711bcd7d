//! k-point paths through the fcc Brillouin zone.
use crate::error::{Result, TbError};
use crate::phy_const::two_pi_over;
use crate::structure_factor::kvec3;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2, arr1};
use serde::{Deserialize, Serialize};

/// High-symmetry points of the fcc Brillouin zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighSymmetryPoint {
    Gamma,
    X,
    L,
    W,
    K,
    U,
}

impl HighSymmetryPoint {
    /// Coordinates in units of $2\pi/a$.
    pub fn reduced(&self) -> [f64; 3] {
        match self {
            Self::Gamma => [0.0, 0.0, 0.0],
            Self::X => [0.0, 0.0, 1.0],
            Self::L => [0.5, 0.5, 0.5],
            Self::W => [1.0, 0.5, 0.0],
            Self::K => [0.75, 0.75, 0.0],
            Self::U => [1.0, 0.25, 0.25],
        }
    }

    /// Cartesian wavevector for the cubic lattice constant `a`.
    pub fn coords(&self, a: f64) -> Array1<f64> {
        arr1(&self.reduced()) * two_pi_over(a)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Gamma => "G",
            Self::X => "X",
            Self::L => "L",
            Self::W => "W",
            Self::K => "K",
            Self::U => "U",
        }
    }
}

/// Stack the coordinates of several high-symmetry points into a node array for [`k_path`].
pub fn path_nodes(points: &[HighSymmetryPoint], a: f64) -> Array2<f64> {
    let mut nodes = Array2::<f64>::zeros((points.len(), 3));
    for (mut row, p) in nodes.outer_iter_mut().zip(points.iter()) {
        row.assign(&p.coords(a));
    }
    nodes
}

/// `n` evenly spaced wavevectors from `start` towards `end`, one per row.
///
/// With `include_end` the spacing is $(\bm k_{end}-\bm k_{start})/(n-1)$ and the last row is
/// exactly `end`; otherwise the spacing is $(\bm k_{end}-\bm k_{start})/n$ and every row lies
/// strictly before `end`.
pub fn linspace_path<S, T>(start: &ArrayBase<S, Ix1>, end: &ArrayBase<T, Ix1>, n: usize, include_end: bool) -> Result<Array2<f64>>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
{
    let k_i = kvec3(start)?;
    let k_f = kvec3(end)?;
    let mut kvec = Array2::<f64>::zeros((n, 3));
    if n == 0 {
        return Ok(kvec);
    }
    let div = if include_end { n - 1 } else { n };
    for (i, mut row) in kvec.outer_iter_mut().enumerate() {
        for r in 0..3 {
            row[r] = if div == 0 {
                k_i[r]
            } else {
                let step = (k_f[r] - k_i[r]) / (div as f64);
                k_i[r] + (i as f64) * step
            };
        }
    }
    if include_end && n > 1 {
        kvec.row_mut(n - 1).assign(end);
    }
    Ok(kvec)
}

/// Join straight segments between consecutive `nodes` into one path.
///
/// Segment `i` runs from node `i` to node `i+1` with `n_per_segment[i]` points; every segment
/// but the last drops its end point, so shared vertices appear once. Each inner segment needs at
/// least one point and the last at least two, so that every node appears in `k_vec`.
///
/// Returns `(k_vec, k_dist, k_node)`: the wavevectors, the cumulative distance along the path of
/// each of them, and the distance at which each node sits. The last two are the x axis of a
/// band plot.
pub fn k_path<S: Data<Elem = f64>>(
    nodes: &ArrayBase<S, Ix2>,
    n_per_segment: &[usize],
) -> Result<(Array2<f64>, Array1<f64>, Array1<f64>)> {
    let n_node = nodes.nrows();
    if n_node < 2 {
        return Err(TbError::shape("k-path nodes", 2, n_node));
    }
    if nodes.ncols() != 3 {
        return Err(TbError::shape("k-path node components", 3, nodes.ncols()));
    }
    if n_per_segment.len() != n_node - 1 {
        return Err(TbError::shape("k-path segments", n_node - 1, n_per_segment.len()));
    }
    for (i, n) in n_per_segment.iter().enumerate() {
        let least = if i == n_node - 2 { 2 } else { 1 };
        if *n < least {
            return Err(TbError::shape(format!("points in k-path segment {}", i), least, *n));
        }
    }
    let mut k_node = Array1::<f64>::zeros(n_node);
    for n in 1..n_node {
        let dk = &nodes.row(n) - &nodes.row(n - 1);
        k_node[[n]] = k_node[[n - 1]] + dk.dot(&dk).sqrt();
    }
    let mut k_vec = Array2::<f64>::zeros((0, 3));
    let mut k_dist = Vec::new();
    for n in 1..n_node {
        let last = n == n_node - 1;
        let seg = linspace_path(&nodes.row(n - 1), &nodes.row(n), n_per_segment[n - 1], last)?;
        let start = nodes.row(n - 1);
        for k in seg.outer_iter() {
            let dk = &k - &start;
            k_dist.push(k_node[[n - 1]] + dk.dot(&dk).sqrt());
        }
        k_vec
            .append(Axis(0), seg.view())
            .map_err(|_| TbError::shape("k-path segment components", 3, seg.ncols()))?;
    }
    Ok((k_vec, Array1::from_vec(k_dist), k_node))
}
