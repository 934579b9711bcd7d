//! Writing band structures to disk: `BAND.dat`, `KLABELS` and a matplotlib script.
//!
//! These are consumers of a band matrix; nothing in the solver calls them.
use crate::error::{Result, TbError};
use ndarray::{ArrayBase, Axis, Data, Ix1, Ix2};
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::Path;

/// Format one value the way the band files are laid out: a fixed-width column with
/// room for the sign.
fn push_value(s0: &mut String, x: f64) {
    if x >= 0.0 {
        s0.push_str("     ");
    } else {
        s0.push_str("    ");
    }
    s0.push_str(&format!("{:.6}", x));
}

/// Write `BAND.dat` into `dir`: one line per k-point, the path distance followed by every band.
///
/// `bands` has shape `(nband, nk)` and `k_dist` length `nk`.
pub fn write_band<S, T>(dir: &Path, k_dist: &ArrayBase<S, Ix1>, bands: &ArrayBase<T, Ix2>) -> Result<()>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
{
    if k_dist.len() != bands.ncols() {
        return Err(TbError::shape("k-points in BAND.dat", bands.ncols(), k_dist.len()));
    }
    create_dir_all(dir)?;
    let mut file = File::create(dir.join("BAND.dat"))?;
    for (d, col) in k_dist.iter().zip(bands.axis_iter(Axis(1))) {
        let mut s0 = format!("{:.6}", d);
        for e in col.iter() {
            push_value(&mut s0, *e);
        }
        writeln!(file, "{}", s0)?;
    }
    Ok(())
}

/// Write `KLABELS` into `dir`: the path distance of every node and its label.
pub fn write_klabels<S: Data<Elem = f64>>(dir: &Path, k_node: &ArrayBase<S, Ix1>, label: &[&str]) -> Result<()> {
    if k_node.len() != label.len() {
        return Err(TbError::shape("k-path labels", k_node.len(), label.len()));
    }
    create_dir_all(dir)?;
    let mut file = File::create(dir.join("KLABELS"))?;
    for (x, l) in k_node.iter().zip(label.iter()) {
        writeln!(file, "{:.6}      {}", x, l)?;
    }
    Ok(())
}

/// Matplotlib script reading `BAND.dat` and `KLABELS` from its own directory; energies in eV.
const PRINT_PY: &str = r#"import numpy as np
import matplotlib.pyplot as plt

data = np.loadtxt('BAND.dat')
k_nodes, label = [], []
with open('KLABELS') as f:
    for line in f:
        x, l = line.split()[:2]
        k_nodes.append(float(x))
        label.append(l)
fig, ax = plt.subplots()
ax.plot(data[:, 0], data[:, 1:], c='b')
for x in k_nodes:
    ax.axvline(x, c='k', lw=0.5)
ax.axhline(0, c='gray', ls='--', lw=0.5)
ax.set_xticks(k_nodes)
ax.set_xticklabels(label)
ax.set_xlim([k_nodes[0], k_nodes[-1]])
ax.set_ylabel('E (eV)')
fig.savefig('band.pdf')"#;

/// Write `BAND.dat`, `KLABELS` and a `print.py` that plots them into `band.pdf`.
pub fn show_band<S, T, U>(
    dir: &Path,
    k_dist: &ArrayBase<S, Ix1>,
    k_node: &ArrayBase<T, Ix1>,
    label: &[&str],
    bands: &ArrayBase<U, Ix2>,
) -> Result<()>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
    U: Data<Elem = f64>,
{
    write_band(dir, k_dist, bands)?;
    write_klabels(dir, k_node, label)?;
    let mut file = File::create(dir.join("print.py"))?;
    writeln!(file, "{}", PRINT_PY)?;
    Ok(())
}
