use std::f64::consts::PI;

/// Cubic lattice constant of silicon, in meters.
pub const a_Si: f64 = 5.4e-10;

/// $2\pi/a$, the natural unit of the fcc Brillouin zone.
#[inline(always)]
pub fn two_pi_over(a: f64) -> f64 {
    2.0 * PI / a
}
