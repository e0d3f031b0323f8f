//! Sampling

use crate::geometry::*;
use crate::mc::*;

/// Threshold on 1 - |dir_z| below which the spin rotation switches to the
/// stable near-vertical branch.
pub const ONE_MINUS_COS_ZERO: Float = 1.0e-12;

/// Uniformly sample a direction on the unit sphere; the polar cosine is
/// uniform in [-1, 1] and the azimuth uniform in [0, 2π).
///
/// * `u1` - Uniform sample for the polar cosine.
/// * `u2` - Uniform sample for the azimuth.
pub fn uniform_sample_sphere(u1: Float, u2: Float) -> Vector3f {
    let cos_theta = 2.0 * u1 - 1.0;
    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    let psi = TWO_PI * u2;
    Vector3f::new(sin_theta * cos(psi), sin_theta * sin(psi), cos_theta)
}

/// Sample the deflection cosine from the Henyey-Greenstein phase function.
/// For `g` = 0 the distribution is isotropic; otherwise the standard
/// inverse-CDF form is used. The result is clamped to [-1, 1] against
/// floating point drift at the distribution edges.
///
/// * `g` - The anisotropy factor in [-1, 1].
/// * `u` - Uniform sample.
pub fn henyey_greenstein_cos_theta(g: Float, u: Float) -> Float {
    if g == 0.0 {
        2.0 * u - 1.0
    } else {
        let temp = (1.0 - g * g) / (1.0 - g + 2.0 * g * u);
        clamp((1.0 + g * g - temp * temp) / (2.0 * g), -1.0, 1.0)
    }
}

/// Rotate a unit direction by a sampled deflection angle and azimuth using
/// the direction-cosine update. Near-vertical directions take the stable
/// branch that avoids the vanishing `sqrt(1 - uz²)` denominator.
///
/// * `dir`       - The current unit direction.
/// * `cos_theta` - Cosine of the deflection angle.
/// * `psi`       - Azimuthal angle in [0, 2π).
pub fn spin_direction(dir: &Vector3f, cos_theta: Float, psi: Float) -> Vector3f {
    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();

    let cos_psi = cos(psi);
    let sin_psi = if psi < PI {
        (1.0 - cos_psi * cos_psi).sqrt()
    } else {
        -(1.0 - cos_psi * cos_psi).sqrt()
    };

    let (ux, uy, uz) = (dir.x, dir.y, dir.z);
    if abs(uz) > 1.0 - ONE_MINUS_COS_ZERO {
        Vector3f::new(
            sin_theta * cos_psi,
            sin_theta * sin_psi,
            cos_theta * sign(uz),
        )
    } else {
        let temp = (1.0 - uz * uz).sqrt();
        Vector3f::new(
            sin_theta * (ux * uz * cos_psi - uy * sin_psi) / temp + ux * cos_theta,
            sin_theta * (uy * uz * cos_psi + ux * sin_psi) / temp + uy * cos_theta,
            -sin_theta * cos_psi * temp + uz * cos_theta,
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RandomStream;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    fn unit_interval_strategy() -> impl Strategy<Value = Float> {
        1e-9..1.0_f64
    }

    #[test]
    fn isotropic_cos_theta_with_zero_anisotropy() {
        assert_eq!(henyey_greenstein_cos_theta(0.0, 0.5), 0.0);
        assert_eq!(henyey_greenstein_cos_theta(0.0, 1.0), 1.0);
        assert_eq!(henyey_greenstein_cos_theta(0.0, 0.0), -1.0);
    }

    #[test]
    fn mean_deflection_cosine_approaches_anisotropy() {
        let mut rng = RandomStream::new([1000, 2000, 3000, 4000]);
        let g = 0.9;
        let n = 50_000;
        let sum: Float = (0..n)
            .map(|_| henyey_greenstein_cos_theta(g, rng.uniform_float()))
            .sum();
        let mean = sum / n as Float;
        assert!((mean - g).abs() < 0.02, "mean deflection drifted: {}", mean);
    }

    #[test]
    fn spin_from_vertical_takes_stable_branch() {
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let down = Vector3f::new(0.0, 0.0, -1.0);

        let d = spin_direction(&up, 0.5, 1.0);
        assert!(approx_eq!(Float, d.length(), 1.0, epsilon = 1e-9));
        assert!(d.z > 0.0);

        let d = spin_direction(&down, 0.5, 1.0);
        assert!(approx_eq!(Float, d.length(), 1.0, epsilon = 1e-9));
        assert!(d.z < 0.0);
    }

    proptest! {
        #[test]
        fn sampled_source_directions_are_unit_length(
            u1 in unit_interval_strategy(),
            u2 in unit_interval_strategy()
        ) {
            let d = uniform_sample_sphere(u1, u2);
            prop_assert!(approx_eq!(Float, d.length(), 1.0, epsilon = 1e-9));
        }

        #[test]
        fn deflection_cosine_stays_in_range(
            g in -0.99..0.99_f64,
            u in unit_interval_strategy()
        ) {
            let c = henyey_greenstein_cos_theta(g, u);
            prop_assert!((-1.0..=1.0).contains(&c));
        }

        #[test]
        fn spin_preserves_unit_length(
            u1 in unit_interval_strategy(),
            u2 in unit_interval_strategy(),
            g in -0.99..0.99_f64,
            u3 in unit_interval_strategy(),
            u4 in unit_interval_strategy()
        ) {
            let dir = uniform_sample_sphere(u1, u2);
            let cos_theta = henyey_greenstein_cos_theta(g, u3);
            let psi = TWO_PI * u4;

            let spun = spin_direction(&dir, cos_theta, psi);
            prop_assert!(approx_eq!(Float, spun.length(), 1.0, epsilon = 1e-9));
        }
    }
}
