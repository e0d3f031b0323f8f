//! Fresnel boundary evaluation

use crate::mc::*;

/// Incident cosines above this are treated as normal incidence, where the
/// averaged sine/tangent form degenerates to 0/0.
const NEAR_NORMAL_COS: Float = 1.0 - 1.0e-12;

/// Outcome of evaluating a refractive index step at a boundary surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// Entering a denser medium. The photon always transmits, shedding the
    /// normal-incidence specular fraction of its weight.
    SpecularTransmit {
        /// Fraction of the photon weight lost to specular reflection.
        loss_fraction: Float,

        /// Transmission angle in radians.
        transmission_angle: Float,
    },

    /// Partial reflection. Reflect with probability `reflectance`, transmit
    /// otherwise.
    Partial {
        /// Fresnel reflectance for unpolarized light.
        reflectance: Float,

        /// Transmission angle in radians.
        transmission_angle: Float,
    },

    /// Incident angle beyond the critical angle. The photon always reflects.
    TotalInternal,
}

/// Evaluate the refractive index step at a boundary surface for unpolarized
/// light, using the averaged sine/tangent form of Fresnel's equations.
///
/// * `cos_incident` - Magnitude of the direction cosine on the boundary
///                    normal axis.
/// * `n1`           - Refractive index of the medium the photon is in.
/// * `n2`           - Refractive index of the medium beyond the boundary.
pub fn evaluate_boundary(cos_incident: Float, n1: Float, n2: Float) -> SurfaceEvent {
    debug_assert!(
        (0.0..=1.0).contains(&cos_incident),
        "incident cosine {} outside [0, 1]",
        cos_incident
    );

    let incident_angle = acos(cos_incident);

    // Stepping into a denser medium never reflects the whole photon; the
    // specular fraction is shed from its weight instead.
    if n2 > n1 {
        let transmission_angle = asin(n1 / n2 * sin(incident_angle));
        let loss_fraction = (n1 - n2) * (n1 - n2) / ((n1 + n2) * (n1 + n2));
        return SurfaceEvent::SpecularTransmit {
            loss_fraction,
            transmission_angle,
        };
    }

    // Matched indices pass straight through.
    if n1 == n2 {
        return SurfaceEvent::Partial {
            reflectance: 0.0,
            transmission_angle: incident_angle,
        };
    }

    let critical_angle = asin(n2 / n1);
    if incident_angle > critical_angle {
        return SurfaceEvent::TotalInternal;
    }

    let transmission_angle = asin(n1 / n2 * sin(incident_angle));

    let reflectance = if cos_incident > NEAR_NORMAL_COS {
        let r0 = (n1 - n2) / (n1 + n2);
        r0 * r0
    } else {
        let sin_minus = sin(incident_angle - transmission_angle);
        let sin_plus = sin(incident_angle + transmission_angle);
        let tan_minus = tan(incident_angle - transmission_angle);
        let tan_plus = tan(incident_angle + transmission_angle);
        0.5 * (sin_minus * sin_minus / (sin_plus * sin_plus)
            + tan_minus * tan_minus / (tan_plus * tan_plus))
    };

    assert!(
        (0.0..=1.0).contains(&reflectance),
        "boundary reflectance {} outside [0, 1] (cos_incident: {}, n1: {}, n2: {})",
        reflectance,
        cos_incident,
        n1,
        n2
    );

    SurfaceEvent::Partial {
        reflectance,
        transmission_angle,
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
