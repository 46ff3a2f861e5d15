//! Cartesian kinematics of the bob and path curvature.

use pd_sim::{PulleyParams, PulleyState};

/// Instantaneous Cartesian velocity and acceleration of the bob.
struct BobKinematics {
    vx: f64,
    vy: f64,
    ax: f64,
    ay: f64,
}

/// Differentiate the bob position pivot + l_eff*(sin phi, -cos phi) twice,
/// using the exact accelerations instead of finite differences.
fn bob_kinematics(
    params: &PulleyParams,
    s: &PulleyState,
    x_ddot: f64,
    phi_ddot: f64,
) -> BobKinematics {
    let l_eff = params.cord_length + s.x - params.pulley_radius * s.phi;
    let dl = s.x_dot - params.pulley_radius * s.phi_dot;
    let ddl = x_ddot - params.pulley_radius * phi_ddot;
    let (sin_phi, cos_phi) = s.phi.sin_cos();
    let w = s.phi_dot;

    BobKinematics {
        vx: dl * sin_phi + l_eff * cos_phi * w,
        vy: -dl * cos_phi + l_eff * sin_phi * w,
        ax: ddl * sin_phi + 2.0 * dl * cos_phi * w + l_eff * cos_phi * phi_ddot
            - l_eff * sin_phi * w * w,
        ay: -ddl * cos_phi + 2.0 * dl * sin_phi * w + l_eff * sin_phi * phi_ddot
            + l_eff * cos_phi * w * w,
    }
}

/// Curvature radius of the bob path: R = |v|³ / |vx*ay - vy*ax|.
///
/// Returns +inf where the path is locally straight (or the bob is at rest),
/// matching the geometric limit.
pub fn curvature_radius(
    params: &PulleyParams,
    s: &PulleyState,
    x_ddot: f64,
    phi_ddot: f64,
) -> f64 {
    let k = bob_kinematics(params, s, x_ddot, phi_ddot);
    let speed_sq = k.vx * k.vx + k.vy * k.vy;
    let cross = (k.vx * k.ay - k.vy * k.ax).abs();
    if cross == 0.0 {
        return f64::INFINITY;
    }
    speed_sq.powf(1.5) / cross
}
