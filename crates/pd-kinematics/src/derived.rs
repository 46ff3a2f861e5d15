//! Derived kinematic and dynamic trajectories.

use pd_sim::{DynamicModel, PulleyState, PulleySystem, SimResult, Trajectory};
use rayon::prelude::*;

use crate::path::curvature_radius;

/// Secondary quantities recovered from a solved trajectory.
///
/// Everything here is an algebraic function of the stored states and the
/// accelerations re-derived from the equations of motion; nothing is
/// finite-differenced. All arrays are aligned index-for-index with the grid
/// that produced the trajectory.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedTrajectory {
    /// Block acceleration (m/s²)
    pub x_ddot: Vec<f64>,
    /// Swing angular acceleration (rad/s²)
    pub phi_ddot: Vec<f64>,
    /// Effective cord length l + x - r*phi (m)
    pub cord_len: Vec<f64>,
    /// Cord length rate x_dot - r*phi_dot (m/s)
    pub cord_rate: Vec<f64>,
    /// Reaction force along the swing (epsilon) axis (N)
    pub n_eps: Vec<f64>,
    /// Reaction force along the nu axis (N)
    pub n_nu: Vec<f64>,
    /// Curvature radius of the bob path (m), +inf on straight segments
    pub curvature_radius: Vec<f64>,
}

/// Post-process a solved trajectory into its derived quantities.
///
/// Accelerations come from re-invoking the equations of motion on every
/// stored sample, so they are consistent with the ODE to machine precision
/// instead of carrying a finite-difference truncation error on top of the
/// integrator's own. The per-sample map is pure, so evaluating it in
/// parallel returns the same values as a sequential pass.
pub fn derive(
    system: &PulleySystem,
    trajectory: &Trajectory<PulleyState>,
) -> SimResult<DerivedTrajectory> {
    let rates: Vec<PulleyState> = trajectory
        .states
        .par_iter()
        .zip(trajectory.t.par_iter())
        .map(|(s, &t)| system.rhs(t, s))
        .collect::<SimResult<Vec<_>>>()?;

    let p = &system.params;
    let n = trajectory.len();
    let mut out = DerivedTrajectory {
        x_ddot: Vec::with_capacity(n),
        phi_ddot: Vec::with_capacity(n),
        cord_len: Vec::with_capacity(n),
        cord_rate: Vec::with_capacity(n),
        n_eps: Vec::with_capacity(n),
        n_nu: Vec::with_capacity(n),
        curvature_radius: Vec::with_capacity(n),
    };

    for (s, d) in trajectory.states.iter().zip(&rates) {
        let x_ddot = d.x_dot;
        let phi_ddot = d.phi_dot;
        let l_eff = p.cord_length + s.x - p.pulley_radius * s.phi;
        let dl = s.x_dot - p.pulley_radius * s.phi_dot;

        let (sin_phi, cos_phi) = s.phi.sin_cos();
        // Transverse and radial force balances on the bob, expressed in the
        // swing-aligned (epsilon, nu) axes.
        let swing = l_eff * phi_ddot + p.pulley_radius * s.phi_dot * s.phi_dot
            + 2.0 * dl * s.phi_dot;
        let radial = x_ddot - l_eff * s.phi_dot * s.phi_dot;
        let n_eps = -p.bob_mass * swing * cos_phi - p.bob_mass * radial * sin_phi;
        let n_nu = -p.bob_mass * swing * sin_phi + p.bob_mass * radial * cos_phi
            - p.stiffness * s.x
            - (p.block_mass + p.bob_mass) * p.gravity;

        out.x_ddot.push(x_ddot);
        out.phi_ddot.push(phi_ddot);
        out.cord_len.push(l_eff);
        out.cord_rate.push(dl);
        out.n_eps.push(n_eps);
        out.n_nu.push(n_nu);
        out.curvature_radius
            .push(curvature_radius(p, s, x_ddot, phi_ddot));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pd_core::TimeGrid;
    use pd_sim::{IntegrateOptions, PulleyParams, integrate};

    fn system(stiffness: f64, gravity: f64) -> PulleySystem {
        PulleySystem::new(PulleyParams::new(1.0, 0.1, 1.0, 0.4, stiffness, gravity).unwrap())
    }

    #[test]
    fn static_hang_reaction_carries_total_weight() {
        // At rest, straight down: no transverse reaction, the nu component
        // holds the whole (M + m) weight.
        let system = system(50.0, 9.81);
        let grid = TimeGrid::new(0.0, 1.0, 10).unwrap();
        let traj = integrate(
            &system,
            &grid,
            PulleyState::at_rest(0.0, 0.0),
            &IntegrateOptions::default(),
        )
        .unwrap();
        let derived = derive(&system, &traj).unwrap();

        let weight = (1.0 + 0.1) * 9.81;
        for i in 0..traj.len() {
            assert!(derived.x_ddot[i].abs() < 1e-9);
            assert!(derived.phi_ddot[i].abs() < 1e-9);
            assert!(derived.n_eps[i].abs() < 1e-9);
            assert!((derived.n_nu[i] + weight).abs() < 1e-8);
            assert!((derived.cord_len[i] - 1.0).abs() < 1e-9);
            assert!(derived.cord_rate[i].abs() < 1e-9);
        }
    }

    #[test]
    fn unforced_rig_has_zero_reactions() {
        let system = system(0.0, 0.0);
        let grid = TimeGrid::new(0.0, 1.0, 10).unwrap();
        let traj = integrate(
            &system,
            &grid,
            PulleyState::at_rest(0.0, 0.4),
            &IntegrateOptions::default(),
        )
        .unwrap();
        let derived = derive(&system, &traj).unwrap();
        for i in 0..traj.len() {
            assert!(derived.n_eps[i].abs() < 1e-12);
            assert!(derived.n_nu[i].abs() < 1e-12);
        }
    }

    #[test]
    fn spinning_state_reactions() {
        // Hand-worked sample: phi = 0, phi_dot = 2, x_dot = 0.8, c = g = 0.
        //   x_dd = m*l*phi_dot² / a11 = 0.4 / 0.6 = 2/3
        //   phi_dd = -phi_dot*(2*x_dot - r*phi_dot) / l = -1.6
        //   dl = x_dot - r*phi_dot = 0, l_eff = l = 1
        //   swing = l_eff*phi_dd + r*phi_dot² = -1.6 + 1.6 = 0 => n_eps = 0
        //   radial = x_dd - l_eff*phi_dot² = 2/3 - 4 => n_nu = m*radial
        let system = system(0.0, 0.0);
        let state = PulleyState {
            x: 0.0,
            phi: 0.0,
            x_dot: 0.8,
            phi_dot: 2.0,
        };
        let traj = Trajectory {
            t: vec![0.0],
            states: vec![state],
        };
        let derived = derive(&system, &traj).unwrap();
        assert!(derived.n_eps[0].abs() < 1e-12);
        assert!((derived.n_nu[0] - 0.1 * (2.0 / 3.0 - 4.0)).abs() < 1e-12);
    }

    #[test]
    fn arrays_stay_grid_aligned() {
        let system = system(50.0, 9.81);
        let grid = TimeGrid::new(0.0, 2.0, 333).unwrap();
        let traj = integrate(
            &system,
            &grid,
            PulleyState::at_rest(0.02, 0.1),
            &IntegrateOptions::default(),
        )
        .unwrap();
        let derived = derive(&system, &traj).unwrap();
        assert_eq!(derived.x_ddot.len(), 333);
        assert_eq!(derived.phi_ddot.len(), 333);
        assert_eq!(derived.cord_len.len(), 333);
        assert_eq!(derived.cord_rate.len(), 333);
        assert_eq!(derived.n_eps.len(), 333);
        assert_eq!(derived.n_nu.len(), 333);
        assert_eq!(derived.curvature_radius.len(), 333);
    }

    #[test]
    fn parallel_map_matches_sequential_rhs() {
        let system = system(50.0, 9.81);
        let grid = TimeGrid::new(0.0, 2.0, 100).unwrap();
        let traj = integrate(
            &system,
            &grid,
            PulleyState::at_rest(0.02, 0.3),
            &IntegrateOptions::default(),
        )
        .unwrap();
        let derived = derive(&system, &traj).unwrap();

        for (i, (t, s)) in traj.t.iter().zip(&traj.states).enumerate() {
            let d = system.rhs(*t, s).unwrap();
            assert_eq!(derived.x_ddot[i], d.x_dot);
            assert_eq!(derived.phi_ddot[i], d.phi_dot);
        }
    }
}
