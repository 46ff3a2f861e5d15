//! Result data types.

use pd_kinematics::{CartesianFrame, DerivedTrajectory};
use pd_sim::{PulleyState, Trajectory};
use serde::{Deserialize, Serialize};

/// One state sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub time_s: f64,
    pub x_m: f64,
    pub phi_rad: f64,
    pub x_dot_m_s: f64,
    pub phi_dot_rad_s: f64,
}

/// One derived sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    pub time_s: f64,
    pub x_ddot_m_s2: f64,
    pub phi_ddot_rad_s2: f64,
    pub cord_len_m: f64,
    pub cord_rate_m_s: f64,
    pub n_eps_n: f64,
    pub n_nu_n: f64,
    pub curvature_radius_m: f64,
}

/// One Cartesian frame, flattened for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub time_s: f64,
    pub pivot_x: f64,
    pub pivot_y: f64,
    pub bob_x: f64,
    pub bob_y: f64,
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub spring_end_x: f64,
    pub spring_end_y: f64,
}

/// Flatten a state trajectory into rows.
pub fn state_records(trajectory: &Trajectory<PulleyState>) -> Vec<StateRecord> {
    trajectory
        .t
        .iter()
        .zip(&trajectory.states)
        .map(|(&time_s, s)| StateRecord {
            time_s,
            x_m: s.x,
            phi_rad: s.phi,
            x_dot_m_s: s.x_dot,
            phi_dot_rad_s: s.phi_dot,
        })
        .collect()
}

/// Flatten a derived trajectory into rows aligned with the grid times.
pub fn derived_records(times: &[f64], derived: &DerivedTrajectory) -> Vec<DerivedRecord> {
    times
        .iter()
        .enumerate()
        .map(|(i, &time_s)| DerivedRecord {
            time_s,
            x_ddot_m_s2: derived.x_ddot[i],
            phi_ddot_rad_s2: derived.phi_ddot[i],
            cord_len_m: derived.cord_len[i],
            cord_rate_m_s: derived.cord_rate[i],
            n_eps_n: derived.n_eps[i],
            n_nu_n: derived.n_nu[i],
            curvature_radius_m: derived.curvature_radius[i],
        })
        .collect()
}

/// Flatten sampled frames into rows aligned with the grid times.
pub fn frame_records(times: &[f64], frames: &[CartesianFrame]) -> Vec<FrameRecord> {
    times
        .iter()
        .zip(frames)
        .map(|(&time_s, f)| FrameRecord {
            time_s,
            pivot_x: f.pivot.x,
            pivot_y: f.pivot.y,
            bob_x: f.bob.x,
            bob_y: f.bob.y,
            anchor_x: f.anchor.x,
            anchor_y: f.anchor.y,
            spring_end_x: f.spring_end.x,
            spring_end_y: f.spring_end.y,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_rows_follow_the_trajectory() {
        let traj = Trajectory {
            t: vec![0.0, 0.5],
            states: vec![PulleyState::at_rest(0.1, 0.2), PulleyState::at_rest(0.3, 0.4)],
        };
        let rows = state_records(&traj);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].time_s, 0.5);
        assert_eq!(rows[1].x_m, 0.3);
        assert_eq!(rows[1].phi_rad, 0.4);
        assert_eq!(rows[1].x_dot_m_s, 0.0);
    }

    #[test]
    fn records_round_trip_through_json() {
        let row = StateRecord {
            time_s: 1.25,
            x_m: 0.02,
            phi_rad: 0.5,
            x_dot_m_s: -0.1,
            phi_dot_rad_s: 0.3,
        };
        let json = serde_json::to_string(&row).unwrap();
        let back: StateRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(row, back);
    }
}
