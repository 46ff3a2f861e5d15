//! Cartesian sampling of the mechanism for external renderers.

use nalgebra::Point2;
use pd_sim::{PulleyState, Trajectory};

/// Fixed drawing geometry of the rig.
///
/// Distances are in the renderer's scene units; the defaults reproduce the
/// reference rig (pulley centre at (3, 4), rim radius 0.65, bob hung 2.3
/// below the pivot at zero displacement).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigGeometry {
    /// Pulley centre
    pub center: Point2<f64>,
    /// Pulley rim radius
    pub radius: f64,
    /// Hang length from the pivot to the bob at x = 0
    pub hang_offset: f64,
}

impl Default for RigGeometry {
    fn default() -> Self {
        Self {
            center: Point2::new(3.0, 4.0),
            radius: 0.65,
            hang_offset: 2.3,
        }
    }
}

/// Joint positions at one time sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CartesianFrame {
    /// Cord pivot on the swing side of the rim
    pub pivot: Point2<f64>,
    /// Swinging bob
    pub bob: Point2<f64>,
    /// Cord anchor on the spring side of the rim
    pub anchor: Point2<f64>,
    /// Moving end of the spring
    pub spring_end: Point2<f64>,
}

impl RigGeometry {
    /// Project one state into joint positions.
    ///
    /// The bob hangs `hang_offset + x` from the pivot along the cord
    /// direction (sin phi, -cos phi); the spring end on the other side of
    /// the pulley moves by the same x.
    pub fn frame(&self, state: &PulleyState) -> CartesianFrame {
        let pivot = Point2::new(self.center.x - self.radius, self.center.y);
        let anchor = Point2::new(self.center.x + self.radius, self.center.y);

        let hang = self.hang_offset + state.x;
        let (sin_phi, cos_phi) = state.phi.sin_cos();
        let bob = Point2::new(pivot.x + hang * sin_phi, pivot.y - hang * cos_phi);

        let spring_end = Point2::new(anchor.x, self.center.y + state.x - self.hang_offset);

        CartesianFrame {
            pivot,
            bob,
            anchor,
            spring_end,
        }
    }

    /// Project a whole trajectory; one frame per grid sample.
    pub fn sample(&self, trajectory: &Trajectory<PulleyState>) -> Vec<CartesianFrame> {
        trajectory.states.iter().map(|s| self.frame(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_hang_puts_bob_below_pivot() {
        let rig = RigGeometry::default();
        let frame = rig.frame(&PulleyState::at_rest(0.0, 0.0));
        assert_eq!(frame.pivot, Point2::new(2.35, 4.0));
        assert_eq!(frame.anchor, Point2::new(3.65, 4.0));
        assert!((frame.bob.x - frame.pivot.x).abs() < 1e-12);
        assert!((frame.bob.y - (frame.pivot.y - 2.3)).abs() < 1e-12);
    }

    #[test]
    fn swing_rotates_the_bob_about_the_pivot() {
        let rig = RigGeometry::default();
        let frame = rig.frame(&PulleyState::at_rest(0.0, std::f64::consts::FRAC_PI_2));
        // Quarter turn: bob level with the pivot, hang length to the right.
        assert!((frame.bob.x - (frame.pivot.x + 2.3)).abs() < 1e-12);
        assert!((frame.bob.y - frame.pivot.y).abs() < 1e-12);
    }

    #[test]
    fn displacement_lengthens_cord_and_lifts_spring() {
        let rig = RigGeometry::default();
        let x = 0.25;
        let frame = rig.frame(&PulleyState::at_rest(x, 0.0));
        assert!((frame.bob.y - (frame.pivot.y - 2.3 - x)).abs() < 1e-12);
        assert!((frame.spring_end.y - (4.0 + x - 2.3)).abs() < 1e-12);
        assert_eq!(frame.spring_end.x, frame.anchor.x);
    }

    #[test]
    fn one_frame_per_sample() {
        let rig = RigGeometry::default();
        let traj = Trajectory {
            t: vec![0.0, 0.5, 1.0],
            states: vec![
                PulleyState::at_rest(0.0, 0.0),
                PulleyState::at_rest(0.1, 0.2),
                PulleyState::at_rest(0.2, 0.4),
            ],
        };
        let frames = rig.sample(&traj);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0], rig.frame(&traj.states[0]));
    }
}
