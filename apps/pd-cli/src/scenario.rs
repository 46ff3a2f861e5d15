//! YAML scenario files for the driver.
//!
//! The file format mirrors the validated core types field-for-field but is
//! deserialized separately, so every loaded scenario still passes through
//! the constructors and their eager validation.

use std::f64::consts::{FRAC_PI_6, PI};

use pd_core::TimeGrid;
use pd_sim::{PulleyParams, PulleyState, SimResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub params: ParamsSpec,
    pub initial: InitialSpec,
    pub grid: GridSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamsSpec {
    pub block_mass_kg: f64,
    pub bob_mass_kg: f64,
    pub cord_length_m: f64,
    pub pulley_radius_m: f64,
    pub stiffness_n_m: f64,
    pub gravity_m_s2: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialSpec {
    pub x_m: f64,
    pub phi_rad: f64,
    pub x_dot_m_s: f64,
    pub phi_dot_rad_s: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSpec {
    pub start_s: f64,
    pub end_s: f64,
    pub samples: usize,
}

impl Scenario {
    /// The reference rig: {M=1, m=0.1, l=1, r=0.4, c=50, g=9.81}, released
    /// from x = 0.02 m at a pi/6 swing, integrated over [0, 3*pi].
    pub fn reference() -> Self {
        Self {
            params: ParamsSpec {
                block_mass_kg: 1.0,
                bob_mass_kg: 0.1,
                cord_length_m: 1.0,
                pulley_radius_m: 0.4,
                stiffness_n_m: 50.0,
                gravity_m_s2: 9.81,
            },
            initial: InitialSpec {
                x_m: 0.02,
                phi_rad: FRAC_PI_6,
                x_dot_m_s: 0.0,
                phi_dot_rad_s: 0.0,
            },
            grid: GridSpec {
                start_s: 0.0,
                end_s: 3.0 * PI,
                samples: 1000,
            },
        }
    }

    /// Validate and convert into the core pipeline inputs.
    pub fn build(&self) -> SimResult<(PulleyParams, PulleyState, TimeGrid)> {
        let params = PulleyParams::new(
            self.params.block_mass_kg,
            self.params.bob_mass_kg,
            self.params.cord_length_m,
            self.params.pulley_radius_m,
            self.params.stiffness_n_m,
            self.params.gravity_m_s2,
        )?;
        let grid = TimeGrid::new(self.grid.start_s, self.grid.end_s, self.grid.samples)?;
        let initial = PulleyState {
            x: self.initial.x_m,
            phi: self.initial.phi_rad,
            x_dot: self.initial.x_dot_m_s,
            phi_dot: self.initial.phi_dot_rad_s,
        };
        Ok((params, initial, grid))
    }
}
